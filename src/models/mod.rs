//! Core data models
//!
//! Value types shared by the report pipeline: monetary amounts, reporting
//! periods, and the prior-balance sort rule.

pub mod money;
pub mod period;
pub mod sort;

pub use money::Money;
pub use period::Period;
pub use sort::{sort_prior_balance_first, ReportLine, PRIOR_BALANCE_CODE};

/// A single data row: arbitrary key-value record supplied by the caller.
///
/// The row schema is determined by the caller, not the template; template
/// columns index into rows by key at render time, and missing keys render
/// as empty cells.
pub type Row = serde_json::Map<String, serde_json::Value>;
