//! Report definition layer
//!
//! Declarative templates for the known report kinds, effective settings
//! resolution, the per-call export options bundle, and the shared
//! format-independent table materialization.

pub mod options;
pub mod settings;
pub mod table;
pub mod template;

pub use options::ExportOptions;
pub use settings::{ExportSettings, Margins, Orientation, SettingsOverride};
pub use table::RenderedTable;
pub use template::{Aggregate, ColumnFormat, ReportKind, ReportTemplate, TableColumn};
