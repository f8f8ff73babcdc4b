//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CaissePaths;
pub use settings::ReportPreferences;
