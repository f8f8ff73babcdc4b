//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the export pipeline.

pub mod export;
pub mod history;
pub mod settings;

pub use export::{handle_export_command, ExportArgs};
pub use history::{handle_history_command, HistoryArgs};
pub use settings::{handle_settings_command, SettingsCommands};
