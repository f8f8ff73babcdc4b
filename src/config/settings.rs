//! Persisted report-formatting preferences
//!
//! The preferences file stores what the agency configured once (letterhead
//! lines, colors, logo, margins, watermark). Every field is optional: the
//! settings resolver in `reports::settings` fills the gaps with fixed
//! defaults when building the effective per-export settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::CaissePaths;
use crate::error::CaisseError;
use crate::reports::settings::{Margins, Orientation};

/// Persisted report preferences
///
/// All formatting fields are optional; absent fields fall back to the
/// hard-coded defaults at resolution time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPreferences {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Letterhead lines printed at the top of every report (up to 4)
    #[serde(default)]
    pub header_lines: Vec<String>,

    /// Footer lines printed at the bottom of every report (up to 4)
    #[serde(default)]
    pub footer_lines: Vec<String>,

    /// Whether the footer block is printed at all (defaults to shown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_footer: Option<bool>,

    /// Path to the agency logo image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,

    /// Principal color, "#RRGGBB"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_color: Option<String>,

    /// Table header color, "#RRGGBB"; falls back to the principal color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_header_color: Option<String>,

    /// Page margins in millimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,

    /// Page orientation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    /// Body font name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Body font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Diagonal watermark text; `None` disables the watermark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,

    /// Whether page numbers are printed (defaults to shown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_numbers: Option<bool>,
}

fn default_schema_version() -> u32 {
    1
}

impl ReportPreferences {
    /// Load preferences from disk, or return defaults if no file exists
    pub fn load_or_create(paths: &CaissePaths) -> Result<Self, CaisseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CaisseError::Io(format!("Failed to read settings file: {}", e)))?;

            let prefs: ReportPreferences = serde_json::from_str(&contents)
                .map_err(|e| CaisseError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(prefs)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(ReportPreferences::default())
        }
    }

    /// Save preferences to disk
    pub fn save(&self, paths: &CaissePaths) -> Result<(), CaisseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CaisseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| CaisseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
