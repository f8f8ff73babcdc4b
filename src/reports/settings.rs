//! Effective export settings and the settings resolver
//!
//! Exactly one effective [`ExportSettings`] instance exists per export call.
//! It is produced by mapping the persisted preferences (all-optional fields)
//! onto the fixed defaults, then applying a per-call override fragment
//! field by field. Resolution is pure: same inputs, same output, no I/O.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::settings::ReportPreferences;

/// Fixed letterhead fallback when no header lines are configured
pub const DEFAULT_HEADER_LINES: [&str; 3] = [
    "REPUBLIQUE DEMOCRATIQUE DU CONGO",
    "MINISTERE DES FINANCES",
    "AGENCE COMPTABLE",
];

/// Fixed footer fallback when no footer lines are configured
pub const DEFAULT_FOOTER_LINES: [&str; 2] =
    ["AGENCE COMPTABLE", "B.P. 1234 - KINSHASA / GOMBE"];

/// Maximum number of header or footer lines a report prints
pub const MAX_BANNER_LINES: usize = 4;

const DEFAULT_PRINCIPAL_COLOR: &str = "#1F4E79";
const DEFAULT_FONT_NAME: &str = "Helvetica";
const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 15.0,
            bottom: 15.0,
            left: 12.0,
            right: 12.0,
        }
    }
}

/// The effective settings consumed by the renderer adapters
///
/// Every field is concrete; the resolver guarantees a value for each from
/// either the persisted preferences or a documented fallback. Read-only per
/// export call, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Letterhead lines (at most [`MAX_BANNER_LINES`])
    pub header_lines: Vec<String>,
    /// Footer lines (at most [`MAX_BANNER_LINES`])
    pub footer_lines: Vec<String>,
    /// Whether the footer block is printed
    pub show_footer: bool,
    /// Logo image reference; carried for callers, not drawn by the adapters
    pub logo: Option<PathBuf>,
    /// Principal color, "#RRGGBB"
    pub principal_color: String,
    /// Table header fill color, "#RRGGBB"
    pub table_header_color: String,
    /// Page margins in millimeters
    pub margins: Margins,
    /// Page orientation
    pub orientation: Orientation,
    /// Body font name
    pub font_name: String,
    /// Body font size in points
    pub font_size: f32,
    /// Diagonal watermark text; `None` disables the overlay
    pub watermark: Option<String>,
    /// Whether page numbers are printed
    pub page_numbers: bool,
}

impl Default for ExportSettings {
    /// The fixed, hard-coded default settings constant
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES.iter().map(|s| s.to_string()).collect(),
            footer_lines: DEFAULT_FOOTER_LINES.iter().map(|s| s.to_string()).collect(),
            show_footer: true,
            logo: None,
            principal_color: DEFAULT_PRINCIPAL_COLOR.to_string(),
            table_header_color: DEFAULT_PRINCIPAL_COLOR.to_string(),
            margins: Margins::default(),
            orientation: Orientation::Portrait,
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            watermark: None,
            page_numbers: true,
        }
    }
}

impl ExportSettings {
    /// Build the effective settings for one export call.
    ///
    /// Mapping rules from the persisted preferences:
    /// - empty header/footer line lists fall back to the fixed letterhead;
    ///   configured lists are truncated to [`MAX_BANNER_LINES`]
    /// - the table header color falls back to the principal color
    /// - footer visibility and page numbering default to shown
    ///
    /// The override fragment is applied last, field by field.
    pub fn resolve(
        base: Option<&ReportPreferences>,
        overrides: Option<&SettingsOverride>,
    ) -> Self {
        let mut settings = match base {
            Some(prefs) => Self::from_preferences(prefs),
            None => Self::default(),
        };

        if let Some(ovr) = overrides {
            ovr.apply(&mut settings);
        }

        settings
    }

    /// Total mapping from persisted preferences onto the default constant
    fn from_preferences(prefs: &ReportPreferences) -> Self {
        let defaults = Self::default();

        let principal_color = prefs
            .principal_color
            .clone()
            .unwrap_or(defaults.principal_color);
        let table_header_color = prefs
            .table_header_color
            .clone()
            .unwrap_or_else(|| principal_color.clone());

        Self {
            header_lines: banner_lines(&prefs.header_lines, &defaults.header_lines),
            footer_lines: banner_lines(&prefs.footer_lines, &defaults.footer_lines),
            show_footer: prefs.show_footer.unwrap_or(true),
            logo: prefs.logo.clone(),
            principal_color,
            table_header_color,
            margins: prefs.margins.unwrap_or_default(),
            orientation: prefs.orientation.unwrap_or_default(),
            font_name: prefs.font_name.clone().unwrap_or(defaults.font_name),
            font_size: prefs.font_size.unwrap_or(defaults.font_size),
            watermark: prefs.watermark.clone(),
            page_numbers: prefs.page_numbers.unwrap_or(true),
        }
    }
}

fn banner_lines(configured: &[String], fallback: &[String]) -> Vec<String> {
    if configured.is_empty() {
        fallback.to_vec()
    } else {
        configured.iter().take(MAX_BANNER_LINES).cloned().collect()
    }
}

/// Per-call override fragment; every present field wins over the base
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_footer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_numbers: Option<bool>,
}

impl SettingsOverride {
    /// Shallow field-by-field merge: present fields replace the base value
    fn apply(&self, settings: &mut ExportSettings) {
        if let Some(lines) = &self.header_lines {
            settings.header_lines = lines.iter().take(MAX_BANNER_LINES).cloned().collect();
        }
        if let Some(lines) = &self.footer_lines {
            settings.footer_lines = lines.iter().take(MAX_BANNER_LINES).cloned().collect();
        }
        if let Some(show) = self.show_footer {
            settings.show_footer = show;
        }
        if let Some(color) = &self.principal_color {
            settings.principal_color = color.clone();
        }
        if let Some(color) = &self.table_header_color {
            settings.table_header_color = color.clone();
        }
        if let Some(margins) = self.margins {
            settings.margins = margins;
        }
        if let Some(orientation) = self.orientation {
            settings.orientation = orientation;
        }
        if let Some(font) = &self.font_name {
            settings.font_name = font.clone();
        }
        if let Some(size) = self.font_size {
            settings.font_size = size;
        }
        if let Some(text) = &self.watermark {
            settings.watermark = Some(text.clone());
        }
        if let Some(numbers) = self.page_numbers {
            settings.page_numbers = numbers;
        }
    }
}

/// Parse a "#RRGGBB" color into its components; malformed input maps to black
pub fn parse_hex_color(color: &str) -> (u8, u8, u8) {
    let hex = color.trim_start_matches('#');
    // Length is in bytes; the ASCII check keeps the pair slices below on
    // char boundaries for multibyte input
    if hex.len() != 6 || !hex.is_ascii() {
        return (0, 0, 0);
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}
