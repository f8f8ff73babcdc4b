//! Settings CLI commands
//!
//! Implements CLI commands for viewing and changing the persisted report
//! preferences.

use clap::Subcommand;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{CaissePaths, ReportPreferences};
use crate::error::{CaisseError, CaisseResult};
use crate::reports::settings::MAX_BANNER_LINES;
use crate::reports::{ExportSettings, Orientation};

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the effective report settings
    Show,
    /// Change one or more report preferences
    Set {
        /// Letterhead line (repeat to set several, replaces the whole block)
        #[arg(long = "header")]
        header_lines: Vec<String>,
        /// Footer line (repeat to set several, replaces the whole block)
        #[arg(long = "footer")]
        footer_lines: Vec<String>,
        /// Hide the footer block
        #[arg(long, conflicts_with = "footer_lines")]
        no_footer: bool,
        /// Principal color, "#RRGGBB"
        #[arg(long)]
        principal_color: Option<String>,
        /// Table header color, "#RRGGBB"
        #[arg(long)]
        table_header_color: Option<String>,
        /// Page orientation (portrait, landscape)
        #[arg(long)]
        orientation: Option<String>,
        /// Body font name
        #[arg(long)]
        font_name: Option<String>,
        /// Body font size in points
        #[arg(long)]
        font_size: Option<f32>,
        /// Diagonal watermark text
        #[arg(long, conflicts_with = "clear_watermark")]
        watermark: Option<String>,
        /// Remove the watermark
        #[arg(long)]
        clear_watermark: bool,
        /// Hide page numbers
        #[arg(long)]
        no_page_numbers: bool,
        /// Operator name recorded in the audit log
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show the settings file path
    Path,
}

/// Handle a settings command
pub fn handle_settings_command(paths: &CaissePaths, cmd: SettingsCommands) -> CaisseResult<()> {
    match cmd {
        SettingsCommands::Show => {
            let prefs = ReportPreferences::load_or_create(paths)?;
            let effective = ExportSettings::resolve(Some(&prefs), None);
            print_settings(&effective);
        }

        SettingsCommands::Set {
            header_lines,
            footer_lines,
            no_footer,
            principal_color,
            table_header_color,
            orientation,
            font_name,
            font_size,
            watermark,
            clear_watermark,
            no_page_numbers,
            user,
        } => {
            let mut prefs = ReportPreferences::load_or_create(paths)?;
            let mut changes = Vec::new();

            if !header_lines.is_empty() {
                check_banner(&header_lines, "header")?;
                prefs.header_lines = header_lines;
                changes.push("header".to_string());
            }
            if !footer_lines.is_empty() {
                check_banner(&footer_lines, "footer")?;
                prefs.footer_lines = footer_lines;
                prefs.show_footer = Some(true);
                changes.push("footer".to_string());
            }
            if no_footer {
                prefs.show_footer = Some(false);
                changes.push("show_footer=false".to_string());
            }
            if let Some(color) = principal_color {
                prefs.principal_color = Some(color.clone());
                changes.push(format!("principal_color={}", color));
            }
            if let Some(color) = table_header_color {
                prefs.table_header_color = Some(color.clone());
                changes.push(format!("table_header_color={}", color));
            }
            if let Some(value) = orientation {
                let parsed = parse_orientation(&value)?;
                prefs.orientation = Some(parsed);
                changes.push(format!("orientation={}", value.to_ascii_lowercase()));
            }
            if let Some(font) = font_name {
                prefs.font_name = Some(font.clone());
                changes.push(format!("font_name={}", font));
            }
            if let Some(size) = font_size {
                if !(6.0..=24.0).contains(&size) {
                    return Err(CaisseError::Config(format!(
                        "Font size out of range: {}. Use a value between 6 and 24",
                        size
                    )));
                }
                prefs.font_size = Some(size);
                changes.push(format!("font_size={}", size));
            }
            if let Some(text) = watermark {
                prefs.watermark = Some(text.clone());
                changes.push(format!("watermark={}", text));
            }
            if clear_watermark {
                prefs.watermark = None;
                changes.push("watermark cleared".to_string());
            }
            if no_page_numbers {
                prefs.page_numbers = Some(false);
                changes.push("page_numbers=false".to_string());
            }

            if changes.is_empty() {
                println!("Aucun changement demande.");
                return Ok(());
            }

            prefs.save(paths)?;

            let logger = AuditLogger::new(paths.audit_log());
            logger.log(&AuditEntry::settings_update(changes.join(", "), user))?;

            println!("Preferences enregistrees: {}", changes.join(", "));
        }

        SettingsCommands::Path => {
            println!("{}", paths.settings_file().display());
        }
    }

    Ok(())
}

fn check_banner(lines: &[String], which: &str) -> CaisseResult<()> {
    if lines.len() > MAX_BANNER_LINES {
        return Err(CaisseError::Config(format!(
            "Too many {} lines: {} (maximum {})",
            which,
            lines.len(),
            MAX_BANNER_LINES
        )));
    }
    Ok(())
}

fn parse_orientation(value: &str) -> CaisseResult<Orientation> {
    match value.to_ascii_lowercase().as_str() {
        "portrait" => Ok(Orientation::Portrait),
        "landscape" | "paysage" => Ok(Orientation::Landscape),
        other => Err(CaisseError::Config(format!(
            "Invalid orientation: '{}'. Use portrait or landscape",
            other
        ))),
    }
}

fn print_settings(settings: &ExportSettings) {
    println!("En-tete:");
    for line in &settings.header_lines {
        println!("  {}", line);
    }
    println!("Pied de page ({}):", on_off(settings.show_footer));
    for line in &settings.footer_lines {
        println!("  {}", line);
    }
    println!("Couleur principale:  {}", settings.principal_color);
    println!("Couleur des entetes: {}", settings.table_header_color);
    println!("Orientation:         {:?}", settings.orientation);
    println!(
        "Police:              {} {}pt",
        settings.font_name, settings.font_size
    );
    println!(
        "Marges (mm):         haut {} bas {} gauche {} droite {}",
        settings.margins.top, settings.margins.bottom, settings.margins.left, settings.margins.right
    );
    println!(
        "Filigrane:           {}",
        settings.watermark.as_deref().unwrap_or("(aucun)")
    );
    println!("Numeros de page:     {}", on_off(settings.page_numbers));
}

fn on_off(value: bool) -> &'static str {
    if value {
        "affiche"
    } else {
        "masque"
    }
}
