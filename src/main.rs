use anyhow::Result;
use clap::{Parser, Subcommand};

use caisse::cli::{
    handle_export_command, handle_history_command, handle_settings_command, ExportArgs,
    HistoryArgs, SettingsCommands,
};
use caisse::config::CaissePaths;
use caisse::services::features;

#[derive(Parser)]
#[command(
    name = "caisse",
    version,
    about = "Export pipeline for the agency cash-desk reports",
    long_about = "caisse renders the accounting desk's periodic reports (feuille de \
                  caisse, sommaire des recettes et depenses, programmation des \
                  depenses) into PDF, Excel and Word documents, with the agency \
                  letterhead, colors and watermark resolved from saved preferences."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a report from a rows file
    Export(ExportArgs),

    /// View or change the report preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show the export history
    History(HistoryArgs),

    /// Budget alerts
    Alerts,

    /// User management
    Users,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CaissePaths::new()?;

    match cli.command {
        Commands::Export(args) => {
            handle_export_command(&paths, args)?;
        }
        Commands::Settings(cmd) => {
            handle_settings_command(&paths, cmd)?;
        }
        Commands::History(args) => {
            handle_history_command(&paths, args)?;
        }
        Commands::Alerts => {
            if !features::alerts().is_available() {
                println!("Les alertes budgetaires ne sont pas encore disponibles.");
            }
        }
        Commands::Users => {
            if !features::user_management().is_available() {
                println!("La gestion des utilisateurs n'est pas encore disponible.");
            }
        }
    }

    Ok(())
}
