//! History CLI command
//!
//! Prints the export history recorded in the audit log.

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::CaissePaths;
use crate::error::CaisseResult;

/// Arguments for the history command
#[derive(Args)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Show every recorded entry
    #[arg(short, long)]
    pub all: bool,
}

/// Handle the history command
pub fn handle_history_command(paths: &CaissePaths, args: HistoryArgs) -> CaisseResult<()> {
    let logger = AuditLogger::new(paths.audit_log());

    let entries = if args.all {
        logger.read_all()?
    } else {
        logger.read_recent(args.limit)?
    };

    if entries.is_empty() {
        println!("Aucun export enregistre.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!();
    println!(
        "{} entree(s) affichee(s) sur {}",
        entries.len(),
        logger.entry_count()?
    );

    Ok(())
}
