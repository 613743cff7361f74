//! Trash management commands.

use clap::{Args, Subcommand};

use cloudbox_core::config::ClientConfig;
use cloudbox_core::error::AppError;
use cloudbox_explorer::TrashReconciler;

use crate::output::{self, OutputFormat, TrashRow};

/// Arguments for `trash`
#[derive(Debug, Args)]
pub struct TrashArgs {
    #[command(subcommand)]
    pub command: TrashCommand,
}

/// Trash subcommands
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List trashed files and folders
    List,
    /// Restore one trashed item
    Restore {
        /// The id refers to a folder
        #[arg(long)]
        folder: bool,
        /// File or folder id
        id: i64,
    },
    /// Erase one trashed item for good
    Purge {
        /// The id refers to a folder
        #[arg(long)]
        folder: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// File or folder id
        id: i64,
    },
    /// Erase everything in the trash
    Empty {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn confirm(prompt: String) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

/// Execute trash commands
pub async fn execute(
    args: &TrashArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let trash = TrashReconciler::new(super::connect(config).await?);

    match &args.command {
        TrashCommand::List => {
            let listing = trash.load().await?;
            match format {
                OutputFormat::Json => output::print_json(&listing),
                OutputFormat::Table => {
                    let rows: Vec<TrashRow> = listing
                        .folders
                        .iter()
                        .map(TrashRow::folder)
                        .chain(listing.files.iter().map(TrashRow::file))
                        .collect();
                    output::print_list(&rows, format);
                }
            }
        }
        TrashCommand::Restore { folder, id } => {
            let item = super::item_ref(*id, *folder)?;
            trash.restore(item).await?;
            output::print_success(&format!("Restored {}", item));
        }
        TrashCommand::Purge { folder, yes, id } => {
            let item = super::item_ref(*id, *folder)?;
            if !yes && !confirm(format!("Erase {} for good?", item))? {
                output::print_warning("Cancelled");
                return Ok(());
            }
            trash.delete_permanently(item).await?;
            output::print_success(&format!("Erased {}", item));
        }
        TrashCommand::Empty { yes } => {
            let listing = trash.load().await?;
            if listing.is_empty() {
                output::print_success("The trash is already empty");
                return Ok(());
            }
            if !yes && !confirm(format!("Erase {} item(s) for good?", listing.len()))? {
                output::print_warning("Cancelled");
                return Ok(());
            }

            let report = trash.empty().await?;
            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => {
                    output::print_success(&format!("Erased {} item(s)", report.deleted));
                    if report.already_gone > 0 {
                        output::print_kv("Already gone", &report.already_gone.to_string());
                    }
                }
            }
        }
    }

    Ok(())
}
