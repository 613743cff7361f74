//! Public share link commands.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::{Args, Subcommand};

use cloudbox_client::{HttpFacade, RemoteFacade, Session};
use cloudbox_core::config::ClientConfig;
use cloudbox_core::error::AppError;
use cloudbox_core::types::{FileId, ShareId};
use cloudbox_explorer::format::{format_datetime, format_file_size};

use crate::output::{self, OutputFormat, ShareRow};

/// Arguments for `share`
#[derive(Debug, Args)]
pub struct ShareArgs {
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Issue a public link to a file
    Create {
        /// File id
        file: i64,
        /// Expire the link after this many days
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    /// List issued links
    List {
        /// Only links for this file
        #[arg(long)]
        file: Option<i64>,
    },
    /// Revoke a link
    Revoke {
        /// Share id
        id: i64,
    },
}

/// Arguments for `shared`
#[derive(Debug, Args)]
pub struct SharedArgs {
    /// Share token, or the whole public URL
    pub token: String,
    /// Save the file instead of describing it
    #[arg(short, long)]
    pub download: bool,
    /// Where to save the file (defaults to its name in the current directory)
    #[arg(short, long, requires = "download")]
    pub output: Option<PathBuf>,
    /// Overwrite an existing local file
    #[arg(long, requires = "download")]
    pub force: bool,
}

/// The token out of a public URL such as `https://host/shared/{token}`.
pub fn token_from_link(link: &str) -> &str {
    link.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Open a public link. No sign-in needed.
pub async fn shared(
    args: &SharedArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let token = token_from_link(&args.token);
    let facade = HttpFacade::new(&config.api, Session::anonymous(config.api.base_url.clone()))?;
    let file = facade.open_shared(token).await?;

    if args.download {
        let content = facade.download_shared(token).await?;
        let path = super::item::save_download(
            &content,
            file.download_name(),
            args.output.as_deref(),
            args.force,
        )
        .await?;
        output::print_success(&format!(
            "Saved '{}' ({} bytes)",
            path.display(),
            content.bytes.len()
        ));
        return Ok(());
    }

    match format {
        OutputFormat::Json => output::print_json(&file),
        OutputFormat::Table => {
            let decimals = config.explorer.size_decimals;
            output::print_kv("Name", file.download_name());
            output::print_kv("Size", &format_file_size(file.size, decimals));
            output::print_kv("Type", file.mime_type.as_deref().unwrap_or("unknown"));
            if let Some(created_at) = file.created_at {
                output::print_kv("Uploaded", &format_datetime(created_at));
            }
        }
    }
    Ok(())
}

/// Execute share commands
pub async fn execute(
    args: &ShareArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let explorer = super::open_explorer(config).await?;

    match &args.command {
        ShareCommand::Create {
            file,
            expires_in_days,
        } => {
            if *expires_in_days == Some(0) {
                return Err(AppError::validation("--expires-in-days must be at least 1"));
            }
            let expires_at = expires_in_days.map(|days| Utc::now() + Duration::days(days.into()));
            let link = explorer.create_share_link(FileId(*file), expires_at).await?;
            let url = explorer.share_url(&link);

            match format {
                OutputFormat::Json => output::print_json(&ShareRow::new(&link, url)),
                OutputFormat::Table => {
                    output::print_success(&format!("Share link created (id: {})", link.id));
                    output::print_kv("URL", &url);
                }
            }
        }
        ShareCommand::List { file } => {
            let links = explorer.list_shares(file.map(FileId)).await?;
            let rows: Vec<ShareRow> = links
                .iter()
                .map(|link| ShareRow::new(link, explorer.share_url(link)))
                .collect();
            output::print_list(&rows, format);
        }
        ShareCommand::Revoke { id } => {
            explorer.revoke_share(ShareId(*id)).await?;
            output::print_success(&format!("Share link {} revoked", id));
        }
    }

    Ok(())
}
