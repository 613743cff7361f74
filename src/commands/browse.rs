//! Read-only commands: listing, tree and search.

use clap::Args;

use cloudbox_core::config::ClientConfig;
use cloudbox_core::error::AppError;
use cloudbox_core::types::FolderId;
use cloudbox_explorer::{Explorer, FolderTreeAggregator};

use crate::output::{self, EntryRow, OutputFormat, TreeRow};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder to list (`root` or `0` for the root)
    #[arg(default_value = "root")]
    pub folder: String,
    /// Only show items whose name contains this text
    #[arg(long)]
    pub filter: Option<String>,
}

/// Arguments for `tree`
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Leave out this folder and everything below it
    #[arg(long)]
    pub exclude: Option<i64>,
}

/// Arguments for `search`
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in names
    pub term: String,
    /// Only search the direct children of this folder
    #[arg(long)]
    pub folder: Option<String>,
}

fn entry_rows(
    explorer: &Explorer,
    folders: &[cloudbox_entity::FolderEntry],
    files: &[cloudbox_entity::FileEntry],
) -> Vec<EntryRow> {
    folders
        .iter()
        .map(EntryRow::folder)
        .chain(
            files
                .iter()
                .map(|f| EntryRow::file(f, explorer.format_size(f.size))),
        )
        .collect()
}

/// List one folder
pub async fn ls(args: &LsArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let target = super::parse_folder(&args.folder)?;
    let explorer = super::open_explorer(config).await?;
    explorer.navigate_to(target).await?;

    let items = match &args.filter {
        Some(term) => explorer.apply_search(term).await,
        None => explorer.filtered_items().await,
    };

    match format {
        OutputFormat::Json => output::print_json(&items),
        OutputFormat::Table => {
            let context = explorer.context().await;
            let path = context
                .breadcrumbs
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(" / ");
            println!("{path}");
            output::print_list(
                &entry_rows(&explorer, &items.folders, &items.files),
                format,
            );
        }
    }
    Ok(())
}

/// Print the folder hierarchy
pub async fn tree(
    args: &TreeArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let facade = super::connect(config).await?;
    let exclude = args.exclude.and_then(|id| FolderId::normalize(Some(id)));
    let nodes = FolderTreeAggregator::new(facade)
        .list_candidate_destinations(exclude)
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&nodes),
        OutputFormat::Table => {
            println!("/");
            let rows: Vec<TreeRow> = nodes.iter().map(TreeRow::from).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

/// Search by name on the server
pub async fn search(
    args: &SearchArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let scope = match &args.folder {
        Some(raw) => super::parse_folder(raw)?,
        None => None,
    };
    let explorer = super::open_explorer(config).await?;
    let results = explorer.search_remote(&args.term, scope).await?;

    match format {
        OutputFormat::Json => output::print_json(&results),
        OutputFormat::Table => {
            output::print_list(
                &entry_rows(&explorer, &results.folders, &results.files),
                format,
            );
            println!("{} result(s)", results.len());
        }
    }
    Ok(())
}
