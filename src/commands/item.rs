//! Commands that change a single file or folder.

use std::path::{Path, PathBuf};

use clap::Args;

use cloudbox_client::{FileContent, FileUpload};
use cloudbox_core::config::ClientConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::types::FileId;
use cloudbox_explorer::validate_file_name;

use crate::output::{self, OutputFormat};

/// Arguments for `mkdir`
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Name of the new folder
    pub name: String,
    /// Parent folder (root by default)
    #[arg(short, long, default_value = "root")]
    pub parent: String,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// The id refers to a folder
    #[arg(long)]
    pub folder: bool,
    /// File or folder id
    pub id: i64,
    /// New name
    pub name: String,
}

/// Arguments for `mv`
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// The id refers to a folder
    #[arg(long)]
    pub folder: bool,
    /// File or folder id
    pub id: i64,
    /// Destination folder (`root` or `0` for the root)
    pub target: String,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// The id refers to a folder
    #[arg(long)]
    pub folder: bool,
    /// Erase instead of moving to the trash
    #[arg(long)]
    pub permanent: bool,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
    /// File or folder id
    pub id: i64,
}

/// Arguments for `restore`
#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// The id refers to a folder
    #[arg(long)]
    pub folder: bool,
    /// File or folder id
    pub id: i64,
}

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local file to upload
    pub path: PathBuf,
    /// Destination folder (root by default)
    #[arg(long, default_value = "root")]
    pub folder: String,
    /// Name to store the file under (defaults to the local file name)
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for `download`
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// File id
    pub id: i64,
    /// Where to write the file (defaults to its name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Overwrite an existing local file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `check-name`
#[derive(Debug, Args)]
pub struct CheckNameArgs {
    /// Candidate file or folder name
    pub name: String,
}

/// Create a folder
pub async fn mkdir(
    args: &MkdirArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let parent = super::parse_folder(&args.parent)?;
    let explorer = super::open_explorer(config).await?;
    explorer.navigate_to(parent).await?;
    let folder = explorer.create_folder(&args.name, parent).await?;

    match format {
        OutputFormat::Json => output::print_json(&folder),
        OutputFormat::Table => output::print_success(&format!(
            "Folder '{}' created (id: {})",
            folder.name, folder.id
        )),
    }
    Ok(())
}

/// Rename a file or folder
pub async fn rename(args: &RenameArgs, config: &ClientConfig) -> Result<(), AppError> {
    let item = super::item_ref(args.id, args.folder)?;
    let explorer = super::open_explorer(config).await?;
    explorer.rename_item(item, &args.name).await?;

    output::print_success(&format!("Renamed {} to '{}'", item, args.name));
    Ok(())
}

/// Move a file or folder
pub async fn move_item(args: &MoveArgs, config: &ClientConfig) -> Result<(), AppError> {
    let item = super::item_ref(args.id, args.folder)?;
    let target = super::parse_folder(&args.target)?;
    let explorer = super::open_explorer(config).await?;
    explorer.reveal(item).await?;
    explorer.move_item(item, target).await?;

    let destination = target.map_or_else(|| "the root".to_string(), |id| format!("folder {id}"));
    output::print_success(&format!("Moved {} to {}", item, destination));
    Ok(())
}

/// Trash or erase a file or folder
pub async fn remove(args: &RemoveArgs, config: &ClientConfig) -> Result<(), AppError> {
    let item = super::item_ref(args.id, args.folder)?;

    if args.permanent && !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Erase {} for good? This cannot be undone.", item))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
        if !confirm {
            output::print_warning("Cancelled");
            return Ok(());
        }
    }

    let explorer = super::open_explorer(config).await?;
    explorer.delete_item(item, args.permanent).await?;

    if args.permanent {
        output::print_success(&format!("Erased {}", item));
    } else {
        output::print_success(&format!("Moved {} to the trash", item));
    }
    Ok(())
}

/// Restore a trashed file or folder
pub async fn restore(args: &RestoreArgs, config: &ClientConfig) -> Result<(), AppError> {
    let item = super::item_ref(args.id, args.folder)?;
    let explorer = super::open_explorer(config).await?;
    explorer.restore_item(item).await?;

    output::print_success(&format!("Restored {}", item));
    Ok(())
}

/// Upload a local file
pub async fn upload(
    args: &UploadArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let folder_id = super::parse_folder(&args.folder)?;
    let name = match &args.name {
        Some(n) => n.clone(),
        None => args
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AppError::validation(format!("'{}' is not a file", args.path.display()))
            })?,
    };

    let metadata = tokio::fs::metadata(&args.path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Cannot read '{}'", args.path.display()),
            e,
        )
    })?;
    if metadata.len() > config.explorer.max_upload_bytes {
        return Err(AppError::validation(format!(
            "'{}' exceeds the upload limit",
            args.path.display()
        )));
    }
    let bytes = tokio::fs::read(&args.path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Internal,
            format!("Failed to read '{}'", args.path.display()),
            e,
        )
    })?;

    let explorer = super::open_explorer(config).await?;
    explorer.navigate_to(folder_id).await?;
    let receipt = explorer
        .upload_file(FileUpload {
            name,
            bytes,
            mime_type: None,
            folder_id,
        })
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&receipt),
        OutputFormat::Table => output::print_success(&format!(
            "Uploaded '{}' ({}, id: {})",
            receipt.name,
            explorer.format_size(receipt.size),
            receipt.id
        )),
    }
    Ok(())
}

/// Download a file
pub async fn download(args: &DownloadArgs, config: &ClientConfig) -> Result<(), AppError> {
    if args.id <= 0 {
        return Err(AppError::validation(format!("Invalid id {}", args.id)));
    }
    let id = FileId(args.id);
    let facade = super::connect(config).await?;
    let content = facade.download_file(id).await?;
    let name = match &content.name {
        Some(name) => name.clone(),
        None => facade.get_file(id).await?.name,
    };

    let path = save_download(&content, &name, args.output.as_deref(), args.force).await?;
    output::print_success(&format!(
        "Saved '{}' ({} bytes)",
        path.display(),
        content.bytes.len()
    ));
    Ok(())
}

/// Local path for a download: `output` when given, else the server's name
/// stripped of any directory part.
pub fn download_path(output: Option<&Path>, name: &str) -> Result<PathBuf, AppError> {
    if let Some(path) = output {
        return Ok(path.to_path_buf());
    }
    Path::new(name)
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| AppError::validation(format!("Cannot save a file named '{name}'")))
}

/// Write downloaded content, refusing to replace a file unless `force`.
pub async fn save_download(
    content: &FileContent,
    name: &str,
    output: Option<&Path>,
    force: bool,
) -> Result<PathBuf, AppError> {
    let path = download_path(output, name)?;
    if !force && tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(AppError::validation(format!(
            "'{}' already exists. Pass --force to replace it.",
            path.display()
        )));
    }
    tokio::fs::write(&path, &content.bytes).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Internal,
            format!("Failed to write '{}'", path.display()),
            e,
        )
    })?;
    Ok(path)
}

/// Check a name locally
pub fn check_name(args: &CheckNameArgs) -> Result<(), AppError> {
    validate_file_name(&args.name)?;
    output::print_success(&format!("'{}' is a valid name", args.name));
    Ok(())
}
