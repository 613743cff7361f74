//! Output formatting for the CLI.

use serde::Serialize;
use tabled::{Table, Tabled};

use cloudbox_entity::{FileEntry, FolderEntry, FolderTreeNode, ShareLink};
use cloudbox_explorer::format::{format_datetime, truncate_string};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// Machine-readable JSON format.
    Json,
}

/// Longest name shown in a table cell.
const NAME_WIDTH: usize = 48;

/// Print a list of rows in the selected format.
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("Nothing here.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Failed to serialize output: {e}")),
    }
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {msg}");
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a labelled value.
pub fn print_kv(key: &str, value: &str) {
    println!("  {key:<20} {value}");
}

/// One line of a folder listing.
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    #[tabled(rename = "Type")]
    pub kind: &'static str,
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "Modified")]
    pub modified: String,
}

impl EntryRow {
    /// Row for a folder.
    pub fn folder(folder: &FolderEntry) -> Self {
        Self {
            kind: "folder",
            id: folder.id.get(),
            name: format!("{}/", truncate_string(&folder.name, NAME_WIDTH, "...")),
            size: "-".to_string(),
            modified: format_datetime(folder.updated_at.unwrap_or(folder.created_at)),
        }
    }

    /// Row for a file, with its size already formatted.
    pub fn file(file: &FileEntry, size: String) -> Self {
        Self {
            kind: file.kind().label(),
            id: file.id.get(),
            name: truncate_string(&file.name, NAME_WIDTH, "..."),
            size,
            modified: format_datetime(file.updated_at.unwrap_or(file.created_at)),
        }
    }
}

/// One line of the destination tree.
#[derive(Debug, Serialize, Tabled)]
pub struct TreeRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Folder")]
    pub name: String,
    #[tabled(rename = "Depth")]
    pub depth: usize,
}

impl From<&FolderTreeNode> for TreeRow {
    fn from(node: &FolderTreeNode) -> Self {
        Self {
            id: node.folder.id.get(),
            name: format!("{}/", node.indented_name()),
            depth: node.depth,
        }
    }
}

/// One line of the trash listing.
#[derive(Debug, Serialize, Tabled)]
pub struct TrashRow {
    #[tabled(rename = "Type")]
    pub kind: &'static str,
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Deleted")]
    pub deleted: String,
}

impl TrashRow {
    /// Row for a trashed folder.
    pub fn folder(folder: &FolderEntry) -> Self {
        Self {
            kind: "folder",
            id: folder.id.get(),
            name: truncate_string(&folder.name, NAME_WIDTH, "..."),
            deleted: folder.deleted_at.map(format_datetime).unwrap_or_default(),
        }
    }

    /// Row for a trashed file.
    pub fn file(file: &FileEntry) -> Self {
        Self {
            kind: "file",
            id: file.id.get(),
            name: truncate_string(&file.name, NAME_WIDTH, "..."),
            deleted: file.deleted_at.map(format_datetime).unwrap_or_default(),
        }
    }
}

/// One line of the share listing.
#[derive(Debug, Serialize, Tabled)]
pub struct ShareRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "File")]
    pub file_id: i64,
    #[tabled(rename = "Active")]
    pub active: bool,
    #[tabled(rename = "Expires")]
    pub expires: String,
    #[tabled(rename = "URL")]
    pub url: String,
}

impl ShareRow {
    /// Row for a link, resolved against the web client's origin.
    pub fn new(link: &ShareLink, url: String) -> Self {
        Self {
            id: link.id.get(),
            file_id: link.file_id.get(),
            active: link.is_usable_at(chrono::Utc::now()),
            expires: link
                .expires_at
                .map(format_datetime)
                .unwrap_or_else(|| "never".to_string()),
            url,
        }
    }
}
