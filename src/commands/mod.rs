//! CLI command definitions and dispatch.

pub mod auth;
pub mod browse;
pub mod item;
pub mod share;
pub mod trash;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use cloudbox_client::{HttpFacade, RemoteFacade, Session};
use cloudbox_core::config::ClientConfig;
use cloudbox_core::error::AppError;
use cloudbox_core::types::FolderId;
use cloudbox_entity::ItemRef;
use cloudbox_explorer::Explorer;

use crate::output::OutputFormat;

/// CloudBox: browse and manage your cloud storage from the terminal
#[derive(Debug, Parser)]
#[command(name = "cloudbox", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(auth::LoginArgs),
    /// Create an account
    Register(auth::RegisterArgs),
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in account and its quota
    Whoami,
    /// Change the display name
    Profile(auth::ProfileArgs),
    /// Change the account password
    Passwd(auth::PasswdArgs),
    /// List a folder (root by default)
    Ls(browse::LsArgs),
    /// Show the folder hierarchy
    Tree(browse::TreeArgs),
    /// Search files and folders by name
    Search(browse::SearchArgs),
    /// Create a folder
    Mkdir(item::MkdirArgs),
    /// Rename a file or folder
    Rename(item::RenameArgs),
    /// Move a file or folder
    Mv(item::MoveArgs),
    /// Move a file or folder to the trash, or erase it
    Rm(item::RemoveArgs),
    /// Restore a trashed file or folder
    Restore(item::RestoreArgs),
    /// Upload a local file
    Upload(item::UploadArgs),
    /// Download a file
    Download(item::DownloadArgs),
    /// Check a name against the naming rules without contacting the server
    CheckName(item::CheckNameArgs),
    /// Trash management
    Trash(trash::TrashArgs),
    /// Public share links
    Share(share::ShareArgs),
    /// Open a public share link without signing in
    Shared(share::SharedArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ClientConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, config).await,
            Commands::Register(args) => auth::register(args, config, self.format).await,
            Commands::Logout => auth::logout(config).await,
            Commands::Whoami => auth::whoami(config, self.format).await,
            Commands::Profile(args) => auth::profile(args, config, self.format).await,
            Commands::Passwd(args) => auth::passwd(args, config).await,
            Commands::Ls(args) => browse::ls(args, config, self.format).await,
            Commands::Tree(args) => browse::tree(args, config, self.format).await,
            Commands::Search(args) => browse::search(args, config, self.format).await,
            Commands::Mkdir(args) => item::mkdir(args, config, self.format).await,
            Commands::Rename(args) => item::rename(args, config).await,
            Commands::Mv(args) => item::move_item(args, config).await,
            Commands::Rm(args) => item::remove(args, config).await,
            Commands::Restore(args) => item::restore(args, config).await,
            Commands::Upload(args) => item::upload(args, config, self.format).await,
            Commands::Download(args) => item::download(args, config).await,
            Commands::CheckName(args) => item::check_name(args),
            Commands::Trash(args) => trash::execute(args, config, self.format).await,
            Commands::Share(args) => share::execute(args, config, self.format).await,
            Commands::Shared(args) => share::shared(args, config, self.format).await,
        }
    }
}

/// Helper: load the stored session, failing when nobody is signed in
pub async fn load_session(config: &ClientConfig) -> Result<Session, AppError> {
    match Session::load(&config.session.token_file).await? {
        Some(session) if session.is_authenticated() => Ok(session),
        _ => Err(AppError::authentication(
            "Not signed in. Run `cloudbox login` first.",
        )),
    }
}

/// Helper: build the HTTP facade for the stored session
pub async fn connect(config: &ClientConfig) -> Result<Arc<dyn RemoteFacade>, AppError> {
    let session = load_session(config).await?;
    Ok(Arc::new(HttpFacade::new(&config.api, session)?))
}

/// Helper: build an explorer over the stored session
pub async fn open_explorer(config: &ClientConfig) -> Result<Explorer, AppError> {
    let facade = connect(config).await?;
    Ok(Explorer::new(facade, config.explorer.clone()))
}

/// Helper: parse a folder argument where `0` or `root` mean the root
pub fn parse_folder(raw: &str) -> Result<Option<FolderId>, AppError> {
    FolderId::parse_target(raw).map_err(|_| {
        AppError::validation(format!("Invalid folder '{raw}': expected an id or 'root'"))
    })
}

/// Helper: the item an id refers to, given the `--folder` flag
pub fn item_ref(id: i64, is_folder: bool) -> Result<ItemRef, AppError> {
    if id <= 0 {
        return Err(AppError::validation(format!("Invalid id {id}")));
    }
    Ok(ItemRef::from_parts(id, is_folder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_move_to_root() {
        let cli = Cli::try_parse_from(["cloudbox", "mv", "--folder", "4", "root"]).unwrap();
        match cli.command {
            Commands::Mv(args) => {
                assert!(args.folder);
                assert_eq!(args.id, 4);
                assert_eq!(parse_folder(&args.target).unwrap(), None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_format() {
        let cli = Cli::try_parse_from(["cloudbox", "--format", "json", "trash", "list"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_parses_account_and_transfer_commands() {
        let cli = Cli::try_parse_from([
            "cloudbox", "passwd", "--current", "old", "--new", "n3w-pass", "--confirm", "n3w-pass",
        ])
        .unwrap();
        match cli.command {
            Commands::Passwd(args) => {
                assert_eq!(args.new_password.as_deref(), Some("n3w-pass"));
                assert_eq!(args.confirm.as_deref(), Some("n3w-pass"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["cloudbox", "passwd", "--confirm", "x"]).is_err());

        let cli = Cli::try_parse_from(["cloudbox", "download", "7", "-o", "out.pdf"]).unwrap();
        assert!(matches!(cli.command, Commands::Download(args) if args.id == 7 && !args.force));

        let cli = Cli::try_parse_from(["cloudbox", "shared", "abc", "--download"]).unwrap();
        assert!(matches!(cli.command, Commands::Shared(args) if args.download));
        assert!(Cli::try_parse_from(["cloudbox", "shared", "abc", "-o", "x"]).is_err());
    }

    #[test]
    fn test_parse_folder() {
        assert_eq!(parse_folder("0").unwrap(), None);
        assert_eq!(parse_folder("12").unwrap(), Some(FolderId(12)));
        assert!(parse_folder("docs").is_err());
    }

    #[test]
    fn test_item_ref_rejects_non_positive() {
        assert!(item_ref(0, false).is_err());
        assert_eq!(item_ref(3, true).unwrap(), ItemRef::Folder(FolderId(3)));
    }
}
