//! # cloudbox-explorer
//!
//! Client-side logic of the CloudBox file browser, independent of any UI:
//!
//! - [`Explorer`]: the folder view state machine (navigation, local search,
//!   mutations, drag and drop).
//! - [`FolderTreeAggregator`]: the move-destination picker.
//! - [`TrashReconciler`]: the trash view.
//! - [`format`] and [`validation`]: pure helpers shared by all of the above.

pub mod explorer;
pub mod format;
pub mod trash;
pub mod tree;
pub mod validation;

pub use explorer::drag::{DragPayload, DragState, DropOutcome, DropRejection, DropTarget};
pub use explorer::search::{FilteredItems, filter_items};
pub use explorer::state::{ExplorerContext, ExplorerSnapshot, ExplorerStatus, NavigationOutcome};
pub use explorer::Explorer;
pub use trash::{EmptyTrashReport, TrashListing, TrashReconciler};
pub use tree::FolderTreeAggregator;
pub use validation::{NameError, PasswordError, validate_file_name};
