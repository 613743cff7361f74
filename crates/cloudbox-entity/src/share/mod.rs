//! Share link entities.

pub mod link;
pub mod public;

pub use link::ShareLink;
pub use public::SharedFile;
