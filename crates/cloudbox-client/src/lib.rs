//! # cloudbox-client
//!
//! The boundary between the explorer and the backend. [`RemoteFacade`] fixes
//! the request/response contract; [`HttpFacade`] speaks the REST API with
//! `reqwest`, and [`MemoryFacade`] keeps a whole account in memory for tests
//! and offline demos.
//!
//! Authentication state is never global: a [`Session`] is built by
//! [`AuthClient::login`] (or loaded from disk) and handed to the HTTP facade
//! at construction.

pub mod dto;
pub mod facade;
pub mod http;
pub mod memory;
pub mod session;

pub use facade::{FileContent, FileUpload, RemoteFacade, UploadReceipt};
pub use http::{AuthClient, HttpFacade};
pub use memory::{FacadeCall, FacadeOp, ListingGate, MemoryFacade};
pub use session::Session;
