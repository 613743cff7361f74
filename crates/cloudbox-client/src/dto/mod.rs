//! Wire-level request and response bodies of the REST API.

pub mod request;
pub mod response;
