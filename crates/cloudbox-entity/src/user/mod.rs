//! Account entities.

pub mod auth;
pub mod model;

pub use auth::{Credentials, LoginResponse, PasswordChange, ProfileUpdate, Registration};
pub use model::UserProfile;
