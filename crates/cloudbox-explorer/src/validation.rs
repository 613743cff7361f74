//! Local input checks run before any request is sent.

use thiserror::Error;
use validator::ValidateEmail;

use cloudbox_core::error::AppError;

/// Longest accepted file or folder name, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// Shortest accepted password.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Characters no file or folder name may contain.
pub const ILLEGAL_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names reserved by Windows, compared case-insensitively.
pub const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Why a file or folder name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("A name is required")]
    Empty,
    #[error("The name must not exceed {max} characters")]
    TooLong { max: usize },
    #[error("The name contains a forbidden character (< > : \" / \\ | ? *)")]
    IllegalCharacter(char),
    #[error("'{0}' is a name reserved by the system")]
    Reserved(String),
    #[error("The name cannot start or end with a space or a period")]
    EdgePadding,
}

impl From<NameError> for AppError {
    fn from(err: NameError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Check a file or folder name.
///
/// Rules apply in order and the first failure wins: empty, too long,
/// forbidden or control character, reserved device name, leading or
/// trailing space or period.
pub fn validate_file_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    if let Some(c) = name
        .chars()
        .find(|c| ILLEGAL_NAME_CHARS.contains(c) || (*c as u32) < 0x20)
    {
        return Err(NameError::IllegalCharacter(c));
    }
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
    {
        return Err(NameError::Reserved(name.to_string()));
    }
    if name.starts_with([' ', '.']) || name.ends_with([' ', '.']) {
        return Err(NameError::EdgePadding);
    }
    Ok(())
}

/// Whether `name` passes [`validate_file_name`].
pub fn is_valid_file_name(name: &str) -> bool {
    validate_file_name(name).is_ok()
}

/// Why a password was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("A password is required")]
    Missing,
    #[error("The password must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("The password must contain at least one letter and one digit")]
    MissingLetterOrDigit,
    #[error("The passwords do not match")]
    Mismatch,
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Whether `email` looks like a deliverable address.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Check password strength: at least eight characters with an ASCII letter
/// and a digit.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Missing);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(PasswordError::TooShort {
            min: MIN_PASSWORD_CHARS,
        });
    }
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    if !has_digit || !has_letter {
        return Err(PasswordError::MissingLetterOrDigit);
    }
    Ok(())
}

/// Check that a confirmation matches the password.
pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), PasswordError> {
    if password != confirmation {
        return Err(PasswordError::Mismatch);
    }
    Ok(())
}

/// Whether the text after the last `.` of `name` is in `allowed`.
///
/// A name without a dot is compared whole. An empty name or allow-list
/// accepts nothing.
pub fn has_allowed_extension(name: &str, allowed: &[&str]) -> bool {
    if name.is_empty() || allowed.is_empty() {
        return false;
    }
    let extension = name.rsplit('.').next().unwrap_or(name);
    allowed
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(extension))
}

/// Whether `mime_type` is exactly one of `allowed`.
pub fn has_allowed_mime_type(mime_type: &str, allowed: &[&str]) -> bool {
    !mime_type.is_empty() && allowed.contains(&mime_type)
}
