//! Result alias shared by every CloudBox crate.

use crate::error::AppError;

/// Outcome of any fallible client operation: facade calls, explorer
/// mutations, configuration loading.
pub type AppResult<T> = Result<T, AppError>;
