//! Explicit authentication context.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;

/// Where to reach the backend and which bearer token to present.
///
/// Passed into [`crate::HttpFacade::new`]; nothing reads credentials from
/// ambient state.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Base URL of the versioned API.
    pub base_url: String,
    /// Bearer token, absent for anonymous sessions.
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Session {
    /// A session without credentials.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// A session presenting `token`.
    pub fn authenticated(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: Some(token.into()),
        }
    }

    /// Whether a token is attached.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Read a persisted session. Returns `None` when the file does not exist.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Option<Self>> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                cloudbox_core::ErrorKind::Configuration,
                format!("Cannot read session file {}: {e}", path.display()),
                e,
            )),
        }
    }

    /// Persist the session, creating parent directories as needed.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, raw).await?;
        tracing::debug!(path = %path.display(), "Session saved");
        Ok(())
    }

    /// Forget a persisted session. Missing files are not an error.
    pub async fn clear(path: impl AsRef<Path>) -> AppResult<()> {
        match tokio::fs::remove_file(path.as_ref()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
