//! User profile as returned by `GET /users/me`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudbox_core::types::UserId;

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier.
    pub id: UserId,
    /// Login e-mail.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Whether the account may sign in.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Bytes currently stored (trash included).
    #[serde(default)]
    pub storage_used: u64,
    /// Byte allowance.
    #[serde(default)]
    pub storage_quota: u64,
    /// External identity provider, if the account was created through OAuth.
    #[serde(default)]
    pub oauth_provider: Option<String>,
    /// Registration time.
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl UserProfile {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// Bytes left before the quota is reached.
    pub fn storage_remaining(&self) -> u64 {
        self.storage_quota.saturating_sub(self.storage_used)
    }
}
