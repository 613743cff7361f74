//! Public share link model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudbox_core::types::{FileId, ShareId};

/// A public, token-addressed link to a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Share identifier.
    pub id: ShareId,
    /// Opaque token embedded in the public URL.
    pub token: String,
    /// The shared file.
    pub file_id: FileId,
    /// Whether the link still resolves.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Optional expiry.
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub expires_at: Option<DateTime<Utc>>,
    /// When the link was issued.
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl ShareLink {
    /// Whether the link has passed its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Whether a visitor following the link at `now` would get the file.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Public URL served by the web client: `{origin}/shared/{token}`.
    pub fn public_url(&self, origin: &str) -> String {
        format!("{}/shared/{}", origin.trim_end_matches('/'), self.token)
    }
}
