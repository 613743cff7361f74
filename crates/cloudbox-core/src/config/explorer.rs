//! Explorer behaviour configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the explorer and its formatters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Decimal places used when rendering file sizes.
    #[serde(default = "default_size_decimals")]
    pub size_decimals: usize,
    /// Largest payload accepted by `upload_file`, in bytes (5 GiB).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Public origin used to build share URLs (`{origin}/shared/{token}`).
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            size_decimals: default_size_decimals(),
            max_upload_bytes: default_max_upload_bytes(),
            share_base_url: default_share_base_url(),
        }
    }
}

fn default_size_decimals() -> usize {
    2
}

fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024 * 1024
}

fn default_share_base_url() -> String {
    "http://localhost:5173".to_string()
}
