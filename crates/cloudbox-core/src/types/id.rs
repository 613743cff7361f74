//! Newtype wrappers around the backend's integer primary keys.
//!
//! Distinct types keep a `FileId` from being passed where a `FolderId` is
//! expected. The root folder has no id; it is always `Option::<FolderId>::None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the raw backend value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a stored file.
    FileId
);

define_id!(
    /// Identifier of a folder. The root folder has none.
    FolderId
);

define_id!(
    /// Identifier of a share link.
    ShareId
);

define_id!(
    /// Identifier of a user account.
    UserId
);

impl FolderId {
    /// Normalize a raw parent reference to the single root sentinel.
    ///
    /// The backend accepts both `null` and `0` for "root"; everything above
    /// the wire layer uses `None`.
    pub fn normalize(raw: Option<i64>) -> Option<Self> {
        match raw {
            None | Some(0) => None,
            Some(id) => Some(Self(id)),
        }
    }

    /// Parse a user-supplied folder reference. `root`, `/`, `0` and the empty
    /// string all denote the root folder.
    pub fn parse_target(input: &str) -> Result<Option<Self>, std::num::ParseIntError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "/" || trimmed.eq_ignore_ascii_case("root") {
            return Ok(None);
        }
        let raw = trimmed.parse::<i64>()?;
        Ok(Self::normalize(Some(raw)))
    }
}
