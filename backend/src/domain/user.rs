//! Identity of the caller issuing deck mutations.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable user identifier stored as a UUID.
///
/// Authentication happens upstream; the engine only compares identifiers to
/// decide deck ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(id.as_ref()).map(Self)
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
