//! Typed ID wrappers for type safety across tagscan.
//!
//! Newtype wrappers around UUIDs keep a `GenreId` from being passed where a
//! `MediaFileId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a persisted genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(Uuid);

impl GenreId {
    /// Generate a new random genre ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GenreId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GenreId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<GenreId> for Uuid {
    fn from(id: GenreId) -> Self {
        id.0
    }
}

impl std::fmt::Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a scanned media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaFileId(Uuid);

impl MediaFileId {
    /// Generate a new random media file ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MediaFileId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MediaFileId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<MediaFileId> for Uuid {
    fn from(id: MediaFileId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MediaFileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
