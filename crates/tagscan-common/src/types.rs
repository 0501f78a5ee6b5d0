//! Core records shared between the scanner and the persistence layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ids::{GenreId, MediaFileId};

/// A genre resolved against the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Identifier assigned when the genre was first persisted.
    pub id: GenreId,
    /// Display name, trimmed.
    pub name: String,
}

impl Genre {
    /// Create a genre with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GenreId::new(),
            name: name.into(),
        }
    }
}

/// A track as built from one probed file's tags.
///
/// `order_*` fields hold the sort keys produced by the sort-key sanitizer;
/// `sort_*` fields hold the raw sort tags when the file carries them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: MediaFileId,
    pub path: PathBuf,
    pub title: String,
    pub album: String,
    pub artist: String,
    pub album_artist: String,
    pub sort_title: Option<String>,
    pub sort_album_name: Option<String>,
    pub sort_artist_name: Option<String>,
    pub sort_album_artist_name: Option<String>,
    pub order_title: String,
    pub order_album_name: String,
    pub order_artist_name: String,
    pub order_album_artist_name: String,
    /// Primary genre: the first unique name found in the genre tags.
    pub genre: String,
    pub genres: Vec<Genre>,
    pub year: Option<i32>,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
    pub disc_number: Option<u32>,
    pub disc_total: Option<u32>,
    pub compilation: bool,
    pub comment: Option<String>,
    pub bpm: Option<u32>,
    pub catalog_num: Option<String>,
    /// Duration in seconds.
    pub duration: Option<f32>,
    /// Bitrate in kb/s.
    pub bit_rate: Option<u32>,
    pub channels: Option<u32>,
    pub has_cover_art: bool,
    pub mbz_track_id: Option<String>,
    pub mbz_album_id: Option<String>,
    pub mbz_artist_id: Option<String>,
    pub mbz_album_artist_id: Option<String>,
}
