//! Building `MediaFile` records from tags.

use std::path::Path;

use tagscan_common::{Genre, GenreRepository, MediaFile, MediaFileId};

use super::genre_cache::CachedGenreRepository;
use super::sort_key::{sanitize_field_for_sorting, IgnoredArticles};
use super::tags::Tags;
use super::Result;

pub const UNKNOWN_ARTIST: &str = "[Unknown Artist]";
pub const UNKNOWN_ALBUM: &str = "[Unknown Album]";
pub const VARIOUS_ARTISTS: &str = "Various Artists";

/// Separator between several genres in one tag value.
const GENRE_SEPARATOR: char = ';';

/// Maps tags to media files for one scan.
pub struct MediaFileMapper<'a, R> {
    root: &'a Path,
    articles: &'a IgnoredArticles,
    genres: &'a mut CachedGenreRepository<R>,
}

impl<'a, R: GenreRepository> MediaFileMapper<'a, R> {
    /// Relative file paths are resolved against `root`.
    pub fn new(
        root: &'a Path,
        articles: &'a IgnoredArticles,
        genres: &'a mut CachedGenreRepository<R>,
    ) -> Self {
        Self {
            root,
            articles,
            genres,
        }
    }

    pub fn to_media_file(&mut self, tags: &Tags) -> Result<MediaFile> {
        let title = tags.title();
        let album = tags.album().unwrap_or(UNKNOWN_ALBUM).to_string();
        let artist = tags.artist().unwrap_or(UNKNOWN_ARTIST).to_string();
        let compilation = tags.compilation();
        let album_artist = match tags.album_artist() {
            Some(name) => name.to_string(),
            None if compilation => VARIOUS_ARTISTS.to_string(),
            None => artist.clone(),
        };

        let (genre, genres) = self.map_genres(&tags.genres())?;
        let (track_number, track_total) = tags.track_number();
        let (disc_number, disc_total) = tags.disc_number();

        Ok(MediaFile {
            id: MediaFileId::new(),
            path: self.root.join(tags.path()),
            order_title: self.sort_key(tags.sort_title(), &title),
            order_album_name: self.sort_key(tags.sort_album(), &album),
            order_artist_name: self.sort_key(tags.sort_artist(), &artist),
            order_album_artist_name: self.sort_key(tags.sort_album_artist(), &album_artist),
            sort_title: tags.sort_title().map(str::to_string),
            sort_album_name: tags.sort_album().map(str::to_string),
            sort_artist_name: tags.sort_artist().map(str::to_string),
            sort_album_artist_name: tags.sort_album_artist().map(str::to_string),
            title,
            album,
            artist,
            album_artist,
            genre,
            genres,
            year: tags.year(),
            track_number,
            track_total,
            disc_number,
            disc_total,
            compilation,
            comment: tags.comment().map(str::to_string),
            bpm: tags.bpm(),
            catalog_num: tags.catalog_num().map(str::to_string),
            duration: tags.duration(),
            bit_rate: tags.bitrate(),
            channels: tags.channels(),
            has_cover_art: tags.has_picture(),
            mbz_track_id: tags.mbz_track_id().map(str::to_string),
            mbz_album_id: tags.mbz_album_id().map(str::to_string),
            mbz_artist_id: tags.mbz_artist_id().map(str::to_string),
            mbz_album_artist_id: tags.mbz_album_artist_id().map(str::to_string),
        })
    }

    /// Split `;`-delimited genre values into unique names in first-seen
    /// order and resolve each one. The first name is the primary genre.
    pub fn map_genres<S: AsRef<str>>(&mut self, raw: &[S]) -> Result<(String, Vec<Genre>)> {
        let mut names: Vec<&str> = Vec::new();
        for value in raw {
            for name in value.as_ref().split(GENRE_SEPARATOR).map(str::trim) {
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        let genres = names
            .iter()
            .map(|name| self.genres.resolve(name))
            .collect::<Result<Vec<_>>>()?;
        let primary = names.first().map(|n| n.to_string()).unwrap_or_default();

        Ok((primary, genres))
    }

    fn sort_key(&self, sort_tag: Option<&str>, display: &str) -> String {
        sanitize_field_for_sorting(sort_tag.unwrap_or(display), self.articles)
    }
}
