//! Typed access to one file's parsed tags.
//!
//! Taggers disagree on key names, so most accessors try a list of aliases in
//! order and return the first non-empty value.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tagscan_ffmeta::{keys, ParsedMetadata, ProbedInput};

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("year pattern is valid"));

const ALBUM_ARTIST: &[&str] = &["album_artist", "albumartist", "album artist"];
const SORT_TITLE: &[&str] = &["title-sort", "titlesort", "title_sort", "sort_title", "sorttitle"];
const SORT_ALBUM: &[&str] = &["album-sort", "albumsort", "album_sort", "sort_album", "sortalbum"];
const SORT_ARTIST: &[&str] = &[
    "artist-sort",
    "artistsort",
    "artist_sort",
    "sort_artist",
    "sortartist",
];
const SORT_ALBUM_ARTIST: &[&str] = &[
    "album_artist-sort",
    "albumartistsort",
    "album_artist_sort",
    "sort_album_artist",
    "sortalbumartist",
];
const YEAR: &[&str] = &["date", "year", "originaldate"];
const TRACK: &[&str] = &["track", "tracknumber"];
const TRACK_TOTAL: &[&str] = &["tracktotal", "totaltracks"];
const DISC: &[&str] = &["disc", "discnumber"];
const DISC_TOTAL: &[&str] = &["disctotal", "totaldiscs"];
const COMPILATION: &[&str] = &["compilation", "tcmp"];
const BPM: &[&str] = &["tbpm", "bpm", "fbpm"];
const CATALOG_NUMBER: &[&str] = &["catalognumber", "catalog number", "catalog_number"];
const MBZ_TRACK_ID: &[&str] = &["musicbrainz_trackid", "musicbrainz track id"];
const MBZ_ALBUM_ID: &[&str] = &["musicbrainz_albumid", "musicbrainz album id"];
const MBZ_ARTIST_ID: &[&str] = &["musicbrainz_artistid", "musicbrainz artist id"];
const MBZ_ALBUM_ARTIST_ID: &[&str] = &["musicbrainz_albumartistid", "musicbrainz album artist id"];

/// One file's tags together with the path they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags {
    path: PathBuf,
    metadata: ParsedMetadata,
}

impl Tags {
    pub fn new(path: impl Into<PathBuf>, metadata: ParsedMetadata) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &ParsedMetadata {
        &self.metadata
    }

    /// First non-empty value among `aliases`.
    pub fn first_of(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|key| self.metadata.get(key))
            .flatten()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// The `title` tag, or the file name without its extension.
    pub fn title(&self) -> String {
        match self.first_of(&["title"]) {
            Some(title) => title.to_string(),
            None => self
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn album(&self) -> Option<&str> {
        self.first_of(&["album"])
    }

    pub fn artist(&self) -> Option<&str> {
        self.first_of(&["artist"])
    }

    pub fn album_artist(&self) -> Option<&str> {
        self.first_of(ALBUM_ARTIST)
    }

    pub fn sort_title(&self) -> Option<&str> {
        self.first_of(SORT_TITLE)
    }

    pub fn sort_album(&self) -> Option<&str> {
        self.first_of(SORT_ALBUM)
    }

    pub fn sort_artist(&self) -> Option<&str> {
        self.first_of(SORT_ARTIST)
    }

    pub fn sort_album_artist(&self) -> Option<&str> {
        self.first_of(SORT_ALBUM_ARTIST)
    }

    /// Every `genre` value, still `;`-delimited as tagged.
    pub fn genres(&self) -> Vec<&str> {
        self.metadata
            .get("genre")
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// First four-digit year in `date`, `year`, or `originaldate`.
    pub fn year(&self) -> Option<i32> {
        YEAR.iter()
            .filter_map(|key| self.metadata.first(key))
            .find_map(|value| YEAR_RE.captures(value)?[1].parse().ok())
            .filter(|year| *year > 0)
    }

    /// `(number, total)` from `3/12`, or from separate total tags.
    pub fn track_number(&self) -> (Option<u32>, Option<u32>) {
        self.position(TRACK, TRACK_TOTAL)
    }

    pub fn disc_number(&self) -> (Option<u32>, Option<u32>) {
        self.position(DISC, DISC_TOTAL)
    }

    fn position(&self, number: &[&str], total: &[&str]) -> (Option<u32>, Option<u32>) {
        let (n, of) = match self.first_of(number) {
            Some(value) => match value.split_once('/') {
                Some((n, of)) => (parse_u32(n), parse_u32(of)),
                None => (parse_u32(value), None),
            },
            None => (None, None),
        };

        (n, of.or_else(|| self.first_of(total).and_then(parse_u32)))
    }

    pub fn compilation(&self) -> bool {
        self.first_of(COMPILATION)
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    }

    /// Beats per minute, rounded to the nearest integer.
    pub fn bpm(&self) -> Option<u32> {
        let bpm: f64 = self.first_of(BPM)?.parse().ok()?;
        (bpm.is_finite() && bpm >= 0.0).then(|| bpm.round() as u32)
    }

    pub fn comment(&self) -> Option<&str> {
        self.first_of(&["comment"])
    }

    pub fn catalog_num(&self) -> Option<&str> {
        self.first_of(CATALOG_NUMBER)
    }

    pub fn mbz_track_id(&self) -> Option<&str> {
        self.first_of(MBZ_TRACK_ID)
    }

    pub fn mbz_album_id(&self) -> Option<&str> {
        self.first_of(MBZ_ALBUM_ID)
    }

    pub fn mbz_artist_id(&self) -> Option<&str> {
        self.first_of(MBZ_ARTIST_ID)
    }

    pub fn mbz_album_artist_id(&self) -> Option<&str> {
        self.first_of(MBZ_ALBUM_ARTIST_ID)
    }

    /// Seconds.
    pub fn duration(&self) -> Option<f32> {
        self.metadata.first(keys::DURATION)?.parse().ok()
    }

    /// kb/s.
    pub fn bitrate(&self) -> Option<u32> {
        self.metadata.first(keys::BITRATE).and_then(parse_u32)
    }

    pub fn channels(&self) -> Option<u32> {
        self.metadata.first(keys::CHANNELS).and_then(parse_u32)
    }

    pub fn has_picture(&self) -> bool {
        self.metadata.first(keys::HAS_PICTURE) == Some("true")
    }
}

impl From<ProbedInput> for Tags {
    fn from(input: ProbedInput) -> Self {
        Self::new(input.path, input.metadata)
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        Tags::new(
            "/music/Artist/Album/01 - Track.mp3",
            pairs.iter().copied().collect(),
        )
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        assert_eq!(tags(&[("title", "Drive")]).title(), "Drive");
        assert_eq!(tags(&[]).title(), "01 - Track");
        assert_eq!(tags(&[("title", "  ")]).title(), "01 - Track");
    }

    #[test]
    fn test_first_value_wins() {
        let t = tags(&[("title", "Container"), ("title", "Stream")]);
        assert_eq!(t.title(), "Container");
    }

    #[test]
    fn test_album_artist_aliases() {
        assert_eq!(
            tags(&[("album artist", "Wyclef Jean")]).album_artist(),
            Some("Wyclef Jean")
        );
        assert_eq!(
            tags(&[("albumartist", "A"), ("album_artist", "B")]).album_artist(),
            Some("B")
        );
        assert_eq!(tags(&[]).album_artist(), None);
    }

    #[test]
    fn test_sort_aliases() {
        let t = tags(&[
            ("titlesort", "Drive"),
            ("sort_album", "Album"),
            ("artist-sort", "Beatles, The"),
            ("albumartistsort", "Various"),
        ]);
        assert_eq!(t.sort_title(), Some("Drive"));
        assert_eq!(t.sort_album(), Some("Album"));
        assert_eq!(t.sort_artist(), Some("Beatles, The"));
        assert_eq!(t.sort_album_artist(), Some("Various"));
    }

    #[test]
    fn test_genres_keep_every_value() {
        let t = tags(&[("genre", "Rock;Dance"), ("genre", "Electronic")]);
        assert_eq!(t.genres(), vec!["Rock;Dance", "Electronic"]);
        assert!(tags(&[]).genres().is_empty());
    }

    #[test]
    fn test_year() {
        assert_eq!(tags(&[("date", "2014-05-21")]).year(), Some(2014));
        assert_eq!(tags(&[("year", "1999")]).year(), Some(1999));
        assert_eq!(tags(&[("date", "unknown"), ("year", "2001")]).year(), Some(2001));
        assert_eq!(tags(&[("date", "12/05/85")]).year(), None);
        assert_eq!(tags(&[("date", "0000")]).year(), None);
    }

    #[test]
    fn test_track_and_disc_numbers() {
        assert_eq!(tags(&[("track", "3/12")]).track_number(), (Some(3), Some(12)));
        assert_eq!(
            tags(&[("track", "03"), ("tracktotal", "10")]).track_number(),
            (Some(3), Some(10))
        );
        assert_eq!(tags(&[("disc", "1/2")]).disc_number(), (Some(1), Some(2)));
        assert_eq!(tags(&[("discnumber", "2")]).disc_number(), (Some(2), None));
        assert_eq!(tags(&[("track", "A1")]).track_number(), (None, None));
        assert_eq!(tags(&[]).disc_number(), (None, None));
    }

    #[test]
    fn test_compilation() {
        assert!(tags(&[("compilation", "1")]).compilation());
        assert!(tags(&[("tcmp", "TRUE")]).compilation());
        assert!(!tags(&[("compilation", "0")]).compilation());
        assert!(!tags(&[]).compilation());
    }

    #[test]
    fn test_bpm_rounds() {
        assert_eq!(tags(&[("tbpm", "123")]).bpm(), Some(123));
        assert_eq!(tags(&[("fbpm", "141.7")]).bpm(), Some(142));
        assert_eq!(tags(&[("bpm", "fast")]).bpm(), None);
        assert_eq!(tags(&[("bpm", "-4")]).bpm(), None);
    }

    #[test]
    fn test_derived_fields() {
        let t = tags(&[
            ("duration", "302.63"),
            ("bitrate", "192"),
            ("channels", "2"),
            ("has_picture", "true"),
        ]);
        assert_eq!(t.duration(), Some(302.63));
        assert_eq!(t.bitrate(), Some(192));
        assert_eq!(t.channels(), Some(2));
        assert!(t.has_picture());

        let empty = tags(&[]);
        assert_eq!(empty.duration(), None);
        assert_eq!(empty.bitrate(), None);
        assert_eq!(empty.channels(), None);
        assert!(!empty.has_picture());
    }

    #[test]
    fn test_identifiers() {
        let t = tags(&[
            ("catalognumber", "CAT-001"),
            ("musicbrainz_trackid", "track-id"),
            ("musicbrainz album id", "album-id"),
            ("musicbrainz_artistid", "artist-id"),
            ("musicbrainz_albumartistid", "album-artist-id"),
        ]);
        assert_eq!(t.catalog_num(), Some("CAT-001"));
        assert_eq!(t.mbz_track_id(), Some("track-id"));
        assert_eq!(t.mbz_album_id(), Some("album-id"));
        assert_eq!(t.mbz_artist_id(), Some("artist-id"));
        assert_eq!(t.mbz_album_artist_id(), Some("album-artist-id"));
    }
}
