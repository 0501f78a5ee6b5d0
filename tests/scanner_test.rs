//! Report fixtures end-to-end: parse, map tags, resolve genres.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use tagscan::scanner::{
    CachedGenreRepository, Error, IgnoredArticles, MediaFileMapper, Scanner, Tags,
};
use tagscan_common::{Genre, GenreRepository, InMemoryGenreRepository};
use tagscan_db::{pool::init_pool, SqliteGenreRepository};
use tagscan_ffmeta::{extract_metadata, parse_report, Prober};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/reports")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn articles() -> IgnoredArticles {
    IgnoredArticles::parse("The El La Los Las Le Les Os As O A")
}

fn scanner<R: GenreRepository>(repo: R) -> Scanner<R> {
    Scanner::new(Prober::with_program("ffmpeg"), articles(), repo)
}

/// Fails every create whose name is listed.
struct RejectingRepository {
    inner: InMemoryGenreRepository,
    reject: &'static str,
    creates: Cell<usize>,
}

impl GenreRepository for RejectingRepository {
    fn get_by_name(&self, name: &str) -> tagscan_common::Result<Option<Genre>> {
        self.inner.get_by_name(name)
    }

    fn create(&self, name: &str) -> tagscan_common::Result<Genre> {
        self.creates.set(self.creates.get() + 1);
        if name == self.reject {
            return Err(tagscan_common::Error::database("database is locked"));
        }
        self.inner.create(name)
    }

    fn list(&self) -> tagscan_common::Result<Vec<Genre>> {
        self.inner.list()
    }
}

#[test]
fn test_parse_album_report() {
    let inputs = parse_report(&fixture("album.txt"));
    assert_eq!(inputs.len(), 2);

    let blues = &inputs[0];
    assert_eq!(
        blues.path,
        "/music/Putumayo Presents Blues Lounge/09 Pablo's Blues.mp3"
    );
    assert_eq!(blues.format, "mp3");
    let md = &blues.metadata;
    assert_eq!(md.get("genre").unwrap(), ["Blues;Jazz", "Blues"]);
    assert_eq!(md.first("comment"), Some("Recorded live\n\nat the Lounge"));
    assert_eq!(md.first("duration"), Some("302.63"));
    assert_eq!(md.first("bitrate"), Some("192"));
    assert_eq!(md.first("channels"), Some("2"));
    assert_eq!(md.first("has_picture"), Some("true"));
    assert_eq!(md.get("comment").unwrap().len(), 1);

    let drive = &inputs[1].metadata;
    assert_eq!(drive.first("title"), Some("Drive (Teku)"));
    assert_eq!(drive.first("album"), Some("Hot Wheels Acceleracers Soundtrack"));
    assert_eq!(drive.first("bitrate"), Some("135"));
    assert!(!drive.contains_key("has_picture"));
    assert!(!drive.contains_key("comment"));
}

#[test]
fn test_map_album_report() {
    let repo = InMemoryGenreRepository::new();
    let files = scanner(&repo).map_report(&fixture("album.txt")).unwrap();
    assert_eq!(files.len(), 2);

    let blues = &files[0];
    assert_eq!(blues.title, "Pablo's Blues");
    assert_eq!(blues.artist, "Jimmy Rogers");
    assert_eq!(blues.album_artist, "Various Artists");
    assert!(blues.compilation);
    assert_eq!(blues.genre, "Blues");
    assert_eq!(
        blues.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        vec!["Blues", "Jazz"]
    );
    assert_eq!(blues.year, Some(2004));
    assert_eq!((blues.track_number, blues.track_total), (Some(9), Some(12)));
    assert_eq!((blues.disc_number, blues.disc_total), (Some(1), Some(1)));
    assert_eq!(blues.bpm, Some(123));
    assert_eq!(blues.comment.as_deref(), Some("Recorded live\n\nat the Lounge"));
    assert_eq!(blues.duration, Some(302.63));
    assert_eq!(blues.bit_rate, Some(192));
    assert!(blues.has_cover_art);

    let drive = &files[1];
    assert_eq!(drive.title, "Drive (Teku)");
    assert_eq!(drive.artist, "The Teku");
    assert_eq!(drive.order_artist_name, "Teku");
    assert_eq!(drive.genre, "Electronic");
    assert_eq!(drive.bpm, Some(142));
    assert_eq!(drive.channels, Some(2));
    assert!(!drive.has_cover_art);

    // "Blues" resolved once and shared by both files
    assert_eq!(drive.genres[1], blues.genres[0]);
    let stored: Vec<_> = repo.list().unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(stored, vec!["Blues", "Jazz", "Electronic"]);
}

#[test]
fn test_multichannel_report() {
    let repo = InMemoryGenreRepository::new();
    let files = scanner(&repo).map_report(&fixture("multichannel.txt")).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].channels, Some(8));
    assert_eq!(files[0].bit_rate, Some(9216));
    assert_eq!(files[0].title, "Nums_7dot1_24_48000");
    assert!(files[0].genres.is_empty());
}

#[test]
fn test_genre_failure_names_the_genre() {
    let repo = RejectingRepository {
        inner: InMemoryGenreRepository::new(),
        reject: "Jazz",
        creates: Cell::new(0),
    };

    let err = scanner(&repo).map_report(&fixture("album.txt")).unwrap_err();
    match &err {
        Error::Genre { name, source } => {
            assert_eq!(name, "Jazz");
            assert!(source.to_string().contains("database is locked"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_failed_genre_can_be_retried_in_same_cache() {
    let repo = RejectingRepository {
        inner: InMemoryGenreRepository::new(),
        reject: "Jazz",
        creates: Cell::new(0),
    };
    let mut cache = CachedGenreRepository::new(&repo);
    let articles = articles();
    let mut mapper = MediaFileMapper::new(Path::new("/"), &articles, &mut cache);

    assert!(mapper.map_genres(&["Jazz"]).is_err());
    assert!(mapper.map_genres(&["Jazz"]).is_err());
    assert_eq!(repo.creates.get(), 2);
}

#[test]
fn test_genres_persist_in_sqlite_across_scans() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tagscan.db");
    let report = fixture("album.txt");

    let first = {
        let repo = SqliteGenreRepository::new(init_pool(&db).unwrap());
        scanner(repo).map_report(&report).unwrap()
    };

    let repo = SqliteGenreRepository::new(init_pool(&db).unwrap());
    let second = scanner(repo).map_report(&report).unwrap();

    assert_eq!(first[0].genres, second[0].genres);
    assert_eq!(first[1].genres, second[1].genres);
}

#[test]
fn test_tags_from_single_section() {
    let report = "\
Input #0, flac, from 'song.flac':
  Metadata:
    ARTIST          : Katy Perry featuring Skip Marley
  Duration: 00:03:57.91, start: 0.000000, bitrate: 983 kb/s
  Stream #0:0: Audio: flac, 44100 Hz, stereo, s16
  Stream #0:1: Video: mjpeg (Baseline), yuvj444p(pc, bt470bg/unknown/unknown), 599x518, 90k tbr, 90k tbn, 90k tbc (attached pic)
    Metadata:
      comment         : Cover (front)";

    let tags = Tags::new("song.flac", extract_metadata(report));
    assert_eq!(tags.title(), "song");
    assert_eq!(tags.artist(), Some("Katy Perry featuring Skip Marley"));
    assert_eq!(tags.comment(), None);
    assert!(tags.has_picture());
    assert_eq!(tags.bitrate(), Some(983));
    assert_eq!(tags.duration(), Some(237.91));
}
