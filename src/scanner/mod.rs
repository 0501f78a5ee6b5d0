//! Music library scanner.
//!
//! Turns probe reports into `MediaFile` records: typed tag access, sort keys,
//! and genre resolution through a per-scan cache.

pub mod genre_cache;
pub mod mapping;
pub mod sort_key;
pub mod tags;

use std::path::{Path, PathBuf};

use tagscan_common::{GenreRepository, MediaFile};
use tagscan_ffmeta::{parse_report, Prober};

pub use genre_cache::CachedGenreRepository;
pub use mapping::MediaFileMapper;
pub use sort_key::{remove_accents, sanitize_field_for_sorting, IgnoredArticles};
pub use tags::Tags;

/// Result type alias using the scanner Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while scanning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The genre repository failed for this name.
    #[error("failed to resolve genre {name:?}: {source}")]
    Genre {
        name: String,
        source: tagscan_common::Error,
    },

    /// Running the probing tool failed.
    #[error(transparent)]
    Probe(#[from] tagscan_ffmeta::Error),
}

/// Probes files and maps them to media files.
pub struct Scanner<R> {
    prober: Prober,
    articles: IgnoredArticles,
    root: PathBuf,
    genres: R,
}

impl<R: GenreRepository> Scanner<R> {
    pub fn new(prober: Prober, articles: IgnoredArticles, genres: R) -> Self {
        Self {
            prober,
            articles,
            root: PathBuf::from("/"),
            genres,
        }
    }

    /// Resolve relative report paths against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Probe `paths` in one invocation and map every reported input.
    pub fn scan<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<MediaFile>> {
        tracing::info!("Scanning {} files", paths.len());
        let report = self.prober.run(paths)?;
        self.map_report(&report)
    }

    /// Map an already captured report. Genres are cached for this call only.
    pub fn map_report(&self, report: &str) -> Result<Vec<MediaFile>> {
        let mut cache = CachedGenreRepository::new(&self.genres);
        let mut mapper = MediaFileMapper::new(&self.root, &self.articles, &mut cache);

        let files = parse_report(report)
            .into_iter()
            .map(|input| mapper.to_media_file(&Tags::from(input)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Mapped {} files, {} distinct genres",
            files.len(),
            cache.len()
        );
        Ok(files)
    }

    pub fn genres(&self) -> &R {
        &self.genres
    }
}
