//! Per-scan genre cache.

use std::collections::HashMap;

use tagscan_common::{Genre, GenreRepository};

use super::{Error, Result};

/// Memoizes genre lookups in front of a repository for one scan.
///
/// Create one per scan and drop it afterwards. Resolution takes `&mut self`,
/// so sharing an instance between workers requires the caller's own lock.
/// Failed resolutions are never cached.
#[derive(Debug)]
pub struct CachedGenreRepository<R> {
    repo: R,
    cache: HashMap<String, Genre>,
}

impl<R: GenreRepository> CachedGenreRepository<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            cache: HashMap::new(),
        }
    }

    /// Return the persisted genre named `name`, creating it on first sight.
    pub fn resolve(&mut self, name: &str) -> Result<Genre> {
        if let Some(genre) = self.cache.get(name) {
            tracing::trace!("Genre cache hit: {}", name);
            return Ok(genre.clone());
        }

        tracing::debug!("Genre cache miss: {}", name);
        let genre = self.lookup_or_create(name).map_err(|source| Error::Genre {
            name: name.to_string(),
            source,
        })?;

        self.cache.insert(name.to_string(), genre.clone());
        Ok(genre)
    }

    fn lookup_or_create(&self, name: &str) -> tagscan_common::Result<Genre> {
        match self.repo.get_by_name(name)? {
            Some(genre) => Ok(genre),
            None => self.repo.create(name),
        }
    }

    /// Number of memoized genres.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }
}
