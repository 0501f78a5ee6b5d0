//! Genre persistence collaborator.
//!
//! The scanner never talks to storage directly: it resolves genre names
//! through a [`GenreRepository`]. `tagscan-db` provides the SQLite-backed
//! implementation; [`InMemoryGenreRepository`] serves tests and dry runs.

use parking_lot::Mutex;

use crate::{Error, Genre, Result};

/// Storage for genre entities, keyed by their exact display name.
pub trait GenreRepository {
    /// Look up a genre by exact name.
    fn get_by_name(&self, name: &str) -> Result<Option<Genre>>;

    /// Persist a new genre and return it with its assigned id.
    ///
    /// Fails if a genre with the same name already exists.
    fn create(&self, name: &str) -> Result<Genre>;

    /// List every persisted genre in creation order.
    fn list(&self) -> Result<Vec<Genre>>;
}

impl<R: GenreRepository + ?Sized> GenreRepository for &R {
    fn get_by_name(&self, name: &str) -> Result<Option<Genre>> {
        (**self).get_by_name(name)
    }

    fn create(&self, name: &str) -> Result<Genre> {
        (**self).create(name)
    }

    fn list(&self) -> Result<Vec<Genre>> {
        (**self).list()
    }
}

/// Process-local genre store.
#[derive(Debug, Default)]
pub struct InMemoryGenreRepository {
    genres: Mutex<Vec<Genre>>,
}

impl InMemoryGenreRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GenreRepository for InMemoryGenreRepository {
    fn get_by_name(&self, name: &str) -> Result<Option<Genre>> {
        Ok(self.genres.lock().iter().find(|g| g.name == name).cloned())
    }

    fn create(&self, name: &str) -> Result<Genre> {
        if name.is_empty() {
            return Err(Error::invalid_input("genre name cannot be empty"));
        }

        let mut genres = self.genres.lock();
        if genres.iter().any(|g| g.name == name) {
            return Err(Error::database(format!("genre already exists: {}", name)));
        }

        let genre = Genre::new(name);
        tracing::debug!("Created genre {} ({})", genre.name, genre.id);
        genres.push(genre.clone());
        Ok(genre)
    }

    fn list(&self) -> Result<Vec<Genre>> {
        Ok(self.genres.lock().clone())
    }
}
