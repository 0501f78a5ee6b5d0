//! `GenreRepository` over a connection pool.

use tagscan_common::{Genre, GenreRepository, Result};

use crate::pool::{get_conn, DbPool};
use crate::queries::genres;

/// Genre storage backed by SQLite.
#[derive(Clone)]
pub struct SqliteGenreRepository {
    pool: DbPool,
}

impl SqliteGenreRepository {
    /// Wrap an initialized pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn get_by_name(&self, name: &str) -> Result<Option<Genre>> {
        let conn = get_conn(&self.pool)?;
        genres::get_genre_by_name(&conn, name)
    }

    fn create(&self, name: &str) -> Result<Genre> {
        let conn = get_conn(&self.pool)?;
        let genre = genres::create_genre(&conn, name)?;
        tracing::debug!("Created genre {} ({})", genre.name, genre.id);
        Ok(genre)
    }

    fn list(&self) -> Result<Vec<Genre>> {
        let conn = get_conn(&self.pool)?;
        genres::list_genres(&conn)
    }
}
