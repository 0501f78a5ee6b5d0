//! Genre database queries.

use rusqlite::{Connection, OptionalExtension, Row};
use tagscan_common::{Error, Genre, GenreId, Result};
use uuid::Uuid;

/// Insert a genre with a fresh id.
///
/// Fails with `Error::Database` when the name is already taken and with
/// `Error::InvalidInput` for an empty name.
pub fn create_genre(conn: &Connection, name: &str) -> Result<Genre> {
    if name.is_empty() {
        return Err(Error::invalid_input("genre name cannot be empty"));
    }

    let genre = Genre::new(name);

    conn.execute(
        "INSERT INTO genres (id, name) VALUES (:id, :name)",
        rusqlite::named_params! {
            ":id": genre.id.to_string(),
            ":name": genre.name,
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(genre)
}

/// Get a genre by exact name.
pub fn get_genre_by_name(conn: &Connection, name: &str) -> Result<Option<Genre>> {
    let row = conn
        .query_row(
            "SELECT id, name FROM genres WHERE name = :name",
            rusqlite::named_params! { ":name": name },
            genre_columns,
        )
        .optional()
        .map_err(|e| Error::database(e.to_string()))?;

    row.map(into_genre).transpose()
}

/// List all genres in insertion order.
pub fn list_genres(conn: &Connection) -> Result<Vec<Genre>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM genres ORDER BY rowid")
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], genre_columns)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    rows.into_iter().map(into_genre).collect()
}

/// Count stored genres.
pub fn count_genres(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM genres", [], |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(|e| Error::database(e.to_string()))
}

fn genre_columns(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get(0)?, row.get(1)?))
}

fn into_genre((id, name): (String, String)) -> Result<Genre> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|e| Error::internal(format!("invalid genre id {}: {}", id, e)))?;

    Ok(Genre {
        id: GenreId::from(uuid),
        name,
    })
}
