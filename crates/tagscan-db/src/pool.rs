//! Database connection pool management.
//!
//! Connection pooling for SQLite using r2d2. Pools run pending migrations
//! before they are handed out.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tagscan_common::{Error, Result};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a pool over the SQLite file at `db_path`, creating it if needed.
///
/// # Example
///
/// ```no_run
/// use tagscan_db::pool::init_pool;
///
/// let pool = init_pool("tagscan.db").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: impl AsRef<Path>) -> Result<DbPool> {
    let db_path = db_path.as_ref();
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    migrate(&pool)?;
    tracing::debug!("Opened genre database at {}", db_path.display());

    Ok(pool)
}

/// Initialize an in-memory pool for tests and dry runs.
///
/// Every in-memory SQLite connection is its own database, so this pool
/// holds a single connection.
///
/// # Example
///
/// ```
/// use tagscan_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {}", e)))?;

    migrate(&pool)?;

    Ok(pool)
}

/// Get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}

fn migrate(pool: &DbPool) -> Result<()> {
    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(())
}
