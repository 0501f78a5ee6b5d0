//! Tagscan-DB: SQLite storage for genres resolved during scans.
//!
//! This crate provides the persistent `GenreRepository` implementation using
//! SQLite with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `queries` - Database query operations
//! - `repository` - `GenreRepository` backed by the pool
//!
//! # Example
//!
//! ```
//! use tagscan_common::GenreRepository;
//! use tagscan_db::{pool::init_memory_pool, SqliteGenreRepository};
//!
//! let repo = SqliteGenreRepository::new(init_memory_pool().unwrap());
//! let rock = repo.create("Rock").unwrap();
//! assert_eq!(repo.get_by_name("Rock").unwrap(), Some(rock));
//! ```

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod repository;

pub use repository::SqliteGenreRepository;
