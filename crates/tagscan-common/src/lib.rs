//! Tagscan-Common: Shared types, typed ids, and utilities.
//!
//! This crate provides common functionality used across tagscan:
//!
//! - **Typed IDs**: Type-safe UUID wrappers for genres and media files
//! - **Core Types**: The `Genre` and `MediaFile` records built by the scanner
//! - **Repository**: The genre persistence collaborator consumed by the scanner
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use tagscan_common::{GenreRepository, InMemoryGenreRepository};
//!
//! let repo = InMemoryGenreRepository::new();
//! let rock = repo.create("Rock").unwrap();
//! assert_eq!(repo.get_by_name("Rock").unwrap(), Some(rock));
//! ```

pub mod error;
pub mod ids;
pub mod repository;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use repository::{GenreRepository, InMemoryGenreRepository};
pub use types::*;
