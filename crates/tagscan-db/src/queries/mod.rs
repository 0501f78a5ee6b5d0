//! Database query modules.
//!
//! - genres: genre lookup, creation, and listing

pub mod genres;
