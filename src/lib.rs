//! Tagscan - music library tag scanner
//!
//! This library crate exposes the scanner and configuration for the binary
//! and for integration testing.

pub mod config;
pub mod scanner;
