//! # tagscan-ffmeta
//!
//! Reads the human-readable report ffmpeg prints when asked to open one or
//! more inputs without writing an output.
//!
//! This crate provides functionality for:
//! - Building the probe command line for a batch of files
//! - Running ffmpeg and collecting its report
//! - Extracting container and stream tags, multi-line values included
//! - Deriving duration, bitrate, channel count, and embedded-cover presence
//!
//! ## Example
//!
//! ```
//! use tagscan_ffmeta::extract_metadata;
//!
//! let report = "\
//! Input #0, mp3, from 'drive.mp3':
//!   Metadata:
//!     title           : Drive (Teku)
//!   Duration: 00:03:37.37, start: 0.025056, bitrate: 138 kb/s
//!     Stream #0:0: Audio: mp3, 44100 Hz, stereo, fltp, 135 kb/s
//! ";
//!
//! let md = extract_metadata(report);
//! assert_eq!(md.first("title"), Some("Drive (Teku)"));
//! assert_eq!(md.first("duration"), Some("217.37"));
//! assert_eq!(md.first("bitrate"), Some("135"));
//! assert_eq!(md.first("channels"), Some("2"));
//! ```

mod command;
mod error;
pub mod line;
pub mod metadata;
mod parser;
mod report;
pub mod stream;
pub mod tools;

// Re-exports
pub use command::{create_probe_command, Prober, DEFAULT_PROGRAM};
pub use error::{Error, Result};
pub use line::{classify, Line};
pub use metadata::{keys, ParsedMetadata};
pub use parser::{extract_derived, extract_metadata, DerivedFields};
pub use report::{parse_report, split_inputs, InputSection, ProbedInput};
pub use stream::{parse_channels, MediaKind, StreamHeader};
pub use tools::{check_tool, get_tool_path, require_tool, ToolInfo};
