//! Reports covering several inputs.
//!
//! One probe invocation may list many files; ffmpeg prints one
//! `Input #N, <format>, from '<path>':` block per file. Each block is parsed
//! on its own so tags never leak between files.

use serde::Serialize;

use crate::line::{classify, Line};
use crate::metadata::ParsedMetadata;
use crate::parser::extract_metadata;

/// The slice of a report belonging to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSection<'a> {
    pub index: Option<u32>,
    pub format: Option<&'a str>,
    pub path: Option<&'a str>,
    /// The header line and every line up to the next header.
    pub text: String,
}

/// Parsed metadata for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbedInput {
    pub path: String,
    pub format: String,
    pub metadata: ParsedMetadata,
}

/// Split a report at its `Input #` headers.
///
/// Lines before the first header (version banner, configuration) are dropped.
pub fn split_inputs(report: &str) -> Vec<InputSection<'_>> {
    let mut sections: Vec<InputSection<'_>> = Vec::new();

    for line in report.lines() {
        if let Line::InputHeader(header) = classify(line) {
            sections.push(InputSection {
                index: header.index,
                format: header.format,
                path: header.path,
                text: String::new(),
            });
        }

        if let Some(current) = sections.last_mut() {
            current.text.push_str(line);
            current.text.push('\n');
        }
    }

    sections
}

/// Parse every input of a report.
///
/// # Example
///
/// ```
/// use tagscan_ffmeta::parse_report;
///
/// let report = "\
/// Input #0, mp3, from 'one.mp3':
///   Metadata:
///     title           : One
/// Input #1, flac, from 'two.flac':
///   Metadata:
///     title           : Two
/// ";
///
/// let inputs = parse_report(report);
/// assert_eq!(inputs.len(), 2);
/// assert_eq!(inputs[1].path, "two.flac");
/// assert_eq!(inputs[1].metadata.first("title"), Some("Two"));
/// ```
pub fn parse_report(report: &str) -> Vec<ProbedInput> {
    split_inputs(report)
        .into_iter()
        .map(|section| ProbedInput {
            path: section.path.unwrap_or_default().to_string(),
            format: section.format.unwrap_or_default().to_string(),
            metadata: extract_metadata(&section.text),
        })
        .collect()
}
