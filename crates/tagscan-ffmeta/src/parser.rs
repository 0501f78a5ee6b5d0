//! Single-pass extraction of tags and derived fields from one input's report.
//!
//! The parser threads a small state value through the lines: the section
//! tags are attributed to (container or the last stream seen), whether a
//! `Metadata:` block is open, and which tag a continuation line extends.

use crate::line::{classify, DurationLine, Line};
use crate::metadata::{keys, ParsedMetadata};
use crate::stream::{MediaKind, StreamHeader};

/// Tag carrying base64 artwork in Vorbis comments (ogg, opus, flac).
const PICTURE_BLOCK_TAG: &str = "metadata_block_picture";

/// Tag that only describes an attached picture inside its stream.
const COVER_COMMENT_TAG: &str = "comment";

/// Where tag lines are currently being attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Container,
    AudioStream,
    VideoStream { attached_picture: bool },
    OtherStream,
}

impl Section {
    fn for_stream(header: &StreamHeader) -> Self {
        match header.kind {
            MediaKind::Audio => Self::AudioStream,
            MediaKind::Video => Self::VideoStream {
                attached_picture: header.is_attached_picture(),
            },
            MediaKind::Subtitle | MediaKind::Other => Self::OtherStream,
        }
    }

    fn suppresses(&self, key: &str) -> bool {
        matches!(
            self,
            Self::VideoStream {
                attached_picture: true
            }
        ) && key == COVER_COMMENT_TAG
    }
}

/// Which value the next continuation line extends.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Continuation {
    None,
    Tag(String),
    /// The last tag was suppressed; its continuation lines are dropped too.
    Suppressed,
}

/// Scalars computed once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedFields {
    /// Seconds with two decimals.
    pub duration: Option<String>,
    /// kb/s, preferring the audio stream's figure over the container's.
    pub bitrate: Option<u32>,
    pub channels: Option<u32>,
    pub has_picture: bool,
}

#[derive(Debug)]
struct MetadataParser {
    metadata: ParsedMetadata,
    section: Section,
    /// Indentation of the open `Metadata:` marker.
    block_indent: Option<usize>,
    continuation: Continuation,
    duration: Option<DurationLine>,
    stream_bitrate: Option<u32>,
    channels: Option<u32>,
    has_picture: bool,
}

impl MetadataParser {
    fn new() -> Self {
        Self {
            metadata: ParsedMetadata::new(),
            section: Section::Container,
            block_indent: None,
            continuation: Continuation::None,
            duration: None,
            stream_bitrate: None,
            channels: None,
            has_picture: false,
        }
    }

    fn feed(&mut self, raw: &str) {
        match classify(raw) {
            Line::InputHeader(_) => {
                self.section = Section::Container;
                self.close_block();
            }
            Line::Duration(line) => {
                if self.duration.map_or(true, |d| d.centiseconds.is_none()) {
                    self.duration = Some(DurationLine {
                        centiseconds: line.centiseconds,
                        bitrate: self
                            .duration
                            .and_then(|d| d.bitrate)
                            .or(line.bitrate),
                    });
                }
                self.close_block();
            }
            Line::Stream(header) => {
                self.on_stream(&header);
                self.close_block();
            }
            Line::MetadataMarker { indent } => {
                self.block_indent = Some(indent);
                self.continuation = Continuation::None;
            }
            Line::Tag { indent, key, value } => match self.block_indent {
                Some(block) if indent > block => self.on_tag(key, value),
                _ => {
                    tracing::trace!("Ignoring tag-shaped line outside a metadata block: {}", raw);
                    self.close_block();
                }
            },
            Line::Continuation { payload } => match &self.continuation {
                Continuation::Tag(key) => {
                    let text = format!("\n{}", payload);
                    self.metadata.extend_last(key, &text);
                }
                Continuation::Suppressed => {}
                Continuation::None => {
                    tracing::trace!("Ignoring continuation without a tag: {}", raw);
                }
            },
            Line::Blank => {}
            Line::Other => {
                tracing::trace!("Ignoring line: {}", raw);
                self.continuation = Continuation::None;
            }
        }
    }

    fn on_stream(&mut self, header: &StreamHeader) {
        self.section = Section::for_stream(header);

        if header.is_attached_picture() {
            self.has_picture = true;
        }

        if header.kind == MediaKind::Audio {
            if self.stream_bitrate.is_none() {
                self.stream_bitrate = header.bitrate;
            }
            if self.channels.is_none() {
                self.channels = header.channels;
            }
        }
    }

    fn on_tag(&mut self, key: String, value: &str) {
        if key == PICTURE_BLOCK_TAG {
            self.has_picture = true;
        }

        if self.section.suppresses(&key) {
            tracing::trace!("Suppressing {} tag of attached picture: {}", key, value);
            self.continuation = Continuation::Suppressed;
            return;
        }

        self.metadata.append(key.clone(), value);
        self.continuation = Continuation::Tag(key);
    }

    fn close_block(&mut self) {
        self.block_indent = None;
        self.continuation = Continuation::None;
    }

    fn derived(&self) -> DerivedFields {
        DerivedFields {
            duration: self.duration.and_then(|d| d.seconds_string()),
            bitrate: self
                .stream_bitrate
                .or_else(|| self.duration.and_then(|d| d.bitrate)),
            channels: self.channels,
            has_picture: self.has_picture,
        }
    }

    fn finish(mut self) -> ParsedMetadata {
        let derived = self.derived();

        if let Some(duration) = derived.duration {
            self.metadata.set(keys::DURATION, duration);
        }
        if let Some(bitrate) = derived.bitrate {
            self.metadata.set(keys::BITRATE, bitrate.to_string());
        }
        if let Some(channels) = derived.channels {
            self.metadata.set(keys::CHANNELS, channels.to_string());
        }
        if derived.has_picture {
            self.metadata.set(keys::HAS_PICTURE, "true");
        }

        tracing::debug!(
            "Parsed {} tags (duration={:?}, bitrate={:?}, channels={:?}, has_picture={})",
            self.metadata.len(),
            self.metadata.first(keys::DURATION),
            derived.bitrate,
            derived.channels,
            derived.has_picture
        );

        self.metadata
    }
}

/// Extract the tag table for one input from its section of the report.
///
/// Never fails: unrecognized lines are skipped, and empty input yields an
/// empty table.
///
/// # Example
///
/// ```
/// use tagscan_ffmeta::extract_metadata;
///
/// let report = "\
/// Input #0, ogg, from 'drive.opus':
///   Duration: 00:03:37.37, start: 0.007500, bitrate: 135 kb/s
///     Stream #0:0(eng): Audio: opus, 48000 Hz, stereo, fltp
///     Metadata:
///       TITLE           : Drive (Teku)";
///
/// let md = extract_metadata(report);
/// assert_eq!(md.first("title"), Some("Drive (Teku)"));
/// assert_eq!(md.first("duration"), Some("217.37"));
/// assert_eq!(md.first("bitrate"), Some("135"));
/// assert_eq!(md.first("channels"), Some("2"));
/// ```
pub fn extract_metadata(report: &str) -> ParsedMetadata {
    let mut parser = MetadataParser::new();
    for line in report.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Compute only the derived fields of a report.
pub fn extract_derived(report: &str) -> DerivedFields {
    let mut parser = MetadataParser::new();
    for line in report.lines() {
        parser.feed(line);
    }
    parser.derived()
}
