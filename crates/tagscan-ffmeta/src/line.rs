//! Line classification for ffmpeg's probe report.
//!
//! Each line is categorized by prefix and shape alone. Whether a tag or
//! continuation line actually belongs to a `Metadata:` block is decided by
//! the parser, which knows the current section.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stream::StreamHeader;

static INPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Input #(\d+), (.+), from '(.*)':?\s*$").expect("input header pattern is valid")
});

static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Duration: (\d+):(\d{2}):(\d{2})(?:\.(\d+))?").expect("duration pattern is valid")
});

static CONTAINER_BITRATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"bitrate: (\d+) kb/s").expect("bitrate pattern is valid"));

/// `Input #0, mp3, from 'song.mp3':`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHeader<'a> {
    pub index: Option<u32>,
    /// Demuxer name(s), e.g. `mov,mp4,m4a,3gp,3g2,mj2`.
    pub format: Option<&'a str>,
    pub path: Option<&'a str>,
}

/// `Duration: 00:05:02.63, start: 0.000000, bitrate: 140 kb/s`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationLine {
    /// Duration in hundredths of a second; `None` for `N/A`.
    pub centiseconds: Option<u64>,
    /// Container-level bitrate in kb/s.
    pub bitrate: Option<u32>,
}

impl DurationLine {
    /// Duration formatted as seconds with exactly two decimals.
    pub fn seconds_string(&self) -> Option<String> {
        self.centiseconds
            .map(|cs| format!("{}.{:02}", cs / 100, cs % 100))
    }
}

/// The role of one line in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    InputHeader(InputHeader<'a>),
    Duration(DurationLine),
    Stream(StreamHeader),
    /// `Metadata:` on its own; opens a tag block for deeper-indented lines.
    MetadataMarker { indent: usize },
    /// `<key>   : <value>`; key already lowercased, value trimmed.
    Tag {
        indent: usize,
        key: String,
        value: &'a str,
    },
    /// `                    : more text`; payload trimmed, may be empty.
    Continuation { payload: &'a str },
    Blank,
    Other,
}

/// Classify a single line of probe output.
pub fn classify(line: &str) -> Line<'_> {
    let content = line.trim_start();
    let indent = line[..line.len() - content.len()].chars().count();
    let content = content.trim_end();

    if content.is_empty() {
        return Line::Blank;
    }

    if content.starts_with("Input #") {
        return Line::InputHeader(parse_input_header(content));
    }

    if content.starts_with("Duration:") {
        return Line::Duration(parse_duration_line(content));
    }

    if content.starts_with("Stream #") {
        return match StreamHeader::parse(content) {
            Some(header) => Line::Stream(header),
            None => Line::Other,
        };
    }

    if content == "Metadata:" {
        return Line::MetadataMarker { indent };
    }

    if let Some(payload) = content.strip_prefix(':') {
        return Line::Continuation {
            payload: payload.trim(),
        };
    }

    if let Some((key, value)) = content.split_once(':') {
        let key = key.trim();
        if is_tag_key(key) {
            return Line::Tag {
                indent,
                key: key.to_lowercase(),
                value: value.trim(),
            };
        }
    }

    Line::Other
}

/// Tag names are words that may contain spaces, hyphens, and underscores.
fn is_tag_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ')
}

fn parse_input_header(content: &str) -> InputHeader<'_> {
    match INPUT_RE.captures(content) {
        Some(caps) => InputHeader {
            index: caps[1].parse().ok(),
            format: caps.get(2).map(|m| m.as_str()),
            path: caps.get(3).map(|m| m.as_str()),
        },
        None => InputHeader {
            index: None,
            format: None,
            path: None,
        },
    }
}

fn parse_duration_line(content: &str) -> DurationLine {
    let centiseconds = TIMESTAMP_RE.captures(content).and_then(|caps| {
        let hours: u64 = caps[1].parse().ok()?;
        let minutes: u64 = caps[2].parse().ok()?;
        let seconds: u64 = caps[3].parse().ok()?;
        let hundredths = caps.get(4).map_or(Some(0), |m| fraction_to_hundredths(m.as_str()))?;
        hours
            .checked_mul(60)?
            .checked_add(minutes)?
            .checked_mul(60)?
            .checked_add(seconds)?
            .checked_mul(100)?
            .checked_add(hundredths)
    });

    let bitrate = CONTAINER_BITRATE_RE
        .captures(content)
        .and_then(|caps| caps[1].parse().ok());

    DurationLine {
        centiseconds,
        bitrate,
    }
}

/// `"63"` -> 63, `"5"` -> 50, `"639"` -> 63.
fn fraction_to_hundredths(digits: &str) -> Option<u64> {
    let mut padded: String = digits.chars().take(2).collect();
    while padded.len() < 2 {
        padded.push('0');
    }
    padded.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MediaKind;

    #[test]
    fn test_input_header() {
        let line = "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'modulo.m4a':";
        match classify(line) {
            Line::InputHeader(h) => {
                assert_eq!(h.index, Some(0));
                assert_eq!(h.format, Some("mov,mp4,m4a,3gp,3g2,mj2"));
                assert_eq!(h.path, Some("modulo.m4a"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_input_header_with_quote_and_comma_in_path() {
        let line = "Input #1, mp3, from '/Music/Blues Lounge/09 Pablo's Blues, Live.mp3':";
        match classify(line) {
            Line::InputHeader(h) => {
                assert_eq!(h.index, Some(1));
                assert_eq!(h.format, Some("mp3"));
                assert_eq!(h.path, Some("/Music/Blues Lounge/09 Pablo's Blues, Live.mp3"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duration_line() {
        match classify("  Duration: 00:05:02.63, start: 0.000000, bitrate: 140 kb/s") {
            Line::Duration(d) => {
                assert_eq!(d.centiseconds, Some(30263));
                assert_eq!(d.seconds_string().as_deref(), Some("302.63"));
                assert_eq!(d.bitrate, Some(140));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duration_line_without_start() {
        match classify("  Duration: 00:00:09.05, bitrate: 9216 kb/s") {
            Line::Duration(d) => {
                assert_eq!(d.seconds_string().as_deref(), Some("9.05"));
                assert_eq!(d.bitrate, Some(9216));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duration_overflow_is_dropped() {
        match classify("  Duration: 99999999999999999:00:00.00, start: 0.000000, bitrate: 140 kb/s") {
            Line::Duration(d) => {
                assert_eq!(d.centiseconds, None);
                assert_eq!(d.seconds_string(), None);
                assert_eq!(d.bitrate, Some(140));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duration_not_available() {
        match classify("  Duration: N/A, bitrate: N/A") {
            Line::Duration(d) => {
                assert_eq!(d.centiseconds, None);
                assert_eq!(d.bitrate, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_stream_line() {
        match classify("    Stream #0:0: Audio: mp3, 44100 Hz, stereo, fltp, 192 kb/s") {
            Line::Stream(s) => assert_eq!(s.kind, MediaKind::Audio),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_metadata_marker() {
        assert_eq!(classify("  Metadata:"), Line::MetadataMarker { indent: 2 });
        assert_eq!(classify("\t\t  Metadata:"), Line::MetadataMarker { indent: 4 });
    }

    #[test]
    fn test_tag_lines() {
        assert_eq!(
            classify("    ALBUM ARTIST    : Wyclef Jean"),
            Line::Tag {
                indent: 4,
                key: "album artist".to_string(),
                value: "Wyclef Jean"
            }
        );
        assert_eq!(
            classify("    MUSICBRAINZ_ALBUMSTATUS: official"),
            Line::Tag {
                indent: 4,
                key: "musicbrainz_albumstatus".to_string(),
                value: "official"
            }
        );
        // Only the first colon separates key from value.
        assert_eq!(
            classify("    TITLE           : Symphony No. 5 in C minor, Op. 67: I. Allegro con brio"),
            Line::Tag {
                indent: 4,
                key: "title".to_string(),
                value: "Symphony No. 5 in C minor, Op. 67: I. Allegro con brio"
            }
        );
    }

    #[test]
    fn test_continuation_lines() {
        assert_eq!(
            classify("                    : 01. Saara Saara"),
            Line::Continuation {
                payload: "01. Saara Saara"
            }
        );
        assert_eq!(
            classify("                    :"),
            Line::Continuation { payload: "" }
        );
    }

    #[test]
    fn test_blank_and_other() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t "), Line::Blank);
        assert_eq!(classify("Press [q] to stop, [?] for help"), Line::Other);
        assert_eq!(
            classify("At least one output file must be specified"),
            Line::Other
        );
        assert_eq!(classify("    Chapter #0:0: start 0.000000, end 1.000000"), Line::Other);
    }

    #[test]
    fn test_fraction_to_hundredths() {
        assert_eq!(fraction_to_hundredths("63"), Some(63));
        assert_eq!(fraction_to_hundredths("5"), Some(50));
        assert_eq!(fraction_to_hundredths("639"), Some(63));
    }
}
