//! `Stream #` header lines.
//!
//! ```text
//!     Stream #0:0(eng): Audio: aac (LC) (mp4a / 0x6134706D), 44100 Hz, stereo, fltp, 262 kb/s (default)
//!     Stream #0:1: Video: mjpeg (Baseline), yuvj444p(pc, bt470bg/unknown/unknown), 599x518, 90k tbr (attached pic)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static STREAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Stream #(\d+):(\d+)(?:\[[^\]]*\])?(?:\(([^)]*)\))?(?:\[[^\]]*\])?: (\w+): (.*)$")
        .expect("stream header pattern is valid")
});

/// Codecs that only ever carry still images when muxed into an audio file.
const IMAGE_CODECS: &[&str] = &[
    "mjpeg", "png", "bmp", "gif", "webp", "tiff", "jpeg2000", "jpegls",
];

/// Disposition marker ffmpeg prints for cover art streams.
const ATTACHED_PIC_MARKER: &str = "(attached pic)";

/// The declared media kind of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Subtitle,
    Other,
}

impl MediaKind {
    fn from_label(label: &str) -> Self {
        match label {
            "Audio" => Self::Audio,
            "Video" => Self::Video,
            "Subtitle" => Self::Subtitle,
            _ => Self::Other,
        }
    }
}

/// Fields parsed from a stream header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Input file index (`#0:1` -> 0).
    pub input: u32,
    /// Stream index within the input (`#0:1` -> 1).
    pub index: u32,
    /// Language annotation, e.g. `eng`.
    pub language: Option<String>,
    pub kind: MediaKind,
    /// Lowercased codec name, without profile or tag annotations.
    pub codec: String,
    /// Explicit `kb/s` figure, if the header carries one.
    pub bitrate: Option<u32>,
    /// Channel count from the channel-layout descriptor (audio only).
    pub channels: Option<u32>,
    /// Whether the `(attached pic)` disposition marker is present.
    pub attached_pic: bool,
}

impl StreamHeader {
    /// Parse a header from a line already stripped of leading whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = STREAM_RE.captures(line.trim_end())?;
        let input = caps[1].parse().ok()?;
        let index = caps[2].parse().ok()?;
        let language = caps.get(3).map(|m| m.as_str().to_string());
        let kind = MediaKind::from_label(&caps[4]);
        let description = &caps[5];

        let fields = split_fields(description);
        let codec = fields
            .first()
            .and_then(|f| f.split_whitespace().next())
            .unwrap_or_default()
            .to_lowercase();
        let channels = match kind {
            MediaKind::Audio => find_channels(&fields),
            _ => None,
        };

        Some(Self {
            input,
            index,
            language,
            kind,
            codec,
            bitrate: find_bitrate(&fields),
            channels,
            attached_pic: description.contains(ATTACHED_PIC_MARKER),
        })
    }

    /// Whether this stream looks like embedded cover art rather than video.
    ///
    /// Matches video streams flagged `(attached pic)` or using a still-image
    /// codec. Newer ffmpeg builds print the disposition; older ones only
    /// show the codec.
    pub fn is_attached_picture(&self) -> bool {
        self.kind == MediaKind::Video
            && (self.attached_pic || IMAGE_CODECS.contains(&self.codec.as_str()))
    }
}

/// Convert a channel-layout descriptor to a channel count.
///
/// `mono` -> 1, `stereo` -> 2, `N.M` -> N + M, a bare integer -> itself.
/// Layout qualifiers in parentheses (`5.1(side)`) are ignored.
pub fn parse_channels(descriptor: &str) -> Option<u32> {
    let layout = strip_annotations(descriptor).to_lowercase();
    match layout.as_str() {
        "mono" => return Some(1),
        "stereo" | "downmix" => return Some(2),
        "quad" => return Some(4),
        _ => {}
    }

    if let Some((front, lfe)) = layout.split_once('.') {
        let front: u32 = front.parse().ok()?;
        let lfe: u32 = lfe.parse().ok()?;
        return front.checked_add(lfe);
    }

    layout.split_whitespace().next()?.parse().ok()
}

/// Split a stream description at commas that are not nested in brackets.
fn split_fields(description: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in description.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fields.push(description[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(description[start..].trim());
    fields.retain(|f| !f.is_empty());
    fields
}

/// Drop trailing parenthesised annotations: `262 kb/s (default)` -> `262 kb/s`.
fn strip_annotations(field: &str) -> &str {
    match field.find('(') {
        Some(idx) => field[..idx].trim(),
        None => field.trim(),
    }
}

fn find_bitrate(fields: &[&str]) -> Option<u32> {
    fields.iter().rev().find_map(|field| {
        strip_annotations(field)
            .strip_suffix("kb/s")
            .and_then(|n| n.trim().parse().ok())
    })
}

fn find_channels(fields: &[&str]) -> Option<u32> {
    // The layout follows the sample rate when one is printed.
    if let Some(pos) = fields.iter().position(|f| f.ends_with("Hz")) {
        if let Some(channels) = fields.get(pos + 1).and_then(|f| parse_channels(f)) {
            return Some(channels);
        }
    }

    fields
        .iter()
        .skip(1)
        .filter(|f| !f.ends_with("Hz") && !strip_annotations(f).ends_with("kb/s"))
        .find_map(|f| parse_channels(f))
}
