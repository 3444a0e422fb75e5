// Splits a message into plain and blurred runs for display
// Every byte of the source lands in exactly one segment

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contact_detector::{ContactDetector, ContactKind, ContactMatch};
use crate::warnings::{NotificationSink, WarningCatalog};

/// A contiguous run of message text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Plain { text: String },
    Blurred { text: String, kind: ContactKind },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Blurred { text, .. } => text,
        }
    }

    pub fn is_blurred(&self) -> bool {
        matches!(self, Segment::Blurred { .. })
    }

    pub fn kind(&self) -> Option<ContactKind> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Blurred { kind, .. } => Some(*kind),
        }
    }

    /// Handle a click on this segment
    ///
    /// Blurred segments show the warning for their kind and return `true`.
    /// Plain segments do nothing.
    pub fn activate(&self, catalog: &WarningCatalog, sink: &dyn NotificationSink) -> bool {
        match self {
            Segment::Plain { .. } => false,
            Segment::Blurred { kind, .. } => {
                let warning = catalog.for_kind(*kind);
                sink.show(&warning.title, &warning.message, warning.duration());
                true
            }
        }
    }
}

/// Build display segments for `text` from matches found on that same text
///
/// Matches are walked in ascending `start` order. Offsets are clamped so the
/// output always concatenates back to `text`: `end` is capped at the text
/// length, `start` is raised to the end of the previous blurred run, spans
/// already covered are skipped, and offsets inside a multi-byte character
/// are widened to the enclosing character.
pub fn build_segments(text: &str, matches: &[ContactMatch]) -> Vec<Segment> {
    let mut ordered: Vec<&ContactMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.start);

    let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0usize;

    for m in ordered {
        let end = ceil_char_boundary(text, m.end.min(text.len()));
        let start = floor_char_boundary(text, m.start.min(end)).max(cursor);

        if start >= end {
            continue;
        }

        if start > cursor {
            segments.push(Segment::Plain { text: text[cursor..start].to_string() });
        }
        segments.push(Segment::Blurred { text: text[start..end].to_string(), kind: m.kind });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment::Plain { text: text[cursor..].to_string() });
    }

    debug!("Built {} segments from {} matches", segments.len(), matches.len());
    segments
}

/// Render blurred runs as `mask`, one mask character per hidden character
pub fn mask_text(text: &str, matches: &[ContactMatch], mask: char) -> String {
    let mut masked = String::with_capacity(text.len());
    for segment in build_segments(text, matches) {
        match segment {
            Segment::Plain { text } => masked.push_str(&text),
            Segment::Blurred { text, .. } => masked.extend(std::iter::repeat(mask).take(text.chars().count())),
        }
    }
    masked
}

/// Concatenate segment texts
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// A message with its detected contacts and display segments
#[derive(Debug, Clone, Serialize)]
pub struct RedactedText {
    pub text: String,
    pub matches: Vec<ContactMatch>,
    pub segments: Vec<Segment>,
}

impl RedactedText {
    pub fn new(text: &str, detector: &ContactDetector) -> Self {
        let matches = detector.detect(text);
        let segments = build_segments(text, &matches);
        Self { text: text.to_string(), matches, segments }
    }

    pub fn has_contacts(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn masked(&self, mask: char) -> String {
        mask_text(&self.text, &self.matches, mask)
    }

    /// Activate the segment at `index`; `false` if it is plain or out of range
    pub fn activate(&self, index: usize, catalog: &WarningCatalog, sink: &dyn NotificationSink) -> bool {
        self.segments
            .get(index)
            .is_some_and(|segment| segment.activate(catalog, sink))
    }
}
