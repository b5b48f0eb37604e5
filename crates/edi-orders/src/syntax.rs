//! EDIFACT syntax definitions and segment splitting
//!
//! The purchase-order grammar handled by this crate is fixed: there is no
//! UNA service string advice, so the default separators always apply.

/// Segment terminator
pub const SEGMENT_TERMINATOR: char = '\'';
/// Data element separator
pub const ELEMENT_SEPARATOR: char = '+';

/// A borrowed view of one segment, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    raw: &'a str,
}

impl<'a> Segment<'a> {
    /// Wrap raw segment text. Leading line breaks between segments are dropped.
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw: raw.trim_start(),
        }
    }

    /// The full segment text, tag included
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Segment tag (3 uppercase letters), `None` if the segment does not start with one
    pub fn tag(&self) -> Option<&'a str> {
        let tag = self.raw.get(0..3)?;
        if tag.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(tag)
        } else {
            None
        }
    }

    /// Whether this segment has the given tag
    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }
}

/// Split document text into its segments, preserving order.
///
/// Empty pieces (such as the one following the final terminator) are skipped.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    text.split(SEGMENT_TERMINATOR)
        .map(Segment::new)
        .filter(|segment| !segment.as_str().is_empty())
        .collect()
}
