use serde::Serialize;

/// A byte range `[start, end)` into the document text.
///
/// Nodes and decorations store spans rather than copied text, so slicing the
/// document with any span reproduces the exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when both spans share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Checks the span can be used to slice `text` without panicking.
    #[must_use]
    pub fn is_valid_in(self, text: &str) -> bool {
        self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    /// Slices `text`, or `None` when the span is not valid for it.
    pub fn slice(self, text: &str) -> Option<&str> {
        if self.is_valid_in(text) {
            Some(&text[self.start..self.end])
        } else {
            None
        }
    }

    /// Drops trailing `\r` / `\n` bytes, so block spans end on their last
    /// visible character.
    #[must_use]
    pub fn trim_line_break(self, text: &str) -> Span {
        let bytes = text.as_bytes();
        let mut end = self.end.min(bytes.len());
        while end > self.start && matches!(bytes[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        Span::new(self.start, end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}
