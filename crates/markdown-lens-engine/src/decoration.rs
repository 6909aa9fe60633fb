use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::syntax::Span;

/// How a span of source text should be presented. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationKind {
    /// Markup the host should hide (delimiters, markers, URLs).
    Hide,
    Bold,
    Italic,
    BoldItalic,
    Strikethrough,
    Code,
    CodeBlock,
    Blockquote,
    /// Heading whose depth is outside 1..=6.
    Heading,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Link,
    Image,
    HorizontalRule,
    Highlight,
}

impl DecorationKind {
    /// Heading kind for a parsed depth, falling back to the generic
    /// [`DecorationKind::Heading`].
    pub fn heading(depth: u8) -> Self {
        match depth {
            1 => Self::Heading1,
            2 => Self::Heading2,
            3 => Self::Heading3,
            4 => Self::Heading4,
            5 => Self::Heading5,
            6 => Self::Heading6,
            _ => Self::Heading,
        }
    }

    /// Heading depth, present only for `Heading1..=Heading6`.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            Self::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self == Self::Heading || self.level().is_some()
    }

    /// The wire name, as used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "boldItalic",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::CodeBlock => "codeBlock",
            Self::Blockquote => "blockquote",
            Self::Heading => "heading",
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::Heading4 => "heading4",
            Self::Heading5 => "heading5",
            Self::Heading6 => "heading6",
            Self::Link => "link",
            Self::Image => "image",
            Self::HorizontalRule => "horizontalRule",
            Self::Highlight => "highlight",
        }
    }
}

impl std::fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A typed instruction for one span of text. The atomic output unit.
///
/// Equality and hashing cover `(start, end, kind)`, which is exactly the
/// dedup key the collector uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decoration {
    pub span: Span,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn new(start: usize, end: usize, kind: DecorationKind) -> Self {
        Self {
            span: Span::new(start, end),
            kind,
        }
    }

    pub fn hide(start: usize, end: usize) -> Self {
        Self::new(start, end, DecorationKind::Hide)
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn level(&self) -> Option<u8> {
        self.kind.level()
    }

    /// Non-degenerate and sliceable from `text`.
    pub fn is_valid_in(&self, text: &str) -> bool {
        self.span.start < self.span.end && self.span.is_valid_in(text)
    }
}

impl Serialize for Decoration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let level = self.level();
        let fields = if level.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("Decoration", fields)?;
        state.serialize_field("startPos", &self.span.start)?;
        state.serialize_field("endPos", &self.span.end)?;
        state.serialize_field("type", &self.kind)?;
        if let Some(level) = level {
            state.serialize_field("level", &level)?;
        }
        state.end()
    }
}
