//! Links, images and their reference forms.
//!
//! All four share one bracket layout, [`LinkParts`]: an opening delimiter
//! (`<`, `[` or `![`), the visible text, a closing delimiter and an optional
//! destination group (`(...)` or a second `[...]`). Decorations hide every
//! part except the text, which gets `link` or `image`. The link resolver
//! reuses the same layout to find navigable text.

use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::{Cursor, NodeKind, Span, SyntaxNode},
};

/// Byte layout of a link-like construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkParts {
    /// `<`, `[` or `![`.
    pub open: Span,
    /// Link text, alt text or the bare autolink URL.
    pub text: Span,
    /// `>` or `]`.
    pub close: Span,
    /// `(url "title")` or `[id]`; absent for autolinks and shortcut references.
    pub destination: Option<Span>,
}

impl LinkParts {
    /// Locates the parts of any link-like node.
    pub fn of(node: &SyntaxNode, text: &str) -> Option<LinkParts> {
        let (span, _) = node.resolve(text)?;
        match node.kind {
            NodeKind::Link { .. } => {
                autolink(span, text).or_else(|| inline(node, span, text, false))
            }
            NodeKind::Image { .. } => inline(node, span, text, true),
            NodeKind::LinkReference { .. } => reference(node, span, text, false),
            NodeKind::ImageReference { .. } => reference(node, span, text, true),
            _ => None,
        }
    }

    fn decorations(self, kind: DecorationKind) -> Vec<Decoration> {
        let mut out = vec![
            Decoration::hide(self.open.start, self.open.end),
            Decoration::hide(self.close.start, self.close.end),
        ];
        if let Some(dest) = self.destination {
            out.push(Decoration::hide(dest.start, dest.end));
        }
        if !self.text.is_empty() {
            out.push(Decoration::new(self.text.start, self.text.end, kind));
        }
        out
    }
}

/// `<url>` with the brackets either inside the node span or right outside it.
fn autolink(span: Span, text: &str) -> Option<LinkParts> {
    let bytes = text.as_bytes();
    let raw = &bytes[span.start..span.end];
    if raw.len() > 2 && raw[0] == b'<' && raw[raw.len() - 1] == b'>' {
        return Some(LinkParts {
            open: Span::new(span.start, span.start + 1),
            text: Span::new(span.start + 1, span.end - 1),
            close: Span::new(span.end - 1, span.end),
            destination: None,
        });
    }
    let before = span.start.checked_sub(1).and_then(|i| bytes.get(i));
    let after = bytes.get(span.end);
    if !raw.is_empty() && raw[0] != b'[' && before == Some(&b'<') && after == Some(&b'>') {
        return Some(LinkParts {
            open: Span::new(span.start - 1, span.start),
            text: span,
            close: Span::new(span.end, span.end + 1),
            destination: None,
        });
    }
    None
}

/// Opens the cursor on the first `[`, past a required `!` for images.
fn open_bracket<'a>(span: Span, text: &'a str, image: bool) -> Option<Cursor<'a>> {
    let mut cur = Cursor::new(&text[span.start..span.end], span.start);
    if image && cur.bump() != Some(b'!') {
        return None;
    }
    (cur.peek() == Some(b'[')).then_some(cur)
}

/// With the cursor on the opening `[`, finds the `]` closing the link text
/// and leaves the cursor past it.
///
/// When the node's children end right at a `]`, that bracket closes the text:
/// brackets inside code spans are literal and must not be counted. Without
/// usable children the brackets are matched by depth.
fn close_text(cur: &mut Cursor<'_>, node: &SyntaxNode, text: &str) -> Option<usize> {
    let limit = cur.base + cur.s.len();
    let children_end = node
        .children
        .iter()
        .filter_map(|c| c.position)
        .map(|p| p.end)
        .max()
        .filter(|&end| end > cur.pos() && end < limit)
        .filter(|&end| text.as_bytes().get(end) == Some(&b']'));
    match children_end {
        Some(end) => {
            cur.bump_n(end + 1 - cur.pos());
            Some(end)
        }
        None => cur.seek_matching(b'[', b']'),
    }
}

/// `[text](url "title")` or `![alt](src)`.
fn inline(node: &SyntaxNode, span: Span, text: &str, image: bool) -> Option<LinkParts> {
    let mut cur = open_bracket(span, text, image)?;
    let bracket = cur.pos();
    let close = close_text(&mut cur, node, text)?;
    cur.skip_whitespace();
    if cur.peek() != Some(b'(') {
        log::trace!("link at {} has no inline destination", span.start);
        return None;
    }
    let paren = cur.pos();
    let paren_close = cur.seek_matching(b'(', b')')?;
    Some(LinkParts {
        open: Span::new(span.start, bracket + 1),
        text: Span::new(bracket + 1, close),
        close: Span::new(close, close + 1),
        destination: Some(Span::new(paren, paren_close + 1)),
    })
}

/// `[text][id]`, `[text][]` or `[text]`, optionally image-prefixed.
fn reference(node: &SyntaxNode, span: Span, text: &str, image: bool) -> Option<LinkParts> {
    let mut cur = open_bracket(span, text, image)?;
    let bracket = cur.pos();
    let close = close_text(&mut cur, node, text)?;
    cur.skip_whitespace();
    let destination = match cur.peek() {
        None => None,
        Some(b'[') => {
            let id_open = cur.pos();
            let id_close = cur.seek_matching(b'[', b']')?;
            Some(Span::new(id_open, id_close + 1))
        }
        Some(_) => return None,
    };
    Some(LinkParts {
        open: Span::new(span.start, bracket + 1),
        text: Span::new(bracket + 1, close),
        close: Span::new(close, close + 1),
        destination,
    })
}

pub fn decorate_link(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    autolink(span, text)
        .or_else(|| inline(node, span, text, false))
        .map(|parts| parts.decorations(DecorationKind::Link))
        .unwrap_or_default()
}

pub fn decorate_image(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    inline(node, span, text, true)
        .map(|parts| parts.decorations(DecorationKind::Image))
        .unwrap_or_default()
}

pub fn decorate_link_reference(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    reference(node, span, text, false)
        .map(|parts| parts.decorations(DecorationKind::Link))
        .unwrap_or_default()
}

pub fn decorate_image_reference(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    reference(node, span, text, true)
        .map(|parts| parts.decorations(DecorationKind::Image))
        .unwrap_or_default()
}
