use std::fmt::Write;

use serde::Serialize;

use crate::{decoration::Decoration, syntax::Span};

/// One decoration with the text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationSnap {
    pub kind: String,
    pub span: (usize, usize),
    pub text: String,
}

/// Text under `span`, newlines escaped, cut to `max` bytes with a `...`
/// suffix. Invalid spans preview as `<invalid>`.
pub fn preview(text: &str, span: Span, max: usize) -> String {
    let Some(slice) = span.slice(text) else {
        return "<invalid>".to_string();
    };
    let mut s = slice.replace('\r', "\\r").replace('\n', "\\n");
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

pub fn normalize(text: &str, decorations: &[Decoration]) -> Vec<DecorationSnap> {
    decorations
        .iter()
        .map(|d| DecorationSnap {
            kind: d.kind.to_string(),
            span: (d.start(), d.end()),
            text: preview(text, d.span, 40),
        })
        .collect()
}

/// One line per decoration: kind, range and the covered text.
pub fn render(text: &str, decorations: &[Decoration]) -> String {
    let mut out = String::new();
    for snap in normalize(text, decorations) {
        let range = format!("{}..{}", snap.span.0, snap.span.1);
        // writing to a String cannot fail
        let _ = writeln!(out, "{:<14} {:<9} \"{}\"", snap.kind, range, snap.text);
    }
    out
}
