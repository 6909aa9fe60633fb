use std::sync::OnceLock;

use regex::Regex;

use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::{Span, SyntaxNode},
};

/// The blockquote prefix character.
pub const PREFIX: u8 = b'>';

/// `>` markers at the start of a line, including nested `> >` / `>>` forms
/// and the whitespace that follows them.
fn marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]*>(?:[ \t]*>)*[ \t]*").expect("Invalid blockquote regex"))
}

/// Start of the line containing `offset`.
fn line_start(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Hides the `>` marker on every line of the quote and emits one
/// line-aligned `blockquote` range. Nested quotes are not distinguished.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    let span = span.trim_line_break(text);
    let start = line_start(text, span.start);
    let block = Span::new(start, span.end);
    if block.is_empty() {
        return vec![];
    }

    let mut out = Vec::new();
    let mut offset = start;
    for line in text[start..span.end].split_inclusive('\n') {
        if let Some(m) = marker().find(line) {
            out.push(Decoration::hide(offset + m.start(), offset + m.end()));
        }
        offset += line.len();
    }
    out.push(Decoration::new(block.start, block.end, DecorationKind::Blockquote));
    out
}
