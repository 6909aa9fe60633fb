use std::sync::OnceLock;

use regex::Regex;

use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::SyntaxNode,
};

/// Opening fence, info string, greedy body, closing fence.
///
/// The regex crate has no backreferences, so the closing fence is captured
/// separately and checked against the opening one in code.
fn fenced() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)\A[ \t]*(?P<open>`{3,}|~{3,})(?P<info>[^\n]*)\n(?:(?P<body>.*)\n)?[ \t]*(?P<close>`{3,}|~{3,})[ \t]*\r?\n?\z",
        )
        .expect("Invalid code fence regex")
    })
}

/// Hides the fences (and info string) of a fenced code block and marks the
/// whole block, fences included, as `codeBlock` so background styling spans
/// the full visual block.
///
/// When the fence structure cannot be matched (unterminated or indented
/// blocks) the span is decorated as plain `code` instead.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, raw)) = node.resolve(text) else {
        return vec![];
    };

    let Some(caps) = fenced().captures(raw) else {
        return fallback(node, text);
    };
    let (Some(open), Some(close)) = (caps.name("open"), caps.name("close")) else {
        return fallback(node, text);
    };
    let fence_char = open.as_str().as_bytes()[0];
    // the regex may backtrack into the opening run; only the full run counts
    let full_run = raw.as_bytes().get(open.end()) != Some(&fence_char);
    let same_char = fence_char == close.as_str().as_bytes()[0];
    if !full_run || !same_char || close.len() < open.len() {
        return fallback(node, text);
    }

    let block_end = span.start + close.end();
    let mut out = match caps.name("body") {
        Some(body) => vec![
            Decoration::hide(span.start, span.start + body.start()),
            Decoration::hide(span.start + body.end(), block_end),
        ],
        None => vec![Decoration::hide(span.start, block_end)],
    };
    out.push(Decoration::new(span.start, block_end, DecorationKind::CodeBlock));
    out
}

fn fallback(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    let span = span.trim_line_break(text);
    log::trace!("code block at {} has no matching fences", span.start);
    if span.is_empty() {
        return vec![];
    }
    vec![Decoration::new(span.start, span.end, DecorationKind::Code)]
}
