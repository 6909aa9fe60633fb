use std::sync::OnceLock;

use regex::Regex;

use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::{NodeKind, Span, SyntaxNode},
};

/// `#` marker plus its required whitespace.
fn atx_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]*#{1,6}[ \t]+").expect("Invalid heading marker regex"))
}

/// A heading line that is nothing but marker and whitespace.
fn marker_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]*#+[ \t]*$").expect("Invalid empty heading regex"))
}

/// Optional closing sequence: ` ##` at the end of the line.
fn closing_sequence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[ \t]+)#+[ \t]*$").expect("Invalid closing sequence regex"))
}

/// Hides the `#` marker and decorates the heading text.
///
/// Empty headings (`# `) produce nothing, so the host never hides a line and
/// leaves it blank. Setext headings hide their underline instead. Anything
/// else the parser accepted but the marker does not match is hidden whole.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let NodeKind::Heading { depth } = node.kind else {
        return vec![];
    };
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    let span = span.trim_line_break(text);
    let raw = &text[span.start..span.end];
    let kind = DecorationKind::heading(depth);

    let Some(marker) = atx_marker().find(raw) else {
        if raw.trim().is_empty() || marker_only().is_match(raw) {
            return vec![];
        }
        if let Some(decorations) = setext(span, raw, kind) {
            return decorations;
        }
        return vec![Decoration::hide(span.start, span.end)];
    };

    let rest = &raw[marker.end()..];
    let closing = closing_sequence().find(rest);
    let content = rest[..closing.map_or(rest.len(), |m| m.start())].trim_end();
    if content.trim().is_empty() {
        return vec![];
    }

    let content_start = span.start + marker.end();
    let content_end = content_start + content.len();
    let mut out = vec![
        Decoration::hide(span.start, content_start),
        Decoration::new(content_start, content_end, kind),
    ];
    if closing.is_some() {
        out.push(Decoration::hide(content_end, span.end));
    }
    out
}

/// `Title\n=====`: heading over the text lines, hide over the line break and
/// underline.
fn setext(span: Span, raw: &str, kind: DecorationKind) -> Option<Vec<Decoration>> {
    let newline = raw.rfind('\n')?;
    let underline = raw[newline + 1..].trim();
    let is_underline = !underline.is_empty()
        && (underline.bytes().all(|b| b == b'=') || underline.bytes().all(|b| b == b'-'));
    if !is_underline {
        return None;
    }

    let body = raw[..newline].trim_end();
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let content_start = span.start + (body.len() - trimmed.len());
    let content_end = span.start + body.len();

    Some(vec![
        Decoration::new(content_start, content_end, kind),
        Decoration::hide(content_end, span.end),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::node;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn heading(text: &str, depth: u8) -> Vec<Decoration> {
        decorate(&node(NodeKind::Heading { depth }, 0, text.len()), text)
    }

    #[test]
    fn hides_marker_and_decorates_content() {
        assert_eq!(
            heading("# Title", 1),
            vec![
                Decoration::hide(0, 2),
                Decoration::new(2, 7, DecorationKind::Heading1),
            ]
        );
    }

    #[test]
    fn trailing_line_break_is_not_decorated() {
        assert_eq!(
            heading("### Deep\n", 3),
            vec![
                Decoration::hide(0, 4),
                Decoration::new(4, 8, DecorationKind::Heading3),
            ]
        );
    }

    #[rstest]
    #[case("# ")]
    #[case("#")]
    #[case("######   ")]
    #[case("# ##")]
    #[case("   ")]
    fn empty_heading_emits_nothing(#[case] text: &str) {
        assert!(heading(text, 1).is_empty());
    }

    #[test]
    fn closing_sequence_is_hidden() {
        assert_eq!(
            heading("## Title ##", 2),
            vec![
                Decoration::hide(0, 3),
                Decoration::new(3, 8, DecorationKind::Heading2),
                Decoration::hide(8, 11),
            ]
        );
    }

    #[test]
    fn hash_inside_word_is_content() {
        assert_eq!(
            heading("# C#", 1),
            vec![
                Decoration::hide(0, 2),
                Decoration::new(2, 4, DecorationKind::Heading1),
            ]
        );
    }

    #[test]
    fn setext_heading_hides_underline() {
        assert_eq!(
            heading("Title\n=====", 1),
            vec![
                Decoration::new(0, 5, DecorationKind::Heading1),
                Decoration::hide(5, 11),
            ]
        );
    }

    #[test]
    fn malformed_heading_falls_back_to_hiding_span() {
        assert_eq!(heading("Title", 2), vec![Decoration::hide(0, 5)]);
    }

    #[test]
    fn depth_out_of_range_uses_generic_heading() {
        assert_eq!(
            heading("# x", 9),
            vec![
                Decoration::hide(0, 2),
                Decoration::new(2, 3, DecorationKind::Heading),
            ]
        );
    }

    #[test]
    fn offsets_are_absolute() {
        let text = "intro\n\n## Sub\n";
        let decorations = decorate(&node(NodeKind::Heading { depth: 2 }, 7, 14), text);
        assert_eq!(
            decorations,
            vec![
                Decoration::hide(7, 10),
                Decoration::new(10, 13, DecorationKind::Heading2),
            ]
        );
    }
}
