use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::{NodeKind, Span, SyntaxNode},
};

use super::paired_run;

/// How a strong node is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrongShape {
    /// `**text**`
    Plain { delimiter: usize },
    /// `**a *b* c**`: emphasis children become bold-italic, the rest bold.
    WithEmphasis { outer: usize },
}

/// Delimiter character of a strong/emphasis raw span, if it has one.
pub(crate) fn delimiter_char(raw: &str) -> Option<u8> {
    raw.bytes().next().filter(|b| matches!(b, b'*' | b'_'))
}

/// Classifies a strong node, or `None` when its delimiters cannot be found.
///
/// Only the node and its children are consulted. A strong node tightly
/// wrapped by an emphasis (`***text***` as CommonMark parses it) is owned by
/// the emphasis handler, which sees the whole structure.
pub fn shape(node: &SyntaxNode, text: &str) -> Option<StrongShape> {
    if !matches!(node.kind, NodeKind::Strong) {
        return None;
    }
    let (_, raw) = node.resolve(text)?;
    let ch = delimiter_char(raw)?;
    let run = paired_run(raw, ch);
    if run < 2 {
        return None;
    }

    let has_emphasis_child = node
        .children
        .iter()
        .any(|c| matches!(c.kind, NodeKind::Emphasis));
    if has_emphasis_child {
        return Some(StrongShape::WithEmphasis { outer: run.min(3) });
    }

    Some(StrongShape::Plain { delimiter: 2 })
}

/// Decorates `**bold**`, and bold-italic written as emphasis inside strong.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let (Some(shape), Some((span, _))) = (shape(node, text), node.resolve(text)) else {
        return vec![];
    };

    match shape {
        StrongShape::Plain { delimiter } => {
            let mut out = vec![
                Decoration::hide(span.start, span.start + delimiter),
                Decoration::hide(span.end - delimiter, span.end),
            ];
            if span.len() > delimiter * 2 {
                out.push(Decoration::new(
                    span.start + delimiter,
                    span.end - delimiter,
                    DecorationKind::Bold,
                ));
            }
            out
        }
        StrongShape::WithEmphasis { outer } => with_emphasis(node, span, outer, text),
    }
}

fn with_emphasis(node: &SyntaxNode, span: Span, outer: usize, text: &str) -> Vec<Decoration> {
    let open = Span::new(span.start, span.start + outer);
    let close = Span::new(span.end - outer, span.end);
    let mut out = vec![
        Decoration::hide(open.start, open.end),
        Decoration::hide(close.start, close.end),
    ];

    for child in &node.children {
        let Some((child_span, _)) = child.resolve(text) else {
            continue;
        };
        if !matches!(child.kind, NodeKind::Emphasis) {
            out.push(Decoration::new(
                child_span.start,
                child_span.end,
                DecorationKind::Bold,
            ));
            continue;
        }
        if child_span.len() < 2 {
            continue;
        }

        let child_open = Span::new(child_span.start, child_span.start + 1);
        let child_close = Span::new(child_span.end - 1, child_span.end);
        for delimiter in [child_open, child_close] {
            if !open.contains(delimiter) && !close.contains(delimiter) {
                out.push(Decoration::hide(delimiter.start, delimiter.end));
            }
        }
        if child_span.len() > 2 {
            out.push(Decoration::new(
                child_open.end,
                child_close.start,
                DecorationKind::BoldItalic,
            ));
        }
    }
    out
}

/// Content spans this strong node decorates as bold-italic. Italic output
/// overlapping them is redundant and gets filtered by the engine.
pub fn claimed_spans(node: &SyntaxNode, text: &str) -> Vec<Span> {
    let Some(shape) = shape(node, text) else {
        return vec![];
    };

    match shape {
        StrongShape::Plain { .. } => vec![],
        StrongShape::WithEmphasis { .. } => node
            .children
            .iter()
            .filter(|c| matches!(c.kind, NodeKind::Emphasis))
            .filter_map(|c| c.resolve(text))
            .filter(|(s, _)| s.len() > 2)
            .map(|(s, _)| Span::new(s.start + 1, s.end - 1))
            .collect(),
    }
}
