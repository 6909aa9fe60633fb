use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::{NodeKind, Span, SyntaxNode},
};

use super::strong::delimiter_char;

/// True when `**` or `__` sits directly on both sides of the span, i.e. the
/// source reads `***x***` and the strong handler owns it.
fn wrapped_by_strong(start: usize, end: usize, text: &str) -> bool {
    let bytes = text.as_bytes();
    let (Some(before), Some(after)) = (
        start.checked_sub(2).and_then(|s| bytes.get(s..start)),
        bytes.get(end..end + 2),
    ) else {
        return false;
    };
    before == after && (before == b"**" || before == b"__")
}

/// The strong child of an emphasis written as `***text***`: the only child
/// is a strong node one byte inside each end, and both three-byte ends use
/// the same delimiter character. Mixed forms like `*__x__*` do not count.
pub fn wrapped_strong<'n>(node: &'n SyntaxNode, text: &str) -> Option<&'n SyntaxNode> {
    if !matches!(node.kind, NodeKind::Emphasis) {
        return None;
    }
    let (span, raw) = node.resolve(text)?;
    let [child] = node.children.as_slice() else {
        return None;
    };
    let inner = child.position?;
    let ch = delimiter_char(raw)?;
    let bytes = raw.as_bytes();
    let tight = matches!(child.kind, NodeKind::Strong)
        && inner.start == span.start + 1
        && inner.end + 1 == span.end
        && bytes.len() >= 6
        && bytes[..3].iter().all(|&b| b == ch)
        && bytes[bytes.len() - 3..].iter().all(|&b| b == ch);
    tight.then_some(child)
}

/// Content this emphasis decorates as bold-italic, for the conflict step.
pub fn claimed_spans(node: &SyntaxNode, text: &str) -> Vec<Span> {
    match (wrapped_strong(node, text), node.resolve(text)) {
        (Some(_), Some((span, _))) if span.len() > 6 => {
            vec![Span::new(span.start + 3, span.end - 3)]
        }
        _ => vec![],
    }
}

/// Hides the single delimiter at each end and decorates the interior as
/// italic, unless the span is the inner part of a bold-italic construct.
///
/// An emphasis tightly wrapping a strong node is the bold-italic construct
/// itself: both three-byte delimiters are hidden and the content becomes
/// `boldItalic`. The engine leaves the wrapped strong node alone.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, raw)) = node.resolve(text) else {
        return vec![];
    };
    let Some(ch) = delimiter_char(raw) else {
        return vec![];
    };
    if raw.len() < 2 || raw.as_bytes()[raw.len() - 1] != ch {
        return vec![];
    }
    if wrapped_by_strong(span.start, span.end, text) {
        log::trace!("emphasis at {} owned by surrounding strong", span.start);
        return vec![];
    }
    if wrapped_strong(node, text).is_some() {
        let mut out = vec![
            Decoration::hide(span.start, span.start + 3),
            Decoration::hide(span.end - 3, span.end),
        ];
        if span.len() > 6 {
            out.push(Decoration::new(
                span.start + 3,
                span.end - 3,
                DecorationKind::BoldItalic,
            ));
        }
        return out;
    }

    let mut out = vec![
        Decoration::hide(span.start, span.start + 1),
        Decoration::hide(span.end - 1, span.end),
    ];
    if span.len() > 2 {
        out.push(Decoration::new(
            span.start + 1,
            span.end - 1,
            DecorationKind::Italic,
        ));
    }
    out
}
