use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::SyntaxNode,
};

/// `---`, `***` or `___`: the marker is hidden and the same range carries the
/// rule so the host can draw a line in its place.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, _)) = node.resolve(text) else {
        return vec![];
    };
    let span = span.trim_line_break(text);
    if span.is_empty() {
        return vec![];
    }
    vec![
        Decoration::hide(span.start, span.end),
        Decoration::new(span.start, span.end, DecorationKind::HorizontalRule),
    ]
}
