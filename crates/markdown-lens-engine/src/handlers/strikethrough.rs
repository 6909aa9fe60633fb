use super::paired_run;
use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::SyntaxNode,
};

/// `~~text~~` or `~text~`: hide the tilde run at both ends, strike the rest.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, raw)) = node.resolve(text) else {
        return vec![];
    };
    let tildes = paired_run(raw, b'~');
    if tildes == 0 || raw.len() <= tildes * 2 {
        return vec![];
    }
    let (inner_start, inner_end) = (span.start + tildes, span.end - tildes);
    vec![
        Decoration::hide(span.start, inner_start),
        Decoration::hide(inner_end, span.end),
        Decoration::new(inner_start, inner_end, DecorationKind::Strikethrough),
    ]
}
