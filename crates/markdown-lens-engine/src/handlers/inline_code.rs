use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::SyntaxNode,
};

use super::paired_run;

const TICK: u8 = b'`';

/// Hides the backtick delimiters and decorates the interior as code.
///
/// An empty interior still gets a one-byte `code` range so the host always
/// receives a non-degenerate span for the construct.
pub fn decorate(node: &SyntaxNode, text: &str) -> Vec<Decoration> {
    let Some((span, raw)) = node.resolve(text) else {
        return vec![];
    };
    let ticks = paired_run(raw, TICK);
    if ticks == 0 {
        return vec![];
    }

    let inner_start = span.start + ticks;
    let inner_end = span.end - ticks;
    let code = if inner_end > inner_start {
        Decoration::new(inner_start, inner_end, DecorationKind::Code)
    } else {
        Decoration::new(inner_start, inner_start + 1, DecorationKind::Code)
    };

    vec![
        Decoration::hide(span.start, inner_start),
        Decoration::hide(inner_end, span.end),
        code,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handlers::test_support::node, syntax::NodeKind};
    use pretty_assertions::assert_eq;

    fn code(text: &str) -> Vec<Decoration> {
        let kind = NodeKind::InlineCode {
            value: text.trim_matches('`').to_string(),
        };
        decorate(&node(kind, 0, text.len()), text)
    }

    #[test]
    fn single_backticks() {
        assert_eq!(
            code("`code`"),
            vec![
                Decoration::hide(0, 1),
                Decoration::hide(5, 6),
                Decoration::new(1, 5, DecorationKind::Code),
            ]
        );
    }

    #[test]
    fn double_backticks_hide_whole_run() {
        assert_eq!(
            code("``a`b``"),
            vec![
                Decoration::hide(0, 2),
                Decoration::hide(5, 7),
                Decoration::new(2, 5, DecorationKind::Code),
            ]
        );
    }

    #[test]
    fn empty_code_gets_placeholder() {
        let out = code("``");
        assert_eq!(
            out,
            vec![
                Decoration::hide(0, 1),
                Decoration::hide(1, 2),
                Decoration::new(1, 2, DecorationKind::Code),
            ]
        );
        assert!(out.iter().all(|d| d.start() < d.end()));
    }

    #[test]
    fn without_backticks_yields_nothing() {
        assert!(code("x").is_empty());
        assert!(code("`").is_empty());
    }
}
