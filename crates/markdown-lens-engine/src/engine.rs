use crate::{
    collector::Collector,
    conflicts::ClaimedSpans,
    decoration::Decoration,
    handlers::{Construct, emphasis},
    scanner,
    syntax::{CmarkParser, MarkdownParser, NodeKind, ParseError, SyntaxNode, SyntaxTree},
};

/// Decoration extraction over a pluggable parser.
///
/// Every call is independent: the text is parsed from scratch, the tree is
/// walked once, and the result depends only on the input. The engine holds
/// nothing but its parser.
///
/// ## Steps
///
/// 1. **Parse** with the [`MarkdownParser`] collaborator
/// 2. **Walk** every node depth-first, pre-order; the first [`Construct`] in
///    priority order that handles a node decorates it
/// 3. **Claim** the content of bold-italic nodes while walking; a strong
///    node tightly wrapped by an emphasis is decorated through that emphasis
/// 4. **Resolve** conflicts: drop `italic` overlapping any claimed span
/// 5. **Scan** the raw text for `==highlight==` and append the result
///
/// Exact `(start, end, kind)` duplicates collapse throughout.
///
/// ```rust
/// # use markdown_lens_engine::{Decoration, DecorationEngine, DecorationKind};
/// let engine = DecorationEngine::new();
/// let decorations = engine.extract("*it*").unwrap();
/// assert_eq!(
///     decorations,
///     vec![
///         Decoration::hide(0, 1),
///         Decoration::hide(3, 4),
///         Decoration::new(1, 3, DecorationKind::Italic),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecorationEngine<P = CmarkParser> {
    parser: P,
}

impl DecorationEngine<CmarkParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: MarkdownParser> DecorationEngine<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parses `text` and returns its decorations in emission order.
    ///
    /// Only a broken parser event stream is an error; malformed markdown
    /// simply yields fewer decorations.
    pub fn extract(&self, text: &str) -> Result<Vec<Decoration>, ParseError> {
        let tree = self.parser.parse(text)?;
        Ok(decorate_tree(&tree, text))
    }
}

/// Extracts decorations with the default pulldown-cmark parser.
pub fn extract_decorations(text: &str) -> Result<Vec<Decoration>, ParseError> {
    DecorationEngine::new().extract(text)
}

/// Decorates an already parsed tree. `text` must be the text it was parsed
/// from; nodes whose positions do not fit it are skipped.
pub fn decorate_tree(tree: &SyntaxTree, text: &str) -> Vec<Decoration> {
    let mut collector = Collector::new(text);
    let mut claims = ClaimedSpans::new();
    let mut owned: Vec<&SyntaxNode> = Vec::new();

    for node in tree.nodes() {
        if owned.iter().any(|o| std::ptr::eq(*o, node)) {
            continue;
        }
        let Some(construct) = Construct::for_node(node) else {
            continue;
        };
        collector.extend(construct.extract(node, text));
        match node.kind {
            NodeKind::Strong => claims.record(node, text),
            NodeKind::Emphasis => {
                if let Some(strong) = emphasis::wrapped_strong(node, text) {
                    owned.push(strong);
                    claims.record(node, text);
                }
            }
            _ => {}
        }
    }
    claims.resolve(&mut collector);
    collector.extend(scanner::scan(text));

    log::debug!(
        "extracted {} decorations from {} bytes ({} claimed spans)",
        collector.len(),
        text.len(),
        claims.spans().len()
    );
    collector.into_vec()
}
