use super::span::Span;

/// How an inline link was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkForm {
    /// `[text](url "title")`
    Inline,
    /// `<https://example.com>`
    Autolink,
    /// `<someone@example.com>`
    Email,
}

/// How a reference link or image names its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStyle {
    /// `[text][id]`
    Full,
    /// `[text][]`
    Collapsed,
    /// `[text]`
    Shortcut,
}

/// The kind of a syntax node, with the construct-specific fields handlers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading {
        depth: u8,
    },
    Strong,
    Emphasis,
    InlineCode {
        value: String,
    },
    /// A fenced or indented code block.
    Code {
        lang: Option<String>,
        fenced: bool,
    },
    Blockquote,
    ThematicBreak,
    /// GFM strikethrough.
    Delete,
    Link {
        url: String,
        title: Option<String>,
        form: LinkForm,
    },
    Image {
        url: String,
        title: Option<String>,
        alt: String,
    },
    LinkReference {
        identifier: String,
        style: ReferenceStyle,
    },
    ImageReference {
        identifier: String,
        style: ReferenceStyle,
        alt: String,
    },
    /// `[id]: url "title"`
    Definition {
        identifier: String,
        url: String,
        title: Option<String>,
    },
    Text {
        value: String,
    },
    Html,
    Break,
    List,
    ListItem,
    TaskListMarker {
        checked: bool,
    },
    Table,
    TableRow,
    TableCell,
    Other,
}

/// A read-only node of the parsed document.
///
/// `position` is `None` when the parser could not give the node a usable
/// byte range; such nodes are never decorated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub position: Option<Span>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, position: Option<Span>) -> Self {
        Self {
            kind,
            position,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// The validity gate: returns the node's span and raw source text when the
    /// position exists and can be sliced from `text`.
    pub fn resolve<'t>(&self, text: &'t str) -> Option<(Span, &'t str)> {
        let span = self.position?;
        let raw = span.slice(text)?;
        Some((span, raw))
    }

    /// Depth-first, pre-order iterator over this node and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated `Text` / inline-code values below this node; used for
    /// image alt text and heading slugs.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            match &node.kind {
                NodeKind::Text { value } | NodeKind::InlineCode { value } => out.push_str(value),
                _ => {}
            }
        }
        out
    }
}

/// Iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed document. Rebuilt from scratch for every extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub root: SyntaxNode,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    pub fn nodes(&self) -> Descendants<'_> {
        self.root.descendants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str, start: usize) -> SyntaxNode {
        SyntaxNode::new(
            NodeKind::Text {
                value: value.to_string(),
            },
            Some(Span::new(start, start + value.len())),
        )
    }

    #[test]
    fn resolve_requires_position() {
        let node = SyntaxNode::new(NodeKind::Strong, None);
        assert_eq!(node.resolve("**a**"), None);
    }

    #[test]
    fn resolve_rejects_out_of_bounds() {
        let node = SyntaxNode::new(NodeKind::Strong, Some(Span::new(0, 50)));
        assert_eq!(node.resolve("**a**"), None);
    }

    #[test]
    fn resolve_returns_raw_text() {
        let node = SyntaxNode::new(NodeKind::Strong, Some(Span::new(2, 7)));
        assert_eq!(node.resolve("x **a**"), Some((Span::new(2, 7), "**a**")));
    }

    #[test]
    fn descendants_are_pre_order() {
        let tree = SyntaxNode::new(NodeKind::Paragraph, Some(Span::new(0, 9))).with_children(vec![
            SyntaxNode::new(NodeKind::Strong, Some(Span::new(0, 5)))
                .with_children(vec![text("a", 2)]),
            text("bc", 5),
        ]);

        let kinds: Vec<_> = tree
            .descendants()
            .map(|n| std::mem::discriminant(&n.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                std::mem::discriminant(&NodeKind::Paragraph),
                std::mem::discriminant(&NodeKind::Strong),
                std::mem::discriminant(&NodeKind::Text { value: String::new() }),
                std::mem::discriminant(&NodeKind::Text { value: String::new() }),
            ]
        );
    }

    #[test]
    fn plain_text_concatenates_leaves() {
        let node = SyntaxNode::new(NodeKind::Heading { depth: 1 }, Some(Span::new(0, 12)))
            .with_children(vec![
                text("Hello ", 2),
                SyntaxNode::new(
                    NodeKind::InlineCode {
                        value: "world".into(),
                    },
                    Some(Span::new(8, 15)),
                ),
            ]);
        assert_eq!(node.plain_text(), "Hello world");
    }
}
