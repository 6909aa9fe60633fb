use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag};

use super::{
    node::{LinkForm, NodeKind, ReferenceStyle, SyntaxNode, SyntaxTree},
    span::Span,
};

/// Raised only when the parser collaborator itself breaks down. Malformed
/// markdown is never an error: it simply yields fewer decorations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("markdown parse failed: node closed at byte {offset} was never opened")]
    UnbalancedEnd { offset: usize },
    #[error("markdown parse failed: {count} node(s) left open at end of input")]
    UnclosedNodes { count: usize },
}

/// The parser collaborator: document text in, syntax tree out.
pub trait MarkdownParser {
    fn parse(&self, text: &str) -> Result<SyntaxTree, ParseError>;
}

/// [`MarkdownParser`] backed by pulldown-cmark with the GFM table,
/// strikethrough and task-list extensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkParser;

impl CmarkParser {
    pub fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }
}

impl MarkdownParser for CmarkParser {
    fn parse(&self, text: &str) -> Result<SyntaxTree, ParseError> {
        let mut events = Parser::new_ext(text, Self::options()).into_offset_iter();
        let mut builder = TreeBuilder::new(text);

        for (event, range) in events.by_ref() {
            builder.push(event, range)?;
        }

        // Definitions never surface as events; pulldown-cmark keeps them aside.
        let definitions = events
            .reference_definitions()
            .iter()
            .map(|(label, def)| {
                SyntaxNode::new(
                    NodeKind::Definition {
                        identifier: label.to_string(),
                        url: def.dest.to_string(),
                        title: non_empty(def.title.clone()),
                    },
                    builder.position(def.span.clone()),
                )
            })
            .collect();

        builder.finish(definitions)
    }
}

/// Folds the flat pulldown-cmark event stream into a [`SyntaxTree`].
///
/// Understanding the event flow matters here: every `Start(tag)` is paired
/// with an `End(tag)` and everything emitted in between belongs to that tag,
/// so a stack of open nodes is enough to rebuild the nesting.
///
/// ```markdown
/// **a *b***
/// ```
/// Events: `Start(Paragraph)`, `Start(Strong)`, `Text("a ")`,
/// `Start(Emphasis)`, `Text("b")`, `End(Emphasis)`, `End(Strong)`,
/// `End(Paragraph)`.
struct TreeBuilder<'t> {
    text: &'t str,
    /// Open nodes; index 0 is always the root.
    stack: Vec<SyntaxNode>,
}

impl<'t> TreeBuilder<'t> {
    fn new(text: &'t str) -> Self {
        let root = SyntaxNode::new(NodeKind::Root, Some(Span::new(0, text.len())));
        Self {
            text,
            stack: vec![root],
        }
    }

    fn position(&self, range: Range<usize>) -> Option<Span> {
        let span = Span::from(range);
        span.is_valid_in(self.text).then_some(span)
    }

    fn push(&mut self, event: Event<'_>, range: Range<usize>) -> Result<(), ParseError> {
        match event {
            Event::Start(tag) => {
                let node = SyntaxNode::new(tag_kind(tag), self.position(range));
                self.stack.push(node);
            }
            Event::End(_) => self.close(range.end)?,
            Event::Text(value) => self.leaf(
                NodeKind::Text {
                    value: value.into_string(),
                },
                range,
            ),
            Event::Code(value) => self.leaf(
                NodeKind::InlineCode {
                    value: value.into_string(),
                },
                range,
            ),
            Event::Rule => self.leaf(NodeKind::ThematicBreak, range),
            Event::Html(_) | Event::InlineHtml(_) => self.leaf(NodeKind::Html, range),
            Event::SoftBreak | Event::HardBreak => self.leaf(NodeKind::Break, range),
            Event::TaskListMarker(checked) => {
                self.leaf(NodeKind::TaskListMarker { checked }, range)
            }
            _ => self.leaf(NodeKind::Other, range),
        }
        Ok(())
    }

    fn leaf(&mut self, kind: NodeKind, range: Range<usize>) {
        let node = SyntaxNode::new(kind, self.position(range));
        self.attach(node);
    }

    fn attach(&mut self, node: SyntaxNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn close(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.stack.len() <= 1 {
            return Err(ParseError::UnbalancedEnd { offset });
        }
        let Some(mut node) = self.stack.pop() else {
            return Err(ParseError::UnbalancedEnd { offset });
        };

        if matches!(
            node.kind,
            NodeKind::Image { .. } | NodeKind::ImageReference { .. }
        ) {
            let text = node.plain_text();
            if let NodeKind::Image { alt, .. } | NodeKind::ImageReference { alt, .. } =
                &mut node.kind
            {
                *alt = text;
            }
        }

        self.attach(node);
        Ok(())
    }

    fn finish(mut self, definitions: Vec<SyntaxNode>) -> Result<SyntaxTree, ParseError> {
        if self.stack.len() != 1 {
            return Err(ParseError::UnclosedNodes {
                count: self.stack.len() - 1,
            });
        }
        let Some(mut root) = self.stack.pop() else {
            return Err(ParseError::UnclosedNodes { count: 0 });
        };

        root.children.extend(definitions);
        root.children
            .sort_by_key(|n| n.position.map_or(usize::MAX, |p| p.start));

        Ok(SyntaxTree::new(root))
    }
}

fn tag_kind(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading { depth: level as u8 },
        Tag::BlockQuote(_) => NodeKind::Blockquote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::Code {
            lang: info.split_whitespace().next().map(str::to_string),
            fenced: true,
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::Code {
            lang: None,
            fenced: false,
        },
        Tag::HtmlBlock => NodeKind::Html,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::ListItem,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead | Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Delete,
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => match reference_style(link_type) {
            Some(style) => NodeKind::LinkReference {
                identifier: id.into_string(),
                style,
            },
            None => NodeKind::Link {
                url: dest_url.into_string(),
                title: non_empty(Some(title)),
                form: match link_type {
                    LinkType::Autolink => LinkForm::Autolink,
                    LinkType::Email => LinkForm::Email,
                    _ => LinkForm::Inline,
                },
            },
        },
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => match reference_style(link_type) {
            Some(style) => NodeKind::ImageReference {
                identifier: id.into_string(),
                style,
                alt: String::new(),
            },
            None => NodeKind::Image {
                url: dest_url.into_string(),
                title: non_empty(Some(title)),
                alt: String::new(),
            },
        },
        _ => NodeKind::Other,
    }
}

fn reference_style(link_type: LinkType) -> Option<ReferenceStyle> {
    match link_type {
        LinkType::Reference | LinkType::ReferenceUnknown => Some(ReferenceStyle::Full),
        LinkType::Collapsed | LinkType::CollapsedUnknown => Some(ReferenceStyle::Collapsed),
        LinkType::Shortcut | LinkType::ShortcutUnknown => Some(ReferenceStyle::Shortcut),
        _ => None,
    }
}

fn non_empty(value: Option<CowStr<'_>>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.into_string())
}
