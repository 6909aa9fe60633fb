//! # Construct Handlers
//!
//! One pure function per markdown construct, mapping a parsed node plus the
//! raw document text to decorations.
//!
//! ## Contract
//!
//! - A handler never panics and never errors on malformed markdown; when it
//!   cannot resolve a usable position or delimiter it returns an empty vec.
//! - Handlers are independent: cross-construct coordination (bold-italic vs
//!   italic) happens in the engine through claimed spans.
//!
//! ## Dispatch
//!
//! [`Construct`] is a closed set tried in [`Construct::PRIORITY`] order; the
//! first construct whose [`Construct::can_handle`] matches a node owns it.

pub mod block_quote;
pub mod code_block;
pub mod emphasis;
pub mod heading;
pub mod inline_code;
pub mod link;
pub mod strikethrough;
pub mod strong;
pub mod thematic_break;

use crate::{
    decoration::Decoration,
    syntax::{NodeKind, SyntaxNode},
};

/// The markdown constructs that produce decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Heading,
    Strong,
    Emphasis,
    InlineCode,
    CodeBlock,
    Blockquote,
    ThematicBreak,
    Strikethrough,
    Link,
    Image,
    LinkReference,
    ImageReference,
}

impl Construct {
    /// Dispatch order. Strong precedes emphasis so bold-italic is decided by
    /// the strong handler.
    pub const PRIORITY: [Construct; 12] = [
        Construct::Heading,
        Construct::Strong,
        Construct::Emphasis,
        Construct::InlineCode,
        Construct::CodeBlock,
        Construct::Blockquote,
        Construct::ThematicBreak,
        Construct::Strikethrough,
        Construct::Link,
        Construct::Image,
        Construct::LinkReference,
        Construct::ImageReference,
    ];

    /// First construct, in priority order, that handles `node`.
    pub fn for_node(node: &SyntaxNode) -> Option<Construct> {
        Self::PRIORITY.into_iter().find(|c| c.can_handle(node))
    }

    pub fn can_handle(self, node: &SyntaxNode) -> bool {
        match self {
            Construct::Heading => matches!(node.kind, NodeKind::Heading { .. }),
            Construct::Strong => matches!(node.kind, NodeKind::Strong),
            Construct::Emphasis => matches!(node.kind, NodeKind::Emphasis),
            Construct::InlineCode => matches!(node.kind, NodeKind::InlineCode { .. }),
            Construct::CodeBlock => matches!(node.kind, NodeKind::Code { .. }),
            Construct::Blockquote => matches!(node.kind, NodeKind::Blockquote),
            Construct::ThematicBreak => matches!(node.kind, NodeKind::ThematicBreak),
            Construct::Strikethrough => matches!(node.kind, NodeKind::Delete),
            Construct::Link => matches!(node.kind, NodeKind::Link { .. }),
            Construct::Image => matches!(node.kind, NodeKind::Image { .. }),
            Construct::LinkReference => matches!(node.kind, NodeKind::LinkReference { .. }),
            Construct::ImageReference => matches!(node.kind, NodeKind::ImageReference { .. }),
        }
    }

    pub fn extract(self, node: &SyntaxNode, text: &str) -> Vec<Decoration> {
        match self {
            Construct::Heading => heading::decorate(node, text),
            Construct::Strong => strong::decorate(node, text),
            Construct::Emphasis => emphasis::decorate(node, text),
            Construct::InlineCode => inline_code::decorate(node, text),
            Construct::CodeBlock => code_block::decorate(node, text),
            Construct::Blockquote => block_quote::decorate(node, text),
            Construct::ThematicBreak => thematic_break::decorate(node, text),
            Construct::Strikethrough => strikethrough::decorate(node, text),
            Construct::Link => link::decorate_link(node, text),
            Construct::Image => link::decorate_image(node, text),
            Construct::LinkReference => link::decorate_link_reference(node, text),
            Construct::ImageReference => link::decorate_image_reference(node, text),
        }
    }
}

/// Length of the run of `ch` starting at `bytes[0]`.
pub(crate) fn leading_run(bytes: &[u8], ch: u8) -> usize {
    bytes.iter().take_while(|&&b| b == ch).count()
}

/// Length of the run of `ch` ending at the last byte.
pub(crate) fn trailing_run(bytes: &[u8], ch: u8) -> usize {
    bytes.iter().rev().take_while(|&&b| b == ch).count()
}

/// Length of the delimiter shared by both ends of `raw`: the shorter of the
/// leading and trailing runs of `ch`, never more than half the text so the
/// two ends cannot overlap.
pub(crate) fn paired_run(raw: &str, ch: u8) -> usize {
    let bytes = raw.as_bytes();
    leading_run(bytes, ch)
        .min(trailing_run(bytes, ch))
        .min(bytes.len() / 2)
}
