use crate::{
    collector::Collector,
    decoration::{Decoration, DecorationKind},
    handlers::{emphasis, strong},
    syntax::{NodeKind, Span, SyntaxNode},
};

/// Content spans already decorated as bold-italic.
///
/// Built during the tree walk and consulted once afterwards: any `italic`
/// overlapping a claimed span, partially or fully, is redundant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedSpans {
    spans: Vec<Span>,
}

impl ClaimedSpans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the spans `node` claims, if it is written as bold-italic.
    pub fn record(&mut self, node: &SyntaxNode, text: &str) {
        match node.kind {
            NodeKind::Strong => self.spans.extend(strong::claimed_spans(node, text)),
            NodeKind::Emphasis => self.spans.extend(emphasis::claimed_spans(node, text)),
            _ => {}
        }
    }

    pub fn claim(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether `decoration` is an italic made redundant by a claim.
    pub fn suppresses(&self, decoration: &Decoration) -> bool {
        decoration.kind == DecorationKind::Italic
            && self.spans.iter().any(|s| s.overlaps(decoration.span))
    }

    /// Drops every suppressed decoration from `collector`.
    pub fn resolve(&self, collector: &mut Collector<'_>) {
        if self.is_empty() {
            return;
        }
        collector.retain(|d| {
            let drop = self.suppresses(d);
            if drop {
                log::trace!("italic {}..{} claimed by bold-italic", d.start(), d.end());
            }
            !drop
        });
    }
}
