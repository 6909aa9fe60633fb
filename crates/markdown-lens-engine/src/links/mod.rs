//! # Link Resolution
//!
//! Maps navigable link text to where it points, for hosts that offer
//! click-to-navigate. Independent of decoration extraction, but shares the
//! parse tree and the bracket layout from [`crate::handlers::link`].
//!
//! ## Policy
//!
//! - `http://`, `https://` and `mailto:` URLs are external and pass through
//!   unchanged; email autolinks gain a `mailto:` prefix
//! - `#fragment` points into the same document, at the heading whose slug
//!   matches, if any
//! - anything else is a path relative to the document's directory, with an
//!   optional `#fragment`
//! - empty or whitespace-only URLs are never resolved
//!
//! Reference links resolve through the document's [`DefinitionTable`];
//! unknown identifiers yield nothing.

pub mod definitions;
pub mod slug;

pub use definitions::{Definition, DefinitionTable, normalize_identifier};

use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;

use crate::{
    handlers::link::LinkParts,
    syntax::{CmarkParser, LinkForm, MarkdownParser, NodeKind, ParseError, Span, SyntaxTree},
};

/// Where a link leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LinkTarget {
    /// Opened outside the document set.
    External { url: String },
    /// A heading in the same document.
    Anchor {
        fragment: String,
        heading: Option<Span>,
    },
    /// Another file, relative to the same root as the linking document.
    Path {
        path: RelativePathBuf,
        fragment: Option<String>,
    },
}

/// A navigable span and its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub range: Span,
    pub target: LinkTarget,
}

const EXTERNAL_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// Classifies `url` for a document at `document_path`. `None` for blank URLs.
pub fn resolve_url(url: &str, document_path: Option<&RelativePath>) -> Option<LinkTarget> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let lower = url.to_ascii_lowercase();
    if EXTERNAL_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return Some(LinkTarget::External {
            url: url.to_string(),
        });
    }
    if let Some(fragment) = url.strip_prefix('#') {
        return Some(LinkTarget::Anchor {
            fragment: fragment.to_string(),
            heading: None,
        });
    }

    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment.to_string())),
        None => (url, None),
    };
    let base = document_path
        .and_then(RelativePath::parent)
        .unwrap_or(RelativePath::new(""));
    Some(LinkTarget::Path {
        path: base.join_normalized(path),
        fragment,
    })
}

/// Resolves every navigable link in a parsed document.
///
/// `document_path` is the document's location relative to the root that
/// resolved paths are expressed against; without it paths resolve against
/// the root itself.
pub fn resolve_links(
    tree: &SyntaxTree,
    text: &str,
    document_path: Option<&RelativePath>,
) -> Vec<ResolvedLink> {
    let definitions = DefinitionTable::from_tree(tree);
    let anchors = slug::heading_anchors(tree, text);

    let mut links = Vec::new();
    for node in tree.nodes() {
        let url = match &node.kind {
            NodeKind::Link {
                url,
                form: LinkForm::Email,
                ..
            } if !url.to_ascii_lowercase().starts_with("mailto:") => format!("mailto:{url}"),
            NodeKind::Link { url, .. } => url.clone(),
            NodeKind::LinkReference { identifier, .. } => match definitions.get(identifier) {
                Some(definition) => definition.url.clone(),
                None => {
                    log::trace!("no definition for reference '{identifier}'");
                    continue;
                }
            },
            _ => continue,
        };
        let Some(parts) = LinkParts::of(node, text) else {
            continue;
        };
        if parts.text.is_empty() {
            continue;
        }
        let Some(mut target) = resolve_url(&url, document_path) else {
            continue;
        };
        if let LinkTarget::Anchor { fragment, heading } = &mut target {
            *heading = anchors
                .iter()
                .find(|(slug, _)| slug == fragment)
                .map(|(_, span)| *span);
        }
        links.push(ResolvedLink {
            range: parts.text,
            target,
        });
    }
    log::debug!("resolved {} links", links.len());
    links
}

/// Parses and resolves links in one step.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver<P = CmarkParser> {
    parser: P,
}

impl LinkResolver<CmarkParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: MarkdownParser> LinkResolver<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    pub fn resolve(
        &self,
        text: &str,
        document_path: Option<&RelativePath>,
    ) -> Result<Vec<ResolvedLink>, ParseError> {
        let tree = self.parser.parse(text)?;
        Ok(resolve_links(&tree, text, document_path))
    }
}
