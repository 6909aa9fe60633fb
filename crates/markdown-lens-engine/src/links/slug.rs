//! GitHub-style heading anchors.

use std::collections::HashMap;

use crate::syntax::{NodeKind, Span, SyntaxTree};

/// Lowercases, drops punctuation and turns spaces into `-`.
pub fn slugify(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Anchor slug and span of every heading, in document order. Repeated slugs
/// get `-1`, `-2`, ... suffixes the way GitHub numbers them.
pub fn heading_anchors(tree: &SyntaxTree, text: &str) -> Vec<(String, Span)> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut anchors = Vec::new();
    for node in tree.nodes() {
        if !matches!(node.kind, NodeKind::Heading { .. }) {
            continue;
        }
        let Some((span, _)) = node.resolve(text) else {
            continue;
        };
        let base = slugify(&node.plain_text());
        let count = seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        anchors.push((slug, span.trim_line_break(text)));
    }
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CmarkParser, MarkdownParser};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Getting Started", "getting-started")]
    #[case("What's new?", "whats-new")]
    #[case("snake_case & more", "snake_case--more")]
    #[case("  Trimmed  ", "trimmed")]
    #[case("Überblick", "überblick")]
    fn slugs(#[case] heading: &str, #[case] expected: &str) {
        assert_eq!(slugify(heading), expected);
    }

    #[test]
    fn duplicate_headings_are_numbered() {
        let text = "# Intro\n\n## Intro\n\n## Intro\n";
        let tree = CmarkParser.parse(text).unwrap();
        let slugs: Vec<_> = heading_anchors(&tree, text)
            .into_iter()
            .map(|(slug, _)| slug)
            .collect();
        assert_eq!(slugs, vec!["intro", "intro-1", "intro-2"]);
    }

    #[test]
    fn formatted_heading_text() {
        let text = "## The `engine` *core*\n";
        let tree = CmarkParser.parse(text).unwrap();
        assert_eq!(
            heading_anchors(&tree, text),
            vec![("the-engine-core".to_string(), Span::new(0, 22))]
        );
    }
}
