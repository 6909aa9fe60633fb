use std::collections::HashMap;

use crate::syntax::{NodeKind, SyntaxTree};

/// Destination of a `[id]: url "title"` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub url: String,
    pub title: Option<String>,
}

/// Reference definitions of one document, keyed by normalized identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionTable {
    entries: HashMap<String, Definition>,
}

/// Case-insensitive, with inner whitespace runs collapsed to one space.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl DefinitionTable {
    /// Collects every definition node in the tree. The first definition of
    /// an identifier wins.
    pub fn from_tree(tree: &SyntaxTree) -> Self {
        let mut table = Self::default();
        for node in tree.nodes() {
            if let NodeKind::Definition {
                identifier,
                url,
                title,
            } = &node.kind
            {
                table.insert(identifier, url.clone(), title.clone());
            }
        }
        table
    }

    /// Adds a definition unless the identifier is already taken.
    pub fn insert(&mut self, identifier: &str, url: String, title: Option<String>) -> bool {
        let key = normalize_identifier(identifier);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, Definition { url, title });
        true
    }

    pub fn get(&self, identifier: &str) -> Option<&Definition> {
        self.entries.get(&normalize_identifier(identifier))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CmarkParser, MarkdownParser};
    use rstest::rstest;

    #[rstest]
    #[case("Foo", "foo")]
    #[case("  Foo   Bar ", "foo bar")]
    #[case("foo\n\tbar", "foo bar")]
    #[case("ÄRGER", "ärger")]
    fn identifiers_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_identifier(raw), expected);
    }

    #[test]
    fn lookup_ignores_case_and_spacing() {
        let mut table = DefinitionTable::default();
        table.insert("Rust Lang", "https://rust-lang.org".into(), None);
        assert_eq!(
            table.get("rust   LANG").map(|d| d.url.as_str()),
            Some("https://rust-lang.org")
        );
        assert!(table.get("rust").is_none());
    }

    #[test]
    fn first_definition_wins() {
        let mut table = DefinitionTable::default();
        assert!(table.insert("a", "first".into(), None));
        assert!(!table.insert("A", "second".into(), None));
        assert_eq!(table.get("a").map(|d| d.url.as_str()), Some("first"));
    }

    #[test]
    fn built_from_parsed_document() {
        let text = "[x][docs]\n\n[Docs]: https://docs.rs \"Docs\"\n[other]: ./other.md\n";
        let tree = CmarkParser.parse(text).unwrap();
        let table = DefinitionTable::from_tree(&tree);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("docs"),
            Some(&Definition {
                url: "https://docs.rs".into(),
                title: Some("Docs".into()),
            })
        );
    }
}
