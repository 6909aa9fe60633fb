//! # markdown-lens engine
//!
//! Turns markdown text into typed, byte-offset [`Decoration`] ranges that a
//! host editor uses to show a WYSIWYG view while the text itself stays plain
//! markdown.
//!
//! ## Pipeline
//!
//! 1. **`syntax`**: position model (`Span`), syntax tree, and the
//!    `MarkdownParser` seam (pulldown-cmark by default)
//! 2. **`handlers`**: one pure function per markdown construct
//! 3. **`scanner`**: raw-text scan for `==highlight==`
//! 4. **`collector`**: dedup on `(start, end, kind)`
//! 5. **`conflicts`**: claimed spans that suppress redundant `italic`
//! 6. **`engine`**: walks the tree and ties the steps together
//!
//! Links are resolved separately by **`links`**, which hosts use for
//! click-to-navigate.
//!
//! ```
//! use markdown_lens_engine::{DecorationKind, extract_decorations};
//!
//! let decorations = extract_decorations("**bold**").unwrap();
//! assert!(decorations.iter().any(|d| d.kind == DecorationKind::Bold));
//! ```

pub mod collector;
pub mod conflicts;
pub mod decoration;
pub mod engine;
pub mod handlers;
pub mod io;
pub mod links;
pub mod scanner;
pub mod snapshot;
pub mod syntax;

pub use decoration::{Decoration, DecorationKind};
pub use engine::{DecorationEngine, decorate_tree, extract_decorations};
pub use links::{DefinitionTable, LinkResolver, LinkTarget, ResolvedLink};
pub use syntax::{CmarkParser, MarkdownParser, ParseError, Span, SyntaxNode, SyntaxTree};
