//! # Syntax
//!
//! The positional contract every decoration rule depends on, and the seam to
//! the markdown parser.
//!
//! ## Modules
//!
//! - **`span`**: `Span`, a half-open byte range into the document text
//! - **`node`**: `SyntaxNode` / `NodeKind`, the read-only tree handlers consume
//! - **`cursor`**: byte cursor used by the link scanner and highlight scanner
//! - **`parser`**: `MarkdownParser` trait and the pulldown-cmark `CmarkParser`
//!
//! ## Validity Gate
//!
//! A node is only decorated when [`SyntaxNode::resolve`] succeeds: its
//! position exists, is ordered, lies inside the text and falls on UTF-8 char
//! boundaries.

pub mod cursor;
pub mod node;
pub mod parser;
pub mod span;

pub use cursor::Cursor;
pub use node::{LinkForm, NodeKind, ReferenceStyle, SyntaxNode, SyntaxTree};
pub use parser::{CmarkParser, MarkdownParser, ParseError};
pub use span::Span;
