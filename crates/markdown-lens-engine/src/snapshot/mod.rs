//! # Snapshot Support
//!
//! Human-readable views of extraction output and checks of its invariants,
//! shared by the tests, the benchmark and the CLI.
//!
//! - **`normalize`**: turns decorations into a stable, serializable form and
//!   renders it as one line per decoration for `insta` snapshots
//! - **`invariants`**: bounds, char boundaries, non-degenerate ranges and
//!   absence of duplicate triples

pub mod invariants;
pub mod normalize;

pub use invariants::{Violation, check as invariants, violations};
pub use normalize::{DecorationSnap, normalize, render};
