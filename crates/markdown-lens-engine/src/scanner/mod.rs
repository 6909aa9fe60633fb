//! # Manual Scanners
//!
//! Constructs the parser does not know about are found by scanning the raw
//! text directly. Scanner output is not filtered by claimed spans; it only
//! takes part in the collector's dedup.

pub mod highlight;

use crate::decoration::Decoration;

/// Runs every manual scanner over `text`.
pub fn scan(text: &str) -> Vec<Decoration> {
    highlight::scan(text)
}
