use std::collections::HashSet;

use crate::decoration::Decoration;

/// Aggregates decorations from handlers and scanners.
///
/// Keeps emission order, drops exact `(start, end, kind)` duplicates and
/// drops any range that is empty, out of bounds or splits a character.
/// Partially overlapping ranges of the same kind both survive.
#[derive(Debug)]
pub struct Collector<'t> {
    text: &'t str,
    seen: HashSet<Decoration>,
    items: Vec<Decoration>,
}

impl<'t> Collector<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Adds one decoration; returns whether it was kept.
    pub fn push(&mut self, decoration: Decoration) -> bool {
        if !decoration.is_valid_in(self.text) {
            log::trace!(
                "dropping invalid {} range {}..{}",
                decoration.kind,
                decoration.start(),
                decoration.end()
            );
            return false;
        }
        if !self.seen.insert(decoration) {
            return false;
        }
        self.items.push(decoration);
        true
    }

    /// Keeps only the decorations matching `keep`. Removed triples may be
    /// added again afterwards.
    pub fn retain(&mut self, mut keep: impl FnMut(&Decoration) -> bool) {
        let seen = &mut self.seen;
        self.items.retain(|d| {
            let kept = keep(d);
            if !kept {
                seen.remove(d);
            }
            kept
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Decoration> {
        self.items
    }
}

impl Extend<Decoration> for Collector<'_> {
    fn extend<I: IntoIterator<Item = Decoration>>(&mut self, iter: I) {
        for decoration in iter {
            self.push(decoration);
        }
    }
}
