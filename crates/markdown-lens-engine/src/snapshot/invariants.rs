use std::collections::HashSet;

use crate::decoration::Decoration;

/// A broken guarantee of extraction output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{0:?} is empty or inverted")]
    Degenerate(Decoration),
    #[error("{decoration:?} exceeds text length {len}")]
    OutOfBounds { decoration: Decoration, len: usize },
    #[error("{0:?} splits a character")]
    SplitsChar(Decoration),
    #[error("{0:?} appears more than once")]
    Duplicate(Decoration),
}

/// Every violation in `decorations` for `text`, in output order.
pub fn violations(text: &str, decorations: &[Decoration]) -> Vec<Violation> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for &d in decorations {
        if d.start() >= d.end() {
            out.push(Violation::Degenerate(d));
        } else if d.end() > text.len() {
            out.push(Violation::OutOfBounds {
                decoration: d,
                len: text.len(),
            });
        } else if !d.is_valid_in(text) {
            out.push(Violation::SplitsChar(d));
        }
        if !seen.insert(d) {
            out.push(Violation::Duplicate(d));
        }
    }
    out
}

/// Validates extraction output.
///
/// # Panics
/// Panics with the first violation if any invariant is broken.
pub fn check(text: &str, decorations: &[Decoration]) {
    if let Some(violation) = violations(text, decorations).first() {
        panic!("decoration invariant violated: {violation} (text len: {})", text.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::DecorationKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_output_has_no_violations() {
        let decorations = [
            Decoration::hide(0, 1),
            Decoration::new(0, 1, DecorationKind::Italic),
        ];
        assert!(violations("*", &decorations).is_empty());
    }

    #[test]
    fn reports_each_violation() {
        let text = "é!";
        let decorations = [
            Decoration::hide(2, 2),
            Decoration::hide(0, 7),
            Decoration::hide(1, 3),
            Decoration::hide(2, 3),
            Decoration::hide(2, 3),
        ];
        assert_eq!(
            violations(text, &decorations),
            vec![
                Violation::Degenerate(Decoration::hide(2, 2)),
                Violation::OutOfBounds {
                    decoration: Decoration::hide(0, 7),
                    len: 3
                },
                Violation::SplitsChar(Decoration::hide(1, 3)),
                Violation::Duplicate(Decoration::hide(2, 3)),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "decoration invariant violated")]
    fn check_panics_on_violation() {
        check("ab", &[Decoration::hide(1, 1)]);
    }
}
