use crate::{
    decoration::{Decoration, DecorationKind},
    syntax::Cursor,
};

/// Highlight delimiter.
pub const DELIMITER: &[u8] = b"==";

/// Finds `==text==` pairs left to right. Each pair hides both delimiters and
/// marks the interior as `highlight`; a pair with nothing between is consumed
/// without output. Line breaks are not treated specially.
pub fn scan(text: &str) -> Vec<Decoration> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(text, 0);
    while let Some(open) = cur.seek(DELIMITER) {
        cur.bump_n(DELIMITER.len());
        let Some(close) = cur.seek(DELIMITER) else {
            log::trace!("unterminated highlight at {open}");
            break;
        };
        cur.bump_n(DELIMITER.len());

        let inner_start = open + DELIMITER.len();
        if close > inner_start {
            out.push(Decoration::hide(open, inner_start));
            out.push(Decoration::hide(close, close + DELIMITER.len()));
            out.push(Decoration::new(inner_start, close, DecorationKind::Highlight));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn single_highlight() {
        assert_eq!(
            scan("==highlight=="),
            vec![
                Decoration::hide(0, 2),
                Decoration::hide(11, 13),
                Decoration::new(2, 11, DecorationKind::Highlight),
            ]
        );
    }

    #[test]
    fn several_highlights() {
        let ranges: Vec<_> = scan("==a== and ==b==")
            .into_iter()
            .filter(|d| d.kind == DecorationKind::Highlight)
            .map(|d| (d.start(), d.end()))
            .collect();
        assert_eq!(ranges, vec![(2, 3), (12, 13)]);
    }

    #[rstest]
    #[case::unterminated("==open")]
    #[case::empty_pair("a ==== b")]
    #[case::no_delimiters("plain text")]
    #[case::empty("")]
    #[case::lone_equals("a = b")]
    fn yields_nothing(#[case] text: &str) {
        assert!(scan(text).is_empty());
    }

    #[test]
    fn empty_pair_is_consumed() {
        // `====` closes itself, so `x==` has no partner
        assert!(scan("====x==").is_empty());
    }

    #[test]
    fn spans_lines() {
        assert_eq!(
            scan("==a\nb==").last(),
            Some(&Decoration::new(2, 5, DecorationKind::Highlight))
        );
    }

    #[test]
    fn multi_byte_content() {
        assert_eq!(
            scan("==é==").last(),
            Some(&Decoration::new(2, 4, DecorationKind::Highlight))
        );
    }
}
