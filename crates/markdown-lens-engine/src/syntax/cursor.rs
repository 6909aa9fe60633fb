/// A cursor for byte-by-byte scanning with position tracking.
///
/// Operates over a string slice while tracking the absolute byte position
/// in the document (via `base` offset). Every delimiter the scanners look for
/// is ASCII, so positions the cursor stops on are always char boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Base offset in the document (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Skips spaces, tabs and line breaks.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.i += 1;
        }
    }

    /// Advances to the next occurrence of `pat` and returns its absolute
    /// position. At EOF the cursor is left where it was and `None` returned.
    pub fn seek(&mut self, pat: &[u8]) -> Option<usize> {
        let rest = self.s.as_bytes().get(self.i..)?;
        if pat.is_empty() || rest.len() < pat.len() {
            return None;
        }
        let offset = rest.windows(pat.len()).position(|w| w == pat)?;
        self.i += offset;
        Some(self.pos())
    }

    /// With the cursor on `open`, finds the matching `close` by depth
    /// counting and returns its absolute position, leaving the cursor just
    /// past it. Backslash-escaped bytes never count. On failure the cursor is
    /// restored and `None` returned.
    pub fn seek_matching(&mut self, open: u8, close: u8) -> Option<usize> {
        if self.peek() != Some(open) {
            return None;
        }
        let saved = self.i;
        let mut depth = 0usize;
        while let Some(b) = self.bump() {
            match b {
                b'\\' => {
                    self.bump();
                }
                _ if b == open => depth += 1,
                _ if b == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(self.pos() - 1);
                    }
                }
                _ => {}
            }
        }
        self.i = saved;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("==mark==", 0);
        assert!(cur.starts_with(b"=="));
        assert!(!cur.starts_with(b"]]"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("", 0);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("ab", 0);
        cur.bump_n(10);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn seek_finds_pattern_and_moves() {
        let mut cur = Cursor::new("ab==cd==", 100);
        assert_eq!(cur.seek(b"=="), Some(102));
        cur.bump_n(2);
        assert_eq!(cur.seek(b"=="), Some(106));
        cur.bump_n(2);
        assert_eq!(cur.seek(b"=="), None);
        assert!(cur.eof());
    }

    #[test]
    fn seek_missing_pattern_keeps_position() {
        let mut cur = Cursor::new("abc", 0);
        cur.bump();
        assert_eq!(cur.seek(b"=="), None);
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn seek_matching_counts_depth() {
        let mut cur = Cursor::new("(a(b)c)d", 0);
        assert_eq!(cur.seek_matching(b'(', b')'), Some(6));
        assert_eq!(cur.peek(), Some(b'd'));
    }

    #[test]
    fn seek_matching_skips_escapes() {
        let mut cur = Cursor::new(r"[a\]b]", 0);
        assert_eq!(cur.seek_matching(b'[', b']'), Some(5));
    }

    #[test]
    fn seek_matching_unclosed_restores_cursor() {
        let mut cur = Cursor::new("(a(b)", 4);
        assert_eq!(cur.seek_matching(b'(', b')'), None);
        assert_eq!(cur.pos(), 4);
    }
}
