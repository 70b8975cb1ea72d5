// src/parser.rs

/// Byte-offset cursor over source text.
pub struct Parser<'a> {
    s: &'a str,
    i: usize,
    line: usize,
}

/// Whitespace as the Go scanner sees it.
fn is_go_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0, line: 1 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// 1-based line of the current position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Moves the cursor forward to `to`, counting the newlines passed over.
    fn advance_to(&mut self, to: usize) {
        self.line += self.s[self.i..to].bytes().filter(|&b| b == b'\n').count();
        self.i = to;
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }

    /// Identifier: a letter or `_` followed by letters, digits and `_`.
    pub fn parse_identifier(&mut self) -> Option<&'a str> {
        let start = self.i;
        match self.peek_char() {
            Some(c) if c == '_' || c.is_alphabetic() => self.i += c.len_utf8(),
            _ => return None,
        }
        while let Some(c) = self.peek_char() {
            if c == '_' || c.is_alphanumeric() {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
        Some(&self.s[start..self.i])
    }

    /// Advances past the next occurrence of `lit`, returning the text before it.
    pub fn capture_until(&mut self, lit: &str) -> Option<&'a str> {
        let start = self.i;
        let rel = self.s[start..].find(lit)?;
        self.advance_to(start + rel + lit.len());
        Some(&self.s[start..start + rel])
    }

    /// Advances to the end of the current line without consuming the newline.
    pub fn capture_line(&mut self) -> &'a str {
        let start = self.i;
        let rel = self.s[start..].find('\n').unwrap_or(self.s.len() - start);
        self.i = start + rel;
        &self.s[start..self.i]
    }

    pub fn consume_str(&mut self, lit: &str) -> bool {
        if self.peek_str(lit) {
            self.advance_to(self.i + lit.len());
            true
        } else {
            false
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.advance_to(self.i + c.len_utf8());
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    pub fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if is_go_space(c) {
                self.advance_to(self.i + c.len_utf8());
            } else {
                break;
            }
        }
    }

    /// Like `skip_ws` but stops at a newline.
    pub fn skip_inline_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c != '\n' && is_go_space(c) {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifiers() {
        let mut p = Parser::new("héllo_1 rest");
        assert_eq!(p.parse_identifier(), Some("héllo_1"));
        assert_eq!(p.parse_identifier(), None);
        p.skip_ws();
        assert_eq!(p.parse_identifier(), Some("rest"));
        assert!(p.eof());

        assert_eq!(Parser::new("9lives").parse_identifier(), None);
    }

    #[test]
    fn captures_and_lines() {
        let mut p = Parser::new("/* a\nb */x\nyz");
        assert!(p.consume_str("/*"));
        assert_eq!(p.capture_until("*/"), Some(" a\nb "));
        assert_eq!(p.line(), 2);
        assert_eq!(p.capture_line(), "x");
        assert!(p.consume_char('\n'));
        assert_eq!(p.line(), 3);
        assert_eq!(p.capture_until("*/"), None);
        assert_eq!(p.pos(), 11);
        assert_eq!(p.line(), 3);
    }

    #[test]
    fn only_go_whitespace_is_skipped() {
        let mut p = Parser::new(" \t\r\n\u{a0}x");
        p.skip_ws();
        assert_eq!(p.pos(), 4);
        assert_eq!(p.line(), 2);
        assert_eq!(p.peek_char(), Some('\u{a0}'));

        let mut p = Parser::new("\u{2028}x");
        p.skip_inline_ws();
        assert_eq!(p.pos(), 0);
    }
}
