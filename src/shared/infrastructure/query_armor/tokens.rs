// Lexical token counter for GraphQL source text.
//
// Purpose
// - Bound the size of a request before it reaches the parser.
//
// Responsibilities
// - Walk the source once and classify each lexical token.
// - Skip ignored tokens: whitespace, line terminators, commas, the byte order mark and comments.
//
// Malformed input (unterminated strings, stray characters) still yields tokens. The parser
// reports those errors later.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Punctuator,
    Spread,
    Name,
    Int,
    Float,
    String,
    BlockString,
    Unknown,
}

pub struct Tokens<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn rest_starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(prefix)
    }

    fn skip_ignored(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' | b',' => self.pos += 1,
                0xEF if self.rest_starts_with(&[0xEF, 0xBB, 0xBF]) => self.pos += 3,
                b'#' => {
                    while let Some(byte) = self.peek() {
                        if byte == b'\n' || byte == b'\r' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn name(&mut self) -> TokenKind {
        while self.peek().is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        TokenKind::Name
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn number(&mut self) -> TokenKind {
        let mut kind = TokenKind::Int;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.digits();
        if self.peek() == Some(b'.') && !self.rest_starts_with(b"...") {
            kind = TokenKind::Float;
            self.pos += 1;
            self.digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            kind = TokenKind::Float;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.digits();
        }
        kind
    }

    fn block_string(&mut self) -> TokenKind {
        self.pos += 3;
        while self.pos < self.bytes.len() {
            if self.rest_starts_with(b"\\\"\"\"") {
                self.pos += 4;
            } else if self.rest_starts_with(b"\"\"\"") {
                self.pos += 3;
                break;
            } else {
                self.pos += 1;
            }
        }
        TokenKind::BlockString
    }

    fn string(&mut self) -> TokenKind {
        if self.rest_starts_with(b"\"\"\"") {
            return self.block_string();
        }
        self.pos += 1;
        while let Some(byte) = self.peek() {
            match byte {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'\n' | b'\r' => break,
                _ => self.pos += 1,
            }
        }
        TokenKind::String
    }

    fn unknown(&mut self) -> TokenKind {
        let width = self
            .source
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.pos += width;
        TokenKind::Unknown
    }
}

impl Iterator for Tokens<'_> {
    type Item = TokenKind;

    fn next(&mut self) -> Option<TokenKind> {
        self.skip_ignored();
        let byte = self.peek()?;
        let kind = match byte {
            b'.' if self.rest_starts_with(b"...") => {
                self.pos += 3;
                TokenKind::Spread
            }
            b'!' | b'$' | b'&' | b'(' | b')' | b':' | b'=' | b'@' | b'[' | b']' | b'{' | b'|'
            | b'}' => {
                self.pos += 1;
                TokenKind::Punctuator
            }
            b'"' => self.string(),
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.name(),
            b'-' | b'0'..=b'9' => self.number(),
            _ => self.unknown(),
        };
        Some(kind)
    }
}

pub fn count(source: &str) -> usize {
    Tokens::new(source).count()
}
