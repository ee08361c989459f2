//! Tokenizes resolved DSL source into the flat [`kiln_ast::Token`] stream
//! the parser consumes.
//!
//! The DSL has a single uniform grammar: every macro declaration, `#wgsl`
//! included, is a name followed by a braced object of `key = value`
//! properties. There is no raw-capture mode here; shader source lives in an
//! ordinary `value = "..."` string property like any other text.

use kiln_ast::{Token, TokenKind};
use kiln_diagnostics::ParseError;

/// Dotted names recognized as a single [`TokenKind::Builtin`] token rather
/// than identifier-dot-identifier. Anything else spelled `a.b` lexes as
/// three separate tokens and is left for the parser to reject or accept
/// depending on context.
const BUILTINS: &[&str] = &[
    "canvas.width",
    "canvas.height",
    "frame.index",
    "frame.time",
    "frame.delta_time",
];

pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            let start = self.pos;
            let Some(c) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, start as u32));
                return Ok(tokens);
            };

            let kind = match c {
                b'{' => self.advance_single(TokenKind::LBrace),
                b'}' => self.advance_single(TokenKind::RBrace),
                b'[' => self.advance_single(TokenKind::LBracket),
                b']' => self.advance_single(TokenKind::RBracket),
                b'=' => self.advance_single(TokenKind::Equals),
                b',' => self.advance_single(TokenKind::Comma),
                b'.' => self.advance_single(TokenKind::Dot),
                b'$' => self.advance_single(TokenKind::ReferenceSigil),
                b'#' => self.lex_macro_keyword(),
                b'"' => self.lex_string(start)?,
                b'0'..=b'9' => self.lex_number(start)?,
                b'-' if self.bytes.get(self.pos + 1).is_some_and(u8::is_ascii_digit) => {
                    self.lex_number(start)?
                }
                c if is_ident_start(c) => self.lex_identifier_or_builtin(),
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        offset: start as u32,
                        expected: "a token",
                    })
                }
            };

            tokens.push(Token::new(kind, start as u32));
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance_single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if self.bytes[self.pos..].starts_with(b"//") {
                while self.peek().is_some_and(|b| b != b'\n') {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn lex_macro_keyword(&mut self) -> TokenKind {
        self.pos += 1; // '#'
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        TokenKind::MacroKeyword
    }

    fn lex_string(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        self.pos += 1; // opening quote
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::UnterminatedString {
                        offset: start as u32,
                    })
                }
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(TokenKind::String);
                }
                Some(b'\\') => self.pos += 2,
                Some(_) => self.pos += 1,
            }
        }
    }

    fn lex_number(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        if self.peek() == Some(b'0') && matches!(self.bytes.get(self.pos + 1), Some(b'x' | b'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            if self.pos == digits_start {
                return Err(ParseError::InvalidNumber {
                    offset: start as u32,
                    text: self.source[start..self.pos].to_string(),
                });
            }
            return Ok(TokenKind::Number);
        }
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') && self.bytes.get(self.pos + 1).is_some_and(u8::is_ascii_digit)
        {
            self.pos += 1;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text = &self.source[start..self.pos];
        if text.parse::<f64>().is_err() {
            return Err(ParseError::InvalidNumber {
                offset: start as u32,
                text: text.to_string(),
            });
        }
        Ok(TokenKind::Number)
    }

    fn lex_identifier_or_builtin(&mut self) -> TokenKind {
        let ident_start = self.pos;
        self.advance_ident();

        if self.peek() == Some(b'.') {
            let mut probe_pos = self.pos + 1;
            if self
                .bytes
                .get(probe_pos)
                .copied()
                .is_some_and(is_ident_start)
            {
                probe_pos += 1;
                while self.bytes.get(probe_pos).copied().is_some_and(is_ident_continue) {
                    probe_pos += 1;
                }
                let candidate = &self.source[ident_start..probe_pos];
                if BUILTINS.contains(&candidate) {
                    self.pos = probe_pos;
                    return TokenKind::Builtin;
                }
            }
        }

        TokenKind::Identifier
    }

    fn advance_ident(&mut self) {
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_braces_and_identifier() {
        assert_eq!(
            kinds("frame_buf {}"),
            vec![
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lexes_macro_keyword() {
        assert_eq!(
            kinds("#buffer foo {}"),
            vec![
                TokenKind::MacroKeyword,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn recognized_dotted_name_lexes_as_one_builtin_token() {
        assert_eq!(
            kinds("canvas.width"),
            vec![TokenKind::Builtin, TokenKind::Eof]
        );
    }

    #[test]
    fn unrecognized_dotted_name_lexes_as_three_tokens() {
        assert_eq!(
            kinds("foo.bar"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lexes_reference_sigil_and_dotted_name() {
        assert_eq!(
            kinds("$buffer.foo"),
            vec![
                TokenKind::ReferenceSigil,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lexes_negative_and_fractional_numbers() {
        assert_eq!(
            kinds("-1.5 42"),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_hex_literals() {
        assert_eq!(kinds("0xFF 0x10"), vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn identifiers_allow_interior_hyphens() {
        assert_eq!(
            kinds("triangle-list"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(
            lex("\"unterminated"),
            Err(ParseError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn line_comments_are_skipped() {
        assert_eq!(
            kinds("// a comment\nfoo"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn wgsl_declaration_lexes_like_any_other_object_macro() {
        assert_eq!(
            kinds("#wgsl main { value = \"fn vs() {}\" }"),
            vec![
                TokenKind::MacroKeyword,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::String,
                TokenKind::RBrace,
                TokenKind::Eof
            ]
        );
    }
}
