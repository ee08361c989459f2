//! The token stream produced by the lexer.
//!
//! Tokens carry only a kind and a start offset; the end of token `i` is the
//! start of token `i + 1` (or the source length for the last token). This
//! keeps the token array a single flat `Vec` with no borrowed text inside it.

/// The kind of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equals,
    Comma,
    Dot,
    /// A `#<word>` macro keyword. The word determines the declaration kind.
    MacroKeyword,
    /// The `$` reference sigil.
    ReferenceSigil,
    /// A recognized dotted builtin such as `canvas.width`, lexed as one token.
    Builtin,
    Eof,
}

/// A single token: its kind and the byte offset of its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u32,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32) -> Self {
        Self { kind, start }
    }
}

/// Returns the raw slice covered by `tokens[index]`.
///
/// The slice runs from the token's start to the next token's start, or to
/// the end of `source` for the last token. Panics if `index` is out of
/// bounds, which should never happen for a token index produced by the
/// lexer over the same source.
pub fn token_slice<'a>(tokens: &[Token], index: usize, source: &'a [u8]) -> &'a [u8] {
    let start = tokens[index].start as usize;
    let end = tokens
        .get(index + 1)
        .map(|t| t.start as usize)
        .unwrap_or(source.len());
    &source[start..end]
}

/// Like [`token_slice`] but with trailing ASCII whitespace trimmed, for
/// consumers that need the exact name/literal text rather than the raw
/// inter-token span.
pub fn token_text<'a>(tokens: &[Token], index: usize, source: &'a [u8]) -> &'a [u8] {
    let slice = token_slice(tokens, index, source);
    let mut end = slice.len();
    while end > 0 && slice[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    &slice[..end]
}
