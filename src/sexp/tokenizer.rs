//! logos-based tokenizer for the canonical descriptor text.
//!
//! Longest match wins, so `:"two words"` lexes as [`Token::QuotedSymbol`]
//! rather than [`Token::Colon`] followed by a string, and `2.5` as
//! [`Token::Float`] rather than an integer.

use logos::Logos;

/// Token of the canonical form.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Literals ─────────────────────────────────────────────────────

    /// Quoted symbol: `:"Recent Files"`.
    #[regex(r#":"([^"\\]|\\.)*""#)]
    QuotedSymbol,

    /// Double-quoted string with backslash escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    /// Float: needs a fractional part or an exponent.
    #[regex(r"-?[0-9]+(\.[0-9]+)?[eE][+-]?[0-9]+")]
    #[regex(r"-?[0-9]+\.[0-9]+")]
    Float,

    /// Integer, possibly negative.
    #[regex(r"-?[0-9]+")]
    Int,

    /// Bare identifier: tags, keys, symbols, and `nil`/`true`/`false`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// Opaque handle, `#<label>`. Lexed so the parser can reject it by name.
    #[regex(r"#<[^>]*>")]
    Handle,

    // ── Punctuation ──────────────────────────────────────────────────

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,
}

/// A token with its source text and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub text: String,
    pub offset: usize,
}

/// Tokenize `input`.
///
/// Fails with the byte offset and text of the first character sequence that
/// is not a token.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, (usize, String)> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Spanned {
                token,
                text: input[span.clone()].to_string(),
                offset: span.start,
            }),
            Err(()) => Err((span.start, input[span].to_string())),
        })
        .collect()
}
