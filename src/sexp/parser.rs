//! Recursive descent parser for the canonical descriptor text.
//!
//! Accepts exactly what the printer produces. Handles (`#<label>`) are opaque
//! and cannot be rebuilt from text, so they are rejected. Parsed trees carry
//! no merge points.

use std::str::FromStr;

use crate::descriptor::Descriptor;
use crate::properties::Properties;
use crate::sexp::tokenizer::{tokenize, Spanned, Token};
use crate::symbol::Symbol;
use crate::value::Value;

/// Errors from parsing canonical text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid literal `{text}` at byte {position}: {reason}")]
    InvalidLiteral {
        position: usize,
        text: String,
        reason: String,
    },
    #[error("nesting deeper than {limit} levels at byte {position}")]
    TooDeep { position: usize, limit: usize },
}

/// Maximum nesting of nodes, maps and lists combined.
pub const MAX_DEPTH: usize = 128;

/// Parse a single descriptor tree.
pub fn parse_descriptor(input: &str) -> Result<Descriptor, ParseError> {
    let mut parser = Parser::new(input)?;
    let desc = parser.parse_node()?;
    parser.expect_end()?;
    Ok(desc)
}

/// Parse a single property value.
pub fn parse_value(input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input)?;
    let value = parser.parse_value()?;
    parser.expect_end()?;
    Ok(value)
}

impl FromStr for Descriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_descriptor(s)
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s)
    }
}

/// Parser state: token buffer plus cursor.
struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(input).map_err(|(position, text)| ParseError::UnexpectedToken {
            position,
            message: format!("unrecognized input '{text}'"),
        })?;
        Ok(Self {
            tokens,
            cursor: 0,
            depth: 0,
        })
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token) -> Result<Spanned, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok),
            Some(tok) => Err(unexpected(&tok, &format!("expected {expected:?}"))),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(unexpected(tok, "expected end of input")),
        }
    }

    /// Enter one nesting level; callers leave it with `self.depth -= 1`.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position: self.peek().map_or(0, |tok| tok.offset),
                limit: MAX_DEPTH,
            });
        }
        Ok(())
    }

    fn peek_is(&self, token: Token) -> bool {
        self.peek().is_some_and(|t| t.token == token)
    }

    /// `(` symbol map node* `)`
    fn parse_node(&mut self) -> Result<Descriptor, ParseError> {
        self.descend()?;
        self.expect(Token::ParenOpen)?;
        let tag = self.parse_symbol()?;
        let properties = self.parse_map()?;
        let mut desc = Descriptor::new(tag, properties);
        while !self.peek_is(Token::ParenClose) {
            if self.peek().is_none() {
                return Err(ParseError::UnexpectedEof(format!(
                    "expected ')' to close '{}'",
                    desc.tag()
                )));
            }
            desc.add_child(self.parse_node()?);
        }
        self.expect(Token::ParenClose)?;
        self.depth -= 1;
        Ok(desc)
    }

    fn parse_symbol(&mut self) -> Result<Symbol, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(Symbol::from(tok.text)),
            Some(tok) if tok.token == Token::QuotedSymbol => {
                Ok(Symbol::from(unescape_quoted(&tok, 1)?))
            }
            Some(tok) => Err(unexpected(&tok, "expected a symbol")),
            None => Err(ParseError::UnexpectedEof("expected a symbol".into())),
        }
    }

    /// `{` (symbol `:` value (`,` symbol `:` value)*)? `}`
    fn parse_map(&mut self) -> Result<Properties, ParseError> {
        self.descend()?;
        self.expect(Token::BraceOpen)?;
        let mut props = Properties::new();
        if self.peek_is(Token::BraceClose) {
            self.advance();
            self.depth -= 1;
            return Ok(props);
        }
        loop {
            let key = self.parse_symbol()?;
            self.expect(Token::Colon)?;
            let value = self.parse_value()?;
            props.insert(key, value);
            if self.peek_is(Token::Comma) {
                self.advance();
            } else {
                self.expect(Token::BraceClose)?;
                self.depth -= 1;
                return Ok(props);
            }
        }
    }

    /// `[` (value (`,` value)*)? `]`
    fn parse_list(&mut self) -> Result<Vec<Value>, ParseError> {
        self.descend()?;
        self.expect(Token::BracketOpen)?;
        let mut items = Vec::new();
        if self.peek_is(Token::BracketClose) {
            self.advance();
            self.depth -= 1;
            return Ok(items);
        }
        loop {
            items.push(self.parse_value()?);
            if self.peek_is(Token::Comma) {
                self.advance();
            } else {
                self.expect(Token::BracketClose)?;
                self.depth -= 1;
                return Ok(items);
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let Some(tok) = self.peek().cloned() else {
            return Err(ParseError::UnexpectedEof("expected a value".into()));
        };
        match tok.token {
            Token::BraceOpen => return self.parse_map().map(Value::Map),
            Token::BracketOpen => return self.parse_list().map(Value::List),
            _ => {}
        }
        self.advance();
        match tok.token {
            Token::Ident => Ok(match tok.text.as_str() {
                "nil" => Value::Nil,
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                text => Value::Symbol(Symbol::from(text)),
            }),
            Token::QuotedSymbol => Ok(Value::Symbol(Symbol::from(unescape_quoted(&tok, 1)?))),
            Token::StringLiteral => Ok(Value::Str(unescape_quoted(&tok, 0)?)),
            Token::Int => tok
                .text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| invalid(&tok, e.to_string())),
            Token::Float => tok
                .text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| invalid(&tok, e.to_string())),
            Token::Handle => Err(invalid(&tok, "handles cannot be parsed".into())),
            _ => Err(unexpected(&tok, "expected a value")),
        }
    }
}

fn unexpected(tok: &Spanned, expectation: &str) -> ParseError {
    ParseError::UnexpectedToken {
        position: tok.offset,
        message: format!("{expectation}, got {:?} '{}'", tok.token, tok.text),
    }
}

fn invalid(tok: &Spanned, reason: String) -> ParseError {
    ParseError::InvalidLiteral {
        position: tok.offset,
        text: tok.text.clone(),
        reason,
    }
}

/// Decode a quoted token, skipping `prefix` leading characters before the quote.
fn unescape_quoted(tok: &Spanned, prefix: usize) -> Result<String, ParseError> {
    let body = &tok.text[prefix + 1..tok.text.len() - 1];
    unescape(body).map_err(|reason| invalid(tok, reason))
}

/// Undo the escapes produced by `str`'s `Debug` output.
fn unescape(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('u') => {
                if chars.next() != Some('{') {
                    return Err("expected '{' after \\u".into());
                }
                let hex: String = chars.by_ref().take_while(|&c| c != '}').collect();
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| format!("invalid unicode escape '{hex}'"))?;
                let ch = char::from_u32(code)
                    .ok_or_else(|| format!("invalid code point {code:#x}"))?;
                out.push(ch);
            }
            Some(other) => return Err(format!("unknown escape '\\{other}'")),
            None => return Err("dangling backslash".into()),
        }
    }
    Ok(out)
}
