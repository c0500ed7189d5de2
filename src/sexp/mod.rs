//! Canonical text form of descriptor trees: printer, tokenizer, parser.

pub mod parser;
pub mod printer;
pub mod tokenizer;

pub use parser::{parse_descriptor, parse_value, ParseError};
