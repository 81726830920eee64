//! SQL Lexer/Tokenizer
//!
//! A streaming, dialect-aware lexer. It holds one current token at a time and
//! supports [`Checkpoint`]s so parsers can look ahead and back off.

mod keywords;
mod span;
mod token;
mod tokenizer;

pub use keywords::{HashTable, KeywordTable, NameTable, BASE_KEYWORDS, GENERIC_KEYWORDS};
pub use span::{NodeSpan, Position, Span};
pub use token::{Keyword, NumberKind, Token, TokenKind};
pub use tokenizer::{unescape, Checkpoint, LexError, Lexer};
