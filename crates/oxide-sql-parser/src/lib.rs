//! # oxide-sql-parser
//!
//! A multi-dialect SQL front end: lexer, parser, AST and renderer.
//!
//! This crate provides:
//! - A streaming, dialect-aware lexer with checkpoints for backtracking
//! - A hand-written recursive descent parser with precedence climbing for
//!   expressions
//! - Dialect hooks, so a dialect crate can add syntax without forking the
//!   grammar
//! - A renderer that writes an AST back as SQL that parses to the same tree
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_sql_parser::ast::{SetExpr, Statement};
//! use oxide_sql_parser::dialect::GenericDialect;
//! use oxide_sql_parser::{Parser, ParserFeatures};
//!
//! let mut parser = Parser::new(
//!     "SELECT id, name FROM users WHERE active = TRUE; COMMIT",
//!     &GenericDialect,
//!     ParserFeatures::new(),
//! )
//! .unwrap();
//! let statements = parser.parse_statements().unwrap();
//! assert_eq!(statements.len(), 2);
//!
//! let Statement::Query(query) = &statements[0].statement else {
//!     panic!("expected a query");
//! };
//! assert!(matches!(query.body, SetExpr::Select(_)));
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use oxide_sql_parser::dialect::GenericDialect;
//! use oxide_sql_parser::{render, Parser, ParserFeatures};
//!
//! let statement = Parser::new("select 1+2*3 as \"x\"", &GenericDialect, ParserFeatures::new())
//!     .unwrap()
//!     .parse_statement()
//!     .unwrap();
//! assert_eq!(render(&statement, &GenericDialect), "SELECT 1 + 2 * 3 AS x");
//! ```
//!
//! ## Keyword hashes
//!
//! Non-reserved words are matched by their case-insensitive FNV-1a hash.
//! Dialect crates declare the extra words they match with [`words!`]:
//!
//! ```rust
//! oxide_sql_parser::words! { ENGINE, ROW_FORMAT }
//!
//! assert_eq!(ENGINE, oxide_sql_parser::hash::fnv1a_64_lower("engine"));
//! ```

pub mod ast;
pub mod dialect;
pub mod features;
pub mod hash;
pub mod lexer;
pub mod parser;
pub mod render;

pub use ast::{Expr, ExprKind, ParsedStatement, Statement};
pub use dialect::{Dialect, GenericDialect, HookResult};
pub use features::{Feature, ParserFeatures, UnknownFeature};
pub use lexer::{Keyword, Lexer, NodeSpan, Span, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use render::{render, render_statements, Render, SqlWriter};
