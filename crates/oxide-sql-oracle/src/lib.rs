//! # oxide-sql-oracle
//!
//! Oracle dialect for `oxide-sql-parser`.
//!
//! Oracle quotes identifiers with double quotes and reserves `SYSDATE`,
//! `SYSTIMESTAMP` and `MINUS`. The two clock words parse as
//! [`ExprKind::CurrentTime`](oxide_sql_parser::ExprKind::CurrentTime) without
//! parentheses, and `MINUS` is a set operator. `DELETE` may omit `FROM`.
//!
//! ```rust
//! use oxide_sql_oracle::OracleDialect;
//! use oxide_sql_parser::{render, Parser, ParserFeatures};
//!
//! let statement = Parser::new(
//!     "select id, sysdate from a minus select id, sysdate from b",
//!     &OracleDialect,
//!     ParserFeatures::new(),
//! )
//! .unwrap()
//! .parse_statement()
//! .unwrap();
//! assert_eq!(
//!     render(&statement, &OracleDialect),
//!     "SELECT id, SYSDATE FROM a MINUS SELECT id, SYSDATE FROM b"
//! );
//! ```

mod dialect;

pub use dialect::{OracleDialect, ORACLE_RESERVED};

mod words {
    oxide_sql_parser::words! { MINUS, SYSDATE, SYSTIMESTAMP }
}
