//! # oxide-sql-bigquery
//!
//! BigQuery dialect for `oxide-sql-parser`.
//!
//! Identifiers are quoted with backticks. Strings may use either quote,
//! triple quotes (`'''..'''`, `"""..."""`) or an `r` prefix for raw text,
//! and honor backslash escapes. `#` starts a line comment.
//!
//! On top of the generic grammar the dialect adds `ASSERT`, `BEGIN .. END`
//! script blocks, `DELETE` without `FROM`, the `QUALIFY` clause and the
//! `PARTITION BY`, `CLUSTER BY` and `OPTIONS(..)` table options.
//!
//! ```rust
//! use oxide_sql_bigquery::BigQueryDialect;
//! use oxide_sql_parser::{render, Parser, ParserFeatures};
//!
//! let statement = Parser::new(
//!     "select id from `proj.ds.events` qualify row_number() over (partition by id) = 1",
//!     &BigQueryDialect,
//!     ParserFeatures::new(),
//! )
//! .unwrap()
//! .parse_statement()
//! .unwrap();
//! assert_eq!(
//!     render(&statement, &BigQueryDialect),
//!     "SELECT id FROM `proj.ds.events` QUALIFY row_number() OVER (PARTITION BY id) = 1"
//! );
//! ```

mod dialect;

pub use dialect::{BigQueryDialect, BIGQUERY_RESERVED};
