//! # oxide-sql-oscar
//!
//! Oscar dialect for `oxide-sql-parser`.
//!
//! Oscar accepts both Oracle and PostgreSQL habits in its select blocks:
//!
//! - `SELECT DISTINCT ON (a, b) ..`
//! - `SELECT TOP 10 ..` and `SELECT TOP (n) PERCENT ..`
//! - `SELECT .. INTO [GLOBAL|LOCAL] [TEMPORARY|TEMP] [UNLOGGED] [TABLE] name`
//! - `MINUS` as a set operator next to `EXCEPT`, and `::` casts.
//!
//! ```rust
//! use oxide_sql_oscar::OscarDialect;
//! use oxide_sql_parser::{render, Parser, ParserFeatures};
//!
//! let statement = Parser::new(
//!     "select distinct on (dept) top 5 dept, name into temp t from emp",
//!     &OscarDialect,
//!     ParserFeatures::new(),
//! )
//! .unwrap()
//! .parse_statement()
//! .unwrap();
//! assert_eq!(
//!     render(&statement, &OscarDialect),
//!     "SELECT DISTINCT ON (dept) TOP 5 dept, name INTO TEMPORARY t FROM emp"
//! );
//! ```

mod dialect;
mod select;

pub use dialect::{OscarDialect, OSCAR_RESERVED};

mod words {
    oxide_sql_parser::words! { MINUS }
}
