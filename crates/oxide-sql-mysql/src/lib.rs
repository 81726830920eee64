//! # oxide-sql-mysql
//!
//! MySQL dialect for `oxide-sql-parser`.
//!
//! # How MySQL differs from the generic dialect
//!
//! - **Quoting**: identifiers are quoted with backticks; both `'..'` and
//!   `".."` are string literals, and backslash escapes are honored.
//! - **Comments and variables**: `#` starts a line comment, `@name` is a
//!   user variable and `@@[global.|session.]name` a system variable.
//! - **Operators**: `DIV`, `MOD`, `XOR`, `<=>`, `[NOT] REGEXP` and
//!   `[NOT] RLIKE`. `||` is logical OR unless
//!   [`Feature::PipesAsConcat`](oxide_sql_parser::Feature::PipesAsConcat) is
//!   enabled.
//! - **Strings**: every string literal becomes a
//!   [`CharString`](oxide_sql_parser::ast::CharString), which can carry an
//!   introducer (`_utf8mb4 'text'`) and a collation.
//! - **Typed literals**: `BIGINT '42'`, `VARCHAR 'x'`, `JSON '{}'` and
//!   friends.
//! - **Special functions**: `MATCH .. AGAINST`, `POSITION(a IN b)`,
//!   `CONVERT(e USING cs)`, `GROUP_CONCAT(.. SEPARATOR ..)` and
//!   `JSON_TABLE`.
//! - **DDL**: `AUTO_INCREMENT`, `ON UPDATE`, generated columns, index
//!   options such as `KEY_BLOCK_SIZE` and `WITH PARSER`, and table options
//!   such as `ENGINE = InnoDB` separated by optional commas.
//! - **Queries**: `LIMIT offset, count`, `ON DUPLICATE KEY UPDATE`,
//!   `PARTITION (p0)` selection and `USE|FORCE|IGNORE INDEX` hints.
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_mysql::MySqlDialect;
//! use oxide_sql_parser::{render, Parser, ParserFeatures};
//!
//! let statement = Parser::new(
//!     "select `id` from users force index (idx_name) limit 5, 10",
//!     &MySqlDialect,
//!     ParserFeatures::new(),
//! )
//! .unwrap()
//! .parse_statement()
//! .unwrap();
//! assert_eq!(
//!     render(&statement, &MySqlDialect),
//!     "SELECT id FROM users FORCE INDEX (idx_name) LIMIT 10 OFFSET 5"
//! );
//! ```

mod ddl;
mod dialect;
mod expr;
mod table;

pub use dialect::{MySqlDialect, MYSQL_RESERVED};

mod words {
    oxide_sql_parser::words! {
        AGAINST, ALGORITHM, ALWAYS, AUTO_INCREMENT, BIGINT, BINARY, BOOLEAN, CHAR,
        CHARACTER, CHARSET, COLUMNS, COMMENT, CONVERT, DATA, DECIMAL, DIRECTORY, DIV,
        DOUBLE, EMPTY, ERROR, EXPANSION, FLOAT, FORCE, GENERATED, GLOBAL, GROUP_CONCAT,
        IGNORE, INT, INTEGER, INVISIBLE, JSON, JSON_TABLE, KEY_BLOCK_SIZE, LANGUAGE,
        LOCAL, LOCK, MATCH, MOD, MODE, NESTED, ORDINALITY, PARSER, PARTITION, PATH,
        POSITION, QUERY, REAL, REGEXP, RLIKE, SEPARATOR, SIGNED, SMALLINT, STORAGE,
        STORED, TABLESPACE, TINYINT, UNSIGNED, USE, VARCHAR, VIRTUAL, VISIBLE, XOR,
        ZEROFILL,
    }
}
