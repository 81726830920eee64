//! Multi-dialect SQL parsing and formatting.
//!
//! `oxide-sql` ties the parser and the bundled dialects together:
//!
//! - **Registry**: [`DialectRegistry`] resolves `generic`/`ansi`,
//!   `mysql`/`mariadb`, `bigquery`, `oracle` and `oscar` to a dialect
//! - **Entry points**: [`parse`], [`render`] and [`format`] work on whole
//!   scripts of semicolon-separated statements
//! - **Recovery**: [`parse_recovering`] skips to the next `;` after an error
//!   and keeps going, collecting every error
//! - **Configuration**: [`Config`] is the JSON file read by the command line
//!   tool
//!
//! # Example
//!
//! ```rust
//! use oxide_sql::{dialect, format, ParserFeatures};
//!
//! let mysql = dialect("mariadb").unwrap();
//! let sql = format("select `id` from t limit 2, 5; delete from t", mysql, ParserFeatures::new())
//!     .unwrap();
//! assert_eq!(sql, "SELECT id FROM t LIMIT 5 OFFSET 2;\nDELETE FROM t");
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Reformat a MySQL script
//! oxide-sql --dialect mysql format schema.sql
//!
//! # Check every statement, reporting all errors instead of the first
//! cat queries.sql | oxide-sql -d bigquery check --keep-going
//!
//! # Dump tokens, keeping comments
//! oxide-sql --feature keep_comments tokens query.sql
//! ```

pub mod config;
pub mod error;
pub mod registry;

use oxide_sql_parser::lexer::Lexer;
use oxide_sql_parser::{render_statements, Parser, Token};
use tracing::debug;

pub use config::Config;
pub use error::{Error, Result};
pub use registry::DialectRegistry;

pub use oxide_sql_bigquery::BigQueryDialect;
pub use oxide_sql_mysql::MySqlDialect;
pub use oxide_sql_oracle::OracleDialect;
pub use oxide_sql_oscar::OscarDialect;
pub use oxide_sql_parser::{
    ast, Dialect, Feature, GenericDialect, ParseError, ParsedStatement, ParserFeatures, Statement,
};

/// Resolves a dialect in the global registry.
///
/// # Errors
///
/// Returns [`Error::UnknownDialect`] for an unregistered name.
pub fn dialect(name: &str) -> Result<&'static dyn Dialect> {
    DialectRegistry::global().lookup(name)
}

/// Parses every statement of `sql`.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse(
    sql: &str,
    dialect: &dyn Dialect,
    features: ParserFeatures,
) -> Result<Vec<ParsedStatement>> {
    let statements = Parser::new(sql, dialect, features)?.parse_statements()?;
    debug!(dialect = dialect.name(), count = statements.len(), "parsed script");
    Ok(statements)
}

/// Parses every statement of `sql`, resuming after each error at the next
/// `;`. Returns the statements that parsed and the errors met.
pub fn parse_recovering(
    sql: &str,
    dialect: &dyn Dialect,
    features: ParserFeatures,
) -> (Vec<ParsedStatement>, Vec<ParseError>) {
    let mut parser = Parser::new_recovering(sql, dialect, features);
    let mut statements = vec![];
    let mut errors = vec![];
    while let Some(result) = parser.parse_next() {
        match result {
            Ok(statement) => statements.push(statement),
            Err(err) => {
                debug!(%err, "skipping to the next statement");
                errors.push(err);
                if let Err(err) = parser.synchronize() {
                    errors.push(err);
                    break;
                }
            }
        }
    }
    (statements, errors)
}

/// Renders statements one per line, each followed by `;` if it was
/// terminated in the source.
#[must_use]
pub fn render(statements: &[ParsedStatement], dialect: &dyn Dialect) -> String {
    render_statements(statements, dialect)
}

/// Parses `sql` and renders it back in canonical form.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn format(sql: &str, dialect: &dyn Dialect, features: ParserFeatures) -> Result<String> {
    Ok(render(&parse(sql, dialect, features)?, dialect))
}

/// Splits `sql` into tokens, ending with the end-of-input token. Comments
/// are included when [`Feature::KeepComments`] is enabled.
///
/// # Errors
///
/// Returns the first lexical error.
pub fn tokenize(sql: &str, dialect: &dyn Dialect, features: ParserFeatures) -> Result<Vec<Token>> {
    let keep_comments = features.is_enabled(Feature::KeepComments);
    let tokens = Lexer::new(sql, dialect, keep_comments)
        .and_then(|mut lexer| lexer.tokenize())
        .map_err(ParseError::from)?;
    Ok(tokens)
}
