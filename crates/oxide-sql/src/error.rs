//! Error types for the facade.

use oxide_sql_parser::ParseError;

/// Errors returned by the facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No dialect is registered under the requested name.
    #[error("unknown dialect '{name}' (known: {known})")]
    UnknownDialect {
        /// The name that was asked for.
        name: String,
        /// Comma-separated canonical dialect names.
        known: String,
    },

    /// The input failed to lex or parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
