//! SQL rendering.
//!
//! Turns AST nodes back into SQL text for a given dialect. The output of
//! [`render`] parses back, with the same dialect, into a tree equal to the
//! input (spans aside).
//!
//! ```
//! use oxide_sql_parser::dialect::GenericDialect;
//! use oxide_sql_parser::render::render;
//! use oxide_sql_parser::{Parser, ParserFeatures};
//!
//! let statement = Parser::new("select a+1 from t", &GenericDialect, ParserFeatures::new())
//!     .unwrap()
//!     .parse_statement()
//!     .unwrap();
//! assert_eq!(render(&statement, &GenericDialect), "SELECT a + 1 FROM t");
//! ```

mod statement;
mod writer;

use std::fmt;

pub use writer::SqlWriter;

use crate::ast::{ColumnDef, Expr, ParsedStatement, Query, Statement, TableElement, TableRef};
use crate::dialect::{Dialect, GenericDialect};

/// A node that can be written as SQL.
pub trait Render {
    /// Writes `self` through `writer`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    fn render(&self, writer: &mut SqlWriter<'_>) -> fmt::Result;
}

macro_rules! impl_render {
    ($($node:ty => $method:ident),* $(,)?) => {
        $(
            impl Render for $node {
                fn render(&self, writer: &mut SqlWriter<'_>) -> fmt::Result {
                    writer.$method(self)
                }
            }
        )*
    };
}

impl_render! {
    Statement => statement,
    ParsedStatement => parsed_statement,
    Query => query,
    Expr => expr,
    TableRef => table_ref,
    TableElement => table_element,
    ColumnDef => column_def,
}

/// Displays a node in a dialect.
pub struct Rendered<'a, T: ?Sized> {
    node: &'a T,
    dialect: &'a dyn Dialect,
}

impl<'a, T: Render + ?Sized> Rendered<'a, T> {
    pub fn new(node: &'a T, dialect: &'a dyn Dialect) -> Self {
        Self { node, dialect }
    }
}

impl<T: Render + ?Sized> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.render(&mut SqlWriter::new(f, self.dialect))
    }
}

/// Renders a node as SQL text in `dialect`.
#[must_use]
pub fn render<T: Render + ?Sized>(node: &T, dialect: &dyn Dialect) -> String {
    Rendered::new(node, dialect).to_string()
}

/// Renders a statement list, one statement per line.
#[must_use]
pub fn render_statements(statements: &[ParsedStatement], dialect: &dyn Dialect) -> String {
    statements
        .iter()
        .map(|statement| render(statement, dialect))
        .collect::<Vec<_>>()
        .join("\n")
}

macro_rules! impl_display {
    ($($node:ty),* $(,)?) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    Rendered::new(self, &GenericDialect).fmt(f)
                }
            }
        )*
    };
}

impl_display!(Statement, Query, Expr);
