//! SQL Parser
//!
//! A hand-written recursive descent parser with precedence climbing for
//! expressions. Dialects plug in through the hooks of
//! [`Dialect`](crate::dialect::Dialect).

mod ddl;
mod dml;
mod error;
mod expr;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod query;
mod statement;

pub use error::{ParseError, ParseErrorKind};
pub use expr::AGGREGATE_FUNCTIONS;
pub use parser::{Parser, ParserCheckpoint, Statements, DEFAULT_MAX_DEPTH};
pub use pratt::{generic_infix_operator, pipes_operator, token_to_unary_op, InfixOp, Precedence};
pub use query::generic_set_operator;
