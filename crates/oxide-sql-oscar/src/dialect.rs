//! Oscar dialect implementation.

use once_cell::sync::Lazy;
use oxide_sql_parser::ast::{Select, SelectModifier, SetOperator};
use oxide_sql_parser::dialect::SelectClause;
use oxide_sql_parser::lexer::NameTable;
use oxide_sql_parser::parser::generic_set_operator;
use oxide_sql_parser::{Dialect, HookResult, Parser, Token};

use crate::select;
use crate::words;

/// Words Oscar reserves on top of the generic keywords.
pub static OSCAR_RESERVED: Lazy<NameTable> = Lazy::new(|| NameTable::from_names(&["MINUS"]));

/// Oscar dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OscarDialect;

impl OscarDialect {
    /// Creates a new Oscar dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for OscarDialect {
    fn name(&self) -> &'static str {
        "oscar"
    }

    fn reserved_words(&self) -> &NameTable {
        &OSCAR_RESERVED
    }

    fn parse_select_clause(
        &self,
        parser: &mut Parser<'_>,
        at: SelectClause,
        select: &Select,
    ) -> HookResult<SelectModifier> {
        select::parse_select_clause(parser, at, select)
    }

    fn set_operator(&self, token: &Token) -> Option<SetOperator> {
        if token.is_reserved_hash(words::MINUS) {
            return Some(SetOperator::Minus);
        }
        generic_set_operator(token)
    }
}
