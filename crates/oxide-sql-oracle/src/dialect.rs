//! Oracle dialect implementation.

use once_cell::sync::Lazy;
use oxide_sql_parser::ast::{CurrentTimeKind, SetOperator};
use oxide_sql_parser::lexer::NameTable;
use oxide_sql_parser::parser::generic_set_operator;
use oxide_sql_parser::{Dialect, Expr, ExprKind, HookResult, Parser, Token};

use crate::words;

/// Words Oracle reserves on top of the generic keywords.
pub static ORACLE_RESERVED: Lazy<NameTable> =
    Lazy::new(|| NameTable::from_names(&["MINUS", "SYSDATE", "SYSTIMESTAMP"]));

/// Oracle dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn reserved_words(&self) -> &NameTable {
        &ORACLE_RESERVED
    }

    fn parse_prefix(&self, parser: &mut Parser<'_>) -> HookResult<Expr> {
        let token = parser.current();
        let kind = if token.is_reserved_hash(words::SYSDATE) {
            CurrentTimeKind::Sysdate
        } else if token.is_reserved_hash(words::SYSTIMESTAMP) {
            CurrentTimeKind::SysTimestamp
        } else {
            return Ok(None);
        };
        parser.advance()?;
        Ok(Some(ExprKind::CurrentTime(kind).into()))
    }

    fn set_operator(&self, token: &Token) -> Option<SetOperator> {
        if token.is_reserved_hash(words::MINUS) {
            return Some(SetOperator::Minus);
        }
        generic_set_operator(token)
    }

    fn requires_from_in_delete(&self) -> bool {
        false
    }

    fn supports_double_colon_cast(&self) -> bool {
        false
    }
}
