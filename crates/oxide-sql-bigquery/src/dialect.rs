//! BigQuery dialect implementation.

use once_cell::sync::Lazy;
use oxide_sql_parser::ast::{ColumnOption, Select, SelectModifier, Statement, TableOption};
use oxide_sql_parser::dialect::SelectClause;
use oxide_sql_parser::hash::words;
use oxide_sql_parser::lexer::NameTable;
use oxide_sql_parser::{Dialect, HookResult, Keyword, Parser, TokenKind};
use tracing::trace;

oxide_sql_parser::words! { CLUSTER, QUALIFY }

/// Words BigQuery reserves on top of the generic keywords.
pub static BIGQUERY_RESERVED: Lazy<NameTable> = Lazy::new(|| NameTable::from_names(&["QUALIFY"]));

/// BigQuery dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigQueryDialect;

impl BigQueryDialect {
    /// Creates a new BigQuery dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for BigQueryDialect {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn reserved_words(&self) -> &NameTable {
        &BIGQUERY_RESERVED
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn is_string_quote(&self, c: char) -> bool {
        c == '\'' || c == '"'
    }

    fn supports_backslash_escapes(&self) -> bool {
        true
    }

    fn supports_hash_comments(&self) -> bool {
        true
    }

    fn supports_triple_quoted_strings(&self) -> bool {
        true
    }

    /// `ASSERT` and `BEGIN .. END` blocks. `BEGIN` alone or followed by
    /// `TRANSACTION` is left to the generic transaction statement.
    fn parse_statement(&self, parser: &mut Parser<'_>) -> HookResult<Statement> {
        let token = parser.current();
        if !token.is_word() {
            return Ok(None);
        }
        match token.hash {
            words::ASSERT => parser.parse_assert().map(Some),
            words::BEGIN => {
                let transaction = parser.peek_is(|t| {
                    t.is_eof() || t.kind == TokenKind::Semicolon || t.is_word_hash(words::TRANSACTION)
                })?;
                if transaction {
                    return Ok(None);
                }
                trace!("parsing script block");
                parser.parse_block().map(Some)
            }
            _ => Ok(None),
        }
    }

    fn parse_table_option(&self, parser: &mut Parser<'_>) -> HookResult<TableOption> {
        if parser.check_word(words::PARTITION) {
            if !parser.peek_is(|t| t.is_keyword(Keyword::By))? {
                return Ok(None);
            }
            parser.advance()?;
            parser.advance()?;
            return Ok(Some(TableOption::PartitionBy(parser.parse_expr()?)));
        }
        if parser.check_word(CLUSTER) {
            if !parser.peek_is(|t| t.is_keyword(Keyword::By))? {
                return Ok(None);
            }
            parser.advance()?;
            parser.advance()?;
            let columns = parser.parse_comma_separated(Parser::parse_expr)?;
            return Ok(Some(TableOption::ClusterBy(columns)));
        }
        if parser.check_word(words::OPTIONS) {
            return Ok(Some(TableOption::Options(parser.parse_sql_options()?)));
        }
        Ok(None)
    }

    /// `QUALIFY expr` after `HAVING`.
    fn parse_select_clause(
        &self,
        parser: &mut Parser<'_>,
        at: SelectClause,
        select: &Select,
    ) -> HookResult<SelectModifier> {
        if at != SelectClause::AfterHaving
            || select.qualify.is_some()
            || !parser.current().is_reserved_hash(QUALIFY)
        {
            return Ok(None);
        }
        parser.advance()?;
        Ok(Some(SelectModifier::Qualify(parser.parse_expr()?)))
    }

    fn parse_column_option(&self, parser: &mut Parser<'_>) -> HookResult<ColumnOption> {
        if parser.check_word(words::OPTIONS) {
            return Ok(Some(ColumnOption::Options(parser.parse_sql_options()?)));
        }
        Ok(None)
    }

    fn requires_from_in_delete(&self) -> bool {
        false
    }

    fn supports_double_colon_cast(&self) -> bool {
        false
    }
}
