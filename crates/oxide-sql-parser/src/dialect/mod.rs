//! SQL Dialect support.
//!
//! A dialect is a value implementing [`Dialect`]. The single generic
//! [`Parser`] consults it for lexical switches, reserved words, expression
//! hooks, statement hooks and capability flags. Nothing a dialect does can
//! leak into another: tables are per-dialect statics and hooks only see the
//! parser they are handed.
//!
//! Hooks return a [`HookResult`]: `Ok(Some(node))` when handled,
//! `Ok(None)` when the form is not the hook's business, and `Err` for a hard
//! failure. When a hook answers `Ok(None)` the parser restores the checkpoint
//! it took before the call, so a hook may look ahead freely before
//! declining.

mod generic;

pub use generic::GenericDialect;

use once_cell::sync::Lazy;

use crate::ast::{
    ColumnOption, DataType, Expr, Ident, IndexHint, IndexOption, Literal, ObjectName, Select,
    SelectModifier, SetOperator, Statement, TableOption,
};
use crate::features::ParserFeatures;
use crate::hash::fnv1a_64_lower;
use crate::lexer::{KeywordTable, NameTable, Token, GENERIC_KEYWORDS};
use crate::parser::{
    generic_infix_operator, generic_set_operator, InfixOp, ParseError, Parser, Precedence,
};

/// Outcome of a dialect hook: handled, not handled, or a hard error.
pub type HookResult<T> = Result<Option<T>, ParseError>;

static NO_WORDS: Lazy<NameTable> = Lazy::new(|| NameTable::from_names(&[]));

/// Points of a SELECT block where a dialect may add clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectClause {
    /// After `SELECT [DISTINCT | ALL]`.
    BeforeProjection,
    /// After the projection list, before `FROM`.
    AfterProjection,
    /// After `HAVING`.
    AfterHaving,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    // Lexical switches

    /// Generic keywords this dialect reserves.
    fn keywords(&self) -> &KeywordTable {
        &GENERIC_KEYWORDS
    }

    /// Further words only this dialect reserves. They lex as
    /// [`TokenKind::Reserved`](crate::lexer::TokenKind::Reserved) and mean
    /// nothing to the generic grammar.
    fn reserved_words(&self) -> &NameTable {
        &NO_WORDS
    }

    /// Returns the identifier quote character used when rendering.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Whether `c` opens a quoted identifier.
    fn is_identifier_quote(&self, c: char) -> bool {
        c == self.identifier_quote()
    }

    /// Whether `c` opens a string literal.
    fn is_string_quote(&self, c: char) -> bool {
        c == '\''
    }

    fn supports_backslash_escapes(&self) -> bool {
        false
    }

    fn supports_hash_comments(&self) -> bool {
        false
    }

    /// Whether `@name` and `@@name` lex as variables.
    fn supports_variables(&self) -> bool {
        false
    }

    /// Whether `'''..'''`, `"""..."""` and `r'..'` strings are recognized.
    fn supports_triple_quoted_strings(&self) -> bool {
        false
    }

    /// Returns true if `word` is reserved in this dialect.
    fn is_reserved(&self, word: &str) -> bool {
        let hash = fnv1a_64_lower(word);
        self.keywords().contains(hash) || self.reserved_words().contains(hash)
    }

    /// Whether `name` must be quoted to survive a round trip.
    fn requires_quoting(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let plain = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        !plain || self.is_reserved(name)
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    // Expression hooks

    /// Tried first for every primary expression.
    fn parse_prefix(&self, _parser: &mut Parser<'_>) -> HookResult<Expr> {
        Ok(None)
    }

    /// Tried when the current token is an unquoted identifier that starts
    /// none of the generic literal or function forms.
    fn parse_identifier_expr(&self, _parser: &mut Parser<'_>) -> HookResult<Expr> {
        Ok(None)
    }

    /// Tried for a function call after its opening parenthesis.
    fn parse_function(&self, _parser: &mut Parser<'_>, _name: &ObjectName) -> HookResult<Expr> {
        Ok(None)
    }

    /// Maps an operator token to an infix operator and its precedence.
    fn infix_operator(
        &self,
        token: &Token,
        features: ParserFeatures,
    ) -> Option<(InfixOp, Precedence)> {
        generic_infix_operator(token, features)
            .filter(|(op, _)| *op != InfixOp::DoubleColonCast || self.supports_double_colon_cast())
    }

    /// Builds the node for a plain string literal.
    fn string_literal(&self, value: String) -> Expr {
        Expr::literal(Literal::String(value))
    }

    /// Parses modifiers that may follow a data type, e.g. `UNSIGNED`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed modifiers.
    fn parse_data_type_suffix(
        &self,
        _parser: &mut Parser<'_>,
        data_type: DataType,
    ) -> Result<DataType, ParseError> {
        Ok(data_type)
    }

    /// Whether a function accepts `ORDER BY` inside its argument list.
    fn is_aggregate_function(&self, name: u64) -> bool {
        crate::parser::AGGREGATE_FUNCTIONS.contains(name)
    }

    // Statement hooks

    /// Tried before the generic statement dispatch.
    fn parse_statement(&self, _parser: &mut Parser<'_>) -> HookResult<Statement> {
        Ok(None)
    }

    /// One step of the table option loop.
    fn parse_table_option(&self, _parser: &mut Parser<'_>) -> HookResult<TableOption> {
        Ok(None)
    }

    /// One step of the column option loop, tried before the generic options.
    fn parse_column_option(&self, _parser: &mut Parser<'_>) -> HookResult<ColumnOption> {
        Ok(None)
    }

    /// One step of the index option loop, tried before the generic options.
    fn parse_index_option(&self, _parser: &mut Parser<'_>) -> HookResult<IndexOption> {
        Ok(None)
    }

    /// One step of the clause loop at `at` in a SELECT block. `select`
    /// holds what has been parsed so far.
    fn parse_select_clause(
        &self,
        _parser: &mut Parser<'_>,
        _at: SelectClause,
        _select: &Select,
    ) -> HookResult<SelectModifier> {
        Ok(None)
    }

    /// Maps a token to a set operator.
    fn set_operator(&self, token: &Token) -> Option<SetOperator> {
        generic_set_operator(token)
    }

    /// Parses `PARTITION (p, ..)` after a table name.
    fn parse_partition_selection(&self, _parser: &mut Parser<'_>) -> HookResult<Vec<Ident>> {
        Ok(None)
    }

    /// Parses index hints after a table name or alias.
    fn parse_index_hints(&self, _parser: &mut Parser<'_>) -> HookResult<Vec<IndexHint>> {
        Ok(None)
    }

    // Capability flags

    /// Whether `LIMIT offset, count` is accepted.
    fn supports_limit_comma(&self) -> bool {
        false
    }

    fn supports_on_duplicate_key_update(&self) -> bool {
        false
    }

    fn requires_from_in_delete(&self) -> bool {
        true
    }

    fn supports_double_colon_cast(&self) -> bool {
        true
    }
}
