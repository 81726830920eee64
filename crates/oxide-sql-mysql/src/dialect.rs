//! MySQL dialect implementation.

use once_cell::sync::Lazy;
use oxide_sql_parser::ast::{
    BinaryOp, CharString, ColumnOption, DataType, Expr, ExprKind, Ident, IndexHint, IndexOption,
    LikeOp, ObjectName, TableOption,
};
use oxide_sql_parser::lexer::{NameTable, Token};
use oxide_sql_parser::parser::{
    generic_infix_operator, pipes_operator, InfixOp, ParseError, Precedence,
};
use oxide_sql_parser::{Dialect, HookResult, Parser, ParserFeatures, TokenKind};

use crate::{ddl, expr, table, words};

/// Words MySQL reserves on top of the generic keywords.
pub static MYSQL_RESERVED: Lazy<NameTable> = Lazy::new(|| {
    NameTable::from_names(&["BINARY", "DIV", "MOD", "REGEXP", "RLIKE", "XOR"])
});

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn reserved_words(&self) -> &NameTable {
        &MYSQL_RESERVED
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

    fn supports_variables(&self) -> bool {
        true
    }

    fn parse_prefix(&self, parser: &mut Parser<'_>) -> HookResult<Expr> {
        expr::parse_prefix(parser)
    }

    fn parse_identifier_expr(&self, parser: &mut Parser<'_>) -> HookResult<Expr> {
        expr::parse_identifier_expr(parser)
    }

    fn parse_function(&self, parser: &mut Parser<'_>, name: &ObjectName) -> HookResult<Expr> {
        expr::parse_function(parser, name)
    }

    fn infix_operator(
        &self,
        token: &Token,
        features: ParserFeatures,
    ) -> Option<(InfixOp, Precedence)> {
        let binary = |op: BinaryOp| Some((InfixOp::Binary(op), op.precedence()));
        match &token.kind {
            TokenKind::Reserved(_) => match token.hash {
                words::DIV => binary(BinaryOp::IntDiv),
                words::MOD => binary(BinaryOp::Mod),
                words::XOR => binary(BinaryOp::Xor),
                words::REGEXP => Some((InfixOp::Like(LikeOp::RegExp), Precedence::Relational)),
                words::RLIKE => Some((InfixOp::Like(LikeOp::RLike), Precedence::Relational)),
                _ => None,
            },
            TokenKind::NullSafeEq => binary(BinaryOp::NullSafeEq),
            TokenKind::Concat => Some(pipes_operator(features)),
            _ => generic_infix_operator(token, features)
                .filter(|(op, _)| *op != InfixOp::DoubleColonCast),
        }
    }

    fn string_literal(&self, value: String) -> Expr {
        ExprKind::CharString(CharString::plain(value)).into()
    }

    fn parse_data_type_suffix(
        &self,
        parser: &mut Parser<'_>,
        data_type: DataType,
    ) -> Result<DataType, ParseError> {
        expr::parse_data_type_suffix(parser, data_type)
    }

    fn parse_table_option(&self, parser: &mut Parser<'_>) -> HookResult<TableOption> {
        ddl::parse_table_option(parser)
    }

    fn parse_column_option(&self, parser: &mut Parser<'_>) -> HookResult<ColumnOption> {
        ddl::parse_column_option(parser)
    }

    fn parse_index_option(&self, parser: &mut Parser<'_>) -> HookResult<IndexOption> {
        ddl::parse_index_option(parser)
    }

    fn parse_partition_selection(&self, parser: &mut Parser<'_>) -> HookResult<Vec<Ident>> {
        table::parse_partition_selection(parser)
    }

    fn parse_index_hints(&self, parser: &mut Parser<'_>) -> HookResult<Vec<IndexHint>> {
        table::parse_index_hints(parser)
    }

    fn supports_limit_comma(&self) -> bool {
        true
    }

    fn supports_on_duplicate_key_update(&self) -> bool {
        true
    }

    fn supports_double_colon_cast(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_sql_parser::lexer::{Position, Span};
    use oxide_sql_parser::Feature;

    fn token(kind: TokenKind) -> Token {
        Token::new(kind, Span::new(0, 0), Position::START)
    }

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.identifier_quote(), '`');
        assert!(dialect.is_identifier_quote('`'));
        assert!(!dialect.is_identifier_quote('"'));
        assert!(dialect.is_string_quote('"'));
        assert!(dialect.supports_backslash_escapes());
        assert!(dialect.supports_hash_comments());
        assert!(dialect.supports_variables());
        assert!(dialect.supports_limit_comma());
        assert!(!dialect.supports_double_colon_cast());
    }

    #[test]
    fn test_reserved_words() {
        let dialect = MySqlDialect;
        for word in ["div", "MOD", "Xor", "regexp", "rlike", "binary", "select"] {
            assert!(dialect.is_reserved(word), "{word}");
        }
        assert!(!dialect.is_reserved("engine"));
        assert!(!dialect.is_reserved("qualify"));
        assert_eq!(dialect.quote_identifier("div"), "`div`");
        assert_eq!(dialect.quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_pipes_follow_features() {
        let dialect = MySqlDialect;
        let pipes = token(TokenKind::Concat);
        assert_eq!(
            dialect.infix_operator(&pipes, ParserFeatures::new()),
            Some((InfixOp::Binary(BinaryOp::Or), Precedence::Or))
        );
        assert_eq!(
            dialect.infix_operator(&pipes, ParserFeatures::new().with(Feature::PipesAsConcat)),
            Some((InfixOp::Binary(BinaryOp::Concat), Precedence::Additive))
        );
        assert_eq!(
            dialect.infix_operator(&token(TokenKind::DoubleColon), ParserFeatures::new()),
            None
        );
    }
}
