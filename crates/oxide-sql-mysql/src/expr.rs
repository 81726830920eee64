//! Expression hooks: introducers, typed literals, `BINARY` and the
//! functions with non-standard argument syntax.

use oxide_sql_parser::ast::{
    CharString, DataType, Expr, ExprKind, FunctionCall, Ident, IntegerKind, IntegerValue,
    JsonOnResponse, JsonTable, JsonTableColumn, ObjectName, SearchModifier, UnaryOp,
};
use oxide_sql_parser::hash::fnv1a_64_lower;
use oxide_sql_parser::lexer::NumberKind;
use oxide_sql_parser::parser::{ParseError, Precedence};
use oxide_sql_parser::{HookResult, Keyword, Parser, TokenKind};
use tracing::trace;

use crate::words;

/// `BINARY expr`, and calls whose name is a reserved word: `MOD(a, b)` and
/// `VALUES(col)` in `ON DUPLICATE KEY UPDATE`.
pub(crate) fn parse_prefix(parser: &mut Parser<'_>) -> HookResult<Expr> {
    let token = parser.current();
    if token.is_reserved_hash(words::BINARY) {
        parser.advance()?;
        let operand = parser.parse_subexpr(UnaryOp::Binary.precedence())?;
        return Ok(Some(Expr::unary(UnaryOp::Binary, operand)));
    }
    let callable = token.is_reserved_hash(words::MOD) || token.is_keyword(Keyword::Values);
    if !callable || !parser.peek_is(|t| t.kind == TokenKind::LeftParen)? {
        return Ok(None);
    }
    let token = parser.advance()?;
    let name = ObjectName::from(Ident::new(parser.text_of(&token)));
    parser.advance()?;
    parser.parse_function_call(name).map(Some)
}

/// Character-set introducers and typed literals.
pub(crate) fn parse_identifier_expr(parser: &mut Parser<'_>) -> HookResult<Expr> {
    let token = parser.current().clone();
    let TokenKind::Identifier(word) = &token.kind else {
        return Ok(None);
    };
    if let Some(charset) = word.strip_prefix('_').filter(|c| !c.is_empty()) {
        return parse_introduced_string(parser, charset);
    }
    if !parser.peek_is(|t| matches!(t.kind, TokenKind::String(_)))? {
        return Ok(None);
    }

    let integer = match token.hash {
        words::BIGINT => Some(IntegerKind::BigInt),
        words::INTEGER => Some(IntegerKind::Integer),
        words::SMALLINT => Some(IntegerKind::SmallInt),
        words::TINYINT => Some(IntegerKind::TinyInt),
        _ => None,
    };
    if let Some(kind) = integer {
        parser.advance()?;
        let literal = parser.current().clone();
        let text = parser.parse_string()?;
        // `BIGINT '--5'` is 5: the doubled sign is dropped, not negated.
        let digits = text.strip_prefix("--").unwrap_or(&text).trim();
        let value = IntegerValue::parse(digits).ok_or_else(|| {
            ParseError::new(format!("invalid {} literal '{text}'", kind.as_str()), &literal)
        })?;
        return Ok(Some(ExprKind::TypedInteger {
            data_type: DataType::integer(kind),
            text,
            value,
        }
        .into()));
    }

    let data_type = match token.hash {
        words::VARCHAR => DataType::Varchar(None),
        words::CHAR => DataType::Char(None),
        words::JSON => DataType::Json,
        words::DECIMAL => DataType::Decimal {
            precision: None,
            scale: None,
        },
        words::DOUBLE => DataType::Double,
        words::FLOAT => DataType::Float(None),
        words::REAL => DataType::Real,
        _ => return Ok(None),
    };
    parser.advance()?;
    let value = parser.parse_string()?;
    Ok(Some(ExprKind::TypedString { data_type, value }.into()))
}

/// `_charset 'text' [COLLATE c]`, `_charset X'..'` or `_charset 0x..`.
fn parse_introduced_string(parser: &mut Parser<'_>, charset: &str) -> HookResult<Expr> {
    parser.advance()?;
    let (value, hex) = match &parser.current().kind {
        TokenKind::String(_) => (parser.parse_string()?, false),
        TokenKind::HexString(digits) => {
            let digits = digits.clone();
            parser.advance()?;
            (digits, true)
        }
        TokenKind::Number {
            text,
            kind: NumberKind::Hex,
        } => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text)
                .to_string();
            parser.advance()?;
            (digits, true)
        }
        _ => return Ok(None),
    };
    let collate = if parser.consume_keyword(Keyword::Collate)? {
        Some(parser.parse_any_word()?.value)
    } else {
        None
    };
    let string = CharString {
        charset: Some(charset.to_string()),
        value,
        hex,
        collate,
    };
    Ok(Some(ExprKind::CharString(string).into()))
}

/// Functions whose argument list is not a plain expression list.
pub(crate) fn parse_function(parser: &mut Parser<'_>, name: &ObjectName) -> HookResult<Expr> {
    let [ident] = name.0.as_slice() else {
        return Ok(None);
    };
    match ident.hash {
        words::MATCH => parse_match(parser),
        words::POSITION => parse_position(parser),
        words::CONVERT => parse_convert(parser).map(Some),
        words::GROUP_CONCAT => parse_group_concat(parser, name.clone()).map(Some),
        words::JSON_TABLE => parse_json_table(parser).map(Some),
        _ => Ok(None),
    }
}

/// `MATCH (cols) AGAINST (expr [modifier])`. Without `AGAINST` this is an
/// ordinary call.
fn parse_match(parser: &mut Parser<'_>) -> HookResult<Expr> {
    let columns = parser.parse_comma_separated(Parser::parse_expr)?;
    parser.expect(&TokenKind::RightParen)?;
    if !parser.consume_word(words::AGAINST)? {
        return Ok(None);
    }
    parser.expect(&TokenKind::LeftParen)?;
    // Stop before `IN`, which opens the modifier.
    let against = parser.parse_subexpr(Precedence::Relational)?;
    let modifier = parse_search_modifier(parser)?;
    parser.expect(&TokenKind::RightParen)?;
    Ok(Some(ExprKind::MatchAgainst {
        columns,
        against: Box::new(against),
        modifier,
    }
    .into()))
}

fn parse_search_modifier(parser: &mut Parser<'_>) -> Result<Option<SearchModifier>, ParseError> {
    if parser.consume_keyword(Keyword::In)? {
        if parser.consume_word(words::BOOLEAN)? {
            parser.expect_word(words::MODE, "MODE")?;
            return Ok(Some(SearchModifier::Boolean));
        }
        parser.expect_keyword(Keyword::Natural)?;
        parser.expect_word(words::LANGUAGE, "LANGUAGE")?;
        parser.expect_word(words::MODE, "MODE")?;
        return Ok(Some(if parse_query_expansion(parser)? {
            SearchModifier::NaturalLanguageWithQueryExpansion
        } else {
            SearchModifier::NaturalLanguage
        }));
    }
    Ok(parse_query_expansion(parser)?.then_some(SearchModifier::WithQueryExpansion))
}

fn parse_query_expansion(parser: &mut Parser<'_>) -> Result<bool, ParseError> {
    if !parser.consume_keyword(Keyword::With)? {
        return Ok(false);
    }
    parser.expect_word(words::QUERY, "QUERY")?;
    parser.expect_word(words::EXPANSION, "EXPANSION")?;
    Ok(true)
}

/// `POSITION(needle IN haystack)`, kept as `LOCATE(needle, haystack)`.
fn parse_position(parser: &mut Parser<'_>) -> HookResult<Expr> {
    let Some(needle) = parser.maybe_parse(|p| p.parse_subexpr(Precedence::Relational))? else {
        return Ok(None);
    };
    if !parser.consume_keyword(Keyword::In)? {
        return Ok(None);
    }
    let haystack = parser.parse_expr()?;
    parser.expect(&TokenKind::RightParen)?;
    trace!("POSITION .. IN rewritten to LOCATE");
    let call = FunctionCall::new("LOCATE", vec![needle, haystack]);
    Ok(Some(ExprKind::Function(call).into()))
}

/// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
fn parse_convert(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let expr = parser.parse_expr()?;
    let data_type = if parser.consume(&TokenKind::Comma)? {
        Some(parser.parse_data_type()?)
    } else {
        None
    };
    let charset = if parser.consume_keyword(Keyword::Using)? {
        Some(parser.parse_any_word()?)
    } else {
        None
    };
    if data_type.is_none() && charset.is_none() {
        return Err(parser.error_expected("',' or USING"));
    }
    parser.expect(&TokenKind::RightParen)?;
    Ok(ExprKind::Convert {
        expr: Box::new(expr),
        data_type,
        charset,
    }
    .into())
}

/// `GROUP_CONCAT([DISTINCT] args [ORDER BY ..] [SEPARATOR 'sep'])`.
fn parse_group_concat(parser: &mut Parser<'_>, name: ObjectName) -> Result<Expr, ParseError> {
    let mut call = FunctionCall::new(name, vec![]);
    call.distinct = parser.consume_keyword(Keyword::Distinct)?;
    call.args = parser.parse_comma_separated(Parser::parse_function_arg)?;
    if parser.consume_keyword(Keyword::Order)? {
        parser.expect_keyword(Keyword::By)?;
        call.order_by = parser.parse_order_by_list()?;
    }
    if parser.consume_word(words::SEPARATOR)? {
        call.separator = Some(parser.parse_string()?);
    }
    parser.expect(&TokenKind::RightParen)?;
    Ok(ExprKind::Function(call).into())
}

/// `JSON_TABLE(expr, 'path' COLUMNS (...))`.
fn parse_json_table(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let expr = parser.parse_expr()?;
    parser.expect(&TokenKind::Comma)?;
    let path = parser.parse_string()?;
    let columns = parse_json_columns(parser)?;
    parser.expect(&TokenKind::RightParen)?;
    let table = JsonTable {
        expr,
        path,
        columns,
    };
    Ok(ExprKind::JsonTable(Box::new(table)).into())
}

fn parse_json_columns(parser: &mut Parser<'_>) -> Result<Vec<JsonTableColumn>, ParseError> {
    parser.expect_word(words::COLUMNS, "COLUMNS")?;
    parser.parse_parenthesized(|p| p.parse_comma_separated(parse_json_column))
}

fn parse_json_column(parser: &mut Parser<'_>) -> Result<JsonTableColumn, ParseError> {
    if parser.consume_word(words::NESTED)? {
        parser.consume_word(words::PATH)?;
        let path = parser.parse_string()?;
        let columns = parse_json_columns(parser)?;
        return Ok(JsonTableColumn::Nested { path, columns });
    }

    let name = parser.parse_identifier()?;
    if parser.consume_keyword(Keyword::For)? {
        parser.expect_word(words::ORDINALITY, "ORDINALITY")?;
        return Ok(JsonTableColumn::Ordinality { name });
    }
    let data_type = parser.parse_data_type()?;
    let exists = parser.consume_keyword(Keyword::Exists)?;
    parser.expect_word(words::PATH, "PATH")?;
    let path = parser.parse_string()?;

    let mut on_empty = None;
    let mut on_error = None;
    while let Some(response) = parse_json_response(parser)? {
        parser.expect_keyword(Keyword::On)?;
        if parser.consume_word(words::EMPTY)? {
            on_empty = Some(response);
        } else {
            parser.expect_word(words::ERROR, "EMPTY or ERROR")?;
            on_error = Some(response);
        }
    }
    Ok(JsonTableColumn::Path {
        name,
        data_type,
        exists,
        path,
        on_empty,
        on_error,
    })
}

fn parse_json_response(parser: &mut Parser<'_>) -> Result<Option<JsonOnResponse>, ParseError> {
    if parser.consume_keyword(Keyword::Null)? {
        Ok(Some(JsonOnResponse::Null))
    } else if parser.consume_word(words::ERROR)? {
        Ok(Some(JsonOnResponse::Error))
    } else if parser.consume_keyword(Keyword::Default)? {
        Ok(Some(JsonOnResponse::Default(Box::new(parser.parse_expr()?))))
    } else {
        Ok(None)
    }
}

/// `UNSIGNED`, `SIGNED` and `ZEROFILL` after integer types, and the
/// `UNSIGNED INTEGER` spelling of a cast target.
pub(crate) fn parse_data_type_suffix(
    parser: &mut Parser<'_>,
    data_type: DataType,
) -> Result<DataType, ParseError> {
    match data_type {
        DataType::Integer {
            kind,
            width,
            mut unsigned,
            mut zerofill,
        } => {
            loop {
                if parser.consume_word(words::UNSIGNED)? {
                    unsigned = true;
                } else if parser.consume_word(words::SIGNED)? {
                    unsigned = false;
                } else if parser.consume_word(words::ZEROFILL)? {
                    zerofill = true;
                } else {
                    break;
                }
            }
            Ok(DataType::Integer {
                kind,
                width,
                unsigned,
                zerofill,
            })
        }
        DataType::Custom { name, args }
            if args.is_empty()
                && matches!(fnv1a_64_lower(&name), words::SIGNED | words::UNSIGNED) =>
        {
            let token = parser.current().clone();
            if parser.consume_word(words::INT)? || parser.consume_word(words::INTEGER)? {
                let name = format!("{name} {}", parser.text_of(&token));
                return Ok(DataType::Custom { name, args });
            }
            Ok(DataType::Custom { name, args })
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MySqlDialect;
    use oxide_sql_parser::ParserFeatures;

    fn expr(input: &str) -> Expr {
        let mut parser = Parser::new(input, &MySqlDialect, ParserFeatures::new()).unwrap();
        let expr = parser.parse_expr().unwrap();
        assert!(parser.current().is_eof(), "trailing input: {input}");
        expr
    }

    #[test]
    fn test_introducer_with_collation() {
        assert_eq!(
            expr("_utf8mb4 'abc' COLLATE utf8mb4_bin"),
            Expr::from(ExprKind::CharString(CharString {
                charset: Some("utf8mb4".into()),
                value: "abc".into(),
                hex: false,
                collate: Some("utf8mb4_bin".into()),
            }))
        );
    }

    #[test]
    fn test_hex_introducers() {
        for input in ["_binary X'4142'", "_binary 0x4142"] {
            let ExprKind::CharString(string) = expr(input).kind else {
                panic!("expected a charset string for {input}");
            };
            assert_eq!(string.value, "4142");
            assert!(string.hex);
        }
    }

    #[test]
    fn test_underscore_column_is_not_an_introducer() {
        assert_eq!(expr("_tmp + 1").to_string(), "_tmp + 1");
    }

    #[test]
    fn test_double_minus_integer_literal() {
        let ExprKind::TypedInteger { text, value, .. } = expr("BIGINT '--123'").kind else {
            panic!("expected typed integer");
        };
        assert_eq!(text, "--123");
        assert_eq!(value, IntegerValue::Int(123));
    }

    #[test]
    fn test_typed_integer_rejects_text() {
        let mut parser = Parser::new("TINYINT 'abc'", &MySqlDialect, ParserFeatures::new()).unwrap();
        let err = parser.parse_expr().unwrap_err();
        assert!(err.message.contains("TINYINT"));
    }

    #[test]
    fn test_values_function() {
        let ExprKind::Binary { left, .. } = expr("VALUES(a) + 1").kind else {
            panic!("expected addition");
        };
        let ExprKind::Function(call) = left.kind else {
            panic!("expected a VALUES call");
        };
        assert_eq!(call.name.to_string(), "VALUES");
        assert_eq!(call.args, vec![Expr::column("a")]);
    }

    #[test]
    fn test_reserved_call_names() {
        assert!(matches!(expr("MOD(7, 2)").kind, ExprKind::Function(_)));
        assert!(matches!(expr("7 MOD 2").kind, ExprKind::Binary { .. }));
        assert!(matches!(expr("BINARY 'a'").kind, ExprKind::Unary { .. }));
    }

    #[test]
    fn test_unsigned_cast_target() {
        let ExprKind::Cast { data_type, .. } = expr("CAST(x AS UNSIGNED INTEGER)").kind else {
            panic!("expected cast");
        };
        assert_eq!(
            data_type,
            DataType::Custom {
                name: "UNSIGNED INTEGER".into(),
                args: vec![],
            }
        );
    }
}
