//! Select-block clauses: `DISTINCT ON`, `TOP` and `SELECT .. INTO`.

use oxide_sql_parser::ast::{Distinct, Select, SelectInto, SelectModifier, TempScope, Top};
use oxide_sql_parser::dialect::SelectClause;
use oxide_sql_parser::hash::words;
use oxide_sql_parser::{HookResult, Keyword, ParseError, Parser, TokenKind};

pub(crate) fn parse_select_clause(
    parser: &mut Parser<'_>,
    at: SelectClause,
    select: &Select,
) -> HookResult<SelectModifier> {
    match at {
        SelectClause::BeforeProjection => {
            if select.distinct == Some(Distinct::Distinct) && parser.consume_keyword(Keyword::On)? {
                let exprs =
                    parser.parse_parenthesized(|p| p.parse_comma_separated(Parser::parse_expr))?;
                return Ok(Some(SelectModifier::Distinct(Distinct::On(exprs))));
            }
            if select.top.is_none() {
                return parse_top(parser);
            }
            Ok(None)
        }
        SelectClause::AfterProjection if select.into.is_none() => {
            if !parser.consume_keyword(Keyword::Into)? {
                return Ok(None);
            }
            Ok(Some(SelectModifier::Into(parse_select_into(parser)?)))
        }
        _ => Ok(None),
    }
}

/// `TOP n [PERCENT]` or `TOP (expr) [PERCENT]`. A `top` not followed by a
/// count is a column.
fn parse_top(parser: &mut Parser<'_>) -> HookResult<SelectModifier> {
    if !parser.check_word(words::TOP) {
        return Ok(None);
    }
    if !parser.peek_is(|t| matches!(t.kind, TokenKind::Number { .. } | TokenKind::LeftParen))? {
        return Ok(None);
    }
    parser.advance()?;
    let quantity = parser.parse_prefix_expr()?;
    let percent = parser.consume_word(words::PERCENT)?;
    Ok(Some(SelectModifier::Top(Top { quantity, percent })))
}

/// `INTO [GLOBAL|LOCAL] [TEMPORARY|TEMP] [UNLOGGED] [TABLE] name`.
fn parse_select_into(parser: &mut Parser<'_>) -> Result<SelectInto, ParseError> {
    let scope = if parser.consume_word(words::GLOBAL)? {
        Some(TempScope::Global)
    } else if parser.consume_word(words::LOCAL)? {
        Some(TempScope::Local)
    } else {
        None
    };
    let temporary = parser.consume_word(words::TEMPORARY)? || parser.consume_word(words::TEMP)?;
    let unlogged = parser.consume_word(words::UNLOGGED)?;
    let table = parser.consume_keyword(Keyword::Table)?;
    Ok(SelectInto {
        scope,
        temporary,
        unlogged,
        table,
        name: parser.parse_object_name()?,
    })
}
