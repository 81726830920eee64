//! Partition selection and index hints on table references.

use oxide_sql_parser::ast::{Ident, IndexHint, IndexHintKind, IndexHintScope};
use oxide_sql_parser::parser::ParseError;
use oxide_sql_parser::{HookResult, Keyword, Parser, Token, TokenKind};

use crate::words;

/// `PARTITION (p0, p1)` after a table name.
pub(crate) fn parse_partition_selection(parser: &mut Parser<'_>) -> HookResult<Vec<Ident>> {
    if !parser.check_word(words::PARTITION)
        || !parser.peek_is(|t| t.kind == TokenKind::LeftParen)?
    {
        return Ok(None);
    }
    parser.advance()?;
    parser.parse_parenthesized_identifiers().map(Some)
}

fn hint_kind(token: &Token) -> Option<IndexHintKind> {
    match token.hash {
        words::USE if token.is_word() => Some(IndexHintKind::Use),
        words::FORCE if token.is_word() => Some(IndexHintKind::Force),
        words::IGNORE if token.is_word() => Some(IndexHintKind::Ignore),
        _ => None,
    }
}

fn starts_hint(parser: &mut Parser<'_>) -> Result<Option<IndexHintKind>, ParseError> {
    let Some(kind) = hint_kind(parser.current()) else {
        return Ok(None);
    };
    let index = parser.peek_is(|t| t.is_keyword(Keyword::Index) || t.is_keyword(Keyword::Key))?;
    Ok(index.then_some(kind))
}

/// `{USE | FORCE | IGNORE} {INDEX | KEY} [FOR scope] (names)`, repeated and
/// optionally comma-separated.
pub(crate) fn parse_index_hints(parser: &mut Parser<'_>) -> HookResult<Vec<IndexHint>> {
    let mut hints = Vec::new();
    while let Some(kind) = starts_hint(parser)? {
        parser.advance()?;
        parser.advance()?;
        let scope = if parser.consume_keyword(Keyword::For)? {
            Some(parse_hint_scope(parser)?)
        } else {
            None
        };
        parser.expect(&TokenKind::LeftParen)?;
        let indexes = if parser.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            parser.parse_comma_separated(Parser::parse_any_word)?
        };
        parser.expect(&TokenKind::RightParen)?;
        hints.push(IndexHint {
            kind,
            scope,
            indexes,
        });

        // `t USE INDEX (a), IGNORE INDEX (b)`: the comma belongs to the
        // hints only when another hint follows.
        if parser.check(&TokenKind::Comma) {
            let checkpoint = parser.mark();
            parser.advance()?;
            if starts_hint(parser)?.is_none() {
                parser.reset(checkpoint);
                break;
            }
        }
    }
    Ok((!hints.is_empty()).then_some(hints))
}

fn parse_hint_scope(parser: &mut Parser<'_>) -> Result<IndexHintScope, ParseError> {
    if parser.consume_keyword(Keyword::Join)? {
        return Ok(IndexHintScope::Join);
    }
    let scope = if parser.consume_keyword(Keyword::Order)? {
        IndexHintScope::OrderBy
    } else if parser.consume_keyword(Keyword::Group)? {
        IndexHintScope::GroupBy
    } else {
        return Err(parser.error_expected("JOIN, ORDER BY or GROUP BY"));
    };
    parser.expect_keyword(Keyword::By)?;
    Ok(scope)
}
