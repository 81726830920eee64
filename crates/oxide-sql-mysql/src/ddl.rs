//! Column, index and table options of MySQL CREATE TABLE.

use once_cell::sync::Lazy;
use oxide_sql_parser::ast::{
    ColumnOption, DirectoryKind, GeneratedStorage, IndexOption, TableOption,
};
use oxide_sql_parser::lexer::NameTable;
use oxide_sql_parser::parser::{ParseError, Precedence};
use oxide_sql_parser::{HookResult, Keyword, Parser, TokenKind};

use crate::words;

/// Table options written `NAME [=] value`.
static KEY_VALUE_OPTIONS: Lazy<NameTable> = Lazy::new(|| {
    NameTable::from_names(&[
        "AUTO_INCREMENT",
        "AUTOEXTEND_SIZE",
        "AVG_ROW_LENGTH",
        "CHECKSUM",
        "COMMENT",
        "COMPRESSION",
        "CONNECTION",
        "DELAY_KEY_WRITE",
        "ENCRYPTION",
        "ENGINE",
        "ENGINE_ATTRIBUTE",
        "INSERT_METHOD",
        "KEY_BLOCK_SIZE",
        "MAX_ROWS",
        "MIN_ROWS",
        "PACK_KEYS",
        "PASSWORD",
        "ROW_FORMAT",
        "SECONDARY_ENGINE",
        "SECONDARY_ENGINE_ATTRIBUTE",
        "STATS_AUTO_RECALC",
        "STATS_PERSISTENT",
        "STATS_SAMPLE_PAGES",
    ])
});

pub(crate) fn parse_column_option(parser: &mut Parser<'_>) -> HookResult<ColumnOption> {
    if parser.consume_keyword(Keyword::On)? {
        if !parser.consume_keyword(Keyword::Update)? {
            return Ok(None);
        }
        let expr = parser.parse_subexpr(Precedence::Postfix)?;
        return Ok(Some(ColumnOption::OnUpdate(expr)));
    }
    if parser.consume_word(words::AUTO_INCREMENT)? {
        return Ok(Some(ColumnOption::AutoIncrement));
    }
    if parser.consume_word(words::COMMENT)? {
        return Ok(Some(ColumnOption::Comment(parser.parse_string()?)));
    }
    if parse_charset_keyword(parser)? {
        return Ok(Some(ColumnOption::CharacterSet(parser.parse_any_word()?)));
    }
    if parser.consume_word(words::GENERATED)? {
        parser.expect_word(words::ALWAYS, "ALWAYS")?;
        parser.expect_keyword(Keyword::As)?;
        return parse_generated(parser).map(Some);
    }
    if parser.check_keyword(Keyword::As)
        && parser.peek_is(|t| t.kind == TokenKind::LeftParen)?
    {
        parser.advance()?;
        return parse_generated(parser).map(Some);
    }
    Ok(None)
}

/// `(expr) [STORED | VIRTUAL]`, after `AS`.
fn parse_generated(parser: &mut Parser<'_>) -> Result<ColumnOption, ParseError> {
    let expr = parser.parse_parenthesized(Parser::parse_expr)?;
    let storage = if parser.consume_word(words::STORED)? {
        Some(GeneratedStorage::Stored)
    } else if parser.consume_word(words::VIRTUAL)? {
        Some(GeneratedStorage::Virtual)
    } else {
        None
    };
    Ok(ColumnOption::Generated { expr, storage })
}

/// Consumes `CHARACTER SET` or `CHARSET`.
fn parse_charset_keyword(parser: &mut Parser<'_>) -> Result<bool, ParseError> {
    if parser.consume_word(words::CHARSET)? {
        return Ok(true);
    }
    if parser.check_word(words::CHARACTER) && parser.peek_is(|t| t.is_keyword(Keyword::Set))? {
        parser.advance()?;
        parser.advance()?;
        return Ok(true);
    }
    Ok(false)
}

pub(crate) fn parse_index_option(parser: &mut Parser<'_>) -> HookResult<IndexOption> {
    let option = if parser.consume_word(words::COMMENT)? {
        IndexOption::Comment(parser.parse_string()?)
    } else if parser.consume_word(words::VISIBLE)? {
        IndexOption::Visible
    } else if parser.consume_word(words::INVISIBLE)? {
        IndexOption::Invisible
    } else if parser.consume_word(words::GLOBAL)? {
        IndexOption::Global
    } else if parser.consume_word(words::LOCAL)? {
        IndexOption::Local
    } else if parser.consume_word(words::KEY_BLOCK_SIZE)? {
        parser.consume(&TokenKind::Eq)?;
        IndexOption::KeyBlockSize(parser.parse_u64()?)
    } else if parser.consume_word(words::ALGORITHM)? {
        parser.consume(&TokenKind::Eq)?;
        IndexOption::Algorithm(parser.parse_any_word()?)
    } else if parser.consume_word(words::LOCK)? {
        parser.consume(&TokenKind::Eq)?;
        IndexOption::Lock(parser.parse_any_word()?)
    } else if parser.consume_keyword(Keyword::With)? {
        if !parser.consume_word(words::PARSER)? {
            return Ok(None);
        }
        IndexOption::WithParser(parser.parse_any_word()?)
    } else {
        return Ok(None);
    };
    Ok(Some(option))
}

pub(crate) fn parse_table_option(parser: &mut Parser<'_>) -> HookResult<TableOption> {
    let default = parser.consume_keyword(Keyword::Default)?;
    if parser.consume_keyword(Keyword::Collate)? {
        parser.consume(&TokenKind::Eq)?;
        let value = parser.parse_any_word()?;
        return Ok(Some(TableOption::Collate { default, value }));
    }
    if parse_charset_keyword(parser)? {
        parser.consume(&TokenKind::Eq)?;
        let value = parser.parse_any_word()?;
        return Ok(Some(TableOption::CharacterSet { default, value }));
    }
    if default {
        return Ok(None);
    }

    let directory = if parser.check_word(words::DATA) {
        Some(DirectoryKind::Data)
    } else if parser.check_keyword(Keyword::Index) {
        Some(DirectoryKind::Index)
    } else {
        None
    };
    if let Some(kind) = directory {
        if parser.peek_is(|t| t.is_word_hash(words::DIRECTORY))? {
            parser.advance()?;
            parser.advance()?;
            parser.consume(&TokenKind::Eq)?;
            let path = parser.parse_string()?;
            return Ok(Some(TableOption::Directory { kind, path }));
        }
        return Ok(None);
    }

    if parser.consume_keyword(Keyword::Union)? {
        let has_eq = parser.consume(&TokenKind::Eq)?;
        if !has_eq && !parser.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let tables = parser.parse_parenthesized(|p| {
            p.parse_comma_separated(Parser::parse_object_name)
        })?;
        return Ok(Some(TableOption::Union(tables)));
    }

    if parser.consume_word(words::TABLESPACE)? {
        let name = parser.parse_any_word()?;
        let storage = if parser.consume_word(words::STORAGE)? {
            Some(parser.parse_any_word()?)
        } else {
            None
        };
        return Ok(Some(TableOption::Tablespace { name, storage }));
    }

    let token = parser.current();
    if !token.is_word() {
        return Ok(None);
    }
    let Some(name) = KEY_VALUE_OPTIONS.lookup(token.hash) else {
        return Ok(None);
    };
    parser.advance()?;
    parser.consume(&TokenKind::Eq)?;
    // Postfix precedence keeps a following `COLLATE x` out of the value.
    let value = parser.parse_subexpr(Precedence::Postfix)?;
    Ok(Some(TableOption::KeyValue {
        name: name.to_string(),
        value,
    }))
}
