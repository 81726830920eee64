//! Statement dispatch and the small statements: DECLARE, ASSERT, blocks and
//! transaction control.

use super::error::ParseError;
use super::Parser;
use crate::ast::{Assert, Declare, Statement, TransactionStart};
use crate::hash::words;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a statement with the grammar every dialect shares.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input and an unsupported error
    /// for recognized statements the parser does not model.
    pub fn parse_generic_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.current().clone();
        match &token.kind {
            TokenKind::LeftParen => return Ok(Statement::Query(Box::new(self.parse_query()?))),
            TokenKind::Keyword(keyword) => match keyword {
                Keyword::Select | Keyword::With | Keyword::Values => {
                    return Ok(Statement::Query(Box::new(self.parse_query()?)));
                }
                Keyword::Insert => return self.parse_insert(),
                Keyword::Update => return self.parse_update(),
                Keyword::Delete => return self.parse_delete(),
                Keyword::Create => return self.parse_create(),
                Keyword::Drop => return self.parse_drop(),
                Keyword::Alter => {
                    self.advance()?;
                    if self.consume_keyword(Keyword::Table)? {
                        return self.parse_alter_table();
                    }
                    let target = self.current().clone();
                    let what = format!("ALTER {}", self.text_of(&target).to_uppercase());
                    return Err(ParseError::unsupported(what, &target));
                }
                _ => {}
            },
            TokenKind::Identifier(_) => match token.hash {
                words::MERGE => return self.parse_merge(),
                words::DECLARE => return self.parse_declare(),
                words::BEGIN => {
                    self.advance()?;
                    let start = if self.consume_word(words::TRANSACTION)? {
                        TransactionStart::BeginTransaction
                    } else if self.consume_word(words::WORK)? {
                        TransactionStart::BeginWork
                    } else {
                        TransactionStart::Begin
                    };
                    return Ok(Statement::StartTransaction(start));
                }
                words::START => {
                    self.advance()?;
                    self.expect_word(words::TRANSACTION, "TRANSACTION")?;
                    return Ok(Statement::StartTransaction(TransactionStart::StartTransaction));
                }
                words::COMMIT | words::ROLLBACK => {
                    self.advance()?;
                    if !self.consume_word(words::WORK)? {
                        self.consume_word(words::TRANSACTION)?;
                    }
                    return Ok(if token.hash == words::COMMIT {
                        Statement::Commit
                    } else {
                        Statement::Rollback
                    });
                }
                words::GRANT
                | words::REVOKE
                | words::SHOW
                | words::EXPLAIN
                | words::TRUNCATE
                | words::CALL
                | words::USE => {
                    let what = self.text_of(&token).to_uppercase();
                    return Err(ParseError::unsupported(what, &token));
                }
                _ => {}
            },
            _ => {}
        }
        Err(self.error_expected("statement"))
    }

    /// Parses `DECLARE name, .. [type] [DEFAULT expr]`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if neither a type nor a default is given.
    pub fn parse_declare(&mut self) -> Result<Statement, ParseError> {
        self.expect_word(words::DECLARE, "DECLARE")?;
        let names = self.parse_comma_separated(Self::parse_identifier)?;
        let data_type = if self.check_keyword(Keyword::Default) {
            None
        } else {
            Some(self.parse_data_type()?)
        };
        let default = if self.consume_keyword(Keyword::Default)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Declare(Declare {
            names,
            data_type,
            default,
        }))
    }

    /// Parses `ASSERT condition [AS 'message']`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_assert(&mut self) -> Result<Statement, ParseError> {
        self.expect_word(words::ASSERT, "ASSERT")?;
        let condition = self.parse_expr()?;
        let message = if self.consume_keyword(Keyword::As)? {
            Some(self.parse_string()?)
        } else {
            None
        };
        Ok(Statement::Assert(Assert { condition, message }))
    }

    /// Parses `BEGIN statement; .. END`. Every statement inside the block
    /// must be terminated by a semicolon.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for a missing terminator or `END`.
    pub fn parse_block(&mut self) -> Result<Statement, ParseError> {
        self.expect_word(words::BEGIN, "BEGIN")?;
        let mut statements = vec![];
        while !self.check_keyword(Keyword::End) {
            if self.current().is_eof() {
                return Err(self.error_expected("END"));
            }
            statements.push(self.parse_statement()?);
            self.expect(&TokenKind::Semicolon)?;
            while self.consume(&TokenKind::Semicolon)? {}
        }
        self.expect_keyword(Keyword::End)?;
        Ok(Statement::Block(statements))
    }
}
