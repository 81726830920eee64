//! INSERT, UPDATE, DELETE and MERGE.

use super::error::ParseError;
use super::Parser;
use crate::ast::{
    Assignment, Delete, Expr, Insert, InsertSource, Merge, MergeAction, MergeClause, MergeMatch,
    OrderBy, Statement, Update,
};
use crate::hash::words;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses an INSERT statement.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_insert(&mut self) -> Result<Statement, ParseError> {
        let hints = self.expect_keyword_with_hints(Keyword::Insert)?;
        self.consume_keyword(Keyword::Into)?;

        let table = self.parse_object_name()?;

        // Column list, unless the parenthesis opens a query
        let columns = if self.check(&TokenKind::LeftParen)
            && !self.peek_is(|t| {
                t.is_keyword(Keyword::Select)
                    || t.is_keyword(Keyword::With)
                    || t.kind == TokenKind::LeftParen
            })?
        {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let source = if self.check_keyword(Keyword::Values) {
            InsertSource::Values(self.parse_values_rows()?)
        } else if self.consume_keyword(Keyword::Default)? {
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else if self.starts_query() || self.check(&TokenKind::LeftParen) {
            InsertSource::Query(Box::new(self.parse_query()?))
        } else {
            return Err(self.error_expected("VALUES, DEFAULT VALUES or a query"));
        };

        let on_duplicate_update = if self.dialect.supports_on_duplicate_key_update()
            && self.check_keyword(Keyword::On)
        {
            self.advance()?;
            self.expect_word(words::DUPLICATE, "DUPLICATE")?;
            self.expect_keyword(Keyword::Key)?;
            self.expect_keyword(Keyword::Update)?;
            self.parse_comma_separated(Self::parse_assignment)?
        } else {
            vec![]
        };

        Ok(Statement::Insert(Box::new(Insert {
            hints,
            table,
            columns,
            source,
            on_duplicate_update,
        })))
    }

    /// Parses an UPDATE statement.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_update(&mut self) -> Result<Statement, ParseError> {
        let hints = self.expect_keyword_with_hints(Keyword::Update)?;
        let table = self.parse_table_ref()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_comma_separated(Self::parse_assignment)?;

        let from = if self.consume_keyword(Keyword::From)? {
            self.parse_comma_separated(Self::parse_table_ref)?
        } else {
            vec![]
        };
        let selection = if self.consume_keyword(Keyword::Where)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let (order_by, limit) = self.parse_order_limit()?;

        Ok(Statement::Update(Box::new(Update {
            hints,
            table,
            assignments,
            from,
            selection,
            order_by,
            limit,
        })))
    }

    /// Parses a DELETE statement.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input, including a missing
    /// FROM in dialects that require it.
    pub fn parse_delete(&mut self) -> Result<Statement, ParseError> {
        let hints = self.expect_keyword_with_hints(Keyword::Delete)?;
        if !self.consume_keyword(Keyword::From)? && self.dialect.requires_from_in_delete() {
            return Err(self.error_expected("FROM"));
        }
        let table = self.parse_object_name()?;
        let alias = if self.consume_keyword(Keyword::As)?
            || matches!(
                self.current().kind,
                TokenKind::Identifier(_) | TokenKind::QuotedIdentifier { .. }
            ) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let selection = if self.consume_keyword(Keyword::Where)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let (order_by, limit) = self.parse_order_limit()?;

        Ok(Statement::Delete(Box::new(Delete {
            hints,
            table,
            alias,
            selection,
            order_by,
            limit,
        })))
    }

    /// `[ORDER BY ..] [LIMIT n]` of single-table UPDATE and DELETE.
    fn parse_order_limit(&mut self) -> Result<(Vec<OrderBy>, Option<Expr>), ParseError> {
        let order_by = if self.consume_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };
        let limit = if self.consume_keyword(Keyword::Limit)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok((order_by, limit))
    }

    /// Parses `target = value`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the `=` or the value is missing.
    pub fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let target = self.parse_object_name()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, value })
    }

    /// Parses a MERGE statement.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_merge(&mut self) -> Result<Statement, ParseError> {
        self.expect_word(words::MERGE, "MERGE")?;
        self.consume_keyword(Keyword::Into)?;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_table_alias()?;
        self.expect_keyword(Keyword::Using)?;
        let source = self.parse_table_factor()?;
        self.expect_keyword(Keyword::On)?;
        let on = self.parse_expr()?;

        let mut clauses = vec![];
        while self.check_keyword(Keyword::When) {
            clauses.push(self.parse_merge_clause()?);
        }
        if clauses.is_empty() {
            return Err(self.error_expected("WHEN"));
        }

        Ok(Statement::Merge(Box::new(Merge {
            table,
            alias,
            source,
            on,
            clauses,
        })))
    }

    fn parse_merge_clause(&mut self) -> Result<MergeClause, ParseError> {
        self.expect_keyword(Keyword::When)?;
        let matched = if self.consume_keyword(Keyword::Not)? {
            self.expect_word(words::MATCHED, "MATCHED")?;
            if self.consume_keyword(Keyword::By)? {
                if self.consume_word(words::SOURCE)? {
                    MergeMatch::NotMatchedBySource
                } else {
                    self.expect_word(words::TARGET, "SOURCE or TARGET")?;
                    MergeMatch::NotMatched
                }
            } else {
                MergeMatch::NotMatched
            }
        } else {
            self.expect_word(words::MATCHED, "MATCHED")?;
            MergeMatch::Matched
        };
        let condition = if self.consume_keyword(Keyword::And)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::Then)?;

        let action = if self.consume_keyword(Keyword::Update)? {
            self.expect_keyword(Keyword::Set)?;
            MergeAction::Update(self.parse_comma_separated(Self::parse_assignment)?)
        } else if self.consume_keyword(Keyword::Delete)? {
            MergeAction::Delete
        } else if self.consume_keyword(Keyword::Insert)? {
            if self.consume_word(words::ROW)? {
                MergeAction::InsertRow
            } else {
                let columns = if self.check(&TokenKind::LeftParen) {
                    self.parse_parenthesized_identifiers()?
                } else {
                    vec![]
                };
                self.expect_keyword(Keyword::Values)?;
                let values =
                    self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_expr))?;
                MergeAction::Insert { columns, values }
            }
        } else {
            return Err(self.error_expected("UPDATE, DELETE or INSERT"));
        };

        let allowed = match matched {
            MergeMatch::NotMatched => {
                matches!(action, MergeAction::Insert { .. } | MergeAction::InsertRow)
            }
            MergeMatch::Matched | MergeMatch::NotMatchedBySource => {
                !matches!(action, MergeAction::Insert { .. } | MergeAction::InsertRow)
            }
        };
        if !allowed {
            return Err(ParseError::new(
                format!("WHEN {} cannot be combined with this action", matched.as_str()),
                self.current(),
            ));
        }

        Ok(MergeClause {
            matched,
            condition,
            action,
        })
    }
}
