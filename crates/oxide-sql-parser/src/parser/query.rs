//! Query grammar: WITH, set operations, SELECT blocks and FROM clauses.

use super::error::ParseError;
use super::Parser;
use crate::ast::{
    Cte, Distinct, Expr, ExprKind, Fetch, IndexHint, JoinConstraint, JoinType, LockClause,
    LockStrength, LockWait, Query, Select, SelectItem, SelectModifier, SetExpr, SetOperator,
    SetQuantifier, TableAlias, TableRef, With,
};
use crate::dialect::SelectClause;
use crate::hash::words;
use crate::lexer::{Keyword, Token, TokenKind};

/// Set operators every dialect understands.
#[must_use]
pub fn generic_set_operator(token: &Token) -> Option<SetOperator> {
    match token.as_keyword()? {
        Keyword::Union => Some(SetOperator::Union),
        Keyword::Except => Some(SetOperator::Except),
        Keyword::Intersect => Some(SetOperator::Intersect),
        _ => None,
    }
}

impl Parser<'_> {
    /// Returns true if the current token starts a query.
    #[must_use]
    pub fn starts_query(&self) -> bool {
        self.check_keyword(Keyword::Select)
            || self.check_keyword(Keyword::With)
            || self.check_keyword(Keyword::Values)
    }

    /// Parses a full query with its trailing clauses.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.nested(Self::parse_query_inner)
    }

    fn parse_query_inner(&mut self) -> Result<Query, ParseError> {
        let start = self.current().span.start;
        let with = if self.consume_keyword(Keyword::With)? {
            let recursive = self.consume_word(words::RECURSIVE)?;
            let ctes = self.parse_comma_separated(Self::parse_cte)?;
            Some(With { recursive, ctes })
        } else {
            None
        };

        let body = self.parse_set_expr(0)?;
        let mut query = Query::from_body(body);
        query.with = with;

        // ORDER BY
        if self.consume_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            query.order_by = self.parse_order_by_list()?;
        }

        // LIMIT
        if self.consume_keyword(Keyword::Limit)? {
            let first = self.parse_expr()?;
            if self.dialect.supports_limit_comma() && self.consume(&TokenKind::Comma)? {
                query.offset = Some(first);
                query.limit = Some(self.parse_expr()?);
            } else {
                query.limit = Some(first);
            }
        }

        // OFFSET
        if query.offset.is_none() && self.consume_keyword(Keyword::Offset)? {
            query.offset = Some(self.parse_expr()?);
            if !self.consume_word(words::ROWS)? {
                self.consume_word(words::ROW)?;
            }
        }

        if self.consume_keyword(Keyword::Fetch)? {
            query.fetch = Some(self.parse_fetch()?);
        }

        while self.check_keyword(Keyword::For) {
            let next = self.peek()?;
            if !next.is_keyword(Keyword::Update) && !next.is_word_hash(words::SHARE) {
                break;
            }
            self.advance()?;
            query.locks.push(self.parse_lock_clause()?);
        }

        query.span = self.span_from(start).into();
        Ok(query)
    }

    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let start = self.current().span.start;
        let name = self.parse_identifier()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_parenthesized(Self::parse_query)?;
        Ok(Cte {
            name,
            columns,
            query: Box::new(query),
            span: self.span_from(start).into(),
        })
    }

    /// The set operator under the cursor and its binding level.
    fn current_set_operator(&self) -> Option<(SetOperator, u8)> {
        let op = self.dialect.set_operator(self.current())?;
        Some((op, op.level()))
    }

    fn parse_set_expr(&mut self, min_level: u8) -> Result<SetExpr, ParseError> {
        let mut left = self.parse_set_operand()?;
        while let Some((op, level)) = self.current_set_operator() {
            if level <= min_level {
                break;
            }
            self.advance()?;
            let quantifier = if self.consume_keyword(Keyword::All)? {
                Some(SetQuantifier::All)
            } else if self.consume_keyword(Keyword::Distinct)? {
                Some(SetQuantifier::Distinct)
            } else {
                None
            };
            let right = self.parse_set_expr(level)?;
            left = SetExpr::SetOperation {
                op,
                quantifier,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_set_operand(&mut self) -> Result<SetExpr, ParseError> {
        if self.check_keyword(Keyword::Select) {
            Ok(SetExpr::Select(Box::new(self.parse_select()?)))
        } else if self.check_keyword(Keyword::Values) {
            Ok(SetExpr::Values(self.parse_values_rows()?))
        } else if self.check(&TokenKind::LeftParen) {
            let query = self.parse_parenthesized(Self::parse_query)?;
            Ok(SetExpr::Query(Box::new(query)))
        } else {
            Err(self.error_expected("SELECT, VALUES or '('"))
        }
    }

    /// Parses `VALUES (..), (..)`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed rows.
    pub fn parse_values_rows(&mut self) -> Result<Vec<Vec<Expr>>, ParseError> {
        self.expect_keyword(Keyword::Values)?;
        self.parse_comma_separated(|p| {
            p.expect(&TokenKind::LeftParen)?;
            if p.consume(&TokenKind::RightParen)? {
                return Ok(vec![]);
            }
            let row = p.parse_comma_separated(Self::parse_expr)?;
            p.expect(&TokenKind::RightParen)?;
            Ok(row)
        })
    }

    fn parse_fetch(&mut self) -> Result<Fetch, ParseError> {
        if !self.consume_word(words::FIRST)? {
            self.expect_word(words::NEXT, "FIRST or NEXT")?;
        }
        let quantity = if self.check_word(words::ROW) || self.check_word(words::ROWS) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let percent = self.consume_word(words::PERCENT)?;
        if !self.consume_word(words::ROWS)? {
            self.expect_word(words::ROW, "ROW or ROWS")?;
        }
        let with_ties = if self.consume_keyword(Keyword::With)? {
            self.expect_word(words::TIES, "TIES")?;
            true
        } else {
            self.expect_word(words::ONLY, "ONLY or WITH TIES")?;
            false
        };
        Ok(Fetch {
            quantity,
            percent,
            with_ties,
        })
    }

    fn parse_lock_clause(&mut self) -> Result<LockClause, ParseError> {
        let strength = if self.consume_keyword(Keyword::Update)? {
            LockStrength::Update
        } else {
            self.expect_word(words::SHARE, "UPDATE or SHARE")?;
            LockStrength::Share
        };
        let of = if self.consume_word(words::OF)? {
            self.parse_comma_separated(Self::parse_object_name)?
        } else {
            vec![]
        };
        let wait = if self.consume_word(words::NOWAIT)? {
            Some(LockWait::Nowait)
        } else if self.consume_word(words::SKIP)? {
            self.expect_word(words::LOCKED, "LOCKED")?;
            Some(LockWait::SkipLocked)
        } else {
            None
        };
        Ok(LockClause { strength, of, wait })
    }

    /// Parses a single SELECT block.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_select(&mut self) -> Result<Select, ParseError> {
        let start = self.current().span.start;
        let mut select = Select {
            hints: self.expect_keyword_with_hints(Keyword::Select)?,
            ..Select::default()
        };

        // DISTINCT or ALL
        if self.consume_keyword(Keyword::Distinct)? {
            select.distinct = Some(Distinct::Distinct);
        } else if self.consume_keyword(Keyword::All)? {
            select.distinct = Some(Distinct::All);
        }
        self.parse_select_clauses(SelectClause::BeforeProjection, &mut select)?;

        select.projection = self.parse_comma_separated(Self::parse_select_item)?;
        self.parse_select_clauses(SelectClause::AfterProjection, &mut select)?;

        // FROM
        if self.consume_keyword(Keyword::From)? {
            select.from = self.parse_comma_separated(Self::parse_table_ref)?;
        }

        // WHERE
        if self.consume_keyword(Keyword::Where)? {
            select.selection = Some(self.parse_expr()?);
        }

        // GROUP BY
        if self.consume_keyword(Keyword::Group)? {
            self.expect_keyword(Keyword::By)?;
            select.group_by = self.parse_comma_separated(Self::parse_expr)?;
        }

        // HAVING
        if self.consume_keyword(Keyword::Having)? {
            select.having = Some(self.parse_expr()?);
        }

        self.parse_select_clauses(SelectClause::AfterHaving, &mut select)?;

        select.span = self.span_from(start).into();
        Ok(select)
    }

    /// Lets the dialect add clauses at one point of a SELECT block, until
    /// its hook declines.
    fn parse_select_clauses(
        &mut self,
        at: SelectClause,
        select: &mut Select,
    ) -> Result<(), ParseError> {
        let dialect = self.dialect;
        loop {
            let current: &Select = select;
            let Some(modifier) =
                self.run_hook("select clause", |p| dialect.parse_select_clause(p, at, current))?
            else {
                return Ok(());
            };
            match modifier {
                SelectModifier::Distinct(distinct) => select.distinct = Some(distinct),
                SelectModifier::Top(top) => select.top = Some(top),
                SelectModifier::Into(into) => select.into = Some(into),
                SelectModifier::Qualify(expr) => select.qualify = Some(expr),
            }
        }
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        let start = self.current().span.start;
        let expr = self.parse_expr()?;
        let alias = if matches!(expr.kind, ExprKind::Wildcard { .. }) {
            None
        } else if self.consume_keyword(Keyword::As)? {
            Some(self.parse_any_word()?)
        } else if matches!(
            self.current().kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier { .. }
        ) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(SelectItem {
            expr,
            alias,
            span: self.span_from(start).into(),
        })
    }

    /// Parses a table reference followed by any joins.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        self.nested(Self::parse_joined_tables)
    }

    fn parse_joined_tables(&mut self) -> Result<TableRef, ParseError> {
        let start = self.current().span.start;
        let mut table_ref = self.parse_table_factor()?;

        // Parse joins
        loop {
            let natural = self.consume_keyword(Keyword::Natural)?;
            let Some(join_type) = self.parse_join_type()? else {
                if natural {
                    return Err(self.error_expected("JOIN"));
                }
                break;
            };
            let right = self.parse_table_factor()?;

            let constraint = if join_type == JoinType::Cross || natural {
                JoinConstraint::None
            } else if self.consume_keyword(Keyword::On)? {
                JoinConstraint::On(self.parse_expr()?)
            } else if self.check_keyword(Keyword::Using) {
                self.advance()?;
                JoinConstraint::Using(self.parse_parenthesized_identifiers()?)
            } else {
                JoinConstraint::None
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join_type,
                natural,
                right: Box::new(right),
                constraint,
                span: self.span_from(start).into(),
            };
        }

        Ok(table_ref)
    }

    fn parse_join_type(&mut self) -> Result<Option<JoinType>, ParseError> {
        let join_type = match self.current().as_keyword() {
            Some(Keyword::Join) => {
                self.advance()?;
                return Ok(Some(JoinType::Inner));
            }
            Some(Keyword::Inner) => JoinType::Inner,
            Some(Keyword::Left) => JoinType::Left,
            Some(Keyword::Right) => JoinType::Right,
            Some(Keyword::Full) => JoinType::Full,
            Some(Keyword::Cross) => JoinType::Cross,
            _ => return Ok(None),
        };
        self.advance()?;
        if matches!(join_type, JoinType::Left | JoinType::Right | JoinType::Full) {
            self.consume_keyword(Keyword::Outer)?;
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    /// Parses one table, derived table or table function without joins.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_table_factor(&mut self) -> Result<TableRef, ParseError> {
        let start = self.current().span.start;
        if self.consume(&TokenKind::LeftParen)? {
            if self.starts_query() {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_table_alias()?;
                return Ok(TableRef::Derived {
                    subquery: Box::new(query),
                    alias,
                    span: self.span_from(start).into(),
                });
            }
            // Grouped join
            let inner = self.parse_table_ref()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner);
        }

        let name = self.parse_object_name()?;
        if self.consume(&TokenKind::LeftParen)? {
            let expr = self.parse_function_call(name)?;
            let alias = self.parse_optional_table_alias()?;
            return Ok(TableRef::Function {
                expr,
                alias,
                span: self.span_from(start).into(),
            });
        }

        let dialect = self.dialect;
        let partitions = self
            .run_hook("partition selection", |p| dialect.parse_partition_selection(p))?
            .unwrap_or_default();
        let mut index_hints = self.parse_index_hints()?;
        let alias = if index_hints.is_empty() {
            let alias = self.parse_optional_table_alias()?;
            index_hints = self.parse_index_hints()?;
            alias
        } else {
            None
        };
        Ok(TableRef::Table {
            name,
            alias,
            partitions,
            index_hints,
            span: self.span_from(start).into(),
        })
    }

    fn parse_index_hints(&mut self) -> Result<Vec<IndexHint>, ParseError> {
        let dialect = self.dialect;
        Ok(self
            .run_hook("index hints", |p| dialect.parse_index_hints(p))?
            .unwrap_or_default())
    }

    /// Parses `[AS] alias [(columns)]` after a table reference.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if `AS` is not followed by a name.
    pub fn parse_optional_table_alias(&mut self) -> Result<Option<TableAlias>, ParseError> {
        let name = if self.consume_keyword(Keyword::As)? {
            self.parse_identifier()?
        } else if matches!(
            self.current().kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier { .. }
        ) {
            self.parse_identifier()?
        } else {
            return Ok(None);
        };
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        Ok(Some(TableAlias { name, columns }))
    }
}
