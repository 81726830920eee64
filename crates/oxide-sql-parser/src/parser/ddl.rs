//! CREATE, DROP and ALTER.

use super::error::ParseError;
use super::pratt::Precedence;
use super::Parser;
use crate::ast::{
    AlterTable, AlterTableOperation, CheckConstraint, ColumnDef, ColumnOption, CreateFunction,
    CreateIndex, CreateTable, CreateView, DropBehavior, DropStatement, Expr, ExprKind,
    ForeignKey, ForeignKeyRef, FunctionBody, FunctionParam, Ident, IndexColumn, IndexDefinition,
    IndexKind, IndexOption, ObjectType, OrderDirection, ReferentialAction, SqlOption, Statement,
    TableElement, TableOption,
};
use crate::hash::words;
use crate::lexer::{Keyword, NodeSpan, TokenKind};

impl Parser<'_> {
    /// Parses a CREATE statement.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input and an unsupported error
    /// for object kinds the parser does not model.
    pub fn parse_create(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        let or_replace = if self.consume_keyword(Keyword::Or)? {
            self.expect_word(words::REPLACE, "REPLACE")?;
            true
        } else {
            false
        };
        let temporary = self.consume_word(words::TEMPORARY)? || self.consume_word(words::TEMP)?;

        let token = self.current().clone();
        match token.as_keyword() {
            Some(Keyword::Table) => {
                self.advance()?;
                self.parse_create_table(or_replace, temporary)
            }
            Some(Keyword::Unique) => {
                self.advance()?;
                self.expect_keyword(Keyword::Index)?;
                self.parse_create_index(true)
            }
            Some(Keyword::Index) => {
                self.advance()?;
                self.parse_create_index(false)
            }
            Some(Keyword::View) => {
                self.advance()?;
                self.parse_create_view(or_replace)
            }
            _ => match token.hash {
                words::FUNCTION if token.is_word() => {
                    self.advance()?;
                    self.parse_create_function(or_replace, temporary)
                }
                words::TRIGGER
                | words::PROCEDURE
                | words::SCHEMA
                | words::DATABASE
                | words::SEQUENCE
                    if token.is_word() =>
                {
                    let what = format!("CREATE {}", self.text_of(&token).to_uppercase());
                    Err(ParseError::unsupported(what, &token))
                }
                _ => Err(self.error_expected("TABLE, INDEX, VIEW or FUNCTION")),
            },
        }
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.consume_word(words::IF)? {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if self.consume_word(words::IF)? {
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses CREATE TABLE after the `TABLE` keyword.
    fn parse_create_table(
        &mut self,
        or_replace: bool,
        temporary: bool,
    ) -> Result<Statement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        let elements = if self.check(&TokenKind::LeftParen)
            && !self.peek_is(|t| t.is_keyword(Keyword::Select) || t.is_keyword(Keyword::With))?
        {
            self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_table_element))?
        } else {
            vec![]
        };

        let options = self.parse_table_options()?;

        // A parenthesis left after the elements can only open a query.
        let query = if self.consume_keyword(Keyword::As)?
            || self.starts_query()
            || self.check(&TokenKind::LeftParen)
        {
            Some(Box::new(self.parse_query()?))
        } else {
            None
        };

        Ok(Statement::CreateTable(Box::new(CreateTable {
            or_replace,
            temporary,
            if_not_exists,
            name,
            elements,
            options,
            query,
            span: NodeSpan::EMPTY,
        })))
    }

    /// Runs the dialect's table option loop. Options may be separated by
    /// commas; a comma the loop cannot use is left in place.
    ///
    /// # Errors
    ///
    /// Propagates hard errors from the dialect.
    pub fn parse_table_options(&mut self) -> Result<Vec<TableOption>, ParseError> {
        let dialect = self.dialect;
        self.parse_option_loop("table option", |p, first| {
            if !first {
                p.consume(&TokenKind::Comma)?;
            }
            p.run_hook("table option", |p| dialect.parse_table_option(p))
        })
    }

    /// Parses one element of a CREATE TABLE body.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_table_element(&mut self) -> Result<TableElement, ParseError> {
        let start = self.current().span.start;
        let mut element = self.parse_table_element_body()?;
        element.set_span(self.span_from(start).into());
        Ok(element)
    }

    fn parse_table_element_body(&mut self) -> Result<TableElement, ParseError> {
        if self.consume_keyword(Keyword::Constraint)? {
            let name = self.parse_identifier()?;
            return self.parse_constraint(Some(name));
        }
        if self.starts_constraint() {
            return self.parse_constraint(None);
        }
        if self.check_word(words::FULLTEXT) || self.check_word(words::SPATIAL) {
            let kind = if self.check_word(words::FULLTEXT) {
                IndexKind::Fulltext
            } else {
                IndexKind::Spatial
            };
            // A column may be named FULLTEXT or SPATIAL.
            let index = self.maybe_parse(|p| {
                p.advance()?;
                if !p.consume_keyword(Keyword::Index)? {
                    p.consume_keyword(Keyword::Key)?;
                }
                p.parse_index_definition(None, kind)
            })?;
            if let Some(index) = index {
                return Ok(TableElement::Index(index));
            }
        }
        Ok(TableElement::Column(self.parse_column_def()?))
    }

    fn starts_constraint(&self) -> bool {
        [
            Keyword::Primary,
            Keyword::Unique,
            Keyword::Foreign,
            Keyword::Check,
            Keyword::Index,
            Keyword::Key,
        ]
        .into_iter()
        .any(|kw| self.check_keyword(kw))
    }

    fn parse_constraint(&mut self, constraint: Option<Ident>) -> Result<TableElement, ParseError> {
        let token = self.advance()?;
        match token.as_keyword() {
            Some(Keyword::Primary) => {
                self.expect_keyword(Keyword::Key)?;
                let index = self.parse_index_definition(constraint, IndexKind::Primary)?;
                Ok(TableElement::Index(index))
            }
            Some(Keyword::Unique) => {
                if !self.consume_keyword(Keyword::Key)? {
                    self.consume_keyword(Keyword::Index)?;
                }
                let index = self.parse_index_definition(constraint, IndexKind::Unique)?;
                Ok(TableElement::Index(index))
            }
            Some(Keyword::Foreign) => {
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_identifiers()?;
                let references = self.parse_references()?;
                Ok(TableElement::ForeignKey(ForeignKey {
                    constraint,
                    columns,
                    references,
                    span: NodeSpan::EMPTY,
                }))
            }
            Some(Keyword::Check) => {
                let expr = self.parse_parenthesized(Self::parse_expr)?;
                Ok(TableElement::Check(CheckConstraint {
                    constraint,
                    expr,
                    span: NodeSpan::EMPTY,
                }))
            }
            Some(Keyword::Index) if constraint.is_none() => {
                Ok(TableElement::Index(self.parse_index_definition(None, IndexKind::Index)?))
            }
            Some(Keyword::Key) if constraint.is_none() => {
                Ok(TableElement::Index(self.parse_index_definition(None, IndexKind::Key)?))
            }
            _ => Err(ParseError::unexpected("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK", &token)),
        }
    }

    /// Parses `[name] [USING m] (columns) [options]` after the index kind.
    fn parse_index_definition(
        &mut self,
        constraint: Option<Ident>,
        kind: IndexKind,
    ) -> Result<IndexDefinition, ParseError> {
        let name = if matches!(
            self.current().kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier { .. }
        ) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let using = if self.consume_keyword(Keyword::Using)? {
            Some(self.parse_any_word()?)
        } else {
            None
        };
        let columns = self.parse_index_columns()?;
        let options = self.parse_index_options()?;
        Ok(IndexDefinition {
            constraint,
            kind,
            name,
            using,
            columns,
            options,
            span: NodeSpan::EMPTY,
        })
    }

    fn parse_index_columns(&mut self) -> Result<Vec<IndexColumn>, ParseError> {
        self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_index_column))
    }

    fn parse_index_column(&mut self) -> Result<IndexColumn, ParseError> {
        let prefix = self.maybe_parse(|p| {
            let name = p.parse_identifier()?;
            p.expect(&TokenKind::LeftParen)?;
            let length = p.parse_u32()?;
            p.expect(&TokenKind::RightParen)?;
            Ok((name, length))
        })?;
        let (expr, length) = match prefix {
            Some((name, length)) => {
                let span = name.span;
                (Expr::new(ExprKind::Column(name.into()), span), Some(length))
            }
            None => (self.parse_expr()?, None),
        };
        let direction = if self.consume_keyword(Keyword::Asc)? {
            Some(OrderDirection::Asc)
        } else if self.consume_keyword(Keyword::Desc)? {
            Some(OrderDirection::Desc)
        } else {
            None
        };
        Ok(IndexColumn {
            expr,
            length,
            direction,
        })
    }

    /// Runs the index option loop: dialect options first, then `USING`.
    ///
    /// # Errors
    ///
    /// Propagates hard errors from the dialect.
    pub fn parse_index_options(&mut self) -> Result<Vec<IndexOption>, ParseError> {
        let dialect = self.dialect;
        self.parse_option_loop("index option", |p, _| {
            if let Some(option) = p.run_hook("index option", |p| dialect.parse_index_option(p))? {
                return Ok(Some(option));
            }
            if p.consume_keyword(Keyword::Using)? {
                return Ok(Some(IndexOption::Using(p.parse_any_word()?)));
            }
            Ok(None)
        })
    }

    /// Parses `name type [options]`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let start = self.current().span.start;
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let dialect = self.dialect;
        let options = self.parse_option_loop("column option", |p, _| {
            if let Some(option) = p.run_hook("column option", |p| dialect.parse_column_option(p))? {
                return Ok(Some(option));
            }
            p.parse_generic_column_option()
        })?;
        Ok(ColumnDef {
            name,
            data_type,
            options,
            span: self.span_from(start).into(),
        })
    }

    fn parse_generic_column_option(&mut self) -> Result<Option<ColumnOption>, ParseError> {
        let Some(keyword) = self.current().as_keyword() else {
            return Ok(None);
        };
        let option = match keyword {
            Keyword::Not => {
                self.advance()?;
                self.expect_keyword(Keyword::Null)?;
                ColumnOption::NotNull
            }
            Keyword::Null => {
                self.advance()?;
                ColumnOption::Null
            }
            Keyword::Default => {
                self.advance()?;
                ColumnOption::Default(self.parse_subexpr(Precedence::Postfix)?)
            }
            Keyword::Primary => {
                self.advance()?;
                self.expect_keyword(Keyword::Key)?;
                ColumnOption::PrimaryKey
            }
            Keyword::Unique => {
                self.advance()?;
                self.consume_keyword(Keyword::Key)?;
                ColumnOption::Unique
            }
            Keyword::Check => {
                self.advance()?;
                ColumnOption::Check(self.parse_parenthesized(Self::parse_expr)?)
            }
            Keyword::References => ColumnOption::References(self.parse_references()?),
            Keyword::Collate => {
                self.advance()?;
                ColumnOption::Collate(self.parse_object_name()?)
            }
            _ => return Ok(None),
        };
        Ok(Some(option))
    }

    /// Parses `REFERENCES t [(cols)] [ON DELETE ..] [ON UPDATE ..]`.
    fn parse_references(&mut self) -> Result<ForeignKeyRef, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        let mut reference = ForeignKeyRef {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };
        while self.consume_keyword(Keyword::On)? {
            if self.consume_keyword(Keyword::Delete)? {
                reference.on_delete = Some(self.parse_referential_action()?);
            } else {
                self.expect_keyword(Keyword::Update)?;
                reference.on_update = Some(self.parse_referential_action()?);
            }
        }
        Ok(reference)
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        if self.consume_word(words::CASCADE)? {
            Ok(ReferentialAction::Cascade)
        } else if self.consume_word(words::RESTRICT)? {
            Ok(ReferentialAction::Restrict)
        } else if self.consume_keyword(Keyword::Set)? {
            if self.consume_keyword(Keyword::Null)? {
                Ok(ReferentialAction::SetNull)
            } else {
                self.expect_keyword(Keyword::Default)?;
                Ok(ReferentialAction::SetDefault)
            }
        } else if self.consume_word(words::NO)? {
            self.expect_word(words::ACTION, "ACTION")?;
            Ok(ReferentialAction::NoAction)
        } else {
            Err(self.error_expected("referential action"))
        }
    }

    /// Parses CREATE INDEX after the `INDEX` keyword.
    fn parse_create_index(&mut self, unique: bool) -> Result<Statement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier()?;
        let mut using = if self.consume_keyword(Keyword::Using)? {
            Some(self.parse_any_word()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;
        if using.is_none() && self.consume_keyword(Keyword::Using)? {
            using = Some(self.parse_any_word()?);
        }
        let columns = self.parse_index_columns()?;
        let options = self.parse_index_options()?;
        Ok(Statement::CreateIndex(Box::new(CreateIndex {
            unique,
            if_not_exists,
            name,
            table,
            using,
            columns,
            options,
            span: NodeSpan::EMPTY,
        })))
    }

    fn parse_create_view(&mut self, or_replace: bool) -> Result<Statement, ParseError> {
        let name = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        Ok(Statement::CreateView(Box::new(CreateView {
            or_replace,
            name,
            columns,
            query: Box::new(query),
            span: NodeSpan::EMPTY,
        })))
    }

    fn parse_create_function(
        &mut self,
        or_replace: bool,
        temporary: bool,
    ) -> Result<Statement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let params = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_comma_separated(|p| {
                Ok(FunctionParam {
                    name: p.parse_identifier()?,
                    data_type: p.parse_data_type()?,
                })
            })?
        };
        self.expect(&TokenKind::RightParen)?;

        let mut function = CreateFunction {
            or_replace,
            temporary,
            if_not_exists,
            name,
            params,
            returns: None,
            language: None,
            options: vec![],
            body: None,
            span: NodeSpan::EMPTY,
        };

        // Clauses may come in any order.
        loop {
            if self.consume_word(words::RETURNS)? {
                function.returns = Some(self.parse_data_type()?);
            } else if self.consume_word(words::LANGUAGE)? {
                function.language = Some(self.parse_any_word()?);
            } else if self.check_word(words::OPTIONS) {
                function.options = self.parse_sql_options()?;
            } else if self.consume_keyword(Keyword::As)? {
                function.body = Some(self.parse_function_body()?);
            } else {
                break;
            }
        }

        Ok(Statement::CreateFunction(Box::new(function)))
    }

    fn parse_function_body(&mut self) -> Result<FunctionBody, ParseError> {
        match self.current().kind.clone() {
            TokenKind::LeftParen => {
                Ok(FunctionBody::Expr(self.parse_parenthesized(Self::parse_expr)?))
            }
            TokenKind::String(_) => Ok(FunctionBody::String(self.parse_string()?)),
            TokenKind::TextBlock { text, raw } => {
                self.advance()?;
                Ok(FunctionBody::TextBlock { text, raw })
            }
            _ => Err(self.error_expected("function body")),
        }
    }

    /// Parses `OPTIONS (name = value, ..)`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_sql_options(&mut self) -> Result<Vec<SqlOption>, ParseError> {
        self.expect_word(words::OPTIONS, "OPTIONS")?;
        self.expect(&TokenKind::LeftParen)?;
        if self.consume(&TokenKind::RightParen)? {
            return Ok(vec![]);
        }
        let options = self.parse_comma_separated(|p| {
            let name = p.parse_any_word()?;
            p.expect(&TokenKind::Eq)?;
            Ok(SqlOption {
                name,
                value: p.parse_expr()?,
            })
        })?;
        self.expect(&TokenKind::RightParen)?;
        Ok(options)
    }

    /// Parses a DROP statement.
    ///
    /// # Errors
    ///
    /// Returns an unsupported error for object kinds the parser does not
    /// model.
    pub fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        let temporary = self.consume_word(words::TEMPORARY)?;
        let token = self.advance()?;
        let object_type = match token.as_keyword() {
            Some(Keyword::Table) => ObjectType::Table,
            Some(Keyword::View) => ObjectType::View,
            Some(Keyword::Index) => ObjectType::Index,
            _ if token.is_word_hash(words::FUNCTION) => ObjectType::Function,
            _ if token.is_word() => {
                let what = format!("DROP {}", self.text_of(&token).to_uppercase());
                return Err(ParseError::unsupported(what, &token));
            }
            _ => return Err(ParseError::unexpected("TABLE, VIEW, INDEX or FUNCTION", &token)),
        };
        let if_exists = self.parse_if_exists()?;
        let names = self.parse_comma_separated(Self::parse_object_name)?;
        let table = if object_type == ObjectType::Index && self.consume_keyword(Keyword::On)? {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        let behavior = if self.consume_word(words::CASCADE)? {
            Some(DropBehavior::Cascade)
        } else if self.consume_word(words::RESTRICT)? {
            Some(DropBehavior::Restrict)
        } else {
            None
        };
        Ok(Statement::Drop(DropStatement {
            object_type,
            temporary,
            if_exists,
            names,
            table,
            behavior,
            span: NodeSpan::EMPTY,
        }))
    }

    /// Parses ALTER TABLE after the `TABLE` keyword.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_alter_table(&mut self) -> Result<Statement, ParseError> {
        let name = self.parse_object_name()?;
        let mut operations = vec![self.parse_alter_operation()?];
        while self.consume(&TokenKind::Comma)? {
            operations.push(self.parse_alter_operation()?);
        }
        Ok(Statement::AlterTable(Box::new(AlterTable {
            name,
            operations,
            span: NodeSpan::EMPTY,
        })))
    }

    fn parse_alter_operation(&mut self) -> Result<AlterTableOperation, ParseError> {
        if self.consume_word(words::ADD)? {
            if self.consume_word(words::COLUMN)? {
                let if_not_exists = self.parse_if_not_exists()?;
                let column = self.parse_column_def()?;
                return Ok(AlterTableOperation::AddColumn {
                    if_not_exists,
                    column,
                });
            }
            if self.check_keyword(Keyword::Constraint)
                || self.starts_constraint()
                || self.check_word(words::FULLTEXT)
                || self.check_word(words::SPATIAL)
            {
                return Ok(AlterTableOperation::AddConstraint(self.parse_table_element()?));
            }
            return Ok(AlterTableOperation::AddColumn {
                if_not_exists: false,
                column: self.parse_column_def()?,
            });
        }

        if self.consume_keyword(Keyword::Drop)? {
            if self.consume_keyword(Keyword::Constraint)? {
                return Ok(AlterTableOperation::DropConstraint(self.parse_identifier()?));
            }
            self.consume_word(words::COLUMN)?;
            let if_exists = self.parse_if_exists()?;
            return Ok(AlterTableOperation::DropColumn {
                if_exists,
                name: self.parse_identifier()?,
            });
        }

        if self.consume_word(words::RENAME)? {
            if self.consume_word(words::TO)? || self.consume_keyword(Keyword::As)? {
                return Ok(AlterTableOperation::RenameTable(self.parse_object_name()?));
            }
            self.consume_word(words::COLUMN)?;
            let old = self.parse_identifier()?;
            self.expect_word(words::TO, "TO")?;
            let new = self.parse_identifier()?;
            return Ok(AlterTableOperation::RenameColumn { old, new });
        }

        let options = self.parse_table_options()?;
        if options.is_empty() {
            return Err(self.error_expected("ALTER TABLE operation"));
        }
        Ok(AlterTableOperation::Options(options))
    }
}
