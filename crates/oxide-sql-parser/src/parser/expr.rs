//! Expression grammar: precedence climbing over the dialect's operators.

use once_cell::sync::Lazy;

use super::error::ParseError;
use super::pratt::{token_to_unary_op, InfixOp, Precedence};
use super::Parser;
use crate::ast::{
    CurrentTimeKind, DataType, Expr, ExprKind, FrameBound, FrameUnits, FunctionCall, Ident, InList,
    IntegerKind, IntegerValue, IntervalUnit, IsValue, Literal, NullOrdering, ObjectName, OrderBy,
    OrderDirection, StructField, VariableScope, WindowFrame, WindowSpec,
};
use crate::hash::words;
use crate::lexer::{unescape, Keyword, NameTable, NumberKind, Token, TokenKind};

/// Functions that accept `ORDER BY` inside their argument list.
pub static AGGREGATE_FUNCTIONS: Lazy<NameTable> = Lazy::new(|| {
    NameTable::from_names(&[
        "ARRAY_AGG",
        "AVG",
        "COUNT",
        "GROUP_CONCAT",
        "JSON_ARRAYAGG",
        "JSON_OBJECTAGG",
        "LISTAGG",
        "MAX",
        "MIN",
        "STRING_AGG",
        "SUM",
    ])
});

/// Builds a literal from a number token.
fn number_literal(text: &str, kind: NumberKind) -> Literal {
    match kind {
        NumberKind::Integer => IntegerValue::parse(text)
            .map_or_else(|| Literal::Decimal(text.to_string()), Literal::Integer),
        NumberKind::Decimal => Literal::Decimal(text.to_string()),
        NumberKind::Float => Literal::Float(text.to_string()),
        NumberKind::Hex => Literal::HexNumber(text.to_string()),
    }
}

impl Parser<'_> {
    /// Parses a complete expression.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if no expression starts at the current token.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_subexpr(Precedence::Lowest)
    }

    /// Parses an expression whose operators all bind tighter than `min`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input.
    pub fn parse_subexpr(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_subexpr_at(min))
    }

    fn parse_subexpr_at(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let mut expr = self.parse_prefix_expr()?;
        while let Some((op, precedence, negated)) = self.next_infix()? {
            if precedence <= min {
                break;
            }
            if negated {
                self.advance()?;
            }
            self.advance()?;
            let kind = self.parse_infix(expr, op, precedence, negated)?;
            expr = Expr::new(kind, self.span_from(start));
        }
        Ok(expr)
    }

    /// Classifies the current token as an infix operator without consuming
    /// it. `NOT` counts only when a negatable operator follows.
    fn next_infix(&mut self) -> Result<Option<(InfixOp, Precedence, bool)>, ParseError> {
        let dialect = self.dialect;
        if self.check_keyword(Keyword::Not) {
            let next = self.peek()?;
            return Ok(dialect
                .infix_operator(&next, self.features)
                .filter(|(op, _)| op.is_negatable())
                .map(|(op, precedence)| (op, precedence, true)));
        }
        Ok(dialect
            .infix_operator(self.current(), self.features)
            .map(|(op, precedence)| (op, precedence, false)))
    }

    fn parse_infix(
        &mut self,
        left: Expr,
        op: InfixOp,
        precedence: Precedence,
        negated: bool,
    ) -> Result<ExprKind, ParseError> {
        let expr = Box::new(left);
        Ok(match op {
            InfixOp::Binary(op) => ExprKind::Binary {
                left: expr,
                op,
                right: Box::new(self.parse_subexpr(precedence)?),
            },
            InfixOp::Is => {
                let negated = self.consume_keyword(Keyword::Not)?;
                let value = if self.consume_keyword(Keyword::Null)? {
                    IsValue::Null
                } else if self.consume_keyword(Keyword::True)? {
                    IsValue::True
                } else if self.consume_keyword(Keyword::False)? {
                    IsValue::False
                } else if self.consume_word(words::UNKNOWN)? {
                    IsValue::Unknown
                } else {
                    return Err(self.error_expected("NULL, TRUE, FALSE or UNKNOWN"));
                };
                ExprKind::Is {
                    expr,
                    value,
                    negated,
                }
            }
            InfixOp::In => {
                self.expect(&TokenKind::LeftParen)?;
                let list = if self.starts_query() {
                    InList::Subquery(Box::new(self.parse_query()?))
                } else {
                    InList::Values(self.parse_comma_separated(Self::parse_expr)?)
                };
                self.expect(&TokenKind::RightParen)?;
                ExprKind::In {
                    expr,
                    list,
                    negated,
                }
            }
            InfixOp::Between => {
                let low = self.parse_subexpr(Precedence::Relational)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_subexpr(Precedence::Relational)?;
                ExprKind::Between {
                    expr,
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                }
            }
            InfixOp::Like(op) => {
                let pattern = self.parse_subexpr(Precedence::Relational)?;
                let escape = if self.consume_word(words::ESCAPE)? {
                    Some(Box::new(self.parse_subexpr(Precedence::Relational)?))
                } else {
                    None
                };
                ExprKind::Like {
                    expr,
                    op,
                    pattern: Box::new(pattern),
                    escape,
                    negated,
                }
            }
            InfixOp::Collate => ExprKind::Collate {
                expr,
                collation: self.parse_object_name()?,
            },
            InfixOp::DoubleColonCast => ExprKind::Cast {
                expr,
                data_type: self.parse_data_type()?,
                double_colon: true,
            },
            InfixOp::Subscript => {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RightBracket)?;
                ExprKind::Subscript {
                    expr,
                    index: Box::new(index),
                }
            }
        })
    }

    /// Parses prefix operators and a primary expression, without any
    /// infix operator after it.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if no expression starts here.
    pub fn parse_prefix_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let expr = self.parse_primary()?;
        Ok(expr.with_span(self.span_from(start)))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let dialect = self.dialect;
        if let Some(expr) = self.run_hook("prefix", |p| dialect.parse_prefix(p))? {
            return Ok(expr);
        }

        if let Some(op) = token_to_unary_op(&self.current().kind) {
            self.advance()?;
            let operand = self.parse_subexpr(op.precedence())?;
            return Ok(Expr::unary(op, operand));
        }

        let token = self.current().clone();
        match &token.kind {
            TokenKind::Number { text, kind } => {
                self.advance()?;
                Ok(ExprKind::Literal(number_literal(text, *kind)).into())
            }
            TokenKind::String(_) => {
                let value = self.parse_string()?;
                Ok(dialect.string_literal(value))
            }
            TokenKind::NationalString(value) => {
                self.advance()?;
                Ok(ExprKind::Literal(Literal::NationalString(value.clone())).into())
            }
            TokenKind::HexString(value) => {
                self.advance()?;
                Ok(ExprKind::Literal(Literal::HexString(value.clone())).into())
            }
            TokenKind::TextBlock { text, raw } => {
                self.advance()?;
                let value = if *raw { text.clone() } else { unescape(text) };
                Ok(dialect.string_literal(value))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance()?;
                Ok(Expr::boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance()?;
                Ok(Expr::boolean(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance()?;
                Ok(Expr::null())
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance()?;
                let query = self.parse_parenthesized(Self::parse_query)?;
                Ok(ExprKind::Exists(Box::new(query)).into())
            }
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval(),
            TokenKind::Keyword(Keyword::Left | Keyword::Right)
                if self.peek_is(|t| t.kind == TokenKind::LeftParen)? =>
            {
                let name = ObjectName::from(Ident::new(self.text_of(&token)));
                self.advance()?;
                self.advance()?;
                self.parse_function_call(name)
            }
            TokenKind::Question => {
                self.advance()?;
                Ok(ExprKind::Parameter {
                    name: None,
                    position: self.next_parameter_position(),
                }
                .into())
            }
            TokenKind::Colon => {
                self.advance()?;
                let name = self.parse_any_word()?;
                Ok(ExprKind::Parameter {
                    name: Some(name.value),
                    position: self.next_parameter_position(),
                }
                .into())
            }
            TokenKind::Variable { name, system } => {
                self.advance()?;
                self.parse_variable(name.clone(), *system)
            }
            TokenKind::LeftParen => self.parse_parenthesized_expr(),
            TokenKind::LeftBracket => {
                self.advance()?;
                self.parse_array_elements(false)
            }
            TokenKind::Star => {
                self.advance()?;
                Ok(ExprKind::Wildcard { qualifier: None }.into())
            }
            TokenKind::Identifier(_) => self.parse_identifier_led(&token),
            TokenKind::QuotedIdentifier { .. } => self.parse_column_or_function(),
            _ => Err(self.error_expected("expression")),
        }
    }

    /// Generic forms introduced by a bare word, then the dialect hook, then
    /// column references and function calls.
    fn parse_identifier_led(&mut self, token: &Token) -> Result<Expr, ParseError> {
        let next = self.peek()?;
        let typed = match token.hash {
            words::DATE => Some(DataType::Date),
            words::TIME => Some(DataType::Time),
            words::TIMESTAMP => Some(DataType::Timestamp),
            _ => None,
        };
        if let (Some(data_type), TokenKind::String(_)) = (typed, &next.kind) {
            self.advance()?;
            let value = self.parse_string()?;
            return Ok(ExprKind::TypedString { data_type, value }.into());
        }

        let current_time = match token.hash {
            words::CURRENT_DATE => Some(CurrentTimeKind::CurrentDate),
            words::CURRENT_TIME => Some(CurrentTimeKind::CurrentTime),
            words::CURRENT_TIMESTAMP => Some(CurrentTimeKind::CurrentTimestamp),
            words::LOCALTIME => Some(CurrentTimeKind::LocalTime),
            words::LOCALTIMESTAMP => Some(CurrentTimeKind::LocalTimestamp),
            _ => None,
        };
        if let Some(kind) = current_time {
            if next.kind != TokenKind::LeftParen {
                self.advance()?;
                return Ok(ExprKind::CurrentTime(kind).into());
            }
        }

        if token.hash == words::EXTRACT && next.kind == TokenKind::LeftParen {
            return self.parse_extract();
        }
        if token.hash == words::ARRAY && next.kind == TokenKind::LeftBracket {
            self.advance()?;
            self.advance()?;
            return self.parse_array_elements(true);
        }

        let dialect = self.dialect;
        if let Some(expr) = self.run_hook("identifier", |p| dialect.parse_identifier_expr(p))? {
            return Ok(expr);
        }
        self.parse_column_or_function()
    }

    /// Parses `a.b.c`, `t.*` or `name(args)`.
    fn parse_column_or_function(&mut self) -> Result<Expr, ParseError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.consume(&TokenKind::Dot)? {
            if self.consume(&TokenKind::Star)? {
                return Ok(ExprKind::Wildcard {
                    qualifier: Some(ObjectName(parts)),
                }
                .into());
            }
            parts.push(self.parse_any_word()?);
        }
        let name = ObjectName(parts);
        if self.consume(&TokenKind::LeftParen)? {
            self.parse_function_call(name)
        } else {
            Ok(ExprKind::Column(name).into())
        }
    }

    /// Parses a function call whose opening parenthesis is consumed.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed arguments.
    pub fn parse_function_call(&mut self, name: ObjectName) -> Result<Expr, ParseError> {
        let dialect = self.dialect;
        if let Some(expr) = self.run_hook("function", |p| dialect.parse_function(p, &name))? {
            return Ok(expr);
        }

        let mut call = FunctionCall::new(name, vec![]);
        if !self.consume(&TokenKind::RightParen)? {
            call.distinct = self.consume_keyword(Keyword::Distinct)?;
            if !call.distinct {
                self.consume_keyword(Keyword::All)?;
            }
            call.args = self.parse_comma_separated(Self::parse_function_arg)?;
            let aggregate = call.name.base().is_some_and(|b| dialect.is_aggregate_function(b.hash));
            if aggregate && self.consume_keyword(Keyword::Order)? {
                self.expect_keyword(Keyword::By)?;
                call.order_by = self.parse_order_by_list()?;
            }
            self.expect(&TokenKind::RightParen)?;
        }
        if self.consume_word(words::OVER)? {
            call.over = Some(self.parse_parenthesized(Self::parse_window_spec)?);
        }
        Ok(ExprKind::Function(call).into())
    }

    /// Parses one function argument; a bare `*` is allowed.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if no expression starts here.
    pub fn parse_function_arg(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Star) {
            let star = self.advance()?;
            return Ok(Expr::new(ExprKind::Wildcard { qualifier: None }, star.span));
        }
        self.parse_expr()
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        let mut spec = WindowSpec::default();
        if self.consume_word(words::PARTITION)? {
            self.expect_keyword(Keyword::By)?;
            spec.partition_by = self.parse_comma_separated(Self::parse_expr)?;
        }
        if self.consume_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            spec.order_by = self.parse_order_by_list()?;
        }
        let units = if self.consume_word(words::ROWS)? {
            Some(FrameUnits::Rows)
        } else if self.consume_word(words::RANGE)? {
            Some(FrameUnits::Range)
        } else {
            None
        };
        if let Some(units) = units {
            let frame = if self.consume_keyword(Keyword::Between)? {
                let start = self.parse_frame_bound()?;
                self.expect_keyword(Keyword::And)?;
                WindowFrame {
                    units,
                    start,
                    end: Some(self.parse_frame_bound()?),
                }
            } else {
                WindowFrame {
                    units,
                    start: self.parse_frame_bound()?,
                    end: None,
                }
            };
            spec.frame = Some(frame);
        }
        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ParseError> {
        if self.consume_word(words::UNBOUNDED)? {
            if self.consume_word(words::PRECEDING)? {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_word(words::FOLLOWING, "PRECEDING or FOLLOWING")?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.consume_word(words::CURRENT)? {
            self.expect_word(words::ROW, "ROW")?;
            return Ok(FrameBound::CurrentRow);
        }
        let offset = Box::new(self.parse_subexpr(Precedence::And)?);
        if self.consume_word(words::PRECEDING)? {
            return Ok(FrameBound::Preceding(offset));
        }
        self.expect_word(words::FOLLOWING, "PRECEDING or FOLLOWING")?;
        Ok(FrameBound::Following(offset))
    }

    /// Parses the items of an ORDER BY list; `ORDER BY` is consumed.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed items.
    pub fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        self.parse_comma_separated(|p| {
            let start = p.current().span.start;
            let expr = p.parse_expr()?;
            let direction = if p.consume_keyword(Keyword::Asc)? {
                Some(OrderDirection::Asc)
            } else if p.consume_keyword(Keyword::Desc)? {
                Some(OrderDirection::Desc)
            } else {
                None
            };
            let nulls = if p.consume_word(words::NULLS)? {
                if p.consume_word(words::FIRST)? {
                    Some(NullOrdering::First)
                } else {
                    p.expect_word(words::LAST, "FIRST or LAST")?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };
            Ok(OrderBy {
                expr,
                direction,
                nulls,
                span: p.span_from(start).into(),
            })
        })
    }

    fn parse_variable(&mut self, name: String, system: bool) -> Result<Expr, ParseError> {
        if system && self.check(&TokenKind::Dot) {
            let scope = match crate::hash::fnv1a_64_lower(&name) {
                words::GLOBAL => Some(VariableScope::Global),
                words::SESSION => Some(VariableScope::Session),
                _ => None,
            };
            if let Some(scope) = scope {
                self.advance()?;
                let name = self.parse_any_word()?;
                return Ok(ExprKind::Variable {
                    name: name.value,
                    scope,
                }
                .into());
            }
        }
        let scope = if system {
            VariableScope::System
        } else {
            VariableScope::User
        };
        Ok(ExprKind::Variable { name, scope }.into())
    }

    /// Parses `(subquery)`, `(expr)` or a row constructor `(a, b)`.
    fn parse_parenthesized_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        if self.starts_query() {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(ExprKind::Subquery(Box::new(query)).into());
        }
        let mut items = self.parse_comma_separated(Self::parse_expr)?;
        self.expect(&TokenKind::RightParen)?;
        let kind = if items.len() == 1 {
            ExprKind::Nested(Box::new(items.remove(0)))
        } else {
            ExprKind::Row(items)
        };
        Ok(kind.into())
    }

    /// Parses array elements after `[`.
    fn parse_array_elements(&mut self, keyword: bool) -> Result<Expr, ParseError> {
        let elements = if self.check(&TokenKind::RightBracket) {
            vec![]
        } else {
            self.parse_comma_separated(Self::parse_expr)?
        };
        self.expect(&TokenKind::RightBracket)?;
        Ok(ExprKind::Array { elements, keyword }.into())
    }

    /// Parses a CASE expression.
    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Check for simple CASE (CASE expr WHEN ...)
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut when_clauses = vec![];
        while self.consume_keyword(Keyword::When)? {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            when_clauses.push((condition, result));
        }
        if when_clauses.is_empty() {
            return Err(self.error_expected("WHEN"));
        }

        let else_clause = if self.consume_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(ExprKind::Case {
            operand,
            when_clauses,
            else_clause,
        }
        .into())
    }

    /// Parses a CAST expression.
    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(ExprKind::Cast {
            expr: Box::new(expr),
            data_type,
            double_colon: false,
        }
        .into())
    }

    fn parse_interval(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Interval)?;
        let value = self.parse_expr()?;
        let unit = self.parse_interval_unit()?;
        Ok(ExprKind::Interval {
            value: Box::new(value),
            unit,
        }
        .into())
    }

    /// Parses an interval unit, folding `from TO to` into compound units.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for an unknown unit or an invalid range.
    pub fn parse_interval_unit(&mut self) -> Result<IntervalUnit, ParseError> {
        let from = self.parse_single_unit()?;
        if !self.check_word(words::TO) {
            return Ok(from);
        }
        let to_token = self.advance()?;
        let to = self.parse_single_unit()?;
        IntervalUnit::compound(from, to).ok_or_else(|| {
            let message = format!("invalid interval range {} TO {}", from.as_str(), to.as_str());
            ParseError::new(message, &to_token)
        })
    }

    fn parse_single_unit(&mut self) -> Result<IntervalUnit, ParseError> {
        let token = self.current();
        let unit = if token.is_word() {
            IntervalUnit::ALL
                .iter()
                .copied()
                .find(|unit| crate::hash::fnv1a_64_lower(unit.as_str()) == token.hash)
        } else {
            None
        };
        match unit {
            Some(unit) => {
                self.advance()?;
                Ok(unit)
            }
            None => Err(self.error_expected("interval unit")),
        }
    }

    fn parse_extract(&mut self) -> Result<Expr, ParseError> {
        self.expect_word(words::EXTRACT, "EXTRACT")?;
        self.expect(&TokenKind::LeftParen)?;
        let unit = self.parse_interval_unit()?;
        self.expect_keyword(Keyword::From)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(ExprKind::Extract {
            unit,
            expr: Box::new(expr),
        }
        .into())
    }

    // Data types

    /// Parses a data type, then any dialect suffix such as `UNSIGNED`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if no type name starts here.
    pub fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        self.nested(Self::parse_data_type_inner)
    }

    fn parse_data_type_inner(&mut self) -> Result<DataType, ParseError> {
        let token = self.current().clone();
        // A dialect may reserve BINARY, which still names a type.
        if !matches!(token.kind, TokenKind::Identifier(_)) && !token.is_reserved_hash(words::BINARY) {
            return Err(self.error_expected("data type"));
        }
        self.advance()?;
        let data_type = match token.hash {
            words::TINYINT => self.parse_integer_type(IntegerKind::TinyInt)?,
            words::SMALLINT => self.parse_integer_type(IntegerKind::SmallInt)?,
            words::MEDIUMINT => self.parse_integer_type(IntegerKind::MediumInt)?,
            words::INT => self.parse_integer_type(IntegerKind::Int)?,
            words::INTEGER => self.parse_integer_type(IntegerKind::Integer)?,
            words::BIGINT => self.parse_integer_type(IntegerKind::BigInt)?,
            words::INT64 => DataType::integer(IntegerKind::Int64),
            words::REAL => DataType::Real,
            words::FLOAT => DataType::Float(self.parse_optional_length()?),
            words::DOUBLE => {
                self.consume_word(words::PRECISION)?;
                DataType::Double
            }
            words::DECIMAL | words::DEC => {
                let (precision, scale) = self.parse_optional_precision()?;
                DataType::Decimal { precision, scale }
            }
            words::NUMERIC => {
                let (precision, scale) = self.parse_optional_precision()?;
                DataType::Numeric { precision, scale }
            }
            words::CHAR | words::CHARACTER => {
                if self.consume_word(words::VARYING)? {
                    DataType::Varchar(self.parse_optional_length()?)
                } else {
                    DataType::Char(self.parse_optional_length()?)
                }
            }
            words::VARCHAR => DataType::Varchar(self.parse_optional_length()?),
            words::TEXT => DataType::Text,
            words::BLOB => DataType::Blob,
            words::BINARY => DataType::Binary(self.parse_optional_length()?),
            words::VARBINARY => DataType::Varbinary(self.parse_optional_length()?),
            words::DATE => DataType::Date,
            words::TIME => DataType::Time,
            words::TIMESTAMP => DataType::Timestamp,
            words::DATETIME => DataType::Datetime,
            words::BOOL | words::BOOLEAN => DataType::Boolean,
            words::JSON => DataType::Json,
            words::ARRAY if self.check(&TokenKind::Lt) => {
                self.advance()?;
                let inner = self.parse_data_type()?;
                self.expect_closing_angle()?;
                DataType::Array(Box::new(inner))
            }
            words::STRUCT if self.check(&TokenKind::Lt) => {
                self.advance()?;
                let fields = self.parse_comma_separated(Self::parse_struct_field)?;
                self.expect_closing_angle()?;
                DataType::Struct(fields)
            }
            _ => DataType::Custom {
                name: self.text_of(&token).to_string(),
                args: self.parse_raw_type_args()?,
            },
        };
        let dialect = self.dialect;
        dialect.parse_data_type_suffix(self, data_type)
    }

    fn parse_integer_type(&mut self, kind: IntegerKind) -> Result<DataType, ParseError> {
        Ok(DataType::Integer {
            kind,
            width: self.parse_optional_length()?,
            unsigned: false,
            zerofill: false,
        })
    }

    fn parse_struct_field(&mut self) -> Result<StructField, ParseError> {
        let named = matches!(self.current().kind, TokenKind::Identifier(_) | TokenKind::QuotedIdentifier { .. })
            && self.peek_is(|t| {
                !matches!(
                    t.kind,
                    TokenKind::Comma | TokenKind::Gt | TokenKind::RightShift | TokenKind::Lt | TokenKind::LeftParen
                )
            })?;
        let name = if named {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(StructField {
            name,
            data_type: self.parse_data_type()?,
        })
    }

    fn parse_optional_length(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.consume(&TokenKind::LeftParen)? {
            return Ok(None);
        }
        let length = self.parse_u32()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(length))
    }

    fn parse_optional_precision(&mut self) -> Result<(Option<u32>, Option<u32>), ParseError> {
        if !self.consume(&TokenKind::LeftParen)? {
            return Ok((None, None));
        }
        let precision = self.parse_u32()?;
        let scale = if self.consume(&TokenKind::Comma)? {
            Some(self.parse_u32()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }

    /// Captures the arguments of an unknown type as source text.
    fn parse_raw_type_args(&mut self) -> Result<Vec<String>, ParseError> {
        if !self.consume(&TokenKind::LeftParen)? {
            return Ok(vec![]);
        }
        if self.consume(&TokenKind::RightParen)? {
            return Ok(vec![]);
        }
        let mut args = vec![];
        let mut depth = 0usize;
        let mut start = self.current().span.start;
        loop {
            match self.current().kind {
                TokenKind::Eof => return Err(self.error_expected("')'")),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth > 0 => depth -= 1,
                TokenKind::Comma | TokenKind::RightParen if depth == 0 => {
                    let end = self.prev_end().max(start);
                    args.push(self.source()[start..end].trim().to_string());
                    let closing = self.check(&TokenKind::RightParen);
                    self.advance()?;
                    if closing {
                        return Ok(args);
                    }
                    start = self.current().span.start;
                    continue;
                }
                _ => {}
            }
            self.advance()?;
        }
    }
}
