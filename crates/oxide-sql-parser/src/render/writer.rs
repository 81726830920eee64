//! SQL text generation for expressions and queries.

use std::fmt;

use once_cell::sync::Lazy;

use crate::ast::{
    CharString, Distinct, Expr, ExprKind, FrameBound, FrameUnits, FunctionCall, Ident, InList,
    IndexHint, JoinConstraint, JsonOnResponse, JsonTableColumn, Literal, LockStrength, LockWait,
    ObjectName, OrderBy, Query, Select, SelectItem, SetExpr, SetQuantifier, TableAlias, TableRef,
    TempScope, UnaryOp, VariableScope, WindowFrame, WindowSpec,
};
use crate::dialect::Dialect;
use crate::hash::fnv1a_64_lower;
use crate::lexer::NameTable;
use crate::parser::Precedence;

/// Unreserved words that open a special form when they start an
/// expression.
static OPERAND_WORDS: Lazy<NameTable> = Lazy::new(|| {
    NameTable::from_names(&[
        "ARRAY",
        "CURRENT_DATE",
        "CURRENT_TIME",
        "CURRENT_TIMESTAMP",
        "LOCALTIME",
        "LOCALTIMESTAMP",
    ])
});

/// Unreserved words whose call syntax is not a plain argument list.
static CALL_WORDS: Lazy<NameTable> = Lazy::new(|| NameTable::from_names(&["EXTRACT"]));

/// Whether `@name` lexes back as the same user variable.
fn is_bare_variable(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Writes AST nodes as SQL text for one dialect.
///
/// Identifiers are quoted when the dialect reserves them or when they are
/// not plain words. Operands are parenthesized only where precedence
/// requires it; parentheses from the source survive as [`ExprKind::Nested`].
pub struct SqlWriter<'a> {
    pub(super) out: &'a mut dyn fmt::Write,
    pub(super) dialect: &'a dyn Dialect,
}

impl<'a> SqlWriter<'a> {
    pub fn new(out: &'a mut dyn fmt::Write, dialect: &'a dyn Dialect) -> Self {
        Self { out, dialect }
    }

    /// The dialect being written.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Writes raw text.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write(&mut self, text: &str) -> fmt::Result {
        self.out.write_str(text)
    }

    pub(super) fn list<T>(
        &mut self,
        items: &[T],
        separator: &str,
        mut f: impl FnMut(&mut Self, &T) -> fmt::Result,
    ) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator)?;
            }
            f(self, item)?;
        }
        Ok(())
    }

    /// Writes an identifier, quoting it if needed.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn ident(&mut self, ident: &Ident) -> fmt::Result {
        if ident.quote_style.is_some() {
            write!(self.out, "{ident}")
        } else if self.dialect.requires_quoting(&ident.value) {
            let quoted = self.dialect.quote_identifier(&ident.value);
            self.write(&quoted)
        } else {
            self.write(&ident.value)
        }
    }

    pub(super) fn idents(&mut self, idents: &[Ident]) -> fmt::Result {
        self.list(idents, ", ", Self::ident)
    }

    pub(super) fn paren_idents(&mut self, idents: &[Ident]) -> fmt::Result {
        self.write("(")?;
        self.idents(idents)?;
        self.write(")")
    }

    /// Writes a dotted name.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn object_name(&mut self, name: &ObjectName) -> fmt::Result {
        self.list(&name.0, ".", Self::ident)
    }

    /// A column reference. A leading word that would open a special form,
    /// such as `current_date`, is quoted.
    fn column_name(&mut self, name: &ObjectName) -> fmt::Result {
        for (i, part) in name.0.iter().enumerate() {
            if i > 0 {
                self.write(".")?;
                self.ident(part)?;
            } else if part.quote_style.is_none()
                && OPERAND_WORDS.contains(fnv1a_64_lower(&part.value))
            {
                self.quoted(&part.value)?;
            } else {
                self.ident(part)?;
            }
        }
        Ok(())
    }

    /// Function names stay as written unless they are not plain words, so
    /// reserved names such as `LEFT` keep working. A name with its own call
    /// syntax, such as `extract`, is quoted.
    fn function_name(&mut self, name: &ObjectName) -> fmt::Result {
        self.list(&name.0, ".", |w, part| {
            let plain = part.value.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && part.value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
            if part.quote_style.is_some() {
                write!(w.out, "{part}")
            } else if plain && !CALL_WORDS.contains(fnv1a_64_lower(&part.value)) {
                w.write(&part.value)
            } else {
                w.quoted(&part.value)
            }
        })
    }

    fn quoted(&mut self, name: &str) -> fmt::Result {
        let quoted = self.dialect.quote_identifier(name);
        self.write(&quoted)
    }

    /// Writes a quoted string literal with the dialect's escaping.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn string_literal(&mut self, value: &str) -> fmt::Result {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('\'');
        if self.dialect.supports_backslash_escapes() {
            for c in value.chars() {
                match c {
                    '\\' => quoted.push_str("\\\\"),
                    '\'' => quoted.push_str("\\'"),
                    '\n' => quoted.push_str("\\n"),
                    '\r' => quoted.push_str("\\r"),
                    '\t' => quoted.push_str("\\t"),
                    '\0' => quoted.push_str("\\0"),
                    c => quoted.push(c),
                }
            }
        } else {
            for c in value.chars() {
                if c == '\'' {
                    quoted.push('\'');
                }
                quoted.push(c);
            }
        }
        quoted.push('\'');
        self.write(&quoted)
    }

    fn literal(&mut self, literal: &Literal) -> fmt::Result {
        match literal {
            Literal::Integer(value) => write!(self.out, "{value}"),
            Literal::Decimal(text) | Literal::Float(text) | Literal::HexNumber(text) => {
                self.write(text)
            }
            Literal::String(value) => self.string_literal(value),
            Literal::NationalString(value) => {
                self.write("N")?;
                self.string_literal(value)
            }
            Literal::HexString(digits) => write!(self.out, "X'{digits}'"),
            Literal::Boolean(true) => self.write("TRUE"),
            Literal::Boolean(false) => self.write("FALSE"),
            Literal::Null => self.write("NULL"),
        }
    }

    fn char_string(&mut self, string: &CharString) -> fmt::Result {
        if let Some(charset) = &string.charset {
            write!(self.out, "_{charset} ")?;
        }
        if string.hex {
            write!(self.out, "X'{}'", string.value)?;
        } else {
            self.string_literal(&string.value)?;
        }
        if let Some(collate) = &string.collate {
            write!(self.out, " COLLATE {collate}")?;
        }
        Ok(())
    }

    /// Writes `expr`, parenthesized when `wrap` is set.
    fn operand(&mut self, expr: &Expr, wrap: bool) -> fmt::Result {
        if wrap {
            self.write("(")?;
            self.expr(expr)?;
            self.write(")")
        } else {
            self.expr(expr)
        }
    }

    /// Left operand of an operator at `precedence`.
    fn left(&mut self, expr: &Expr, precedence: Precedence) -> fmt::Result {
        self.operand(expr, expr.precedence() < precedence)
    }

    /// Right operand of an operator at `precedence`.
    fn right(&mut self, expr: &Expr, precedence: Precedence) -> fmt::Result {
        self.operand(expr, expr.precedence() <= precedence)
    }

    pub(super) fn exprs(&mut self, exprs: &[Expr]) -> fmt::Result {
        self.list(exprs, ", ", Self::expr)
    }

    /// Writes an expression.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn expr(&mut self, expr: &Expr) -> fmt::Result {
        match &expr.kind {
            ExprKind::Literal(literal) => self.literal(literal),
            ExprKind::CharString(string) => self.char_string(string),
            ExprKind::TypedString { data_type, value } => {
                write!(self.out, "{data_type} ")?;
                self.string_literal(value)
            }
            ExprKind::TypedInteger {
                data_type, text, ..
            } => {
                write!(self.out, "{data_type} ")?;
                self.string_literal(text)
            }
            ExprKind::Column(name) => self.column_name(name),
            ExprKind::Wildcard { qualifier } => {
                if let Some(qualifier) = qualifier {
                    self.column_name(qualifier)?;
                    self.write(".")?;
                }
                self.write("*")
            }
            ExprKind::Parameter { name, .. } => match name {
                Some(name) => write!(self.out, ":{name}"),
                None => self.write("?"),
            },
            ExprKind::Variable { name, scope } => match scope {
                VariableScope::User if is_bare_variable(name) => write!(self.out, "@{name}"),
                VariableScope::User => {
                    self.write("@")?;
                    self.string_literal(name)
                }
                VariableScope::System => write!(self.out, "@@{name}"),
                VariableScope::Global => write!(self.out, "@@global.{name}"),
                VariableScope::Session => write!(self.out, "@@session.{name}"),
            },
            ExprKind::Binary { left, op, right } => {
                let precedence = op.precedence();
                self.left(left, precedence)?;
                write!(self.out, " {} ", op.as_str())?;
                self.right(right, precedence)
            }
            ExprKind::Unary { op, operand } => {
                self.write(op.as_str())?;
                let spaced = match op {
                    UnaryOp::Not | UnaryOp::Binary => true,
                    // `- -x` must not collapse into a `--` comment.
                    UnaryOp::Neg | UnaryOp::Plus => starts_with_sign(operand),
                    UnaryOp::BitNot => false,
                };
                if spaced {
                    self.write(" ")?;
                }
                self.operand(operand, operand.precedence() < op.precedence())
            }
            ExprKind::Nested(inner) => {
                self.write("(")?;
                self.expr(inner)?;
                self.write(")")
            }
            ExprKind::Row(items) => {
                self.write("(")?;
                self.exprs(items)?;
                self.write(")")
            }
            ExprKind::Function(call) => self.function(call),
            ExprKind::Subquery(query) => {
                self.write("(")?;
                self.query(query)?;
                self.write(")")
            }
            ExprKind::Exists(query) => {
                self.write("EXISTS (")?;
                self.query(query)?;
                self.write(")")
            }
            ExprKind::Is {
                expr,
                value,
                negated,
            } => {
                self.left(expr, Precedence::Relational)?;
                let not = if *negated { "NOT " } else { "" };
                write!(self.out, " IS {not}{}", value.as_str())
            }
            ExprKind::In {
                expr,
                list,
                negated,
            } => {
                self.left(expr, Precedence::Relational)?;
                self.write(if *negated { " NOT IN (" } else { " IN (" })?;
                match list {
                    InList::Values(values) => self.exprs(values)?,
                    InList::Subquery(query) => self.query(query)?,
                }
                self.write(")")
            }
            ExprKind::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.left(expr, Precedence::Relational)?;
                self.write(if *negated { " NOT BETWEEN " } else { " BETWEEN " })?;
                self.right(low, Precedence::Relational)?;
                self.write(" AND ")?;
                self.right(high, Precedence::Relational)
            }
            ExprKind::Like {
                expr,
                op,
                pattern,
                escape,
                negated,
            } => {
                self.left(expr, Precedence::Relational)?;
                let not = if *negated { "NOT " } else { "" };
                write!(self.out, " {not}{} ", op.as_str())?;
                self.right(pattern, Precedence::Relational)?;
                if let Some(escape) = escape {
                    self.write(" ESCAPE ")?;
                    self.right(escape, Precedence::Relational)?;
                }
                Ok(())
            }
            ExprKind::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                self.write("CASE")?;
                if let Some(operand) = operand {
                    self.write(" ")?;
                    self.expr(operand)?;
                }
                for (condition, result) in when_clauses {
                    self.write(" WHEN ")?;
                    self.expr(condition)?;
                    self.write(" THEN ")?;
                    self.expr(result)?;
                }
                if let Some(else_clause) = else_clause {
                    self.write(" ELSE ")?;
                    self.expr(else_clause)?;
                }
                self.write(" END")
            }
            ExprKind::Cast {
                expr,
                data_type,
                double_colon,
            } => {
                if *double_colon {
                    self.left(expr, Precedence::Postfix)?;
                    write!(self.out, "::{data_type}")
                } else {
                    self.write("CAST(")?;
                    self.expr(expr)?;
                    write!(self.out, " AS {data_type})")
                }
            }
            ExprKind::Convert {
                expr,
                data_type,
                charset,
            } => {
                self.write("CONVERT(")?;
                self.expr(expr)?;
                if let Some(data_type) = data_type {
                    write!(self.out, ", {data_type}")?;
                }
                if let Some(charset) = charset {
                    self.write(" USING ")?;
                    self.ident(charset)?;
                }
                self.write(")")
            }
            ExprKind::Collate { expr, collation } => {
                self.left(expr, Precedence::Postfix)?;
                self.write(" COLLATE ")?;
                self.object_name(collation)
            }
            ExprKind::Interval { value, unit } => {
                self.write("INTERVAL ")?;
                self.expr(value)?;
                write!(self.out, " {}", unit.as_str())
            }
            ExprKind::Extract { unit, expr } => {
                write!(self.out, "EXTRACT({} FROM ", unit.as_str())?;
                self.expr(expr)?;
                self.write(")")
            }
            ExprKind::CurrentTime(kind) => self.write(kind.as_str()),
            ExprKind::Array { elements, keyword } => {
                self.write(if *keyword { "ARRAY[" } else { "[" })?;
                self.exprs(elements)?;
                self.write("]")
            }
            ExprKind::Subscript { expr, index } => {
                self.left(expr, Precedence::Postfix)?;
                self.write("[")?;
                self.expr(index)?;
                self.write("]")
            }
            ExprKind::MatchAgainst {
                columns,
                against,
                modifier,
            } => {
                self.write("MATCH (")?;
                self.exprs(columns)?;
                self.write(") AGAINST (")?;
                self.expr(against)?;
                if let Some(modifier) = modifier {
                    write!(self.out, " {}", modifier.as_str())?;
                }
                self.write(")")
            }
            ExprKind::JsonTable(table) => {
                self.write("JSON_TABLE(")?;
                self.expr(&table.expr)?;
                self.write(", ")?;
                self.string_literal(&table.path)?;
                self.json_columns(&table.columns)?;
                self.write(")")
            }
        }
    }

    fn json_columns(&mut self, columns: &[JsonTableColumn]) -> fmt::Result {
        self.write(" COLUMNS (")?;
        self.list(columns, ", ", |w, column| match column {
            JsonTableColumn::Ordinality { name } => {
                w.ident(name)?;
                w.write(" FOR ORDINALITY")
            }
            JsonTableColumn::Path {
                name,
                data_type,
                exists,
                path,
                on_empty,
                on_error,
            } => {
                w.ident(name)?;
                write!(w.out, " {data_type}")?;
                w.write(if *exists { " EXISTS PATH " } else { " PATH " })?;
                w.string_literal(path)?;
                if let Some(response) = on_empty {
                    w.json_response(response)?;
                    w.write(" ON EMPTY")?;
                }
                if let Some(response) = on_error {
                    w.json_response(response)?;
                    w.write(" ON ERROR")?;
                }
                Ok(())
            }
            JsonTableColumn::Nested { path, columns } => {
                w.write("NESTED PATH ")?;
                w.string_literal(path)?;
                w.json_columns(columns)
            }
        })?;
        self.write(")")
    }

    fn json_response(&mut self, response: &JsonOnResponse) -> fmt::Result {
        match response {
            JsonOnResponse::Null => self.write(" NULL"),
            JsonOnResponse::Error => self.write(" ERROR"),
            JsonOnResponse::Default(expr) => {
                self.write(" DEFAULT ")?;
                self.expr(expr)
            }
        }
    }

    fn function(&mut self, call: &FunctionCall) -> fmt::Result {
        self.function_name(&call.name)?;
        self.write("(")?;
        if call.distinct {
            self.write("DISTINCT ")?;
        }
        self.exprs(&call.args)?;
        if !call.order_by.is_empty() {
            self.write(" ORDER BY ")?;
            self.order_by_list(&call.order_by)?;
        }
        if let Some(separator) = &call.separator {
            self.write(" SEPARATOR ")?;
            self.string_literal(separator)?;
        }
        self.write(")")?;
        if let Some(window) = &call.over {
            self.write(" OVER (")?;
            self.window(window)?;
            self.write(")")?;
        }
        Ok(())
    }

    fn window(&mut self, window: &WindowSpec) -> fmt::Result {
        let mut parts = 0;
        if !window.partition_by.is_empty() {
            self.write("PARTITION BY ")?;
            self.exprs(&window.partition_by)?;
            parts += 1;
        }
        if !window.order_by.is_empty() {
            if parts > 0 {
                self.write(" ")?;
            }
            self.write("ORDER BY ")?;
            self.order_by_list(&window.order_by)?;
            parts += 1;
        }
        if let Some(frame) = &window.frame {
            if parts > 0 {
                self.write(" ")?;
            }
            self.frame(frame)?;
        }
        Ok(())
    }

    fn frame(&mut self, frame: &WindowFrame) -> fmt::Result {
        self.write(match frame.units {
            FrameUnits::Rows => "ROWS ",
            FrameUnits::Range => "RANGE ",
        })?;
        match &frame.end {
            Some(end) => {
                self.write("BETWEEN ")?;
                self.frame_bound(&frame.start)?;
                self.write(" AND ")?;
                self.frame_bound(end)
            }
            None => self.frame_bound(&frame.start),
        }
    }

    fn frame_bound(&mut self, bound: &FrameBound) -> fmt::Result {
        match bound {
            FrameBound::UnboundedPreceding => self.write("UNBOUNDED PRECEDING"),
            FrameBound::UnboundedFollowing => self.write("UNBOUNDED FOLLOWING"),
            FrameBound::CurrentRow => self.write("CURRENT ROW"),
            FrameBound::Preceding(offset) => {
                self.expr(offset)?;
                self.write(" PRECEDING")
            }
            FrameBound::Following(offset) => {
                self.expr(offset)?;
                self.write(" FOLLOWING")
            }
        }
    }

    pub(super) fn order_by_list(&mut self, items: &[OrderBy]) -> fmt::Result {
        self.list(items, ", ", |w, item| {
            w.expr(&item.expr)?;
            if let Some(direction) = item.direction {
                write!(w.out, " {}", direction.as_str())?;
            }
            if let Some(nulls) = item.nulls {
                write!(w.out, " {}", nulls.as_str())?;
            }
            Ok(())
        })
    }

    // Queries

    /// Writes a query with its WITH and trailing clauses.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn query(&mut self, query: &Query) -> fmt::Result {
        if let Some(with) = &query.with {
            self.write(if with.recursive { "WITH RECURSIVE " } else { "WITH " })?;
            self.list(&with.ctes, ", ", |w, cte| {
                w.ident(&cte.name)?;
                if !cte.columns.is_empty() {
                    w.write(" ")?;
                    w.paren_idents(&cte.columns)?;
                }
                w.write(" AS (")?;
                w.query(&cte.query)?;
                w.write(")")
            })?;
            self.write(" ")?;
        }
        self.set_expr(&query.body)?;

        if !query.order_by.is_empty() {
            self.write(" ORDER BY ")?;
            self.order_by_list(&query.order_by)?;
        }
        if let Some(limit) = &query.limit {
            self.write(" LIMIT ")?;
            self.expr(limit)?;
        }
        if let Some(offset) = &query.offset {
            self.write(" OFFSET ")?;
            self.expr(offset)?;
            if query.fetch.is_some() {
                self.write(" ROWS")?;
            }
        }
        if let Some(fetch) = &query.fetch {
            self.write(" FETCH FIRST")?;
            if let Some(quantity) = &fetch.quantity {
                self.write(" ")?;
                self.expr(quantity)?;
            }
            if fetch.percent {
                self.write(" PERCENT")?;
            }
            self.write(if fetch.with_ties { " ROWS WITH TIES" } else { " ROWS ONLY" })?;
        }
        for lock in &query.locks {
            self.write(match lock.strength {
                LockStrength::Update => " FOR UPDATE",
                LockStrength::Share => " FOR SHARE",
            })?;
            if !lock.of.is_empty() {
                self.write(" OF ")?;
                self.list(&lock.of, ", ", Self::object_name)?;
            }
            match lock.wait {
                Some(LockWait::Nowait) => self.write(" NOWAIT")?,
                Some(LockWait::SkipLocked) => self.write(" SKIP LOCKED")?,
                None => {}
            }
        }
        Ok(())
    }

    fn set_expr(&mut self, body: &SetExpr) -> fmt::Result {
        match body {
            SetExpr::Select(select) => self.select(select),
            SetExpr::Query(query) => {
                self.write("(")?;
                self.query(query)?;
                self.write(")")
            }
            SetExpr::Values(rows) => self.values(rows),
            SetExpr::SetOperation {
                op,
                quantifier,
                left,
                right,
            } => {
                self.set_expr(left)?;
                write!(self.out, " {}", op.as_str())?;
                match quantifier {
                    Some(SetQuantifier::All) => self.write(" ALL")?,
                    Some(SetQuantifier::Distinct) => self.write(" DISTINCT")?,
                    None => {}
                }
                self.write(" ")?;
                self.set_expr(right)
            }
        }
    }

    pub(super) fn values(&mut self, rows: &[Vec<Expr>]) -> fmt::Result {
        self.write("VALUES ")?;
        self.list(rows, ", ", |w, row| {
            w.write("(")?;
            w.exprs(row)?;
            w.write(")")
        })
    }

    pub(super) fn hints(&mut self, hints: &[String]) -> fmt::Result {
        for hint in hints {
            write!(self.out, " /*+{hint}*/")?;
        }
        Ok(())
    }

    fn select(&mut self, select: &Select) -> fmt::Result {
        self.write("SELECT")?;
        self.hints(&select.hints)?;
        match &select.distinct {
            Some(Distinct::All) => self.write(" ALL")?,
            Some(Distinct::Distinct) => self.write(" DISTINCT")?,
            Some(Distinct::On(exprs)) => {
                self.write(" DISTINCT ON (")?;
                self.exprs(exprs)?;
                self.write(")")?;
            }
            None => {}
        }
        if let Some(top) = &select.top {
            self.write(" TOP ")?;
            self.expr(&top.quantity)?;
            if top.percent {
                self.write(" PERCENT")?;
            }
        }
        self.write(" ")?;
        self.list(&select.projection, ", ", Self::select_item)?;

        if let Some(into) = &select.into {
            self.write(" INTO")?;
            match into.scope {
                Some(TempScope::Global) => self.write(" GLOBAL")?,
                Some(TempScope::Local) => self.write(" LOCAL")?,
                None => {}
            }
            if into.temporary {
                self.write(" TEMPORARY")?;
            }
            if into.unlogged {
                self.write(" UNLOGGED")?;
            }
            if into.table {
                self.write(" TABLE")?;
            }
            self.write(" ")?;
            self.object_name(&into.name)?;
        }
        if !select.from.is_empty() {
            self.write(" FROM ")?;
            self.list(&select.from, ", ", Self::table_ref)?;
        }
        if let Some(selection) = &select.selection {
            self.write(" WHERE ")?;
            self.expr(selection)?;
        }
        if !select.group_by.is_empty() {
            self.write(" GROUP BY ")?;
            self.exprs(&select.group_by)?;
        }
        if let Some(having) = &select.having {
            self.write(" HAVING ")?;
            self.expr(having)?;
        }
        if let Some(qualify) = &select.qualify {
            self.write(" QUALIFY ")?;
            self.expr(qualify)?;
        }
        Ok(())
    }

    fn select_item(&mut self, item: &SelectItem) -> fmt::Result {
        self.expr(&item.expr)?;
        if let Some(alias) = &item.alias {
            self.write(" AS ")?;
            self.ident(alias)?;
        }
        Ok(())
    }

    fn table_alias(&mut self, alias: Option<&TableAlias>) -> fmt::Result {
        if let Some(alias) = alias {
            self.write(" ")?;
            self.ident(&alias.name)?;
            if !alias.columns.is_empty() {
                self.write(" ")?;
                self.paren_idents(&alias.columns)?;
            }
        }
        Ok(())
    }

    fn index_hint(&mut self, hint: &IndexHint) -> fmt::Result {
        write!(self.out, " {} INDEX", hint.kind.as_str())?;
        if let Some(scope) = hint.scope {
            write!(self.out, " FOR {}", scope.as_str())?;
        }
        self.write(" ")?;
        self.paren_idents(&hint.indexes)
    }

    /// Writes a FROM item.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn table_ref(&mut self, table: &TableRef) -> fmt::Result {
        match table {
            TableRef::Table {
                name,
                alias,
                partitions,
                index_hints,
                ..
            } => {
                self.object_name(name)?;
                if !partitions.is_empty() {
                    self.write(" PARTITION ")?;
                    self.paren_idents(partitions)?;
                }
                self.table_alias(alias.as_ref())?;
                for hint in index_hints {
                    self.index_hint(hint)?;
                }
                Ok(())
            }
            TableRef::Derived {
                subquery, alias, ..
            } => {
                self.write("(")?;
                self.query(subquery)?;
                self.write(")")?;
                self.table_alias(alias.as_ref())
            }
            TableRef::Function { expr, alias, .. } => {
                self.expr(expr)?;
                self.table_alias(alias.as_ref())
            }
            TableRef::Join {
                left,
                join_type,
                natural,
                right,
                constraint,
                ..
            } => {
                self.table_ref(left)?;
                self.write(if *natural { " NATURAL " } else { " " })?;
                self.write(join_type.as_str())?;
                self.write(" ")?;
                if matches!(**right, TableRef::Join { .. }) {
                    self.write("(")?;
                    self.table_ref(right)?;
                    self.write(")")?;
                } else {
                    self.table_ref(right)?;
                }
                match constraint {
                    JoinConstraint::On(expr) => {
                        self.write(" ON ")?;
                        self.expr(expr)
                    }
                    JoinConstraint::Using(columns) => {
                        self.write(" USING ")?;
                        self.paren_idents(columns)
                    }
                    JoinConstraint::None => Ok(()),
                }
            }
        }
    }
}

/// Whether `expr` renders with a leading sign character.
fn starts_with_sign(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Unary {
            op: UnaryOp::Neg | UnaryOp::Plus,
            ..
        } => true,
        ExprKind::Literal(Literal::Integer(value)) => value.to_string().starts_with('-'),
        ExprKind::Literal(Literal::Decimal(text) | Literal::Float(text)) => {
            text.starts_with(['-', '+'])
        }
        ExprKind::Binary { left, .. } => starts_with_sign(left),
        _ => false,
    }
}
