//! Read-only AST traversal.
//!
//! Nodes do not point back at their parents. Instead [`walk`] hands every
//! [`Visitor`] call the chain of ancestors from the root down to the parent,
//! so context questions such as "is this expression inside an index
//! definition" are answered from the slice.

use super::{
    AlterTableOperation, Assignment, ColumnDef, ColumnOption, Cte, Distinct, Expr, ExprKind,
    FrameBound, FunctionBody, FunctionCall, IndexDefinition, InList, InsertSource,
    JoinConstraint, JsonOnResponse, JsonTableColumn, MergeAction, MergeClause, OrderBy, Query,
    Select, SelectItem, SetExpr, Statement, TableElement, TableOption, TableRef, WindowFrame,
};
use crate::lexer::Span;

/// A borrowed reference to any visitable node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    Cte(&'a Cte),
    SetExpr(&'a SetExpr),
    Select(&'a Select),
    SelectItem(&'a SelectItem),
    TableRef(&'a TableRef),
    Expr(&'a Expr),
    OrderBy(&'a OrderBy),
    Assignment(&'a Assignment),
    MergeClause(&'a MergeClause),
    TableElement(&'a TableElement),
    ColumnDef(&'a ColumnDef),
    IndexDefinition(&'a IndexDefinition),
    TableOption(&'a TableOption),
}

macro_rules! node_from {
    ($($variant:ident),*) => {
        $(
            impl<'a> From<&'a $variant> for NodeRef<'a> {
                fn from(node: &'a $variant) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

node_from!(
    Statement, Query, Cte, SetExpr, Select, SelectItem, TableRef, Expr, OrderBy, Assignment,
    MergeClause, TableElement, ColumnDef, IndexDefinition, TableOption
);

#[derive(Default)]
struct Children<'a>(Vec<NodeRef<'a>>);

impl<'a> Children<'a> {
    fn push(&mut self, node: impl Into<NodeRef<'a>>) {
        self.0.push(node.into());
    }

    fn extend<T: 'a>(&mut self, nodes: impl IntoIterator<Item = &'a T>)
    where
        &'a T: Into<NodeRef<'a>>,
    {
        self.0.extend(nodes.into_iter().map(Into::into));
    }

    fn opt<T: 'a>(&mut self, node: Option<&'a T>)
    where
        &'a T: Into<NodeRef<'a>>,
    {
        if let Some(node) = node {
            self.push(node);
        }
    }

    fn function(&mut self, call: &'a FunctionCall) {
        self.extend(&call.args);
        self.extend(&call.order_by);
        if let Some(over) = &call.over {
            self.extend(&over.partition_by);
            self.extend(&over.order_by);
            if let Some(frame) = &over.frame {
                self.frame(frame);
            }
        }
    }

    fn frame(&mut self, frame: &'a WindowFrame) {
        for bound in std::iter::once(&frame.start).chain(frame.end.as_ref()) {
            if let FrameBound::Preceding(expr) | FrameBound::Following(expr) = bound {
                self.push(expr.as_ref());
            }
        }
    }

    fn json_columns(&mut self, columns: &'a [JsonTableColumn]) {
        for column in columns {
            match column {
                JsonTableColumn::Ordinality { .. } => {}
                JsonTableColumn::Path {
                    on_empty, on_error, ..
                } => {
                    for response in [on_empty, on_error].into_iter().flatten() {
                        if let JsonOnResponse::Default(expr) = response {
                            self.push(expr.as_ref());
                        }
                    }
                }
                JsonTableColumn::Nested { columns, .. } => self.json_columns(columns),
            }
        }
    }

    fn column_def(&mut self, column: &'a ColumnDef) {
        for option in &column.options {
            match option {
                ColumnOption::Default(expr)
                | ColumnOption::Check(expr)
                | ColumnOption::OnUpdate(expr)
                | ColumnOption::Generated { expr, .. } => self.push(expr),
                ColumnOption::Options(options) => {
                    self.0.extend(options.iter().map(|o| NodeRef::Expr(&o.value)));
                }
                _ => {}
            }
        }
    }
}

impl<'a> NodeRef<'a> {
    /// The syntactic children of this node in source order.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn children(self) -> Vec<NodeRef<'a>> {
        let mut out = Children::default();
        match self {
            Self::Statement(statement) => match statement {
                Statement::Query(query) => out.push(query.as_ref()),
                Statement::Insert(insert) => {
                    match &insert.source {
                        InsertSource::Values(rows) => rows.iter().for_each(|row| out.extend(row)),
                        InsertSource::Query(query) => out.push(query.as_ref()),
                        InsertSource::DefaultValues => {}
                    }
                    out.extend(&insert.on_duplicate_update);
                }
                Statement::Update(update) => {
                    out.push(&update.table);
                    out.extend(&update.assignments);
                    out.extend(&update.from);
                    out.opt(update.selection.as_ref());
                    out.extend(&update.order_by);
                    out.opt(update.limit.as_ref());
                }
                Statement::Delete(delete) => {
                    out.opt(delete.selection.as_ref());
                    out.extend(&delete.order_by);
                    out.opt(delete.limit.as_ref());
                }
                Statement::Merge(merge) => {
                    out.push(&merge.source);
                    out.push(&merge.on);
                    out.extend(&merge.clauses);
                }
                Statement::CreateTable(create) => {
                    out.extend(&create.elements);
                    out.extend(&create.options);
                    out.opt(create.query.as_deref());
                }
                Statement::CreateIndex(create) => {
                    out.0.extend(create.columns.iter().map(|c| NodeRef::Expr(&c.expr)));
                }
                Statement::CreateView(create) => out.push(create.query.as_ref()),
                Statement::CreateFunction(create) => {
                    out.0.extend(create.options.iter().map(|o| NodeRef::Expr(&o.value)));
                    if let Some(FunctionBody::Expr(expr)) = &create.body {
                        out.push(expr);
                    }
                }
                Statement::AlterTable(alter) => {
                    for operation in &alter.operations {
                        match operation {
                            AlterTableOperation::AddColumn { column, .. } => out.push(column),
                            AlterTableOperation::AddConstraint(element) => out.push(element),
                            AlterTableOperation::Options(options) => out.extend(options),
                            _ => {}
                        }
                    }
                }
                Statement::Declare(declare) => out.opt(declare.default.as_ref()),
                Statement::Assert(assert) => out.push(&assert.condition),
                Statement::Block(statements) => out.extend(statements),
                Statement::Drop(_)
                | Statement::StartTransaction(_)
                | Statement::Commit
                | Statement::Rollback => {}
            },
            Self::Query(query) => {
                if let Some(with) = &query.with {
                    out.extend(&with.ctes);
                }
                out.push(&query.body);
                out.extend(&query.order_by);
                out.opt(query.limit.as_ref());
                out.opt(query.offset.as_ref());
                if let Some(quantity) = query.fetch.as_ref().and_then(|f| f.quantity.as_ref()) {
                    out.push(quantity);
                }
            }
            Self::Cte(cte) => out.push(cte.query.as_ref()),
            Self::SetExpr(body) => match body {
                SetExpr::Select(select) => out.push(select.as_ref()),
                SetExpr::Query(query) => out.push(query.as_ref()),
                SetExpr::Values(rows) => rows.iter().for_each(|row| out.extend(row)),
                SetExpr::SetOperation { left, right, .. } => {
                    out.push(left.as_ref());
                    out.push(right.as_ref());
                }
            },
            Self::Select(select) => {
                if let Some(Distinct::On(exprs)) = &select.distinct {
                    out.extend(exprs);
                }
                if let Some(top) = &select.top {
                    out.push(&top.quantity);
                }
                out.extend(&select.projection);
                out.extend(&select.from);
                out.opt(select.selection.as_ref());
                out.extend(&select.group_by);
                out.opt(select.having.as_ref());
                out.opt(select.qualify.as_ref());
            }
            Self::SelectItem(item) => out.push(&item.expr),
            Self::TableRef(table) => match table {
                TableRef::Table { .. } => {}
                TableRef::Derived { subquery, .. } => out.push(subquery.as_ref()),
                TableRef::Function { expr, .. } => out.push(expr),
                TableRef::Join {
                    left,
                    right,
                    constraint,
                    ..
                } => {
                    out.push(left.as_ref());
                    out.push(right.as_ref());
                    if let JoinConstraint::On(expr) = constraint {
                        out.push(expr);
                    }
                }
            },
            Self::Expr(expr) => expr_children(expr, &mut out),
            Self::OrderBy(order) => out.push(&order.expr),
            Self::Assignment(assignment) => out.push(&assignment.value),
            Self::MergeClause(clause) => {
                out.opt(clause.condition.as_ref());
                match &clause.action {
                    MergeAction::Update(assignments) => out.extend(assignments),
                    MergeAction::Insert { values, .. } => out.extend(values),
                    MergeAction::Delete | MergeAction::InsertRow => {}
                }
            }
            Self::TableElement(element) => match element {
                TableElement::Column(column) => out.push(column),
                TableElement::Index(index) => out.push(index),
                TableElement::ForeignKey(_) => {}
                TableElement::Check(check) => out.push(&check.expr),
            },
            Self::ColumnDef(column) => out.column_def(column),
            Self::IndexDefinition(index) => {
                out.0.extend(index.columns.iter().map(|c| NodeRef::Expr(&c.expr)));
            }
            Self::TableOption(option) => match option {
                TableOption::KeyValue { value, .. } => out.push(value),
                TableOption::PartitionBy(expr) => out.push(expr),
                TableOption::ClusterBy(exprs) => out.extend(exprs),
                TableOption::Options(options) => {
                    out.0.extend(options.iter().map(|o| NodeRef::Expr(&o.value)));
                }
                _ => {}
            },
        }
        out.0
    }

    /// Source range of this node when it was parsed from text.
    ///
    /// Hand-built nodes report an empty span. Assignments, merge clauses,
    /// table options and `VALUES` bodies carry none.
    #[must_use]
    pub fn span(self) -> Option<Span> {
        let span = match self {
            Self::Statement(statement) => return statement.span(),
            Self::Query(query) => query.span,
            Self::Cte(cte) => cte.span,
            Self::SetExpr(body) => return set_expr_span(body),
            Self::Select(select) => select.span,
            Self::SelectItem(item) => item.span,
            Self::TableRef(table) => table.span(),
            Self::Expr(expr) => expr.span,
            Self::OrderBy(order) => order.span,
            Self::TableElement(element) => element.span(),
            Self::ColumnDef(column) => column.span,
            Self::IndexDefinition(index) => index.span,
            Self::Assignment(_) | Self::MergeClause(_) | Self::TableOption(_) => return None,
        };
        Some(span.get())
    }
}

fn set_expr_span(body: &SetExpr) -> Option<Span> {
    match body {
        SetExpr::Select(select) => Some(select.span.get()),
        SetExpr::Query(query) => Some(query.span.get()),
        SetExpr::Values(_) => None,
        SetExpr::SetOperation { left, right, .. } => {
            Some(set_expr_span(left)?.merge(set_expr_span(right)?))
        }
    }
}

fn expr_children<'a>(expr: &'a Expr, out: &mut Children<'a>) {
    match &expr.kind {
        ExprKind::Binary { left, right, .. } => {
            out.push(left.as_ref());
            out.push(right.as_ref());
        }
        ExprKind::Unary { operand: inner, .. }
        | ExprKind::Nested(inner)
        | ExprKind::Cast { expr: inner, .. }
        | ExprKind::Convert { expr: inner, .. }
        | ExprKind::Collate { expr: inner, .. }
        | ExprKind::Interval { value: inner, .. }
        | ExprKind::Extract { expr: inner, .. }
        | ExprKind::Is { expr: inner, .. } => out.push(inner.as_ref()),
        ExprKind::Row(items) | ExprKind::Array { elements: items, .. } => out.extend(items),
        ExprKind::Function(call) => out.function(call),
        ExprKind::Subquery(query) | ExprKind::Exists(query) => out.push(query.as_ref()),
        ExprKind::In { expr, list, .. } => {
            out.push(expr.as_ref());
            match list {
                InList::Values(values) => out.extend(values),
                InList::Subquery(query) => out.push(query.as_ref()),
            }
        }
        ExprKind::Between {
            expr, low, high, ..
        } => {
            out.push(expr.as_ref());
            out.push(low.as_ref());
            out.push(high.as_ref());
        }
        ExprKind::Like {
            expr,
            pattern,
            escape,
            ..
        } => {
            out.push(expr.as_ref());
            out.push(pattern.as_ref());
            out.opt(escape.as_deref());
        }
        ExprKind::Case {
            operand,
            when_clauses,
            else_clause,
        } => {
            out.opt(operand.as_deref());
            for (condition, result) in when_clauses {
                out.push(condition);
                out.push(result);
            }
            out.opt(else_clause.as_deref());
        }
        ExprKind::Subscript { expr, index } => {
            out.push(expr.as_ref());
            out.push(index.as_ref());
        }
        ExprKind::MatchAgainst {
            columns, against, ..
        } => {
            out.extend(columns);
            out.push(against.as_ref());
        }
        ExprKind::JsonTable(table) => {
            out.push(&table.expr);
            out.json_columns(&table.columns);
        }
        ExprKind::Literal(_)
        | ExprKind::CharString(_)
        | ExprKind::TypedString { .. }
        | ExprKind::TypedInteger { .. }
        | ExprKind::Column(_)
        | ExprKind::Wildcard { .. }
        | ExprKind::Parameter { .. }
        | ExprKind::Variable { .. }
        | ExprKind::CurrentTime(_) => {}
    }
}

/// Callbacks for [`walk`].
pub trait Visitor<'a> {
    /// Called before the children of `node`. `ancestors` runs from the root
    /// to the parent. Returning false skips the children and `end_visit`.
    fn visit(&mut self, node: NodeRef<'a>, ancestors: &[NodeRef<'a>]) -> bool;

    /// Called after the children of `node`.
    fn end_visit(&mut self, _node: NodeRef<'a>, _ancestors: &[NodeRef<'a>]) {}
}

/// Walks `root` depth first.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(root: NodeRef<'a>, visitor: &mut V) {
    let mut ancestors = Vec::new();
    walk_inner(root, visitor, &mut ancestors);
}

fn walk_inner<'a, V: Visitor<'a> + ?Sized>(
    node: NodeRef<'a>,
    visitor: &mut V,
    ancestors: &mut Vec<NodeRef<'a>>,
) {
    if !visitor.visit(node, ancestors) {
        return;
    }
    ancestors.push(node);
    for child in node.children() {
        walk_inner(child, visitor, ancestors);
    }
    ancestors.pop();
    visitor.end_visit(node, ancestors);
}

impl Statement {
    /// Walks this statement with `visitor`.
    pub fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        walk(NodeRef::Statement(self), visitor);
    }
}

impl Expr {
    /// Walks this expression with `visitor`.
    pub fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        walk(NodeRef::Expr(self), visitor);
    }
}
