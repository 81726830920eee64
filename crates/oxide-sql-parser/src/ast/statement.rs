//! SQL statement AST types.

use super::ddl::{AlterTable, CreateFunction, CreateIndex, CreateTable, CreateView, DropStatement};
use super::{DataType, Expr, Ident, ObjectName, OrderBy, Query, TableAlias, TableRef};
use crate::lexer::{NodeSpan, Span};

/// `target = value` in SET lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: ObjectName,
    pub value: Expr,
}

/// Source of rows for INSERT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertSource {
    /// VALUES clause with rows.
    Values(Vec<Vec<Expr>>),
    /// SELECT or other query.
    Query(Box<Query>),
    /// DEFAULT VALUES.
    DefaultValues,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    pub hints: Vec<String>,
    pub table: ObjectName,
    /// Column list; empty when omitted.
    pub columns: Vec<Ident>,
    pub source: InsertSource,
    /// `ON DUPLICATE KEY UPDATE` assignments.
    pub on_duplicate_update: Vec<Assignment>,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub hints: Vec<String>,
    pub table: TableRef,
    pub assignments: Vec<Assignment>,
    pub from: Vec<TableRef>,
    pub selection: Option<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    pub hints: Vec<String>,
    pub table: ObjectName,
    pub alias: Option<Ident>,
    pub selection: Option<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Expr>,
}

/// Which rows a MERGE clause applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMatch {
    Matched,
    NotMatched,
    NotMatchedBySource,
}

impl MergeMatch {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "MATCHED",
            Self::NotMatched => "NOT MATCHED",
            Self::NotMatchedBySource => "NOT MATCHED BY SOURCE",
        }
    }
}

/// The action of a MERGE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    Update(Vec<Assignment>),
    Delete,
    Insert { columns: Vec<Ident>, values: Vec<Expr> },
    /// `INSERT ROW`.
    InsertRow,
}

/// `WHEN [NOT] MATCHED [AND cond] THEN action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeClause {
    pub matched: MergeMatch,
    pub condition: Option<Expr>,
    pub action: MergeAction,
}

/// A MERGE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    pub table: ObjectName,
    pub alias: Option<TableAlias>,
    pub source: TableRef,
    pub on: Expr,
    pub clauses: Vec<MergeClause>,
}

/// `DECLARE a, b type [DEFAULT expr]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declare {
    pub names: Vec<Ident>,
    pub data_type: Option<DataType>,
    pub default: Option<Expr>,
}

/// `ASSERT condition [AS 'message']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assert {
    pub condition: Expr,
    pub message: Option<String>,
}

/// How a transaction was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStart {
    Begin,
    BeginTransaction,
    BeginWork,
    StartTransaction,
}

impl TransactionStart {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::BeginTransaction => "BEGIN TRANSACTION",
            Self::BeginWork => "BEGIN WORK",
            Self::StartTransaction => "START TRANSACTION",
        }
    }
}

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// SELECT, VALUES, WITH or a parenthesized query.
    Query(Box<Query>),
    Insert(Box<Insert>),
    Update(Box<Update>),
    Delete(Box<Delete>),
    Merge(Box<Merge>),
    CreateTable(Box<CreateTable>),
    CreateIndex(Box<CreateIndex>),
    CreateView(Box<CreateView>),
    CreateFunction(Box<CreateFunction>),
    Drop(DropStatement),
    AlterTable(Box<AlterTable>),
    Declare(Declare),
    Assert(Assert),
    /// `BEGIN stmt; ... END`.
    Block(Vec<Statement>),
    StartTransaction(TransactionStart),
    Commit,
    Rollback,
}

impl Statement {
    /// A short name for diagnostics, e.g. `CREATE TABLE`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Query(_) => "QUERY",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::Merge(_) => "MERGE",
            Self::CreateTable(_) => "CREATE TABLE",
            Self::CreateIndex(_) => "CREATE INDEX",
            Self::CreateView(_) => "CREATE VIEW",
            Self::CreateFunction(_) => "CREATE FUNCTION",
            Self::Drop(_) => "DROP",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::Declare(_) => "DECLARE",
            Self::Assert(_) => "ASSERT",
            Self::Block(_) => "BLOCK",
            Self::StartTransaction(_) => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
        }
    }

    /// The recorded range of a query or DDL statement.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        let span = match self {
            Self::Query(query) => query.span,
            Self::CreateTable(create) => create.span,
            Self::CreateIndex(create) => create.span,
            Self::CreateView(create) => create.span,
            Self::CreateFunction(create) => create.span,
            Self::Drop(drop) => drop.span,
            Self::AlterTable(alter) => alter.span,
            _ => return None,
        };
        Some(span.get())
    }

    /// Records the range of a DDL statement. Queries record their own.
    pub(crate) fn record_span(&mut self, span: Span) {
        let span = NodeSpan(span);
        match self {
            Self::CreateTable(create) => create.span = span,
            Self::CreateIndex(create) => create.span = span,
            Self::CreateView(create) => create.span = span,
            Self::CreateFunction(create) => create.span = span,
            Self::Drop(drop) => drop.span = span,
            Self::AlterTable(alter) => alter.span = span,
            _ => {}
        }
    }
}

/// One statement as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatement {
    pub statement: Statement,
    /// Whether a `;` terminated the statement.
    pub after_semicolon: bool,
    /// Comments met before or inside the statement, with delimiters, when
    /// comments are kept.
    pub comments: Vec<String>,
    /// Byte range of the statement text, terminator excluded.
    pub span: Span,
}
