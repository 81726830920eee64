//! Query AST types: SELECT blocks, set operations and FROM clauses.

use super::{Expr, Ident, ObjectName};
use crate::lexer::NodeSpan;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction, when written.
    pub direction: Option<OrderDirection>,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
    pub span: NodeSpan,
}

impl OrderBy {
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self {
            expr,
            direction: None,
            nulls: None,
            span: NodeSpan::EMPTY,
        }
    }
}

/// A common table expression: `name [(cols)] AS (query)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cte {
    pub name: Ident,
    pub columns: Vec<Ident>,
    pub query: Box<Query>,
    pub span: NodeSpan,
}

/// `WITH [RECURSIVE] cte, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

/// `FETCH {FIRST|NEXT} [n [PERCENT]] {ROW|ROWS} {ONLY|WITH TIES}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetch {
    pub quantity: Option<Expr>,
    pub percent: bool,
    pub with_ties: bool,
}

/// Row locking strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    Update,
    Share,
}

/// What a locking read does when rows are already locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockWait {
    Nowait,
    SkipLocked,
}

/// `FOR UPDATE|SHARE [OF t, ..] [NOWAIT|SKIP LOCKED]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockClause {
    pub strength: LockStrength,
    pub of: Vec<ObjectName>,
    pub wait: Option<LockWait>,
}

/// A full query: an optional WITH, a body and the trailing clauses that
/// apply to the whole body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub with: Option<With>,
    pub body: SetExpr,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
    pub fetch: Option<Fetch>,
    pub locks: Vec<LockClause>,
    /// From `WITH` or the body to the last trailing clause.
    pub span: NodeSpan,
}

impl Query {
    /// Wraps a query body with no trailing clauses.
    #[must_use]
    pub const fn from_body(body: SetExpr) -> Self {
        Self {
            with: None,
            body,
            order_by: vec![],
            limit: None,
            offset: None,
            fetch: None,
            locks: vec![],
            span: NodeSpan::EMPTY,
        }
    }

    /// Returns the SELECT block when the body is a single one.
    #[must_use]
    pub fn as_select(&self) -> Option<&Select> {
        match &self.body {
            SetExpr::Select(select) => Some(select),
            _ => None,
        }
    }
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
    /// Oracle's spelling of EXCEPT.
    Minus,
}

impl SetOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Minus => "MINUS",
        }
    }

    /// Binding strength; INTERSECT binds tighter than the others.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Intersect => 2,
            Self::Union | Self::Except | Self::Minus => 1,
        }
    }
}

/// `ALL` or `DISTINCT` after a set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

/// The body of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetExpr {
    Select(Box<Select>),
    /// A parenthesized query.
    Query(Box<Query>),
    /// `VALUES (..), (..)`.
    Values(Vec<Vec<Expr>>),
    SetOperation {
        op: SetOperator,
        quantifier: Option<SetQuantifier>,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },
}

/// DISTINCT handling of a SELECT block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distinct {
    All,
    Distinct,
    /// `DISTINCT ON (exprs)`.
    On(Vec<Expr>),
}

/// `TOP n [PERCENT]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Top {
    pub quantity: Expr,
    pub percent: bool,
}

/// Scope of a temporary table created by `SELECT .. INTO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempScope {
    Global,
    Local,
}

/// `INTO [GLOBAL|LOCAL] [TEMP|TEMPORARY] [UNLOGGED] [TABLE] name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectInto {
    pub scope: Option<TempScope>,
    pub temporary: bool,
    pub unlogged: bool,
    pub table: bool,
    pub name: ObjectName,
}

/// A SELECT clause contributed by a dialect hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectModifier {
    Distinct(Distinct),
    Top(Top),
    Into(SelectInto),
    Qualify(Expr),
}

/// A projection item with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<Ident>,
    pub span: NodeSpan,
}

impl SelectItem {
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self {
            expr,
            alias: None,
            span: NodeSpan::EMPTY,
        }
    }
}

/// One SELECT block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    /// Optimizer hint bodies written right after `SELECT`.
    pub hints: Vec<String>,
    pub distinct: Option<Distinct>,
    pub top: Option<Top>,
    pub projection: Vec<SelectItem>,
    pub into: Option<SelectInto>,
    pub from: Vec<TableRef>,
    pub selection: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub qualify: Option<Expr>,
    pub span: NodeSpan,
}

/// `alias [(col, ..)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

impl TableAlias {
    #[must_use]
    pub const fn new(name: Ident) -> Self {
        Self {
            name,
            columns: vec![],
        }
    }
}

/// What an index hint asks the optimizer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintKind {
    Use,
    Force,
    Ignore,
}

impl IndexHintKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Use => "USE",
            Self::Force => "FORCE",
            Self::Ignore => "IGNORE",
        }
    }
}

/// The part of query processing an index hint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintScope {
    Join,
    OrderBy,
    GroupBy,
}

impl IndexHintScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::OrderBy => "ORDER BY",
            Self::GroupBy => "GROUP BY",
        }
    }
}

/// `USE|FORCE|IGNORE INDEX|KEY [FOR ..] (names)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    pub kind: IndexHintKind,
    pub scope: Option<IndexHintScope>,
    pub indexes: Vec<Ident>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// How the rows of a join are matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Ident>),
    None,
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    /// A named table.
    Table {
        name: ObjectName,
        alias: Option<TableAlias>,
        /// Explicit partition selection, `PARTITION (p1, p2)`.
        partitions: Vec<Ident>,
        index_hints: Vec<IndexHint>,
        span: NodeSpan,
    },
    /// A subquery.
    Derived {
        subquery: Box<Query>,
        alias: Option<TableAlias>,
        span: NodeSpan,
    },
    /// A table-valued function such as `UNNEST(..)` or `JSON_TABLE(..)`.
    Function {
        expr: Expr,
        alias: Option<TableAlias>,
        span: NodeSpan,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        join_type: JoinType,
        natural: bool,
        /// Right side of the join.
        right: Box<TableRef>,
        constraint: JoinConstraint,
        span: NodeSpan,
    },
}

impl TableRef {
    /// A bare table reference.
    #[must_use]
    pub fn named(name: impl Into<ObjectName>) -> Self {
        Self::Table {
            name: name.into(),
            alias: None,
            partitions: vec![],
            index_hints: vec![],
            span: NodeSpan::EMPTY,
        }
    }

    /// Source range covered by this table reference, joins included.
    #[must_use]
    pub const fn span(&self) -> NodeSpan {
        match self {
            Self::Table { span, .. }
            | Self::Derived { span, .. }
            | Self::Function { span, .. }
            | Self::Join { span, .. } => *span,
        }
    }
}
