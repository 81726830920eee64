//! DDL AST types: tables, indexes, views and functions.

use super::{DataType, Expr, Ident, ObjectName, OrderDirection, Query};
use crate::lexer::NodeSpan;

/// `name = value` inside an `OPTIONS(..)` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlOption {
    pub name: Ident,
    pub value: Expr,
}

/// Referential action for ON DELETE and ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
    NoAction,
}

impl ReferentialAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// `REFERENCES table [(cols)] [ON DELETE ..] [ON UPDATE ..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub table: ObjectName,
    pub columns: Vec<Ident>,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}

/// Whether a generated column is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedStorage {
    Stored,
    Virtual,
}

/// An attribute of a column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOption {
    Null,
    NotNull,
    Default(Expr),
    PrimaryKey,
    Unique,
    Check(Expr),
    References(ForeignKeyRef),
    Collate(ObjectName),
    CharacterSet(Ident),
    AutoIncrement,
    Comment(String),
    OnUpdate(Expr),
    Generated {
        expr: Expr,
        storage: Option<GeneratedStorage>,
    },
    Options(Vec<SqlOption>),
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub options: Vec<ColumnOption>,
    pub span: NodeSpan,
}

/// The flavor of an index definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
    Key,
    Fulltext,
    Spatial,
}

impl IndexKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::Index => "INDEX",
            Self::Key => "KEY",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
        }
    }
}

/// One key part: a column with an optional prefix length, or a
/// parenthesized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    pub expr: Expr,
    pub length: Option<u32>,
    pub direction: Option<OrderDirection>,
}

/// An attribute following an index's key parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOption {
    Using(Ident),
    Comment(String),
    Visible,
    Invisible,
    Global,
    Local,
    KeyBlockSize(u64),
    Algorithm(Ident),
    Lock(Ident),
    WithParser(Ident),
}

/// An index or key declared inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    /// `CONSTRAINT name`.
    pub constraint: Option<Ident>,
    pub kind: IndexKind,
    pub name: Option<Ident>,
    pub using: Option<Ident>,
    pub columns: Vec<IndexColumn>,
    pub options: Vec<IndexOption>,
    pub span: NodeSpan,
}

/// `[CONSTRAINT name] FOREIGN KEY (cols) REFERENCES ..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub constraint: Option<Ident>,
    pub columns: Vec<Ident>,
    pub references: ForeignKeyRef,
    pub span: NodeSpan,
}

/// `[CONSTRAINT name] CHECK (expr)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConstraint {
    pub constraint: Option<Ident>,
    pub expr: Expr,
    pub span: NodeSpan,
}

/// An item between the parentheses of CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableElement {
    Column(ColumnDef),
    Index(IndexDefinition),
    ForeignKey(ForeignKey),
    Check(CheckConstraint),
}

/// Which directory a table option relocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    Data,
    Index,
}

/// A table option following the element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    /// A single-word option such as `ENGINE = InnoDB`; `name` is the
    /// canonical spelling.
    KeyValue { name: String, value: Expr },
    CharacterSet { default: bool, value: Ident },
    Collate { default: bool, value: Ident },
    Directory { kind: DirectoryKind, path: String },
    Union(Vec<ObjectName>),
    Tablespace { name: Ident, storage: Option<Ident> },
    PartitionBy(Expr),
    ClusterBy(Vec<Expr>),
    Options(Vec<SqlOption>),
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub or_replace: bool,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub elements: Vec<TableElement>,
    pub options: Vec<TableOption>,
    /// `AS query`.
    pub query: Option<Box<Query>>,
    pub span: NodeSpan,
}

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    pub unique: bool,
    pub if_not_exists: bool,
    pub name: Ident,
    pub table: ObjectName,
    pub using: Option<Ident>,
    pub columns: Vec<IndexColumn>,
    pub options: Vec<IndexOption>,
    pub span: NodeSpan,
}

/// A CREATE VIEW statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateView {
    pub or_replace: bool,
    pub name: ObjectName,
    pub columns: Vec<Ident>,
    pub query: Box<Query>,
    pub span: NodeSpan,
}

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParam {
    pub name: Ident,
    pub data_type: DataType,
}

/// The body of a CREATE FUNCTION.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBody {
    /// `AS (expr)`.
    Expr(Expr),
    /// `AS 'source'`, kept verbatim.
    String(String),
    /// `AS """source"""` or `AS r'source'`, kept verbatim.
    TextBlock { text: String, raw: bool },
}

/// A CREATE FUNCTION statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFunction {
    pub or_replace: bool,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub params: Vec<FunctionParam>,
    pub returns: Option<DataType>,
    pub language: Option<Ident>,
    pub options: Vec<SqlOption>,
    pub body: Option<FunctionBody>,
    pub span: NodeSpan,
}

/// The kind of object a DROP removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Table,
    View,
    Index,
    Function,
}

impl ObjectType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::Function => "FUNCTION",
        }
    }
}

/// `CASCADE` or `RESTRICT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    Cascade,
    Restrict,
}

/// A DROP statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    pub object_type: ObjectType,
    pub temporary: bool,
    pub if_exists: bool,
    pub names: Vec<ObjectName>,
    /// `ON table` of `DROP INDEX`.
    pub table: Option<ObjectName>,
    pub behavior: Option<DropBehavior>,
    pub span: NodeSpan,
}

/// One change of an ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTableOperation {
    AddColumn { if_not_exists: bool, column: ColumnDef },
    DropColumn { if_exists: bool, name: Ident },
    RenameColumn { old: Ident, new: Ident },
    RenameTable(ObjectName),
    AddConstraint(TableElement),
    DropConstraint(Ident),
    Options(Vec<TableOption>),
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTable {
    pub name: ObjectName,
    pub operations: Vec<AlterTableOperation>,
    pub span: NodeSpan,
}

impl TableElement {
    /// The range of the element, including any `CONSTRAINT name` prefix.
    #[must_use]
    pub const fn span(&self) -> NodeSpan {
        match self {
            Self::Column(column) => column.span,
            Self::Index(index) => index.span,
            Self::ForeignKey(key) => key.span,
            Self::Check(check) => check.span,
        }
    }

    pub(crate) fn set_span(&mut self, span: NodeSpan) {
        match self {
            Self::Column(column) => column.span = span,
            Self::Index(index) => index.span = span,
            Self::ForeignKey(key) => key.span = span,
            Self::Check(check) => check.span = span,
        }
    }
}
