//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node owns its children. Dialect-specific metadata lives in explicit
//! optional fields (`CharString::charset`, `FunctionCall::separator`, ...)
//! so the node shapes document everything a dialect may attach.

mod ddl;
mod expression;
mod ident;
mod query;
mod statement;
mod types;
mod visitor;

pub use ddl::{
    AlterTable, AlterTableOperation, CheckConstraint, ColumnDef, ColumnOption, CreateFunction,
    CreateIndex, CreateTable, CreateView, DirectoryKind, DropBehavior, DropStatement, ForeignKey,
    ForeignKeyRef, FunctionBody, FunctionParam, GeneratedStorage, IndexColumn, IndexDefinition,
    IndexKind, IndexOption, ObjectType, ReferentialAction, SqlOption, TableElement, TableOption,
};
pub use expression::{
    BinaryOp, CharString, CurrentTimeKind, Expr, ExprKind, FrameBound, FrameUnits, FunctionCall,
    InList, IntegerValue, IntervalUnit, IsValue, JsonOnResponse, JsonTable, JsonTableColumn,
    LikeOp, Literal, SearchModifier, UnaryOp, VariableScope, WindowFrame, WindowSpec,
};
pub use ident::{Ident, ObjectName};
pub use query::{
    Cte, Distinct, Fetch, IndexHint, IndexHintKind, IndexHintScope, JoinConstraint, JoinType,
    LockClause, LockStrength, LockWait, NullOrdering, OrderBy, OrderDirection, Query, Select,
    SelectInto, SelectItem, SelectModifier, SetExpr, SetOperator, SetQuantifier, TableAlias,
    TableRef, TempScope, Top, With,
};
pub use statement::{
    Assert, Assignment, Declare, Delete, Insert, InsertSource, Merge, MergeAction, MergeClause,
    MergeMatch, ParsedStatement, Statement, TransactionStart, Update,
};
pub use types::{DataType, IntegerKind, StructField};
pub use visitor::{walk, NodeRef, Visitor};
