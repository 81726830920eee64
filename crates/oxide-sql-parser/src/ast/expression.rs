//! Expression AST types.

use super::{DataType, Ident, ObjectName, OrderBy, Query};
use crate::lexer::{NodeSpan, Span};
use crate::parser::Precedence;

/// An integer value that may exceed 64 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerValue {
    Int(i64),
    /// Decimal digits, with a leading `-` when negative.
    Big(String),
}

impl IntegerValue {
    /// Parses an optionally signed run of decimal digits.
    ///
    /// Values outside the `i64` range are promoted to [`IntegerValue::Big`].
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(text.parse::<i64>().map_or_else(
            |_| {
                let mut big = String::new();
                if text.starts_with('-') {
                    big.push('-');
                }
                big.push_str(digits);
                Self::Big(big)
            },
            Self::Int,
        ))
    }
}

impl std::fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Big(digits) => f.write_str(digits),
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(IntegerValue),
    /// Decimal literal, source text kept (e.g. `3.14`).
    Decimal(String),
    /// Float literal with exponent, source text kept (e.g. `1e10`).
    Float(String),
    /// Hex number, source text kept (e.g. `0x1F`).
    HexNumber(String),
    String(String),
    /// `N'...'`.
    NationalString(String),
    /// Hex digits of `X'...'`.
    HexString(String),
    Boolean(bool),
    Null,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Integer division (`DIV`).
    IntDiv,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// Null-safe equality (`<=>`).
    NullSafeEq,

    // Logical
    And,
    Or,
    Xor,

    // String
    Concat,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// Returns the SQL representation of this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::IntDiv => "DIV",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::NullSafeEq => "<=>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Concat => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }

    /// Returns the binding strength of this operator.
    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Or => Precedence::Or,
            Self::Xor => Precedence::Xor,
            Self::And => Precedence::And,
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::NullSafeEq => Precedence::Relational,
            Self::BitOr => Precedence::BitOr,
            Self::BitAnd => Precedence::BitAnd,
            Self::BitXor => Precedence::BitXor,
            Self::LeftShift | Self::RightShift => Precedence::Shift,
            Self::Add | Self::Sub | Self::Concat => Precedence::Additive,
            Self::Mul | Self::Div | Self::Mod | Self::IntDiv => Precedence::Multiplicative,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Identity (+)
    Plus,
    /// Logical NOT
    Not,
    /// Bitwise NOT (~)
    BitNot,
    /// `BINARY expr`, a binary-string cast.
    Binary,
}

impl UnaryOp {
    /// Returns the SQL representation of this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "NOT",
            Self::BitNot => "~",
            Self::Binary => "BINARY",
        }
    }

    /// The precedence at which the operand is parsed.
    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Not => Precedence::Not,
            Self::Neg | Self::Plus | Self::BitNot | Self::Binary => Precedence::Unary,
        }
    }
}

/// Pattern-matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOp {
    Like,
    RegExp,
    RLike,
}

impl LikeOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::RegExp => "REGEXP",
            Self::RLike => "RLIKE",
        }
    }
}

/// Right-hand side of `IS [NOT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsValue {
    Null,
    True,
    False,
    Unknown,
}

impl IsValue {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Niladic date and time functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentTimeKind {
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    LocalTime,
    LocalTimestamp,
    Sysdate,
    SysTimestamp,
}

impl CurrentTimeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::LocalTime => "LOCALTIME",
            Self::LocalTimestamp => "LOCALTIMESTAMP",
            Self::Sysdate => "SYSDATE",
            Self::SysTimestamp => "SYSTIMESTAMP",
        }
    }
}

macro_rules! interval_units {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// Units of `INTERVAL` and fields of `EXTRACT`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum IntervalUnit {
            $($variant),*
        }

        impl IntervalUnit {
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),*
                }
            }
        }
    };
}

interval_units! {
    Year => "YEAR",
    Quarter => "QUARTER",
    Month => "MONTH",
    Week => "WEEK",
    Day => "DAY",
    Hour => "HOUR",
    Minute => "MINUTE",
    Second => "SECOND",
    Microsecond => "MICROSECOND",
    YearMonth => "YEAR_MONTH",
    DayHour => "DAY_HOUR",
    DayMinute => "DAY_MINUTE",
    DaySecond => "DAY_SECOND",
    DayMicrosecond => "DAY_MICROSECOND",
    HourMinute => "HOUR_MINUTE",
    HourSecond => "HOUR_SECOND",
    HourMicrosecond => "HOUR_MICROSECOND",
    MinuteSecond => "MINUTE_SECOND",
    MinuteMicrosecond => "MINUTE_MICROSECOND",
    SecondMicrosecond => "SECOND_MICROSECOND",
}

impl IntervalUnit {
    /// Folds `from TO to` into the compound unit, e.g. `DAY TO HOUR` is
    /// `DAY_HOUR`.
    #[must_use]
    pub const fn compound(from: Self, to: Self) -> Option<Self> {
        Some(match (from, to) {
            (Self::Year, Self::Month) => Self::YearMonth,
            (Self::Day, Self::Hour) => Self::DayHour,
            (Self::Day, Self::Minute) => Self::DayMinute,
            (Self::Day, Self::Second) => Self::DaySecond,
            (Self::Day, Self::Microsecond) => Self::DayMicrosecond,
            (Self::Hour, Self::Minute) => Self::HourMinute,
            (Self::Hour, Self::Second) => Self::HourSecond,
            (Self::Hour, Self::Microsecond) => Self::HourMicrosecond,
            (Self::Minute, Self::Second) => Self::MinuteSecond,
            (Self::Minute, Self::Microsecond) => Self::MinuteMicrosecond,
            (Self::Second, Self::Microsecond) => Self::SecondMicrosecond,
            _ => return None,
        })
    }
}

/// Which namespace a variable reference lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableScope {
    /// `@name`
    User,
    /// `@@name`
    System,
    /// `@@global.name`
    Global,
    /// `@@session.name`
    Session,
}

/// A string literal carrying character-set metadata.
///
/// Dialects with character-set introducers produce this instead of
/// [`Literal::String`], e.g. `_utf8mb4 'text' COLLATE utf8mb4_bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharString {
    /// Introducer without the leading underscore, e.g. `utf8mb4`.
    pub charset: Option<String>,
    /// The text, or hex digits when `hex` is set.
    pub value: String,
    /// True for `_charset X'..'` and `_charset 0x..`.
    pub hex: bool,
    pub collate: Option<String>,
}

impl CharString {
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            charset: None,
            value: value.into(),
            hex: false,
            collate: None,
        }
    }
}

/// Modifier of a full-text `MATCH ... AGAINST` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchModifier {
    NaturalLanguage,
    NaturalLanguageWithQueryExpansion,
    Boolean,
    WithQueryExpansion,
}

impl SearchModifier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NaturalLanguage => "IN NATURAL LANGUAGE MODE",
            Self::NaturalLanguageWithQueryExpansion => {
                "IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION"
            }
            Self::Boolean => "IN BOOLEAN MODE",
            Self::WithQueryExpansion => "WITH QUERY EXPANSION",
        }
    }
}

/// Behavior of a `JSON_TABLE` column on empty or failing paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonOnResponse {
    Null,
    Error,
    Default(Box<Expr>),
}

/// A column of `JSON_TABLE(... COLUMNS (...))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonTableColumn {
    /// `name FOR ORDINALITY`
    Ordinality { name: Ident },
    /// `name type [EXISTS] PATH 'path' [.. ON EMPTY] [.. ON ERROR]`
    Path {
        name: Ident,
        data_type: DataType,
        exists: bool,
        path: String,
        on_empty: Option<JsonOnResponse>,
        on_error: Option<JsonOnResponse>,
    },
    /// `NESTED [PATH] 'path' COLUMNS (...)`
    Nested {
        path: String,
        columns: Vec<JsonTableColumn>,
    },
}

/// `JSON_TABLE(expr, path COLUMNS (...))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTable {
    pub expr: Expr,
    pub path: String,
    pub columns: Vec<JsonTableColumn>,
}

/// Window frame unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnits {
    Rows,
    Range,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

/// `ROWS|RANGE start` or `ROWS|RANGE BETWEEN start AND end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

/// `OVER (...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderBy>,
    pub frame: Option<WindowFrame>,
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Function name.
    pub name: ObjectName,
    /// Function arguments; `COUNT(*)` holds a single wildcard.
    pub args: Vec<Expr>,
    /// Whether DISTINCT is applied.
    pub distinct: bool,
    /// `ORDER BY` inside the argument list of an aggregate.
    pub order_by: Vec<OrderBy>,
    /// `SEPARATOR '...'` of a string aggregate.
    pub separator: Option<String>,
    pub over: Option<WindowSpec>,
}

impl FunctionCall {
    #[must_use]
    pub fn new(name: impl Into<ObjectName>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            distinct: false,
            order_by: vec![],
            separator: None,
            over: None,
        }
    }
}

/// The list side of `IN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InList {
    Values(Vec<Expr>),
    Subquery(Box<Query>),
}

/// An expression and the source range it was parsed from.
///
/// Equality compares the kind only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: NodeSpan,
}

/// The shapes an expression can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// A literal value.
    Literal(Literal),

    /// A string literal with character-set metadata.
    CharString(CharString),

    /// A literal introduced by a type name, e.g. `DATE '2024-01-01'`.
    TypedString { data_type: DataType, value: String },

    /// An integer written as a typed string, e.g. `BIGINT '42'`.
    TypedInteger {
        data_type: DataType,
        /// The string body as written.
        text: String,
        value: IntegerValue,
    },

    /// A column reference, possibly qualified.
    Column(ObjectName),

    /// `*` or `table.*`.
    Wildcard { qualifier: Option<ObjectName> },

    /// A parameter placeholder: `?` (positional) or `:name` (named).
    Parameter {
        /// Parameter name (for named parameters).
        name: Option<String>,
        /// Position (1-indexed, for positional parameters).
        position: usize,
    },

    /// A session or user variable, e.g. `@@global.sql_mode`.
    Variable { name: String, scope: VariableScope },

    /// A binary expression.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// An explicitly parenthesized expression.
    Nested(Box<Expr>),

    /// A row constructor, e.g. `(a, b)`.
    Row(Vec<Expr>),

    /// A function call.
    Function(FunctionCall),

    /// A scalar subquery.
    Subquery(Box<Query>),

    /// `EXISTS (subquery)`.
    Exists(Box<Query>),

    /// `expr IS [NOT] NULL|TRUE|FALSE|UNKNOWN`.
    Is {
        expr: Box<Expr>,
        value: IsValue,
        negated: bool,
    },

    /// `expr [NOT] IN (...)`.
    In {
        expr: Box<Expr>,
        list: InList,
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// `expr [NOT] LIKE|REGEXP|RLIKE pattern [ESCAPE escape]`.
    Like {
        expr: Box<Expr>,
        op: LikeOp,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
        negated: bool,
    },

    /// A CASE expression.
    Case {
        /// The operand (for simple CASE).
        operand: Option<Box<Expr>>,
        /// WHEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// `CAST(expr AS type)`, or `expr::type` when `double_colon` is set.
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
        double_colon: bool,
    },

    /// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
    Convert {
        expr: Box<Expr>,
        data_type: Option<DataType>,
        charset: Option<Ident>,
    },

    /// `expr COLLATE collation`.
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },

    /// `INTERVAL value unit`.
    Interval { value: Box<Expr>, unit: IntervalUnit },

    /// `EXTRACT(unit FROM expr)`.
    Extract { unit: IntervalUnit, expr: Box<Expr> },

    /// `CURRENT_DATE`, `SYSDATE` and friends, written without parentheses.
    CurrentTime(CurrentTimeKind),

    /// `ARRAY[...]` when `keyword` is set, otherwise `[...]`.
    Array { elements: Vec<Expr>, keyword: bool },

    /// `expr[index]`.
    Subscript { expr: Box<Expr>, index: Box<Expr> },

    /// `MATCH (columns) AGAINST (expr [modifier])`.
    MatchAgainst {
        columns: Vec<Expr>,
        against: Box<Expr>,
        modifier: Option<SearchModifier>,
    },

    /// `JSON_TABLE(...)`.
    JsonTable(Box<JsonTable>),
}

impl Expr {
    /// Wraps `kind` with the span it was parsed from.
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span: NodeSpan(span),
        }
    }

    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = NodeSpan(span);
        self
    }

    /// Creates a column reference; dots separate qualifiers.
    #[must_use]
    pub fn column(name: &str) -> Self {
        ExprKind::Column(ObjectName::from(name)).into()
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::literal(Literal::Integer(IntegerValue::Int(value)))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(Literal::String(value.into()))
    }

    /// Creates a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::literal(Literal::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::literal(Literal::Null)
    }

    #[must_use]
    pub const fn literal(literal: Literal) -> Self {
        Self::new(ExprKind::Literal(literal), Span::new(0, 0))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        ExprKind::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
        .into()
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        }
        .into()
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// How tightly this expression binds when printed without parentheses.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match &self.kind {
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Unary { op, .. } => op.precedence(),
            ExprKind::Is { .. }
            | ExprKind::In { .. }
            | ExprKind::Between { .. }
            | ExprKind::Like { .. } => Precedence::Relational,
            ExprKind::Interval { .. } => Precedence::Unary,
            ExprKind::Collate { .. }
            | ExprKind::Subscript { .. }
            | ExprKind::Cast {
                double_colon: true, ..
            } => Precedence::Postfix,
            _ => Precedence::Primary,
        }
    }
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Self {
            kind,
            span: NodeSpan::default(),
        }
    }
}
