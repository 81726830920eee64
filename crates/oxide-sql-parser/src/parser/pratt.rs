//! Operator precedence for the expression parser.
//!
//! Binding strength is an ordered enum rather than numeric binding powers so
//! dialects can slot their operators into the shared chain by name.

use crate::ast::{BinaryOp, LikeOp, UnaryOp};
use crate::features::{Feature, ParserFeatures};
use crate::lexer::{Keyword, Token, TokenKind};

/// Precedence levels from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest,
    Or,
    Xor,
    And,
    Not,
    /// Comparison, `IS`, `IN`, `BETWEEN`, `LIKE`.
    Relational,
    BitOr,
    BitAnd,
    BitXor,
    Shift,
    Additive,
    Multiplicative,
    /// Prefix `-`, `+`, `~`.
    Unary,
    /// `COLLATE`, `::`, subscripts.
    Postfix,
    Primary,
}

/// An operator that can follow a complete operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Binary(BinaryOp),
    /// `IS [NOT] ..`.
    Is,
    /// `[NOT] IN (..)`.
    In,
    /// `[NOT] BETWEEN .. AND ..`.
    Between,
    /// `[NOT] LIKE|REGEXP|RLIKE ..`.
    Like(LikeOp),
    /// `COLLATE name`.
    Collate,
    /// `expr::type`.
    DoubleColonCast,
    /// `expr[index]`.
    Subscript,
}

impl InfixOp {
    /// Whether `NOT` may precede this operator.
    #[must_use]
    pub const fn is_negatable(self) -> bool {
        matches!(self, Self::In | Self::Between | Self::Like(_))
    }
}

/// Infix operators shared by every dialect.
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub fn generic_infix_operator(token: &Token, _features: ParserFeatures) -> Option<(InfixOp, Precedence)> {
    let binary = |op: BinaryOp| Some((InfixOp::Binary(op), op.precedence()));
    match &token.kind {
        TokenKind::Keyword(Keyword::Or) => binary(BinaryOp::Or),
        TokenKind::Keyword(Keyword::And) => binary(BinaryOp::And),
        TokenKind::Eq => binary(BinaryOp::Eq),
        TokenKind::NotEq => binary(BinaryOp::NotEq),
        TokenKind::Lt => binary(BinaryOp::Lt),
        TokenKind::LtEq => binary(BinaryOp::LtEq),
        TokenKind::Gt => binary(BinaryOp::Gt),
        TokenKind::GtEq => binary(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::Is) => Some((InfixOp::Is, Precedence::Relational)),
        TokenKind::Keyword(Keyword::In) => Some((InfixOp::In, Precedence::Relational)),
        TokenKind::Keyword(Keyword::Between) => Some((InfixOp::Between, Precedence::Relational)),
        TokenKind::Keyword(Keyword::Like) => {
            Some((InfixOp::Like(LikeOp::Like), Precedence::Relational))
        }
        TokenKind::BitOr => binary(BinaryOp::BitOr),
        TokenKind::BitAnd => binary(BinaryOp::BitAnd),
        TokenKind::BitXor => binary(BinaryOp::BitXor),
        TokenKind::LeftShift => binary(BinaryOp::LeftShift),
        TokenKind::RightShift => binary(BinaryOp::RightShift),
        TokenKind::Plus => binary(BinaryOp::Add),
        TokenKind::Minus => binary(BinaryOp::Sub),
        TokenKind::Concat => binary(BinaryOp::Concat),
        TokenKind::Star => binary(BinaryOp::Mul),
        TokenKind::Slash => binary(BinaryOp::Div),
        TokenKind::Percent => binary(BinaryOp::Mod),
        TokenKind::Keyword(Keyword::Collate) => Some((InfixOp::Collate, Precedence::Postfix)),
        TokenKind::DoubleColon => Some((InfixOp::DoubleColonCast, Precedence::Postfix)),
        TokenKind::LeftBracket => Some((InfixOp::Subscript, Precedence::Postfix)),
        _ => None,
    }
}

/// Maps `||` the way dialects that read it as logical OR do, unless the
/// caller asked for concatenation.
#[must_use]
pub const fn pipes_operator(features: ParserFeatures) -> (InfixOp, Precedence) {
    if features.is_enabled(Feature::PipesAsConcat) {
        (InfixOp::Binary(BinaryOp::Concat), Precedence::Additive)
    } else {
        (InfixOp::Binary(BinaryOp::Or), Precedence::Or)
    }
}

/// Converts a token to a prefix operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}
