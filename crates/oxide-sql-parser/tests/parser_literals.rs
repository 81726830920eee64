//! Tests for literal values: numbers, strings, typed literals and
//! booleans.

mod common;
use common::*;

use oxide_sql_parser::ast::{DataType, IntegerValue, Literal};
use oxide_sql_parser::{Expr, ExprKind};

fn literal(sql: &str) -> Literal {
    match parse_expr(sql).kind {
        ExprKind::Literal(literal) => literal,
        other => panic!("Expected literal for {sql}, got {other:?}"),
    }
}

// ===================================================================
// Numbers
// ===================================================================

#[test]
fn integer() {
    assert_eq!(literal("42"), Literal::Integer(IntegerValue::Int(42)));
    assert_eq!(literal("0"), Literal::Integer(IntegerValue::Int(0)));
}

#[test]
fn largest_i64_stays_native() {
    assert_eq!(
        literal("9223372036854775807"),
        Literal::Integer(IntegerValue::Int(i64::MAX))
    );
}

#[test]
fn integer_overflow_becomes_big() {
    assert_eq!(
        literal("9223372036854775808"),
        Literal::Integer(IntegerValue::Big("9223372036854775808".into()))
    );
    assert_eq!(
        round_trip("SELECT 123456789012345678901234567890"),
        "SELECT 123456789012345678901234567890"
    );
}

#[test]
fn decimal_keeps_text() {
    assert_eq!(literal("3.14"), Literal::Decimal("3.14".into()));
    assert_eq!(literal(".5"), Literal::Decimal(".5".into()));
}

#[test]
fn float_keeps_text() {
    assert_eq!(literal("1e10"), Literal::Float("1e10".into()));
    assert_eq!(literal("2.5E-3"), Literal::Float("2.5E-3".into()));
}

#[test]
fn hex_number() {
    assert_eq!(literal("0xFF"), Literal::HexNumber("0xFF".into()));
}

#[test]
fn negative_number_is_unary() {
    assert!(matches!(parse_expr("-5").kind, ExprKind::Unary { .. }));
}

// ===================================================================
// Strings
// ===================================================================

#[test]
fn simple_string() {
    assert_eq!(literal("'hello'"), Literal::String("hello".into()));
}

#[test]
fn doubled_quote_escape() {
    assert_eq!(literal("'it''s'"), Literal::String("it's".into()));
    assert_eq!(round_trip("SELECT 'it''s'"), "SELECT 'it''s'");
}

#[test]
fn backslash_is_literal_in_generic() {
    assert_eq!(literal(r"'a\nb'"), Literal::String(r"a\nb".into()));
}

#[test]
fn adjacent_strings_concatenate() {
    assert_eq!(literal("'ab' 'cd'"), Literal::String("abcd".into()));
}

#[test]
fn empty_string() {
    assert_eq!(literal("''"), Literal::String(String::new()));
}

#[test]
fn unicode_string() {
    assert_eq!(literal("'héllo wörld'"), Literal::String("héllo wörld".into()));
}

#[test]
fn national_string() {
    assert_eq!(literal("N'abc'"), Literal::NationalString("abc".into()));
    round_trip("SELECT N'abc'");
}

#[test]
fn hex_string() {
    assert_eq!(literal("X'CAFE'"), Literal::HexString("CAFE".into()));
    round_trip("SELECT X'CAFE'");
}

// ===================================================================
// Typed literals
// ===================================================================

#[test]
fn date_literal() {
    assert_eq!(
        parse_expr("DATE '2024-01-15'"),
        Expr::from(ExprKind::TypedString {
            data_type: DataType::Date,
            value: "2024-01-15".into(),
        })
    );
}

#[test]
fn timestamp_literal() {
    assert_eq!(
        parse_expr("TIMESTAMP '2024-01-15 10:00:00'"),
        Expr::from(ExprKind::TypedString {
            data_type: DataType::Timestamp,
            value: "2024-01-15 10:00:00".into(),
        })
    );
    round_trip("SELECT TIME '10:00:00'");
}

#[test]
fn date_without_string_is_a_column() {
    assert_eq!(parse_expr("date"), Expr::column("date"));
}

// ===================================================================
// Booleans and NULL
// ===================================================================

#[test]
fn boolean_literals() {
    assert_eq!(literal("TRUE"), Literal::Boolean(true));
    assert_eq!(literal("FALSE"), Literal::Boolean(false));
}

#[test]
fn null_literal() {
    assert_eq!(literal("NULL"), Literal::Null);
}
