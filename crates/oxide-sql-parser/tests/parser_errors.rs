//! Tests for parser error cases: error kinds, positions and messages.

mod common;
use common::*;

use oxide_sql_parser::dialect::GenericDialect;
use oxide_sql_parser::{ParseErrorKind, Parser, ParserFeatures};

// ===================================================================
// Syntax errors
// ===================================================================

#[test]
fn error_incomplete_select() {
    let err = parse_err("SELECT");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert!(err.message.starts_with("unexpected end of input"), "{err}");
}

#[test]
fn error_missing_from_table() {
    let err = parse_err("SELECT * FROM");
    assert!(err.is_syntax());
    assert_eq!(err.expected.as_deref(), Some("identifier"));
}

#[test]
fn error_unclosed_paren() {
    let err = parse_err("SELECT (1 + 2");
    assert!(err.is_syntax());
    assert_eq!(err.expected.as_deref(), Some("')'"));
}

#[test]
fn error_trailing_tokens() {
    let err = parse_err("SELECT 1 2");
    assert!(err.is_syntax());
    assert_eq!(err.expected.as_deref(), Some("';' or end of input"));
    assert_eq!(err.offset(), 9);
}

#[test]
fn error_unknown_statement() {
    let err = parse_err("FROBNICATE everything");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.offset(), 0);
}

#[test]
fn error_reserved_word_as_table() {
    let err = parse_err("SELECT * FROM select");
    assert!(err.is_syntax());
    assert_eq!(err.found.as_deref(), Some("SELECT"));
}

#[test]
fn error_case_without_when() {
    let err = parse_err("SELECT CASE x END");
    assert_eq!(err.expected.as_deref(), Some("WHEN"));
}

#[test]
fn error_invalid_interval_range() {
    let err = parse_err("SELECT INTERVAL '1' HOUR TO DAY");
    assert!(err.is_syntax());
    assert!(err.message.contains("invalid interval range HOUR TO DAY"), "{err}");
}

#[test]
fn error_delete_without_from() {
    let err = parse_err("DELETE t WHERE a = 1");
    assert_eq!(err.expected.as_deref(), Some("FROM"));
}

#[test]
fn error_merge_action_mismatch() {
    let err = parse_err("MERGE INTO t USING s ON t.id = s.id WHEN NOT MATCHED THEN DELETE");
    assert!(err.message.contains("WHEN NOT MATCHED"), "{err}");
}

#[test]
fn error_limit_comma_in_generic() {
    let err = parse_err("SELECT a FROM t LIMIT 5, 10");
    assert!(err.is_syntax());
}

// ===================================================================
// Lexical errors
// ===================================================================

#[test]
fn error_unterminated_string() {
    let err = parse_err("SELECT 'abc");
    assert_eq!(err.kind, ParseErrorKind::Lex);
    assert!(err.message.contains("unterminated string"));
    assert_eq!(err.offset(), 7);
}

#[test]
fn error_unterminated_comment() {
    let err = parse_err("SELECT 1 /* no end");
    assert_eq!(err.kind, ParseErrorKind::Lex);
}

#[test]
fn error_unknown_character() {
    let err = parse_err("SELECT $");
    assert_eq!(err.kind, ParseErrorKind::Lex);
    assert!(err.message.contains('$'));
}

#[test]
fn error_lexing_first_token() {
    let err = Parser::new("'open", &GenericDialect, ParserFeatures::new())
        .err()
        .expect("lex error on the first token");
    assert_eq!(err.kind, ParseErrorKind::Lex);
}

// ===================================================================
// Unsupported constructs
// ===================================================================

#[test]
fn unsupported_statements() {
    for sql in [
        "GRANT SELECT ON t TO u",
        "REVOKE ALL ON t FROM u",
        "SHOW TABLES",
        "EXPLAIN SELECT 1",
        "TRUNCATE t",
        "CALL p()",
        "USE db",
    ] {
        let err = parse_err(sql);
        assert_eq!(err.kind, ParseErrorKind::Unsupported, "{sql}");
    }
}

#[test]
fn unsupported_objects_name_the_construct() {
    let err = parse_err("CREATE SEQUENCE s");
    assert_eq!(err.message, "CREATE SEQUENCE is not supported");
    let err = parse_err("DROP SCHEMA s");
    assert_eq!(err.message, "DROP SCHEMA is not supported");
    let err = parse_err("ALTER VIEW v AS SELECT 1");
    assert_eq!(err.message, "ALTER VIEW is not supported");
}

// ===================================================================
// Positions
// ===================================================================

#[test]
fn position_is_line_and_column() {
    let err = parse_err("SELECT a\nFROM t\nWHERE ,");
    assert_eq!(err.position.line, 3);
    assert_eq!(err.position.column, 7);
    assert_eq!(
        err.to_string(),
        "syntax error at line 3, column 7: expected expression, found ,"
    );
}

#[test]
fn first_error_stops_the_list() {
    let mut parser = Parser::new(
        "SELECT 1; SELECT FROM; SELECT 3",
        &GenericDialect,
        ParserFeatures::new(),
    )
    .unwrap();
    let results: Vec<_> = parser.statements().collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

// ===================================================================
// Nesting limit
// ===================================================================

#[test]
fn deep_parentheses_fail_cleanly() {
    let sql = format!("SELECT {}1{}", "(".repeat(20_000), ")".repeat(20_000));
    let err = parse_err(&sql);
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert!(err.message.contains("nesting too deep"), "{err}");
}

#[test]
fn deep_subqueries_fail_cleanly() {
    let sql = format!("SELECT * FROM {}t{}", "(SELECT * FROM ".repeat(5_000), ")".repeat(5_000));
    assert!(parse_err(&sql).message.contains("nesting too deep"));
}

#[test]
fn nesting_limit_can_be_raised() {
    let sql = format!("SELECT {}1{}", "(".repeat(100), ")".repeat(100));
    assert!(parse_err(&sql).message.contains("limit 64"));
    let mut parser = Parser::new(&sql, &GenericDialect, ParserFeatures::new())
        .unwrap()
        .with_max_depth(110);
    assert!(parser.parse_statements().is_ok());
}
