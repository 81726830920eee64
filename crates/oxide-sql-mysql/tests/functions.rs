//! Tests for functions with MySQL-specific argument syntax.

mod common;
use common::*;

use oxide_sql_parser::ast::{
    CharString, FunctionCall, JsonOnResponse, JsonTableColumn, SearchModifier, TableRef,
};
use oxide_sql_parser::{Expr, ExprKind};

fn call(sql: &str) -> FunctionCall {
    match parse_expr(sql).kind {
        ExprKind::Function(call) => call,
        other => panic!("Expected function call, got {other:?}"),
    }
}

// ===================================================================
// MATCH .. AGAINST
// ===================================================================

#[test]
fn match_against_modifiers() {
    let cases = [
        ("MATCH (a) AGAINST ('x')", None),
        (
            "MATCH (a) AGAINST ('x' IN NATURAL LANGUAGE MODE)",
            Some(SearchModifier::NaturalLanguage),
        ),
        (
            "MATCH (a) AGAINST ('x' IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION)",
            Some(SearchModifier::NaturalLanguageWithQueryExpansion),
        ),
        (
            "MATCH (a) AGAINST ('x' IN BOOLEAN MODE)",
            Some(SearchModifier::Boolean),
        ),
        (
            "MATCH (a) AGAINST ('x' WITH QUERY EXPANSION)",
            Some(SearchModifier::WithQueryExpansion),
        ),
    ];
    for (sql, expected) in cases {
        let ExprKind::MatchAgainst { modifier, .. } = parse_expr(sql).kind else {
            panic!("Expected MATCH for {sql}");
        };
        assert_eq!(modifier, expected, "{sql}");
    }
}

#[test]
fn match_against_renders() {
    assert_eq!(
        expr_sql("match(title, body) against('+rust -go' in boolean mode)"),
        "MATCH (title, body) AGAINST ('+rust -go' IN BOOLEAN MODE)"
    );
}

#[test]
fn match_without_against_is_a_call() {
    let call = call("match(a, b)");
    assert_eq!(call.name.to_string(), "match");
    assert_eq!(call.args.len(), 2);
}

#[test]
fn match_in_where_clause() {
    let select = parse_select(
        "SELECT id FROM posts WHERE MATCH (body) AGAINST ('db' IN BOOLEAN MODE) AND id > 3",
    );
    let Some(ExprKind::Binary { left, .. }) = select.selection.map(|e| e.kind) else {
        panic!("expected AND");
    };
    assert!(matches!(left.kind, ExprKind::MatchAgainst { .. }));
}

// ===================================================================
// POSITION, CONVERT, MOD
// ===================================================================

#[test]
fn position_becomes_locate() {
    let call = call("POSITION('a' IN name)");
    assert_eq!(call.name.to_string(), "LOCATE");
    assert_eq!(
        call.args,
        vec![Expr::from(ExprKind::CharString(CharString::plain("a"))), Expr::column("name")]
    );
    assert_eq!(expr_sql("position('a' in name)"), "LOCATE('a', name)");
}

#[test]
fn position_with_plain_arguments() {
    let call = call("position(x)");
    assert_eq!(call.name.to_string(), "position");
    assert_eq!(call.args, vec![Expr::column("x")]);
}

#[test]
fn convert_forms() {
    assert_eq!(
        expr_sql("convert(name using utf8mb4)"),
        "CONVERT(name USING utf8mb4)"
    );
    assert_eq!(expr_sql("CONVERT('12', SIGNED)"), "CONVERT('12', SIGNED)");
    assert_eq!(expr_sql("CONVERT(x, CHAR(10))"), "CONVERT(x, CHAR(10))");
}

#[test]
fn convert_needs_a_target() {
    parse_err("SELECT CONVERT(x)");
}

#[test]
fn mod_function_call() {
    let call = call("MOD(a, 3)");
    assert_eq!(call.args.len(), 2);
    assert_eq!(expr_sql("MOD(a, 3)"), "MOD(a, 3)");
}

// ===================================================================
// GROUP_CONCAT
// ===================================================================

#[test]
fn group_concat_clauses() {
    let call = call("GROUP_CONCAT(DISTINCT name ORDER BY name DESC SEPARATOR '; ')");
    assert!(call.distinct);
    assert_eq!(call.order_by.len(), 1);
    assert_eq!(call.separator.as_deref(), Some("; "));
    assert_eq!(
        expr_sql("group_concat(distinct name order by name desc separator '; ')"),
        "group_concat(DISTINCT name ORDER BY name DESC SEPARATOR '; ')"
    );
}

#[test]
fn group_concat_plain() {
    let call = call("GROUP_CONCAT(a, '-', b)");
    assert!(!call.distinct);
    assert_eq!(call.args.len(), 3);
    assert_eq!(call.separator, None);
}

// ===================================================================
// JSON_TABLE
// ===================================================================

const JSON_TABLE_SQL: &str = "SELECT jt.* FROM docs, JSON_TABLE(docs.body, '$[*]' COLUMNS (\
    rowid FOR ORDINALITY, \
    name VARCHAR(40) PATH '$.name' DEFAULT 'none' ON EMPTY NULL ON ERROR, \
    has_tags INT EXISTS PATH '$.tags', \
    NESTED PATH '$.tags[*]' COLUMNS (tag TEXT PATH '$'))) AS jt";

#[test]
fn json_table_columns() {
    let select = parse_select(JSON_TABLE_SQL);
    let TableRef::Function {
        expr: Expr {
            kind: ExprKind::JsonTable(table),
            ..
        },
        alias,
        ..
    } = &select.from[1]
    else {
        panic!("expected JSON_TABLE, got {:?}", select.from[1]);
    };
    assert_eq!(alias.as_ref().map(|a| a.name.value.as_str()), Some("jt"));
    assert_eq!(table.path, "$[*]");
    assert_eq!(table.columns.len(), 4);
    assert!(matches!(&table.columns[0], JsonTableColumn::Ordinality { name } if name.value == "rowid"));
    let JsonTableColumn::Path {
        exists,
        on_empty,
        on_error,
        ..
    } = &table.columns[1]
    else {
        panic!("expected path column");
    };
    assert!(!exists);
    assert!(matches!(on_empty, Some(JsonOnResponse::Default(_))));
    assert_eq!(on_error, &Some(JsonOnResponse::Null));
    assert!(matches!(&table.columns[2], JsonTableColumn::Path { exists: true, .. }));
    let JsonTableColumn::Nested { path, columns } = &table.columns[3] else {
        panic!("expected nested column");
    };
    assert_eq!(path, "$.tags[*]");
    assert_eq!(columns.len(), 1);
}

#[test]
fn json_table_round_trip() {
    assert_eq!(
        round_trip(JSON_TABLE_SQL),
        "SELECT jt.* FROM docs, JSON_TABLE(docs.body, '$[*]' COLUMNS (\
         rowid FOR ORDINALITY, \
         name VARCHAR(40) PATH '$.name' DEFAULT 'none' ON EMPTY NULL ON ERROR, \
         has_tags INT EXISTS PATH '$.tags', \
         NESTED PATH '$.tags[*]' COLUMNS (tag TEXT PATH '$'))) jt"
    );
}
