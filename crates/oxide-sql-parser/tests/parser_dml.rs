//! Tests for INSERT, UPDATE, DELETE and MERGE.

mod common;
use common::*;

use oxide_sql_parser::ast::{
    Assignment, Ident, InsertSource, MergeAction, MergeMatch, ObjectName, OrderDirection,
    Statement, TableRef,
};
use oxide_sql_parser::Expr;

fn insert(sql: &str) -> oxide_sql_parser::ast::Insert {
    match parse(sql) {
        Statement::Insert(insert) => *insert,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

fn update(sql: &str) -> oxide_sql_parser::ast::Update {
    match parse(sql) {
        Statement::Update(update) => *update,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

fn delete(sql: &str) -> oxide_sql_parser::ast::Delete {
    match parse(sql) {
        Statement::Delete(delete) => *delete,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

fn merge(sql: &str) -> oxide_sql_parser::ast::Merge {
    match parse(sql) {
        Statement::Merge(merge) => *merge,
        other => panic!("Expected MERGE, got {other:?}"),
    }
}

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_values_with_columns() {
    let ins = insert("INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b')");
    assert_eq!(ins.table, ObjectName::from("users"));
    assert_eq!(ins.columns, vec![Ident::new("id"), Ident::new("name")]);
    let InsertSource::Values(rows) = &ins.source else {
        panic!("Expected VALUES");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec![Expr::integer(2), Expr::string("b")]);
}

#[test]
fn insert_without_into_or_columns() {
    let ins = insert("INSERT t VALUES (1)");
    assert!(ins.columns.is_empty());
    assert!(matches!(ins.source, InsertSource::Values(_)));
}

#[test]
fn insert_default_values() {
    let ins = insert("INSERT INTO t DEFAULT VALUES");
    assert_eq!(ins.source, InsertSource::DefaultValues);
}

#[test]
fn insert_select() {
    let ins = insert("INSERT INTO archive SELECT * FROM t WHERE old");
    assert!(matches!(ins.source, InsertSource::Query(_)));
}

#[test]
fn insert_parenthesized_select_is_not_a_column_list() {
    let ins = insert("INSERT INTO archive (SELECT * FROM t)");
    assert!(ins.columns.is_empty());
    assert!(matches!(ins.source, InsertSource::Query(_)));
}

#[test]
fn insert_columns_then_select() {
    let ins = insert("INSERT INTO archive (a, b) SELECT a, b FROM t");
    assert_eq!(ins.columns.len(), 2);
    assert!(matches!(ins.source, InsertSource::Query(_)));
}

#[test]
fn insert_empty_row() {
    let ins = insert("INSERT INTO t VALUES ()");
    assert_eq!(ins.source, InsertSource::Values(vec![vec![]]));
}

#[test]
fn on_duplicate_key_needs_dialect_support() {
    let err = parse_err("INSERT INTO t VALUES (1) ON DUPLICATE KEY UPDATE a = 1");
    assert!(err.is_syntax());
}

#[test]
fn insert_missing_source() {
    let err = parse_err("INSERT INTO t (a)");
    assert_eq!(
        err.expected.as_deref(),
        Some("VALUES, DEFAULT VALUES or a query")
    );
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_simple() {
    let upd = update("UPDATE users SET name = 'x', age = age + 1 WHERE id = 7");
    assert_eq!(upd.table, TableRef::named("users"));
    assert_eq!(upd.assignments.len(), 2);
    assert_eq!(
        upd.assignments[0],
        Assignment {
            target: ObjectName::from("name"),
            value: Expr::string("x"),
        }
    );
    assert_eq!(upd.selection, Some(Expr::column("id").eq(Expr::integer(7))));
}

#[test]
fn update_qualified_target() {
    let upd = update("UPDATE t SET t.a = 1");
    assert_eq!(upd.assignments[0].target, ObjectName::from("t.a"));
}

#[test]
fn update_with_join_and_from() {
    let upd = update("UPDATE a JOIN b ON a.id = b.id SET a.x = b.x");
    assert!(matches!(upd.table, TableRef::Join { .. }));

    let upd = update("UPDATE a SET x = b.x FROM b WHERE a.id = b.id");
    assert_eq!(upd.from.len(), 1);
    assert!(upd.selection.is_some());
}

#[test]
fn update_order_by_limit() {
    let upd = update("UPDATE t SET a = 0 ORDER BY id DESC LIMIT 10");
    assert_eq!(upd.order_by[0].direction, Some(OrderDirection::Desc));
    assert_eq!(upd.limit, Some(Expr::integer(10)));
}

#[test]
fn update_without_set_fails() {
    let err = parse_err("UPDATE t WHERE a = 1");
    assert_eq!(err.expected.as_deref(), Some("SET"));
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_with_where() {
    let del = delete("DELETE FROM users WHERE id = 1");
    assert_eq!(del.table, ObjectName::from("users"));
    assert!(del.alias.is_none());
    assert!(del.selection.is_some());
}

#[test]
fn delete_all_rows() {
    let del = delete("DELETE FROM logs");
    assert!(del.selection.is_none());
    assert!(del.order_by.is_empty());
}

#[test]
fn delete_with_alias() {
    let del = delete("DELETE FROM users AS u WHERE u.id = 1");
    assert_eq!(del.alias, Some(Ident::new("u")));
    let del = delete("DELETE FROM users u");
    assert_eq!(del.alias, Some(Ident::new("u")));
}

#[test]
fn delete_order_by_limit() {
    let del = delete("DELETE FROM logs ORDER BY created LIMIT 100");
    assert_eq!(del.order_by.len(), 1);
    assert_eq!(del.limit, Some(Expr::integer(100)));
}

// ===================================================================
// MERGE
// ===================================================================

#[test]
fn merge_all_clause_kinds() {
    let m = merge(
        "MERGE INTO target t USING source s ON t.id = s.id \
         WHEN MATCHED AND s.deleted THEN DELETE \
         WHEN MATCHED THEN UPDATE SET t.v = s.v \
         WHEN NOT MATCHED THEN INSERT (id, v) VALUES (s.id, s.v) \
         WHEN NOT MATCHED BY SOURCE THEN DELETE",
    );
    assert_eq!(m.table, ObjectName::from("target"));
    assert_eq!(m.alias.map(|a| a.name), Some(Ident::new("t")));
    assert!(matches!(m.source, TableRef::Table { alias: Some(_), .. }));
    assert_eq!(m.clauses.len(), 4);

    assert_eq!(m.clauses[0].matched, MergeMatch::Matched);
    assert!(m.clauses[0].condition.is_some());
    assert_eq!(m.clauses[0].action, MergeAction::Delete);

    assert!(matches!(m.clauses[1].action, MergeAction::Update(ref set) if set.len() == 1));

    assert_eq!(m.clauses[2].matched, MergeMatch::NotMatched);
    let MergeAction::Insert { columns, values } = &m.clauses[2].action else {
        panic!("Expected INSERT action");
    };
    assert_eq!(columns.len(), 2);
    assert_eq!(values.len(), 2);

    assert_eq!(m.clauses[3].matched, MergeMatch::NotMatchedBySource);
}

#[test]
fn merge_not_matched_by_target() {
    let m = merge(
        "MERGE t USING s ON t.id = s.id WHEN NOT MATCHED BY TARGET THEN INSERT ROW",
    );
    assert_eq!(m.clauses[0].matched, MergeMatch::NotMatched);
    assert_eq!(m.clauses[0].action, MergeAction::InsertRow);
}

#[test]
fn merge_source_subquery() {
    let m = merge(
        "MERGE INTO t USING (SELECT * FROM staging) AS s ON t.id = s.id \
         WHEN MATCHED THEN DELETE",
    );
    assert!(matches!(m.source, TableRef::Derived { .. }));
}

#[test]
fn merge_requires_a_clause() {
    let err = parse_err("MERGE INTO t USING s ON t.id = s.id");
    assert_eq!(err.expected.as_deref(), Some("WHEN"));
}

#[test]
fn merge_matched_cannot_insert() {
    let err = parse_err(
        "MERGE INTO t USING s ON t.id = s.id WHEN MATCHED THEN INSERT ROW",
    );
    assert!(err.message.contains("WHEN MATCHED cannot be combined"), "{err}");
}
