//! Tests for BigQuery scripting, DML and DDL.

mod common;
use common::*;

use oxide_sql_bigquery::BigQueryDialect;
use oxide_sql_parser::ast::{
    ColumnOption, Delete, FunctionBody, Statement, TableElement, TableOption, TransactionStart,
};
use oxide_sql_parser::dialect::GenericDialect;
use oxide_sql_parser::{render, Parser, ParserFeatures};

// ===================================================================
// ASSERT
// ===================================================================

#[test]
fn assert_with_message() {
    let Statement::Assert(assert) =
        parse("ASSERT (SELECT COUNT(*) FROM t) > 0 AS 'table is empty'")
    else {
        panic!("expected ASSERT");
    };
    assert_eq!(assert.message.as_deref(), Some("table is empty"));
    assert_eq!(
        round_trip("assert (select count(*) from t) > 0 as 'table is empty'"),
        "ASSERT (SELECT count(*) FROM t) > 0 AS 'table is empty'"
    );
}

#[test]
fn assert_without_message() {
    let Statement::Assert(assert) = parse("ASSERT 1 = 1") else {
        panic!("expected ASSERT");
    };
    assert!(assert.message.is_none());
}

// ===================================================================
// BEGIN .. END
// ===================================================================

#[test]
fn script_block() {
    let Statement::Block(statements) =
        parse("BEGIN DECLARE x INT64 DEFAULT 1; SELECT x; DELETE t WHERE a = x; END")
    else {
        panic!("expected block");
    };
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], Statement::Declare(_)));
    assert!(matches!(statements[2], Statement::Delete(_)));
}

#[test]
fn nested_blocks_round_trip() {
    assert_eq!(
        round_trip("BEGIN BEGIN SELECT 1; END; ASSERT TRUE; END"),
        "BEGIN BEGIN SELECT 1; END; ASSERT TRUE; END"
    );
}

#[test]
fn begin_transaction_falls_through() {
    assert_eq!(
        parse("BEGIN TRANSACTION"),
        Statement::StartTransaction(TransactionStart::BeginTransaction)
    );
    assert_eq!(parse("BEGIN"), Statement::StartTransaction(TransactionStart::Begin));
    let statements = parse_all("BEGIN; SELECT 1; COMMIT");
    assert_eq!(statements.len(), 3);
    assert_eq!(
        statements[0].statement,
        Statement::StartTransaction(TransactionStart::Begin)
    );
}

#[test]
fn block_needs_end_and_terminators() {
    parse_err("BEGIN SELECT 1;");
    parse_err("BEGIN SELECT 1 END");
}

// ===================================================================
// DML
// ===================================================================

#[test]
fn delete_without_from() {
    let Statement::Delete(delete) = parse("DELETE dataset.t WHERE id = 1") else {
        panic!("expected DELETE");
    };
    let Delete { table, .. } = *delete;
    assert_eq!(table.to_string(), "dataset.t");
    assert_eq!(
        round_trip("DELETE dataset.t WHERE id = 1"),
        "DELETE FROM dataset.t WHERE id = 1"
    );
}

#[test]
fn qualify_clause() {
    let select = parse_select(
        "SELECT id, ts FROM events \
         QUALIFY ROW_NUMBER() OVER (PARTITION BY id ORDER BY ts DESC) = 1",
    );
    assert!(select.qualify.is_some());
}

#[test]
fn qualify_is_reserved() {
    let err = parse_err("SELECT qualify FROM events");
    assert_eq!(err.found.as_deref(), Some("QUALIFY"));
    assert_eq!(
        round_trip("SELECT `qualify` FROM events QUALIFY `qualify` > 1"),
        "SELECT `qualify` FROM events QUALIFY `qualify` > 1"
    );
}

#[test]
fn generic_dialect_does_not_know_qualify() {
    let generic = Parser::new(
        "SELECT id FROM events QUALIFY id = 1",
        &GenericDialect,
        ParserFeatures::new(),
    )
    .and_then(|mut p| p.parse_statements());
    assert!(generic.is_err());
}

// ===================================================================
// DDL
// ===================================================================

#[test]
fn partition_cluster_and_options() {
    let table = create_table(
        "CREATE TABLE ds.events (id INT64 OPTIONS(description = 'key'), ts TIMESTAMP) \
         PARTITION BY DATE(ts) CLUSTER BY id, ts \
         OPTIONS(expiration_days = 3, description = \"events\")",
    );
    assert_eq!(table.options.len(), 3);
    assert!(matches!(table.options[0], TableOption::PartitionBy(_)));
    let TableOption::ClusterBy(columns) = &table.options[1] else {
        panic!("expected CLUSTER BY");
    };
    assert_eq!(columns.len(), 2);
    let TableOption::Options(options) = &table.options[2] else {
        panic!("expected OPTIONS");
    };
    assert_eq!(options[0].name.value, "expiration_days");

    let TableElement::Column(id) = &table.elements[0] else {
        panic!("expected column");
    };
    assert!(matches!(&id.options[0], ColumnOption::Options(o) if o.len() == 1));
}

#[test]
fn table_options_round_trip() {
    assert_eq!(
        round_trip(
            "create table t (a INT64, d DATE) partition by d cluster by a options(description = 'x')"
        ),
        "CREATE TABLE t (a INT64, d DATE) PARTITION BY d CLUSTER BY a OPTIONS(description = 'x')"
    );
}

#[test]
fn temp_function_with_text_block_body() {
    let Statement::CreateFunction(function) = parse(
        "CREATE TEMP FUNCTION add_one(x INT64) RETURNS INT64 LANGUAGE js \
         AS r\"\"\"return x + 1;\"\"\"",
    ) else {
        panic!("expected CREATE FUNCTION");
    };
    assert!(function.temporary);
    assert_eq!(
        function.body,
        Some(FunctionBody::TextBlock {
            text: "return x + 1;".into(),
            raw: true,
        })
    );
}

#[test]
fn sql_function_with_options() {
    let sql = "CREATE FUNCTION ds.double_it(x INT64) OPTIONS(description = 'twice') AS (x * 2)";
    let Statement::CreateFunction(function) = parse(sql) else {
        panic!("expected CREATE FUNCTION");
    };
    assert_eq!(function.options.len(), 1);
    assert_eq!(render(&parse(sql), &BigQueryDialect), sql);
}
