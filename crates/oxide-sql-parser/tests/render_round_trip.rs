//! Rendering tests: canonical text for parsed statements, and trees that
//! survive a render and re-parse unchanged.

mod common;
use common::*;

use oxide_sql_parser::ast::{BinaryOp, UnaryOp};
use oxide_sql_parser::dialect::GenericDialect;
use oxide_sql_parser::{render, render_statements, Expr, Feature, Parser, ParserFeatures};

// ===================================================================
// Queries
// ===================================================================

#[test]
fn keywords_are_uppercased_and_spacing_normalized() {
    assert_eq!(round_trip("select a+1 from t"), "SELECT a + 1 FROM t");
    assert_eq!(
        round_trip("select *  from t where a in (1,2) and b between 1 and 5"),
        "SELECT * FROM t WHERE a IN (1, 2) AND b BETWEEN 1 AND 5"
    );
}

#[test]
fn aliases() {
    assert_eq!(
        round_trip("SELECT u.id uid FROM users AS u JOIN orders o ON u.id = o.uid"),
        "SELECT u.id AS uid FROM users u INNER JOIN orders o ON u.id = o.uid"
    );
}

#[test]
fn reserved_names_are_quoted() {
    assert_eq!(
        round_trip("select count(*) as order from t"),
        "SELECT count(*) AS \"order\" FROM t"
    );
    assert_eq!(round_trip("SELECT \"select\" FROM t"), "SELECT \"select\" FROM t");
    assert_eq!(
        round_trip("SELECT `first name` FROM t"),
        "SELECT \"first name\" FROM t"
    );
}

#[test]
fn names_that_open_special_forms_are_quoted() {
    assert_eq!(
        round_trip("SELECT \"current_date\", current_date FROM t"),
        "SELECT \"current_date\", CURRENT_DATE FROM t"
    );
    assert_eq!(
        round_trip("SELECT \"localtimestamp\".x, \"current_time\".* FROM t"),
        "SELECT \"localtimestamp\".x, \"current_time\".* FROM t"
    );
    assert_eq!(round_trip("SELECT \"extract\"(x) FROM t"), "SELECT \"extract\"(x) FROM t");
    assert_eq!(round_trip("SELECT \"array\"[1] FROM t"), "SELECT \"array\"[1] FROM t");
    assert_eq!(
        round_trip("SELECT extract(YEAR FROM d), array[1] FROM t"),
        "SELECT EXTRACT(YEAR FROM d), ARRAY[1] FROM t"
    );
}

#[test]
fn type_names_stay_bare_as_columns() {
    // Only a following string makes `date` a typed literal.
    assert_eq!(
        round_trip("SELECT \"date\", date '2024-01-01', current_date() FROM t"),
        "SELECT date, DATE '2024-01-01', current_date() FROM t"
    );
}

#[test]
fn joins() {
    assert_eq!(
        round_trip("SELECT * FROM a NATURAL JOIN b"),
        "SELECT * FROM a NATURAL INNER JOIN b"
    );
    assert_eq!(
        round_trip("SELECT * FROM a JOIN (b JOIN c ON b.x = c.x) ON a.y = b.y"),
        "SELECT * FROM a INNER JOIN (b INNER JOIN c ON b.x = c.x) ON a.y = b.y"
    );
    assert_eq!(
        round_trip("SELECT * FROM a FULL OUTER JOIN b USING (id)"),
        "SELECT * FROM a FULL JOIN b USING (id)"
    );
}

#[test]
fn trailing_clauses() {
    assert_eq!(
        round_trip("SELECT * FROM t OFFSET 5 ROWS FETCH NEXT 3 ROWS ONLY"),
        "SELECT * FROM t OFFSET 5 ROWS FETCH FIRST 3 ROWS ONLY"
    );
    assert_eq!(
        round_trip("SELECT * FROM t LIMIT 3 OFFSET 5"),
        "SELECT * FROM t LIMIT 3 OFFSET 5"
    );
    assert_eq!(
        round_trip("SELECT a FROM t FOR UPDATE OF t SKIP LOCKED"),
        "SELECT a FROM t FOR UPDATE OF t SKIP LOCKED"
    );
}

#[test]
fn set_operations_and_values() {
    assert_eq!(
        round_trip("(SELECT 1) UNION (SELECT 2) ORDER BY 1"),
        "(SELECT 1) UNION (SELECT 2) ORDER BY 1"
    );
    assert_eq!(round_trip("VALUES (1, 2), (3, 4)"), "VALUES (1, 2), (3, 4)");
    round_trip("WITH RECURSIVE r (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM r) SELECT n FROM r");
}

// ===================================================================
// Expressions
// ===================================================================

#[test]
fn expression_forms() {
    assert_eq!(
        round_trip("select case x when 1 then 'a' else 'b' end"),
        "SELECT CASE x WHEN 1 THEN 'a' ELSE 'b' END"
    );
    assert_eq!(round_trip("SELECT a::int"), "SELECT a::INT");
    assert_eq!(round_trip("SELECT date '2024-01-01'"), "SELECT DATE '2024-01-01'");
    assert_eq!(round_trip("select current_timestamp"), "SELECT CURRENT_TIMESTAMP");
    assert_eq!(round_trip("SELECT LEFT(name, 3) FROM t"), "SELECT LEFT(name, 3) FROM t");
    assert_eq!(
        round_trip("SELECT * FROM t WHERE a = ? AND b = :name"),
        "SELECT * FROM t WHERE a = ? AND b = :name"
    );
    round_trip("SELECT x NOT IN (SELECT y FROM u), EXISTS (SELECT 1)");
    round_trip("SELECT ARRAY[1, 2][1], -(a + b), ~flags");
}

#[test]
fn window_functions() {
    assert_eq!(
        round_trip(
            "SELECT sum(x) OVER (PARTITION BY g ORDER BY t ROWS BETWEEN 1 PRECEDING AND CURRENT ROW) FROM t"
        ),
        "SELECT sum(x) OVER (PARTITION BY g ORDER BY t ROWS BETWEEN 1 PRECEDING AND CURRENT ROW) FROM t"
    );
    round_trip("SELECT string_agg(name, ',' ORDER BY name DESC NULLS LAST) FROM t");
}

#[test]
fn precedence_adds_parentheses() {
    let expr = Expr::unary(UnaryOp::Not, Expr::column("a").or(Expr::column("b")));
    assert_eq!(expr.to_string(), "NOT (a OR b)");

    let neg = Expr::unary(
        UnaryOp::Neg,
        Expr::column("a").binary(BinaryOp::Add, Expr::column("b")),
    );
    assert_eq!(neg.to_string(), "-(a + b)");

    let and = Expr::column("a")
        .or(Expr::column("b"))
        .and(Expr::column("c"));
    assert_eq!(and.to_string(), "(a OR b) AND c");
}

#[test]
fn string_escaping() {
    assert_eq!(Expr::string("a'b").to_string(), "'a''b'");
    assert_eq!(round_trip("SELECT 'x''y'"), "SELECT 'x''y'");
}

// ===================================================================
// DML and DDL
// ===================================================================

#[test]
fn dml_forms() {
    assert_eq!(
        round_trip("insert t default values"),
        "INSERT INTO t DEFAULT VALUES"
    );
    assert_eq!(
        round_trip("update t set a=1 order by b limit 2"),
        "UPDATE t SET a = 1 ORDER BY b LIMIT 2"
    );
    assert_eq!(
        round_trip("DELETE FROM t AS x WHERE x.a = 1"),
        "DELETE FROM t x WHERE x.a = 1"
    );
    assert_eq!(
        round_trip("MERGE t USING s ON t.id = s.id WHEN NOT MATCHED BY TARGET THEN INSERT ROW"),
        "MERGE INTO t USING s ON t.id = s.id WHEN NOT MATCHED THEN INSERT ROW"
    );
}

#[test]
fn ddl_forms() {
    assert_eq!(
        round_trip("create table t (id int primary key, name varchar(10) not null default 'x')"),
        "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(10) NOT NULL DEFAULT 'x')"
    );
    assert_eq!(
        round_trip("CREATE INDEX i ON t USING btree (a(4) DESC)"),
        "CREATE INDEX i ON t USING btree (a(4) DESC)"
    );
    assert_eq!(round_trip("drop index i on t"), "DROP INDEX i ON t");
    assert_eq!(
        round_trip("ALTER TABLE t RENAME a TO b"),
        "ALTER TABLE t RENAME COLUMN a TO b"
    );
    assert_eq!(
        round_trip("CREATE FUNCTION f(x INT) RETURNS INT AS (x + 1)"),
        "CREATE FUNCTION f(x INT) RETURNS INT AS (x + 1)"
    );
    round_trip("CREATE TABLE t (a INT, CONSTRAINT c CHECK (a > 0), UNIQUE KEY u (a))");
    round_trip("CREATE TABLE copy AS SELECT * FROM src");
}

#[test]
fn other_statements() {
    assert_eq!(round_trip("begin work"), "BEGIN WORK");
    assert_eq!(round_trip("rollback"), "ROLLBACK");
    assert_eq!(
        round_trip("declare a, b int default 0"),
        "DECLARE a, b INT DEFAULT 0"
    );
}

// ===================================================================
// Statement lists and features
// ===================================================================

#[test]
fn statement_list_with_comments() {
    let stmts = parse_all_with(
        "-- header\nSELECT 1; SELECT /*+ FAST */ 2",
        ParserFeatures::new().with(Feature::KeepComments),
    );
    assert_eq!(
        render_statements(&stmts, &GenericDialect),
        "-- header\nSELECT 1;\nSELECT /*+ FAST */ 2"
    );
}

#[test]
fn kept_quotes_render_as_written() {
    let statement = Parser::new(
        "SELECT `x` FROM \"T\"",
        &GenericDialect,
        ParserFeatures::new().with(Feature::KeepNameQuotes),
    )
    .and_then(|mut p| p.parse_statement())
    .unwrap();
    assert_eq!(render(&statement, &GenericDialect), "SELECT `x` FROM \"T\"");
}
