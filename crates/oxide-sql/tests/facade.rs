//! Tests of the library entry points across every bundled dialect.

use oxide_sql::{
    dialect, format, parse, parse_recovering, render, DialectRegistry, Error, ParserFeatures,
    Statement,
};

fn fmt(dialect_name: &str, sql: &str) -> String {
    let dialect = dialect(dialect_name).unwrap();
    format(sql, dialect, ParserFeatures::new())
        .unwrap_or_else(|e| panic!("{dialect_name}: failed to format {sql}: {e}"))
}

// ===================================================================
// Same input, different dialects
// ===================================================================

#[test]
fn every_dialect_formats_plain_sql() {
    for name in DialectRegistry::global().names() {
        assert_eq!(
            fmt(name, "select a, b from t where a > 1 order by b desc"),
            "SELECT a, b FROM t WHERE a > 1 ORDER BY b DESC",
            "{name}"
        );
    }
}

#[test]
fn reserved_words_differ_per_dialect() {
    assert_eq!(fmt("generic", "select t.div from t"), "SELECT t.div FROM t");
    assert_eq!(fmt("oracle", "select \"minus\" from t"), "SELECT \"minus\" FROM t");
    assert_eq!(fmt("mysql", "select `qualify` from t"), "SELECT qualify FROM t");
    assert_eq!(fmt("bigquery", "select `qualify` from t"), "SELECT `qualify` FROM t");
}

#[test]
fn dialect_extensions_stay_in_their_dialect() {
    let sql = "SELECT TOP 3 a FROM t";
    assert_eq!(fmt("oscar", sql), "SELECT TOP 3 a FROM t");
    for name in ["generic", "mysql", "bigquery", "oracle"] {
        let dialect = dialect(name).unwrap();
        assert!(parse(sql, dialect, ParserFeatures::new()).is_err(), "{name}");
    }
}

// ===================================================================
// Errors and recovery
// ===================================================================

#[test]
fn unknown_dialect_error() {
    let Err(err) = dialect("db2") else {
        panic!("expected an error");
    };
    assert!(matches!(err, Error::UnknownDialect { ref name, .. } if name == "db2"));
}

#[test]
fn parse_error_converts() {
    let generic = dialect("generic").unwrap();
    let err = parse("SELECT * FROM", generic, ParserFeatures::new()).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn recovery_keeps_good_statements() {
    let bigquery = dialect("bigquery").unwrap();
    let (statements, errors) = parse_recovering(
        "DELETE t WHERE TRUE; SELECT 'unterminated FROM x;",
        bigquery,
        ParserFeatures::new(),
    );
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0].statement, Statement::Delete(_)));
    assert_eq!(errors.len(), 1);
}

#[test]
fn render_keeps_terminators() {
    let mysql = dialect("mysql").unwrap();
    let statements = parse("select 1; select 2", mysql, ParserFeatures::new()).unwrap();
    assert_eq!(render(&statements, mysql), "SELECT 1;\nSELECT 2");
}
