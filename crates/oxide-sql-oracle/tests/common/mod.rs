#![allow(dead_code)]

use oxide_sql_oracle::OracleDialect;
use oxide_sql_parser::ast::{CreateTable, Query, Select, Statement};
use oxide_sql_parser::{render, Expr, ParseError, Parser, ParserFeatures};

pub fn parse(sql: &str) -> Statement {
    parse_with(sql, ParserFeatures::new())
}

pub fn parse_with(sql: &str, features: ParserFeatures) -> Statement {
    Parser::new(sql, &OracleDialect, features)
        .and_then(|mut p| p.parse_statement())
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql, &OracleDialect, ParserFeatures::new())
        .and_then(|mut p| p.parse_statements())
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_expr(sql: &str) -> Expr {
    parse_expr_with(sql, ParserFeatures::new())
}

pub fn parse_expr_with(sql: &str, features: ParserFeatures) -> Expr {
    let mut parser = Parser::new(sql, &OracleDialect, features)
        .unwrap_or_else(|e| panic!("Failed to lex: {sql}\nError: {e}"));
    let expr = parser
        .parse_expr()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"));
    assert!(parser.current().is_eof(), "trailing input after expression: {sql}");
    expr
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> Select {
    let query = parse_query(sql);
    match query.as_select() {
        Some(select) => select.clone(),
        None => panic!("Expected a single SELECT block, got {query:?}"),
    }
}

pub fn create_table(sql: &str) -> CreateTable {
    match parse(sql) {
        Statement::CreateTable(table) => *table,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

/// Renders an expression with the Oracle dialect.
pub fn expr_sql(sql: &str) -> String {
    render(&parse_expr(sql), &OracleDialect)
}

/// Renders the statement, re-parses the output and checks that the tree
/// is unchanged and the text is a fixed point. Returns the rendered text.
pub fn round_trip(sql: &str) -> String {
    let ast1 = parse(sql);
    let rendered1 = render(&ast1, &OracleDialect);
    let ast2 = parse(&rendered1);
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    let rendered2 = render(&ast2, &OracleDialect);
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    rendered1
}

pub fn parse_all(sql: &str) -> Vec<oxide_sql_parser::ParsedStatement> {
    Parser::new(sql, &OracleDialect, ParserFeatures::new())
        .and_then(|mut p| p.parse_statements())
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}
