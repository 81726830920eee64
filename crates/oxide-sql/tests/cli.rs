//! End-to-end tests of the `oxide-sql` command line tool.

mod common;
use common::*;

// ===================================================================
// format
// ===================================================================

#[test]
fn format_from_stdin() {
    let output = run(&["format"], "select a+1 from t where b = 'x';");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "SELECT a + 1 FROM t WHERE b = 'x';\n");
}

#[test]
fn format_from_file_with_dialect() {
    let file = temp_file("select `id` from users limit 5, 10");
    let output = run(&["--dialect", "mysql", "format", path(&file)], "");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "SELECT id FROM users LIMIT 10 OFFSET 5\n");
}

#[test]
fn dialect_alias_and_case() {
    let output = run(&["-d", "MariaDB", "format"], "select a div b");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "SELECT a DIV b\n");
}

#[test]
fn unknown_dialect_fails() {
    let output = run(&["--dialect", "sybase", "format"], "SELECT 1");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown dialect 'sybase'"));
}

#[test]
fn missing_file_fails_with_context() {
    let output = run(&["format", "/nonexistent/query.sql"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read /nonexistent/query.sql"));
}

// ===================================================================
// Features and configuration
// ===================================================================

#[test]
fn feature_flags() {
    let output = run(&["-d", "mysql", "format"], "SELECT a || b");
    assert_eq!(stdout(&output), "SELECT a OR b\n");

    let output = run(&["-d", "mysql", "--feature", "pipes_as_concat", "format"], "SELECT a || b");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "SELECT a || b\n");
}

#[test]
fn unknown_feature_is_rejected() {
    let output = run(&["--feature", "fast_mode", "format"], "SELECT 1");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("fast_mode"));
}

#[test]
fn config_file_sets_dialect() {
    let config = temp_file(r#"{"dialect": "oracle"}"#);
    let output = run(&["--config", path(&config), "format"], "select sysdate from dual");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "SELECT SYSDATE FROM dual\n");

    // The command line wins over the file.
    let output = run(
        &["--config", path(&config), "--dialect", "generic", "format"],
        "select sysdate from dual",
    );
    assert_eq!(stdout(&output), "SELECT sysdate FROM dual\n");
}

#[test]
fn invalid_config_file() {
    let config = temp_file(r#"{"dialect": "oracle", "colour": true}"#);
    let output = run(&["--config", path(&config), "format"], "SELECT 1");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid config file"));
}

// ===================================================================
// check and --keep-going
// ===================================================================

#[test]
fn check_counts_statements() {
    let output = run(&["check"], "SELECT 1; SELECT 2;");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "ok: 2 statement(s)\n");
}

#[test]
fn check_stops_at_first_error() {
    let output = run(&["check"], "SELECT FROM; SELECT (;");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to parse input"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn keep_going_reports_every_error() {
    let output = run(&["check", "--keep-going"], "SELECT FROM; SELECT 1; SELECT (;");
    assert!(!output.status.success());
    let errors = stderr(&output);
    assert_eq!(errors.matches("error: ").count(), 2, "{errors}");
    assert!(errors.contains("2 statement(s) failed to parse"));
}

#[test]
fn format_keep_going_prints_good_statements() {
    let output = run(&["format", "-k"], "select 1; select from; select 2;");
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "SELECT 1;\nSELECT 2;\n");
}

// ===================================================================
// parse and tokens
// ===================================================================

#[test]
fn parse_prints_the_tree() {
    let output = run(&["-d", "bigquery", "parse"], "ASSERT TRUE AS 'ok'");
    assert!(output.status.success(), "{}", stderr(&output));
    let tree = stdout(&output);
    assert!(tree.starts_with("Assert("), "{tree}");
    assert!(tree.contains("\"ok\""), "{tree}");
}

#[test]
fn tokens_listing() {
    let output = run(&["tokens"], "a + 1");
    assert!(output.status.success(), "{}", stderr(&output));
    let lines: Vec<_> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("1:1\t"));
    assert!(lines[0].ends_with("\ta"));
    assert!(lines[2].starts_with("1:5\t"));
}

#[test]
fn tokens_keep_comments_on_request() {
    let sql = "SELECT 1 -- note\n";
    let plain = stdout(&run(&["tokens"], sql));
    let kept = stdout(&run(&["--feature", "keep_comments", "tokens"], sql));
    assert_eq!(kept.lines().count(), plain.lines().count() + 1);
    assert!(kept.contains("-- note"));
}
