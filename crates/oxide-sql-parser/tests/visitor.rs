//! Tests for AST traversal: visit order, ancestor chains and pruning.

mod common;
use common::*;

use oxide_sql_parser::ast::{walk, NodeRef, ObjectName, TableRef, Visitor};
use oxide_sql_parser::{Expr, ExprKind};

/// Records every column reference with the kinds of its ancestors.
#[derive(Default)]
struct ColumnPaths {
    columns: Vec<String>,
    inside_index: Vec<bool>,
}

impl<'a> Visitor<'a> for ColumnPaths {
    fn visit(&mut self, node: NodeRef<'a>, ancestors: &[NodeRef<'a>]) -> bool {
        if let NodeRef::Expr(Expr {
            kind: ExprKind::Column(name),
            ..
        }) = node
        {
            self.columns.push(name.to_string());
            self.inside_index.push(
                ancestors
                    .iter()
                    .any(|a| matches!(a, NodeRef::IndexDefinition(_))),
            );
        }
        true
    }
}

/// Collects table names, optionally without descending into subqueries.
struct Tables<'a> {
    names: Vec<&'a ObjectName>,
    enter_subqueries: bool,
}

impl<'a> Visitor<'a> for Tables<'a> {
    fn visit(&mut self, node: NodeRef<'a>, ancestors: &[NodeRef<'a>]) -> bool {
        match node {
            NodeRef::TableRef(TableRef::Table { name, .. }) => {
                self.names.push(name);
                true
            }
            NodeRef::Query(_) if ancestors.iter().any(|a| matches!(a, NodeRef::Select(_))) => {
                self.enter_subqueries
            }
            _ => true,
        }
    }
}

/// Collects the source text under every table and expression node.
struct Slices<'s> {
    sql: &'s str,
    tables: Vec<&'s str>,
    exprs: Vec<&'s str>,
    unspanned: usize,
}

impl<'a> Visitor<'a> for Slices<'_> {
    fn visit(&mut self, node: NodeRef<'a>, _ancestors: &[NodeRef<'a>]) -> bool {
        let Some(span) = node.span() else {
            self.unspanned += 1;
            return true;
        };
        match node {
            NodeRef::TableRef(_) => self.tables.push(span.slice(self.sql)),
            NodeRef::Expr(_) => self.exprs.push(span.slice(self.sql)),
            _ => {}
        }
        true
    }
}

/// Logs enter and leave events for expressions.
#[derive(Default)]
struct Events(Vec<String>);

impl<'a> Visitor<'a> for Events {
    fn visit(&mut self, node: NodeRef<'a>, _ancestors: &[NodeRef<'a>]) -> bool {
        if let NodeRef::Expr(expr) = node {
            self.0.push(format!("enter {expr}"));
        }
        true
    }

    fn end_visit(&mut self, node: NodeRef<'a>, _ancestors: &[NodeRef<'a>]) {
        if let NodeRef::Expr(expr) = node {
            self.0.push(format!("leave {expr}"));
        }
    }
}

// ===================================================================
// Order
// ===================================================================

#[test]
fn columns_in_source_order() {
    let stmt = parse("SELECT a, b + 1 FROM t WHERE c = 2 GROUP BY d HAVING e > 0 ORDER BY f");
    let mut visitor = ColumnPaths::default();
    stmt.accept(&mut visitor);
    assert_eq!(visitor.columns, ["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn enter_and_leave_are_nested() {
    let expr = parse_expr("a + b");
    let mut events = Events::default();
    expr.accept(&mut events);
    assert_eq!(
        events.0,
        ["enter a + b", "enter a", "leave a", "enter b", "leave b", "leave a + b"]
    );
}

#[test]
fn dml_children() {
    let stmt = parse("UPDATE t SET a = b WHERE c IN (SELECT d FROM u) ORDER BY e LIMIT 1");
    let mut visitor = ColumnPaths::default();
    stmt.accept(&mut visitor);
    assert_eq!(visitor.columns, ["b", "c", "d", "e"]);

    let stmt = parse(
        "MERGE INTO t USING s ON t.id = s.id \
         WHEN MATCHED AND s.gone THEN DELETE \
         WHEN NOT MATCHED THEN INSERT (id) VALUES (s.id)",
    );
    let mut visitor = ColumnPaths::default();
    stmt.accept(&mut visitor);
    assert_eq!(visitor.columns, ["t.id", "s.id", "s.gone", "s.id"]);
}

// ===================================================================
// Ancestors
// ===================================================================

#[test]
fn ancestors_tell_index_columns_apart() {
    let stmt = parse("CREATE TABLE t (a INT DEFAULT b, INDEX i (c, d))");
    let mut visitor = ColumnPaths::default();
    stmt.accept(&mut visitor);
    assert_eq!(visitor.columns, ["b", "c", "d"]);
    assert_eq!(visitor.inside_index, [false, true, true]);
}

#[test]
fn ancestors_start_at_the_root() {
    struct Depth(Option<usize>);
    impl<'a> Visitor<'a> for Depth {
        fn visit(&mut self, node: NodeRef<'a>, ancestors: &[NodeRef<'a>]) -> bool {
            if matches!(node, NodeRef::Expr(e) if matches!(e.kind, ExprKind::Column(_))) {
                assert!(matches!(ancestors[0], NodeRef::Statement(_)));
                self.0 = Some(ancestors.len());
            }
            true
        }
    }

    // Statement > Query > SetExpr > Select > SelectItem > Expr
    let stmt = parse("SELECT a");
    let mut depth = Depth(None);
    stmt.accept(&mut depth);
    assert_eq!(depth.0, Some(5));
}

// ===================================================================
// Spans
// ===================================================================

#[test]
fn nodes_expose_source_spans() {
    let sql = "SELECT a FROM t AS x JOIN u ON x.id = u.id";
    let stmt = parse(sql);
    assert_eq!(NodeRef::Statement(&stmt).span().map(|s| s.slice(sql)), Some(sql));

    let mut slices = Slices {
        sql,
        tables: vec![],
        exprs: vec![],
        unspanned: 0,
    };
    stmt.accept(&mut slices);
    assert_eq!(slices.tables, ["t AS x JOIN u ON x.id = u.id", "t AS x", "u"]);
    assert_eq!(slices.exprs, ["a", "x.id = u.id", "x.id", "u.id"]);
    assert_eq!(slices.unspanned, 0);
}

#[test]
fn assignments_have_no_span() {
    let sql = "UPDATE t SET a = b + 1";
    let stmt = parse(sql);
    let mut slices = Slices {
        sql,
        tables: vec![],
        exprs: vec![],
        unspanned: 0,
    };
    stmt.accept(&mut slices);
    assert_eq!(slices.unspanned, 2);
    assert_eq!(slices.tables, ["t"]);
    assert_eq!(slices.exprs, ["b + 1", "b", "1"]);
}

// ===================================================================
// Pruning
// ===================================================================

#[test]
fn pruning_skips_subqueries() {
    let stmt = parse(
        "SELECT * FROM a JOIN (SELECT * FROM b) x ON a.id = x.id \
         WHERE EXISTS (SELECT 1 FROM c)",
    );

    let mut all = Tables {
        names: vec![],
        enter_subqueries: true,
    };
    stmt.accept(&mut all);
    let names: Vec<String> = all.names.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["a", "b", "c"]);

    let mut outer = Tables {
        names: vec![],
        enter_subqueries: false,
    };
    stmt.accept(&mut outer);
    let names: Vec<String> = outer.names.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["a"]);
}

#[test]
fn pruned_nodes_get_no_end_visit() {
    struct Prune(Vec<String>);
    impl<'a> Visitor<'a> for Prune {
        fn visit(&mut self, node: NodeRef<'a>, _ancestors: &[NodeRef<'a>]) -> bool {
            !matches!(node, NodeRef::Expr(e) if matches!(e.kind, ExprKind::Function(_)))
        }
        fn end_visit(&mut self, node: NodeRef<'a>, _ancestors: &[NodeRef<'a>]) {
            if let NodeRef::Expr(expr) = node {
                self.0.push(expr.to_string());
            }
        }
    }

    let expr = parse_expr("x + max(y)");
    let mut prune = Prune(vec![]);
    expr.accept(&mut prune);
    assert_eq!(prune.0, ["x", "x + max(y)"]);
}

#[test]
fn walk_starts_anywhere() {
    let query = parse_query("SELECT a FROM t WHERE b");
    let mut visitor = ColumnPaths::default();
    walk(NodeRef::Query(&query), &mut visitor);
    assert_eq!(visitor.columns, ["a", "b"]);
}
