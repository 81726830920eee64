//! SQL text generation for statements and DDL.

use std::fmt;

use super::SqlWriter;
use crate::ast::{
    AlterTableOperation, Assignment, ColumnDef, ColumnOption, CreateFunction, CreateTable,
    DirectoryKind, DropBehavior, ForeignKeyRef, FunctionBody, GeneratedStorage, IndexColumn,
    IndexOption, InsertSource, MergeAction, ParsedStatement, SqlOption, Statement, TableElement,
    TableOption,
};

impl SqlWriter<'_> {
    /// Writes a statement without a terminator.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn statement(&mut self, statement: &Statement) -> fmt::Result {
        match statement {
            Statement::Query(query) => self.query(query),
            Statement::Insert(insert) => {
                self.write("INSERT")?;
                self.hints(&insert.hints)?;
                self.write(" INTO ")?;
                self.object_name(&insert.table)?;
                if !insert.columns.is_empty() {
                    self.write(" ")?;
                    self.paren_idents(&insert.columns)?;
                }
                match &insert.source {
                    InsertSource::Values(rows) => {
                        self.write(" ")?;
                        self.values(rows)?;
                    }
                    InsertSource::Query(query) => {
                        self.write(" ")?;
                        self.query(query)?;
                    }
                    InsertSource::DefaultValues => self.write(" DEFAULT VALUES")?,
                }
                if !insert.on_duplicate_update.is_empty() {
                    self.write(" ON DUPLICATE KEY UPDATE ")?;
                    self.assignments(&insert.on_duplicate_update)?;
                }
                Ok(())
            }
            Statement::Update(update) => {
                self.write("UPDATE")?;
                self.hints(&update.hints)?;
                self.write(" ")?;
                self.table_ref(&update.table)?;
                self.write(" SET ")?;
                self.assignments(&update.assignments)?;
                if !update.from.is_empty() {
                    self.write(" FROM ")?;
                    self.list(&update.from, ", ", Self::table_ref)?;
                }
                if let Some(selection) = &update.selection {
                    self.write(" WHERE ")?;
                    self.expr(selection)?;
                }
                if !update.order_by.is_empty() {
                    self.write(" ORDER BY ")?;
                    self.order_by_list(&update.order_by)?;
                }
                if let Some(limit) = &update.limit {
                    self.write(" LIMIT ")?;
                    self.expr(limit)?;
                }
                Ok(())
            }
            Statement::Delete(delete) => {
                self.write("DELETE")?;
                self.hints(&delete.hints)?;
                self.write(" FROM ")?;
                self.object_name(&delete.table)?;
                if let Some(alias) = &delete.alias {
                    self.write(" ")?;
                    self.ident(alias)?;
                }
                if let Some(selection) = &delete.selection {
                    self.write(" WHERE ")?;
                    self.expr(selection)?;
                }
                if !delete.order_by.is_empty() {
                    self.write(" ORDER BY ")?;
                    self.order_by_list(&delete.order_by)?;
                }
                if let Some(limit) = &delete.limit {
                    self.write(" LIMIT ")?;
                    self.expr(limit)?;
                }
                Ok(())
            }
            Statement::Merge(merge) => {
                self.write("MERGE INTO ")?;
                self.object_name(&merge.table)?;
                if let Some(alias) = &merge.alias {
                    self.write(" ")?;
                    self.ident(&alias.name)?;
                }
                self.write(" USING ")?;
                self.table_ref(&merge.source)?;
                self.write(" ON ")?;
                self.expr(&merge.on)?;
                for clause in &merge.clauses {
                    write!(self.out, " WHEN {}", clause.matched.as_str())?;
                    if let Some(condition) = &clause.condition {
                        self.write(" AND ")?;
                        self.expr(condition)?;
                    }
                    self.write(" THEN ")?;
                    match &clause.action {
                        MergeAction::Update(assignments) => {
                            self.write("UPDATE SET ")?;
                            self.assignments(assignments)?;
                        }
                        MergeAction::Delete => self.write("DELETE")?,
                        MergeAction::Insert { columns, values } => {
                            self.write("INSERT ")?;
                            if !columns.is_empty() {
                                self.paren_idents(columns)?;
                                self.write(" ")?;
                            }
                            self.write("VALUES (")?;
                            self.exprs(values)?;
                            self.write(")")?;
                        }
                        MergeAction::InsertRow => self.write("INSERT ROW")?,
                    }
                }
                Ok(())
            }
            Statement::CreateTable(create) => self.create_table(create),
            Statement::CreateIndex(create) => {
                self.write(if create.unique {
                    "CREATE UNIQUE INDEX "
                } else {
                    "CREATE INDEX "
                })?;
                if create.if_not_exists {
                    self.write("IF NOT EXISTS ")?;
                }
                self.ident(&create.name)?;
                self.write(" ON ")?;
                self.object_name(&create.table)?;
                if let Some(using) = &create.using {
                    self.write(" USING ")?;
                    self.ident(using)?;
                }
                self.index_columns(&create.columns)?;
                self.index_options(&create.options)
            }
            Statement::CreateView(create) => {
                self.write(if create.or_replace {
                    "CREATE OR REPLACE VIEW "
                } else {
                    "CREATE VIEW "
                })?;
                self.object_name(&create.name)?;
                if !create.columns.is_empty() {
                    self.write(" ")?;
                    self.paren_idents(&create.columns)?;
                }
                self.write(" AS ")?;
                self.query(&create.query)
            }
            Statement::CreateFunction(create) => self.create_function(create),
            Statement::Drop(drop) => {
                self.write("DROP ")?;
                if drop.temporary {
                    self.write("TEMPORARY ")?;
                }
                self.write(drop.object_type.as_str())?;
                if drop.if_exists {
                    self.write(" IF EXISTS")?;
                }
                self.write(" ")?;
                self.list(&drop.names, ", ", Self::object_name)?;
                if let Some(table) = &drop.table {
                    self.write(" ON ")?;
                    self.object_name(table)?;
                }
                match drop.behavior {
                    Some(DropBehavior::Cascade) => self.write(" CASCADE"),
                    Some(DropBehavior::Restrict) => self.write(" RESTRICT"),
                    None => Ok(()),
                }
            }
            Statement::AlterTable(alter) => {
                self.write("ALTER TABLE ")?;
                self.object_name(&alter.name)?;
                self.write(" ")?;
                self.list(&alter.operations, ", ", Self::alter_operation)
            }
            Statement::Declare(declare) => {
                self.write("DECLARE ")?;
                self.idents(&declare.names)?;
                if let Some(data_type) = &declare.data_type {
                    write!(self.out, " {data_type}")?;
                }
                if let Some(default) = &declare.default {
                    self.write(" DEFAULT ")?;
                    self.expr(default)?;
                }
                Ok(())
            }
            Statement::Assert(assert) => {
                self.write("ASSERT ")?;
                self.expr(&assert.condition)?;
                if let Some(message) = &assert.message {
                    self.write(" AS ")?;
                    self.string_literal(message)?;
                }
                Ok(())
            }
            Statement::Block(statements) => {
                self.write("BEGIN")?;
                for statement in statements {
                    self.write(" ")?;
                    self.statement(statement)?;
                    self.write(";")?;
                }
                self.write(" END")
            }
            Statement::StartTransaction(start) => self.write(start.as_str()),
            Statement::Commit => self.write("COMMIT"),
            Statement::Rollback => self.write("ROLLBACK"),
        }
    }

    /// Writes the comments of a parsed statement, each on its own line,
    /// followed by the statement and its terminator.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn parsed_statement(&mut self, parsed: &ParsedStatement) -> fmt::Result {
        for comment in &parsed.comments {
            self.write(comment)?;
            self.write("\n")?;
        }
        self.statement(&parsed.statement)?;
        if parsed.after_semicolon {
            self.write(";")?;
        }
        Ok(())
    }

    fn assignments(&mut self, assignments: &[Assignment]) -> fmt::Result {
        self.list(assignments, ", ", |w, assignment| {
            w.object_name(&assignment.target)?;
            w.write(" = ")?;
            w.expr(&assignment.value)
        })
    }

    fn create_table(&mut self, create: &CreateTable) -> fmt::Result {
        self.write("CREATE ")?;
        if create.or_replace {
            self.write("OR REPLACE ")?;
        }
        if create.temporary {
            self.write("TEMPORARY ")?;
        }
        self.write("TABLE ")?;
        if create.if_not_exists {
            self.write("IF NOT EXISTS ")?;
        }
        self.object_name(&create.name)?;
        if !create.elements.is_empty() {
            self.write(" (")?;
            self.list(&create.elements, ", ", Self::table_element)?;
            self.write(")")?;
        }
        for option in &create.options {
            self.write(" ")?;
            self.table_option(option)?;
        }
        if let Some(query) = &create.query {
            self.write(" AS ")?;
            self.query(query)?;
        }
        Ok(())
    }

    /// Writes one element of a CREATE TABLE body.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn table_element(&mut self, element: &TableElement) -> fmt::Result {
        match element {
            TableElement::Column(column) => self.column_def(column),
            TableElement::Index(index) => {
                self.constraint_name(index.constraint.as_ref())?;
                self.write(index.kind.as_str())?;
                if let Some(name) = &index.name {
                    self.write(" ")?;
                    self.ident(name)?;
                }
                if let Some(using) = &index.using {
                    self.write(" USING ")?;
                    self.ident(using)?;
                }
                self.index_columns(&index.columns)?;
                self.index_options(&index.options)
            }
            TableElement::ForeignKey(foreign_key) => {
                self.constraint_name(foreign_key.constraint.as_ref())?;
                self.write("FOREIGN KEY ")?;
                self.paren_idents(&foreign_key.columns)?;
                self.write(" ")?;
                self.references(&foreign_key.references)
            }
            TableElement::Check(check) => {
                self.constraint_name(check.constraint.as_ref())?;
                self.write("CHECK (")?;
                self.expr(&check.expr)?;
                self.write(")")
            }
        }
    }

    fn constraint_name(&mut self, name: Option<&crate::ast::Ident>) -> fmt::Result {
        if let Some(name) = name {
            self.write("CONSTRAINT ")?;
            self.ident(name)?;
            self.write(" ")?;
        }
        Ok(())
    }

    fn index_columns(&mut self, columns: &[IndexColumn]) -> fmt::Result {
        self.write(" (")?;
        self.list(columns, ", ", |w, column| {
            w.expr(&column.expr)?;
            if let Some(length) = column.length {
                write!(w.out, "({length})")?;
            }
            if let Some(direction) = column.direction {
                write!(w.out, " {}", direction.as_str())?;
            }
            Ok(())
        })?;
        self.write(")")
    }

    fn index_options(&mut self, options: &[IndexOption]) -> fmt::Result {
        for option in options {
            self.write(" ")?;
            match option {
                IndexOption::Using(method) => {
                    self.write("USING ")?;
                    self.ident(method)?;
                }
                IndexOption::Comment(comment) => {
                    self.write("COMMENT ")?;
                    self.string_literal(comment)?;
                }
                IndexOption::Visible => self.write("VISIBLE")?,
                IndexOption::Invisible => self.write("INVISIBLE")?,
                IndexOption::Global => self.write("GLOBAL")?,
                IndexOption::Local => self.write("LOCAL")?,
                IndexOption::KeyBlockSize(size) => write!(self.out, "KEY_BLOCK_SIZE = {size}")?,
                IndexOption::Algorithm(algorithm) => {
                    self.write("ALGORITHM = ")?;
                    self.ident(algorithm)?;
                }
                IndexOption::Lock(lock) => {
                    self.write("LOCK = ")?;
                    self.ident(lock)?;
                }
                IndexOption::WithParser(parser) => {
                    self.write("WITH PARSER ")?;
                    self.ident(parser)?;
                }
            }
        }
        Ok(())
    }

    /// Writes a column definition.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn column_def(&mut self, column: &ColumnDef) -> fmt::Result {
        self.ident(&column.name)?;
        write!(self.out, " {}", column.data_type)?;
        for option in &column.options {
            self.write(" ")?;
            self.column_option(option)?;
        }
        Ok(())
    }

    fn column_option(&mut self, option: &ColumnOption) -> fmt::Result {
        match option {
            ColumnOption::Null => self.write("NULL"),
            ColumnOption::NotNull => self.write("NOT NULL"),
            ColumnOption::Default(expr) => {
                self.write("DEFAULT ")?;
                self.expr(expr)
            }
            ColumnOption::PrimaryKey => self.write("PRIMARY KEY"),
            ColumnOption::Unique => self.write("UNIQUE"),
            ColumnOption::Check(expr) => {
                self.write("CHECK (")?;
                self.expr(expr)?;
                self.write(")")
            }
            ColumnOption::References(references) => self.references(references),
            ColumnOption::Collate(collation) => {
                self.write("COLLATE ")?;
                self.object_name(collation)
            }
            ColumnOption::CharacterSet(charset) => {
                self.write("CHARACTER SET ")?;
                self.ident(charset)
            }
            ColumnOption::AutoIncrement => self.write("AUTO_INCREMENT"),
            ColumnOption::Comment(comment) => {
                self.write("COMMENT ")?;
                self.string_literal(comment)
            }
            ColumnOption::OnUpdate(expr) => {
                self.write("ON UPDATE ")?;
                self.expr(expr)
            }
            ColumnOption::Generated { expr, storage } => {
                self.write("GENERATED ALWAYS AS (")?;
                self.expr(expr)?;
                self.write(")")?;
                match storage {
                    Some(GeneratedStorage::Stored) => self.write(" STORED"),
                    Some(GeneratedStorage::Virtual) => self.write(" VIRTUAL"),
                    None => Ok(()),
                }
            }
            ColumnOption::Options(options) => self.sql_options(options),
        }
    }

    fn references(&mut self, references: &ForeignKeyRef) -> fmt::Result {
        self.write("REFERENCES ")?;
        self.object_name(&references.table)?;
        if !references.columns.is_empty() {
            self.write(" ")?;
            self.paren_idents(&references.columns)?;
        }
        if let Some(action) = references.on_delete {
            write!(self.out, " ON DELETE {}", action.as_str())?;
        }
        if let Some(action) = references.on_update {
            write!(self.out, " ON UPDATE {}", action.as_str())?;
        }
        Ok(())
    }

    /// Writes `OPTIONS(name = value, ..)`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn sql_options(&mut self, options: &[SqlOption]) -> fmt::Result {
        self.write("OPTIONS(")?;
        self.list(options, ", ", |w, option| {
            w.ident(&option.name)?;
            w.write(" = ")?;
            w.expr(&option.value)
        })?;
        self.write(")")
    }

    /// Writes a table option.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn table_option(&mut self, option: &TableOption) -> fmt::Result {
        match option {
            TableOption::KeyValue { name, value } => {
                write!(self.out, "{name} = ")?;
                self.expr(value)
            }
            TableOption::CharacterSet { default, value } => {
                if *default {
                    self.write("DEFAULT ")?;
                }
                self.write("CHARACTER SET = ")?;
                self.ident(value)
            }
            TableOption::Collate { default, value } => {
                if *default {
                    self.write("DEFAULT ")?;
                }
                self.write("COLLATE = ")?;
                self.ident(value)
            }
            TableOption::Directory { kind, path } => {
                self.write(match kind {
                    DirectoryKind::Data => "DATA DIRECTORY = ",
                    DirectoryKind::Index => "INDEX DIRECTORY = ",
                })?;
                self.string_literal(path)
            }
            TableOption::Union(tables) => {
                self.write("UNION = (")?;
                self.list(tables, ", ", Self::object_name)?;
                self.write(")")
            }
            TableOption::Tablespace { name, storage } => {
                self.write("TABLESPACE ")?;
                self.ident(name)?;
                if let Some(storage) = storage {
                    self.write(" STORAGE ")?;
                    self.ident(storage)?;
                }
                Ok(())
            }
            TableOption::PartitionBy(expr) => {
                self.write("PARTITION BY ")?;
                self.expr(expr)
            }
            TableOption::ClusterBy(exprs) => {
                self.write("CLUSTER BY ")?;
                self.exprs(exprs)
            }
            TableOption::Options(options) => self.sql_options(options),
        }
    }

    fn alter_operation(&mut self, operation: &AlterTableOperation) -> fmt::Result {
        match operation {
            AlterTableOperation::AddColumn {
                if_not_exists,
                column,
            } => {
                self.write("ADD COLUMN ")?;
                if *if_not_exists {
                    self.write("IF NOT EXISTS ")?;
                }
                self.column_def(column)
            }
            AlterTableOperation::DropColumn { if_exists, name } => {
                self.write("DROP COLUMN ")?;
                if *if_exists {
                    self.write("IF EXISTS ")?;
                }
                self.ident(name)
            }
            AlterTableOperation::RenameColumn { old, new } => {
                self.write("RENAME COLUMN ")?;
                self.ident(old)?;
                self.write(" TO ")?;
                self.ident(new)
            }
            AlterTableOperation::RenameTable(name) => {
                self.write("RENAME TO ")?;
                self.object_name(name)
            }
            AlterTableOperation::AddConstraint(element) => {
                self.write("ADD ")?;
                self.table_element(element)
            }
            AlterTableOperation::DropConstraint(name) => {
                self.write("DROP CONSTRAINT ")?;
                self.ident(name)
            }
            AlterTableOperation::Options(options) => self.list(options, " ", Self::table_option),
        }
    }

    fn create_function(&mut self, create: &CreateFunction) -> fmt::Result {
        self.write("CREATE ")?;
        if create.or_replace {
            self.write("OR REPLACE ")?;
        }
        if create.temporary {
            self.write("TEMPORARY ")?;
        }
        self.write("FUNCTION ")?;
        if create.if_not_exists {
            self.write("IF NOT EXISTS ")?;
        }
        self.object_name(&create.name)?;
        self.write("(")?;
        self.list(&create.params, ", ", |w, param| {
            w.ident(&param.name)?;
            write!(w.out, " {}", param.data_type)
        })?;
        self.write(")")?;
        if let Some(returns) = &create.returns {
            write!(self.out, " RETURNS {returns}")?;
        }
        if let Some(language) = &create.language {
            self.write(" LANGUAGE ")?;
            self.ident(language)?;
        }
        if !create.options.is_empty() {
            self.write(" ")?;
            self.sql_options(&create.options)?;
        }
        match &create.body {
            Some(FunctionBody::Expr(expr)) => {
                self.write(" AS (")?;
                self.expr(expr)?;
                self.write(")")
            }
            Some(FunctionBody::String(source)) => {
                self.write(" AS ")?;
                self.string_literal(source)
            }
            Some(FunctionBody::TextBlock { text, raw }) => {
                let prefix = if *raw { "r" } else { "" };
                write!(self.out, " AS {prefix}\"\"\"{text}\"\"\"")
            }
            None => Ok(()),
        }
    }
}
