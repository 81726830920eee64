//! Lookup of dialects by name.

use once_cell::sync::Lazy;
use oxide_sql_bigquery::BigQueryDialect;
use oxide_sql_mysql::MySqlDialect;
use oxide_sql_oracle::OracleDialect;
use oxide_sql_oscar::OscarDialect;
use oxide_sql_parser::{Dialect, GenericDialect};
use tracing::debug;

use crate::error::{Error, Result};

static GENERIC: GenericDialect = GenericDialect;
static MYSQL: MySqlDialect = MySqlDialect;
static BIGQUERY: BigQueryDialect = BigQueryDialect;
static ORACLE: OracleDialect = OracleDialect;
static OSCAR: OscarDialect = OscarDialect;

static REGISTRY: Lazy<DialectRegistry> = Lazy::new(|| {
    let mut registry = DialectRegistry::empty();
    registry.register(&GENERIC, &["ansi"]);
    registry.register(&MYSQL, &["mariadb"]);
    registry.register(&BIGQUERY, &[]);
    registry.register(&ORACLE, &[]);
    registry.register(&OSCAR, &[]);
    registry
});

/// Maps dialect names and aliases to dialect instances.
///
/// Names are matched case-insensitively. The process-wide registry holding
/// every bundled dialect is returned by [`DialectRegistry::global`].
#[derive(Default)]
pub struct DialectRegistry {
    dialects: Vec<&'static dyn Dialect>,
    /// Lower-cased name or alias, paired with an index into `dialects`.
    names: Vec<(String, usize)>,
}

impl DialectRegistry {
    /// Creates a registry without any dialect.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry of bundled dialects.
    #[must_use]
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Adds `dialect` under its own name and each alias. A later
    /// registration of the same name wins.
    pub fn register(&mut self, dialect: &'static dyn Dialect, aliases: &[&str]) {
        let index = self.dialects.len();
        self.dialects.push(dialect);
        for name in std::iter::once(dialect.name()).chain(aliases.iter().copied()) {
            let name = name.to_ascii_lowercase();
            self.names.retain(|(existing, _)| *existing != name);
            self.names.push((name, index));
        }
    }

    /// Finds a dialect by name or alias.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static dyn Dialect> {
        let name = name.trim();
        self.names
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, index)| self.dialects[*index])
    }

    /// Like [`DialectRegistry::get`], but reports the known names when the
    /// lookup fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDialect`] if nothing is registered as `name`.
    pub fn lookup(&self, name: &str) -> Result<&'static dyn Dialect> {
        let dialect = self.get(name).ok_or_else(|| Error::UnknownDialect {
            name: name.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })?;
        debug!(requested = name, dialect = dialect.name(), "resolved dialect");
        Ok(dialect)
    }

    /// Canonical names of the registered dialects, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dialects.iter().map(|dialect| dialect.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_names_and_aliases() {
        let registry = DialectRegistry::global();
        for (name, expected) in [
            ("generic", "generic"),
            ("ANSI", "generic"),
            ("mysql", "mysql"),
            ("MariaDB", "mysql"),
            ("bigquery", "bigquery"),
            (" oracle ", "oracle"),
            ("oscar", "oscar"),
        ] {
            assert_eq!(registry.get(name).map(|d| d.name()), Some(expected), "{name}");
        }
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["generic", "mysql", "bigquery", "oracle", "oscar"]
        );
    }

    #[test]
    fn test_unknown_dialect_lists_known_names() {
        let Err(err) = DialectRegistry::global().lookup("sybase") else {
            panic!("expected an error");
        };
        assert_eq!(
            err.to_string(),
            "unknown dialect 'sybase' (known: generic, mysql, bigquery, oracle, oscar)"
        );
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = DialectRegistry::empty();
        registry.register(&GENERIC, &["sql"]);
        registry.register(&MYSQL, &["sql"]);
        assert_eq!(registry.get("sql").map(|d| d.name()), Some("mysql"));
        assert_eq!(registry.get("generic").map(|d| d.name()), Some("generic"));
        assert!(registry.get("oracle").is_none());
    }
}
