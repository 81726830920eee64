//! Settings file for the command line tool.

use oxide_sql_parser::{Feature, ParserFeatures};
use serde::{Deserialize, Serialize};

/// Settings read from a JSON file.
///
/// ```json
/// { "dialect": "mysql", "features": ["keep_comments", "pipes_as_concat"] }
/// ```
///
/// Both fields are optional. A dialect given on the command line wins over
/// the file; features from both are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dialect: Option<String>,
    pub features: ParserFeatures,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, unknown fields or unknown
    /// feature names.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Merges command line settings into this configuration.
    #[must_use]
    pub fn merge(self, dialect: Option<String>, features: &[Feature]) -> Self {
        Self {
            dialect: dialect.or(self.dialect),
            features: features.iter().copied().fold(self.features, ParserFeatures::with),
        }
    }

    /// The configured dialect name, `generic` when unset.
    #[must_use]
    pub fn dialect_name(&self) -> &str {
        self.dialect.as_deref().unwrap_or("generic")
    }
}
