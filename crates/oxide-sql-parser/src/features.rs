//! Parser feature flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One optional parser behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Surface comments and optimizer hints instead of discarding them.
    KeepComments,
    /// Treat `||` as string concatenation in dialects where it means OR.
    PipesAsConcat,
    /// Remember which quote character an identifier was written with.
    KeepNameQuotes,
}

impl Feature {
    pub const ALL: [Self; 3] = [Self::KeepComments, Self::PipesAsConcat, Self::KeepNameQuotes];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeepComments => "keep_comments",
            Self::PipesAsConcat => "pipes_as_concat",
            Self::KeepNameQuotes => "keep_name_quotes",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::KeepComments => 1,
            Self::PipesAsConcat => 1 << 1,
            Self::KeepNameQuotes => 1 << 2,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parser feature '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    /// Accepts snake_case or kebab-case names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == normalized)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// The set of enabled [`Feature`]s. Empty by default.
///
/// Serializes as a list of feature names, e.g. `["keep_comments"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Feature>", into = "Vec<Feature>")]
pub struct ParserFeatures {
    bits: u8,
}

impl ParserFeatures {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Returns a copy with `feature` enabled.
    #[must_use]
    pub const fn with(self, feature: Feature) -> Self {
        Self {
            bits: self.bits | feature.bit(),
        }
    }

    /// Returns a copy with `feature` disabled.
    #[must_use]
    pub const fn without(self, feature: Feature) -> Self {
        Self {
            bits: self.bits & !feature.bit(),
        }
    }

    #[must_use]
    pub const fn is_enabled(self, feature: Feature) -> bool {
        self.bits & feature.bit() != 0
    }

    /// The enabled features in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.is_enabled(*f))
    }
}

impl FromIterator<Feature> for ParserFeatures {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl From<Vec<Feature>> for ParserFeatures {
    fn from(features: Vec<Feature>) -> Self {
        features.into_iter().collect()
    }
}

impl From<ParserFeatures> for Vec<Feature> {
    fn from(features: ParserFeatures) -> Self {
        features.iter().collect()
    }
}
