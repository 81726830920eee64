//! Identifiers and dotted object names.

use std::fmt;

use crate::hash::fnv1a_64_lower;
use crate::lexer::Span;

/// An identifier as written in the source.
///
/// Equality ignores the span and the precomputed hash.
#[derive(Debug, Clone, Eq)]
pub struct Ident {
    /// The name with quotes removed.
    pub value: String,
    /// The quote character, kept only when quoted names are preserved.
    pub quote_style: Option<char>,
    /// Case-insensitive hash of `value`.
    pub hash: u64,
    pub span: Span,
}

impl Ident {
    /// Creates an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            hash: fnv1a_64_lower(&value),
            value,
            quote_style: None,
            span: Span::default(),
        }
    }

    /// Creates an identifier that renders with `quote`.
    #[must_use]
    pub fn quoted(value: impl Into<String>, quote: char) -> Self {
        Self {
            quote_style: Some(quote),
            ..Self::new(value)
        }
    }

    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Case-insensitive comparison against a word hash.
    #[must_use]
    pub const fn matches(&self, hash: u64) -> bool {
        self.hash == hash
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.quote_style == other.quote_style
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            Some(quote) => {
                let close = if quote == '[' { ']' } else { quote };
                let escaped = self.value.replace(close, &format!("{close}{close}"));
                write!(f, "{quote}{escaped}{close}")
            }
            None => f.write_str(&self.value),
        }
    }
}

/// A possibly qualified name such as `db.schema.table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// The last part, e.g. the table in `schema.table`.
    #[must_use]
    pub fn base(&self) -> Option<&Ident> {
        self.0.last()
    }

    /// The parts before the last one.
    #[must_use]
    pub fn qualifier(&self) -> &[Ident] {
        self.0.split_last().map_or(&[], |(_, rest)| rest)
    }
}

impl From<Ident> for ObjectName {
    fn from(ident: Ident) -> Self {
        Self(vec![ident])
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        Self(name.split('.').map(Ident::new).collect())
    }
}

impl PartialEq<&str> for ObjectName {
    fn eq(&self, other: &&str) -> bool {
        let mut parts = other.split('.');
        self.0.iter().all(|ident| parts.next() == Some(ident.value.as_str())) && parts.next().is_none()
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
