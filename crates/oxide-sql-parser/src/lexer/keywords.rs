//! Sorted hash tables for keyword and option-name lookup.

use once_cell::sync::Lazy;

use super::Keyword;
use crate::hash::fnv1a_64_lower;

/// An immutable table keyed by word hash.
///
/// Hashes are kept sorted so lookup is a binary search. Tables are built once
/// (usually behind a `Lazy` static) and never mutated, which makes them safe
/// to share between any number of parsers.
#[derive(Debug, Clone)]
pub struct HashTable<T> {
    hashes: Box<[u64]>,
    values: Box<[T]>,
}

/// Reserved words of one dialect.
pub type KeywordTable = HashTable<Keyword>;

/// Canonical spellings of recognized option or function names.
pub type NameTable = HashTable<&'static str>;

impl<T: Copy + PartialEq + std::fmt::Debug> HashTable<T> {
    /// Builds a table from `(hash, value)` entries.
    ///
    /// Duplicate entries are merged. Two different values sharing one hash
    /// would make lookups ambiguous, so that panics.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (u64, T)>) -> Self {
        let mut entries: Vec<(u64, T)> = entries.into_iter().collect();
        entries.sort_by_key(|(hash, _)| *hash);
        entries.dedup_by(|a, b| {
            if a.0 == b.0 {
                assert!(
                    a.1 == b.1,
                    "hash collision between {:?} and {:?}",
                    a.1,
                    b.1
                );
                true
            } else {
                false
            }
        });
        let (hashes, values): (Vec<u64>, Vec<T>) = entries.into_iter().unzip();
        Self {
            hashes: hashes.into_boxed_slice(),
            values: values.into_boxed_slice(),
        }
    }

    /// Returns the value stored under `hash`.
    #[must_use]
    pub fn lookup(&self, hash: u64) -> Option<T> {
        self.hashes
            .binary_search(&hash)
            .ok()
            .map(|index| self.values[index])
    }

    /// Returns true if `hash` is present.
    #[must_use]
    pub fn contains(&self, hash: u64) -> bool {
        self.hashes.binary_search(&hash).is_ok()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// The sorted hashes.
    #[must_use]
    pub fn hashes(&self) -> &[u64] {
        &self.hashes
    }

    /// Iterates over the values in hash order.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }
}

impl KeywordTable {
    /// Builds a keyword table from one or more keyword lists.
    #[must_use]
    pub fn from_keywords(lists: &[&[Keyword]]) -> Self {
        Self::from_entries(
            lists
                .iter()
                .flat_map(|list| list.iter())
                .map(|kw| (kw.hash(), *kw)),
        )
    }

    /// Looks up a word by its text.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<Keyword> {
        self.lookup(fnv1a_64_lower(word))
    }
}

impl NameTable {
    /// Builds a name table from canonical spellings.
    #[must_use]
    pub fn from_names(names: &[&'static str]) -> Self {
        Self::from_entries(names.iter().map(|name| (fnv1a_64_lower(name), *name)))
    }
}

/// Words every dialect reserves.
pub const BASE_KEYWORDS: &[Keyword] = &[
    Keyword::All,
    Keyword::Alter,
    Keyword::And,
    Keyword::As,
    Keyword::Asc,
    Keyword::Between,
    Keyword::By,
    Keyword::Case,
    Keyword::Cast,
    Keyword::Check,
    Keyword::Collate,
    Keyword::Constraint,
    Keyword::Create,
    Keyword::Cross,
    Keyword::Default,
    Keyword::Delete,
    Keyword::Desc,
    Keyword::Distinct,
    Keyword::Drop,
    Keyword::Else,
    Keyword::End,
    Keyword::Except,
    Keyword::Exists,
    Keyword::False,
    Keyword::Fetch,
    Keyword::For,
    Keyword::Foreign,
    Keyword::From,
    Keyword::Full,
    Keyword::Group,
    Keyword::Having,
    Keyword::In,
    Keyword::Index,
    Keyword::Inner,
    Keyword::Insert,
    Keyword::Intersect,
    Keyword::Interval,
    Keyword::Into,
    Keyword::Is,
    Keyword::Join,
    Keyword::Key,
    Keyword::Left,
    Keyword::Like,
    Keyword::Limit,
    Keyword::Natural,
    Keyword::Not,
    Keyword::Null,
    Keyword::Offset,
    Keyword::On,
    Keyword::Or,
    Keyword::Order,
    Keyword::Outer,
    Keyword::Primary,
    Keyword::References,
    Keyword::Right,
    Keyword::Select,
    Keyword::Set,
    Keyword::Table,
    Keyword::Then,
    Keyword::True,
    Keyword::Union,
    Keyword::Unique,
    Keyword::Update,
    Keyword::Using,
    Keyword::Values,
    Keyword::View,
    Keyword::When,
    Keyword::Where,
    Keyword::With,
];

/// Reserved words of the generic dialect.
pub static GENERIC_KEYWORDS: Lazy<KeywordTable> =
    Lazy::new(|| KeywordTable::from_keywords(&[BASE_KEYWORDS]));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_by_hash() {
        let table = &*GENERIC_KEYWORDS;
        assert_eq!(table.get("select"), Some(Keyword::Select));
        assert_eq!(table.get("SeLeCt"), Some(Keyword::Select));
        assert_eq!(table.get("sysdate"), None);
        assert_eq!(table.len(), BASE_KEYWORDS.len());
    }

    #[test]
    fn test_hashes_are_sorted() {
        let hashes = GENERIC_KEYWORDS.hashes();
        assert!(hashes.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_duplicates_are_merged() {
        let table = KeywordTable::from_keywords(&[BASE_KEYWORDS, &[Keyword::Select]]);
        assert_eq!(table.len(), BASE_KEYWORDS.len());
    }

    #[test]
    fn test_name_table() {
        let table = NameTable::from_names(&["ENGINE", "COMMENT"]);
        assert_eq!(table.lookup(fnv1a_64_lower("engine")), Some("ENGINE"));
        assert!(!table.contains(fnv1a_64_lower("engines")));
    }

    #[test]
    #[should_panic(expected = "hash collision")]
    fn test_conflicting_values_panic() {
        let _ = HashTable::from_entries([(1_u64, "a"), (1_u64, "b")]);
    }
}
