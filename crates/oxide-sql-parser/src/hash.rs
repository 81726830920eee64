//! Case-insensitive word hashing.
//!
//! Every word the lexer produces carries the 64-bit FNV-1a hash of its
//! ASCII-lowercased text. Keywords, option names and function names are
//! compared by hash instead of by string, and because [`fnv1a_64_lower`] is a
//! `const fn` the hashes of well-known words are compile-time constants that
//! can be used directly as `match` patterns.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashes `text` with FNV-1a (64 bit) after lowercasing ASCII letters.
#[must_use]
pub const fn fnv1a_64_lower(text: &str) -> u64 {
    let bytes = text.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i].to_ascii_lowercase();
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Declares `pub const NAME: u64` hash constants, one per word.
///
/// ```
/// oxide_sql_parser::words! { ENGINE, AUTO_INCREMENT }
/// assert_eq!(ENGINE, oxide_sql_parser::hash::fnv1a_64_lower("engine"));
/// ```
#[macro_export]
macro_rules! words {
    ($($name:ident),* $(,)?) => {
        $(
            #[allow(dead_code)]
            pub const $name: u64 = $crate::hash::fnv1a_64_lower(stringify!($name));
        )*
    };
}

/// Hashes of non-reserved words the generic grammar recognizes.
pub mod words {
    crate::words! {
        ACTION, ADD, ALWAYS, ARRAY, ASSERT, BEGIN, BIGINT, BINARY, BLOB, BOOL,
        BOOLEAN, CALL, CASCADE, CHAR, CHARACTER, COLUMN, COLUMNS, COMMIT, CURRENT,
        CURRENT_DATE, CURRENT_TIME, CURRENT_TIMESTAMP, DATABASE, DATE, DATETIME,
        DEC, DECIMAL, DECLARE, DOUBLE, DUPLICATE, ESCAPE, EXPLAIN, EXTRACT, FIRST, FLOAT, FOLLOWING,
        FULLTEXT, FUNCTION, GLOBAL, GRANT, IF, INT, INT64, INTEGER, JSON, LANGUAGE, LAST,
        LOCAL, LOCALTIME, LOCALTIMESTAMP, LOCKED, MATCHED, MEDIUMINT, MERGE, NCHAR, NEXT,
        NO, NOWAIT, NULLS, NUMERIC, OF, ONLY, OPTIONS, OVER, PARTITION, PERCENT,
        PRECEDING, PRECISION, PROCEDURE, RANGE, REAL, RECURSIVE, RENAME, REPLACE,
        RESTRICT, RETURNS, REVOKE, ROLLBACK, ROW, ROWS, SCHEMA, SEQUENCE, SESSION, SHARE, SHOW,
        SKIP, SMALLINT, SOURCE, SPATIAL, START, STRUCT, TARGET, TEMP, TEMPORARY, TEXT, TIES,
        TIME, TIMESTAMP, TINYINT, TO, TOP, TRANSACTION, TRIGGER, TRUNCATE,
        UNBOUNDED, UNKNOWN, UNLOGGED, USE, VARBINARY, VARCHAR, VARYING, WORK,
        ZONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_case_insensitive() {
        assert_eq!(fnv1a_64_lower("Select"), fnv1a_64_lower("SELECT"));
        assert_eq!(fnv1a_64_lower("select"), fnv1a_64_lower("sElEcT"));
        assert_ne!(fnv1a_64_lower("select"), fnv1a_64_lower("selects"));
    }

    #[test]
    fn test_known_vectors() {
        // FNV-1a 64 of the empty string is the offset basis.
        assert_eq!(fnv1a_64_lower(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64_lower("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a_64_lower("A"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_words_macro_matches_function() {
        assert_eq!(words::DATE, fnv1a_64_lower("date"));
        assert_eq!(words::CURRENT_TIMESTAMP, fnv1a_64_lower("current_timestamp"));
        assert_eq!(words::INT64, fnv1a_64_lower("int64"));
    }
}
