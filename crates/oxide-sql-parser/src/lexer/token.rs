//! Token types for the SQL lexer.

use std::fmt;

use super::{Position, Span};
use crate::hash::fnv1a_64_lower;

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// Reserved words the generic grammar knows.
        ///
        /// A word only lexes as a keyword when the active dialect's keyword
        /// table holds its hash; otherwise it stays an identifier. Words only
        /// one dialect reserves lex as [`TokenKind::Reserved`] instead.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the canonical upper-case spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),*
                }
            }
        }
    };
}

keywords! {
    All => "ALL",
    Alter => "ALTER",
    And => "AND",
    As => "AS",
    Asc => "ASC",
    Between => "BETWEEN",
    By => "BY",
    Case => "CASE",
    Cast => "CAST",
    Check => "CHECK",
    Collate => "COLLATE",
    Constraint => "CONSTRAINT",
    Create => "CREATE",
    Cross => "CROSS",
    Default => "DEFAULT",
    Delete => "DELETE",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Drop => "DROP",
    Else => "ELSE",
    End => "END",
    Except => "EXCEPT",
    Exists => "EXISTS",
    False => "FALSE",
    Fetch => "FETCH",
    For => "FOR",
    Foreign => "FOREIGN",
    From => "FROM",
    Full => "FULL",
    Group => "GROUP",
    Having => "HAVING",
    In => "IN",
    Index => "INDEX",
    Inner => "INNER",
    Insert => "INSERT",
    Intersect => "INTERSECT",
    Interval => "INTERVAL",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Natural => "NATURAL",
    Not => "NOT",
    Null => "NULL",
    Offset => "OFFSET",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Primary => "PRIMARY",
    References => "REFERENCES",
    Right => "RIGHT",
    Select => "SELECT",
    Set => "SET",
    Table => "TABLE",
    Then => "THEN",
    True => "TRUE",
    Union => "UNION",
    Unique => "UNIQUE",
    Update => "UPDATE",
    Using => "USING",
    Values => "VALUES",
    View => "VIEW",
    When => "WHEN",
    Where => "WHERE",
    With => "WITH",
}

impl Keyword {
    /// Returns the case-insensitive hash of the keyword's spelling.
    #[must_use]
    pub const fn hash(self) -> u64 {
        fnv1a_64_lower(self.as_str())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical form of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Digits only, e.g. `42`.
    Integer,
    /// Digits with a decimal point, e.g. `4.2` or `.5`.
    Decimal,
    /// Digits with an exponent, e.g. `4e2`.
    Float,
    /// `0x` prefixed, e.g. `0x2A`.
    Hex,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal with its source text.
    Number { text: String, kind: NumberKind },
    /// String literal with escapes resolved (e.g., 'hello').
    String(String),
    /// National string literal (e.g., N'hello').
    NationalString(String),
    /// Hex string literal, digits only (e.g., X'1234').
    HexString(String),
    /// Triple-quoted or raw string, captured verbatim.
    TextBlock { text: String, raw: bool },

    // Identifiers and keywords
    /// Unquoted identifier.
    Identifier(String),
    /// Quoted identifier (e.g., "order" or `order`).
    QuotedIdentifier { value: String, quote: char },
    /// Reserved word of the active dialect.
    Keyword(Keyword),
    /// Word reserved by the active dialect alone, in its canonical spelling.
    Reserved(&'static str),
    /// User (`@x`) or system (`@@x`) variable.
    Variable { name: String, system: bool },

    // Trivia, only produced when comments are kept
    /// Optimizer hint body, from `/*+ ... */`.
    Hint(String),
    /// Comment text, delimiters included.
    Comment(String),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// <=>
    NullSafeEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,
    /// ?
    Question,
    /// @
    At,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Number { text, .. } => return f.write_str(text),
            Self::String(s) => return write!(f, "'{s}'"),
            Self::NationalString(s) => return write!(f, "N'{s}'"),
            Self::HexString(s) => return write!(f, "X'{s}'"),
            Self::TextBlock { text, raw } => {
                let prefix = if *raw { "r" } else { "" };
                return write!(f, "{prefix}\"\"\"{text}\"\"\"");
            }
            Self::Identifier(s) => return f.write_str(s),
            Self::QuotedIdentifier { value, quote } => {
                let close = if *quote == '[' { ']' } else { *quote };
                return write!(f, "{quote}{value}{close}");
            }
            Self::Keyword(kw) => return f.write_str(kw.as_str()),
            Self::Reserved(word) => return f.write_str(word),
            Self::Variable { name, system } => {
                let prefix = if *system { "@@" } else { "@" };
                return write!(f, "{prefix}{name}");
            }
            Self::Hint(s) => return write!(f, "/*+{s}*/"),
            Self::Comment(s) => return f.write_str(s),
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::NullSafeEq => "<=>",
            Self::Concat => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitNot => "~",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::DoubleColon => "::",
            Self::Question => "?",
            Self::At => "@",
            Self::Eof => "end of input",
        };
        f.write_str(symbol)
    }
}

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Byte range in the source.
    pub span: Span,
    /// Line and column of the first character.
    pub position: Position,
    /// Case-insensitive hash of the word for identifiers and keywords,
    /// zero for every other kind.
    pub hash: u64,
}

impl Token {
    /// Creates a new token with no word hash.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
            hash: 0,
        }
    }

    /// The end-of-input token at the given location.
    #[must_use]
    pub const fn eof(offset: usize, position: Position) -> Self {
        Self::new(TokenKind::Eof, Span::new(offset, offset), position)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true for bare words: unquoted identifiers and reserved
    /// words.
    #[must_use]
    pub const fn is_word(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier(_) | TokenKind::Keyword(_) | TokenKind::Reserved(_)
        )
    }

    /// Returns true if this word is reserved by the active dialect alone and
    /// has this hash.
    #[must_use]
    pub const fn is_reserved_hash(&self, hash: u64) -> bool {
        matches!(self.kind, TokenKind::Reserved(_)) && self.hash == hash
    }

    /// Returns true if this is a bare word whose hash is `hash`.
    #[must_use]
    pub const fn is_word_hash(&self, hash: u64) -> bool {
        self.is_word() && self.hash == hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Select.as_str(), "SELECT");
        assert_eq!(Keyword::From.as_str(), "FROM");
        assert_eq!(Keyword::Where.to_string(), "WHERE");
    }

    #[test]
    fn test_keyword_hash_matches_spelling() {
        assert_eq!(Keyword::Select.hash(), fnv1a_64_lower("select"));
        assert!(Keyword::ALL.contains(&Keyword::Select));
        assert!(Keyword::ALL.iter().all(|kw| kw.as_str() != "SYSDATE"));
    }

    #[test]
    fn test_token_is_eof() {
        let eof = Token::eof(0, Position::START);
        let select = Token::new(
            TokenKind::Keyword(Keyword::Select),
            Span::new(0, 6),
            Position::START,
        );
        assert!(eof.is_eof());
        assert!(!select.is_eof());
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(
            TokenKind::Keyword(Keyword::Select),
            Span::new(0, 6),
            Position::START,
        );
        let plus = Token::new(TokenKind::Plus, Span::new(0, 1), Position::START);
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert!(select.is_keyword(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::String("it".into()).to_string(), "'it'");
        assert_eq!(
            TokenKind::Variable {
                name: "sql_mode".into(),
                system: true
            }
            .to_string(),
            "@@sql_mode"
        );
        assert_eq!(TokenKind::Reserved("QUALIFY").to_string(), "QUALIFY");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
