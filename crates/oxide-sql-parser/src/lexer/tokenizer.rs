//! SQL Tokenizer implementation.

use thiserror::Error;

use super::{Position, Span, Token, TokenKind};
use crate::dialect::Dialect;
use crate::hash::fnv1a_64_lower;
use crate::lexer::NumberKind;

/// A malformed literal, unterminated comment or unknown character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct LexError {
    pub message: String,
    /// Byte offset where the offending token starts.
    pub offset: usize,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    offset: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    const fn position(self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// A saved lexer state.
///
/// Restoring it with [`Lexer::reset`] makes the lexer produce exactly the
/// tokens it would have produced had it never moved past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    cursor: Cursor,
    current: Token,
}

impl Checkpoint {
    /// Byte offset of the next unread character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset
    }

    /// The token that was current when the checkpoint was taken.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.current
    }
}

/// A streaming lexer that always holds one current token.
pub struct Lexer<'a> {
    input: &'a str,
    dialect: &'a dyn Dialect,
    keep_comments: bool,
    cursor: Cursor,
    start: Cursor,
    current: Token,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer and scans the first token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the first token is malformed.
    pub fn new(input: &'a str, dialect: &'a dyn Dialect, keep_comments: bool) -> Result<Self, LexError> {
        let mut lexer = Self::unscanned(input, dialect, keep_comments);
        lexer.next()?;
        Ok(lexer)
    }

    /// Creates a lexer even when the first token is malformed.
    ///
    /// On error the current token is an end-of-input placeholder and the
    /// cursor still sits at the start of the input, so
    /// [`Lexer::skip_statement`] can move past the bad token.
    #[must_use]
    pub fn new_lenient(
        input: &'a str,
        dialect: &'a dyn Dialect,
        keep_comments: bool,
    ) -> (Self, Option<LexError>) {
        let mut lexer = Self::unscanned(input, dialect, keep_comments);
        let error = lexer.next().err();
        (lexer, error)
    }

    fn unscanned(input: &'a str, dialect: &'a dyn Dialect, keep_comments: bool) -> Self {
        let origin = Cursor {
            offset: 0,
            line: 1,
            column: 1,
        };
        Self {
            input,
            dialect,
            keep_comments,
            cursor: origin,
            start: origin,
            current: Token::eof(0, Position::START),
        }
    }

    /// The token under the cursor.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// The source text being lexed.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Advances past the current token and scans the next one.
    ///
    /// At end of input the current token stays EOF.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the next token is malformed. The cursor
    /// and the current token are restored in that case, so calling `next`
    /// again reports the same error.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&Token, LexError> {
        let cursor = self.cursor;
        match self.scan() {
            Ok(token) => {
                self.current = token;
                Ok(&self.current)
            }
            Err(err) => {
                self.cursor = cursor;
                Err(err)
            }
        }
    }

    /// Snapshots the lexer state.
    #[must_use]
    pub fn mark(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            current: self.current.clone(),
        }
    }

    /// Restores a snapshot taken with [`Lexer::mark`].
    pub fn reset(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.current = checkpoint.current;
    }

    /// Collects the current token and every following one, ending with EOF.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![self.current.clone()];
        while !self.current.is_eof() {
            tokens.push(self.next()?.clone());
        }
        Ok(tokens)
    }

    /// Moves forward until the current token is `;` or end of input. A
    /// current `;` stays put.
    ///
    /// Used to resynchronize after an error. Quoted text is still honored so
    /// a semicolon inside a string does not count.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] from a malformed token the cursor cannot
    /// move past.
    pub fn skip_to_terminator(&mut self) -> Result<(), LexError> {
        if self.current.is_eof() || self.current.kind == TokenKind::Semicolon {
            return Ok(());
        }
        self.skip_statement()
    }

    /// Like [`Lexer::skip_to_terminator`], but always scans past the
    /// current token first, even when it is a `;`.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] from a malformed token the cursor cannot
    /// move past.
    pub fn skip_statement(&mut self) -> Result<(), LexError> {
        loop {
            match self.scan() {
                Ok(token) => {
                    self.current = token;
                    if self.current.is_eof() || self.current.kind == TokenKind::Semicolon {
                        return Ok(());
                    }
                }
                // Malformed tokens already behind the cursor are dropped.
                Err(err) if self.cursor.offset > err.offset => {}
                Err(err) => return Err(err),
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.cursor.offset..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.cursor.offset..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor.offset += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError {
            message: message.into(),
            offset: self.start.offset,
            position: self.start.position(),
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            Span::new(self.start.offset, self.cursor.offset),
            self.start.position(),
        )
    }

    fn make_word(&self, kind: TokenKind, hash: u64) -> Token {
        let mut token = self.make_token(kind);
        token.hash = hash;
        token
    }

    fn text(&self) -> &'a str {
        &self.input[self.start.offset..self.cursor.offset]
    }

    /// Skips whitespace and, unless comments are kept, comments and hints.
    /// Returns a comment token when one should be surfaced.
    fn skip_trivia(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            self.advance_while(char::is_whitespace);
            self.start = self.cursor;

            let line_comment = match self.peek() {
                Some('-') => self.peek_nth(1) == Some('-'),
                Some('#') => self.dialect.supports_hash_comments(),
                _ => false,
            };
            if line_comment {
                let marker = if self.peek() == Some('#') { 1 } else { 2 };
                for _ in 0..marker {
                    self.advance();
                }
                self.advance_while(|c| c != '\n');
                if self.keep_comments {
                    let text = self.text().trim_end_matches('\r').to_string();
                    return Ok(Some(self.make_token(TokenKind::Comment(text))));
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_nth(1) == Some('*') {
                self.advance();
                self.advance();
                let is_hint = self.peek() == Some('+');
                if is_hint {
                    self.advance();
                }
                let body_start = self.cursor.offset;
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(self.error("unterminated block comment")),
                    }
                }
                if self.keep_comments {
                    let kind = if is_hint {
                        TokenKind::Hint(self.input[body_start..self.cursor.offset - 2].to_string())
                    } else {
                        TokenKind::Comment(self.text().to_string())
                    };
                    return Ok(Some(self.make_token(kind)));
                }
                continue;
            }

            return Ok(None);
        }
    }

    /// Scans one token starting at the cursor.
    fn scan(&mut self) -> Result<Token, LexError> {
        if let Some(comment) = self.skip_trivia()? {
            return Ok(comment);
        }

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof));
        };
        let next = self.peek_nth(1);

        match c {
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if next.is_some_and(|n| n.is_ascii_digit()) => self.scan_number(),
            'N' | 'n' if next == Some('\'') => {
                self.advance();
                let value = self.scan_quoted_string('\'')?;
                Ok(self.make_token(TokenKind::NationalString(value)))
            }
            'X' | 'x' if next == Some('\'') => self.scan_hex_string(),
            'R' | 'r'
                if self.dialect.supports_triple_quoted_strings()
                    && next.is_some_and(|n| self.dialect.is_string_quote(n)) =>
            {
                self.advance();
                self.scan_text_block(true)
            }
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_word()),
            c if self.dialect.is_string_quote(c) => {
                if self.dialect.supports_triple_quoted_strings()
                    && next == Some(c)
                    && self.peek_nth(2) == Some(c)
                {
                    return self.scan_text_block(false);
                }
                let value = self.scan_quoted_string(c)?;
                Ok(self.make_token(TokenKind::String(value)))
            }
            c if self.dialect.is_identifier_quote(c) => self.scan_quoted_identifier(c),
            '@' if self.dialect.supports_variables() => self.scan_variable(),
            _ => self.scan_symbol(c),
        }
    }

    /// Scans an identifier, reclassifying it when the dialect reserves it.
    fn scan_word(&mut self) -> Token {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let text = self.text();
        let hash = fnv1a_64_lower(text);
        let kind = if let Some(keyword) = self.dialect.keywords().lookup(hash) {
            TokenKind::Keyword(keyword)
        } else if let Some(word) = self.dialect.reserved_words().lookup(hash) {
            TokenKind::Reserved(word)
        } else {
            TokenKind::Identifier(text.to_string())
        };
        self.make_word(kind, hash)
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, LexError> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated quoted identifier")),
            }
        }
        let hash = fnv1a_64_lower(&value);
        Ok(self.make_word(TokenKind::QuotedIdentifier { value, quote }, hash))
    }

    /// Scans a number (integer, decimal, float or hex).
    fn scan_number(&mut self) -> Result<Token, LexError> {
        if self.peek() == Some('0') && matches!(self.peek_nth(1), Some('x' | 'X')) {
            self.advance();
            self.advance();
            let digits_start = self.cursor.offset;
            self.advance_while(|c| c.is_ascii_hexdigit());
            if self.cursor.offset == digits_start {
                return Err(self.error("invalid hex number: no digits after 0x"));
            }
            if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                return Err(self.error("invalid hex number"));
            }
            return Ok(self.number_token(NumberKind::Hex));
        }

        let mut kind = NumberKind::Integer;
        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            kind = NumberKind::Decimal;
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let after = self.peek_nth(1);
            let signed = matches!(after, Some('+' | '-'));
            let first_digit = if signed { self.peek_nth(2) } else { after };
            if first_digit.is_some_and(|c| c.is_ascii_digit()) {
                kind = NumberKind::Float;
                self.advance();
                if signed {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            } else if signed {
                return Err(self.error("malformed exponent in numeric literal"));
            }
        }

        Ok(self.number_token(kind))
    }

    fn number_token(&self, kind: NumberKind) -> Token {
        self.make_token(TokenKind::Number {
            text: self.text().to_string(),
            kind,
        })
    }

    /// Scans a quoted string body, resolving doubled quotes and, where the
    /// dialect allows them, backslash escapes.
    fn scan_quoted_string(&mut self, quote: char) -> Result<String, LexError> {
        self.advance();
        let backslash = self.dialect.supports_backslash_escapes();
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                Some('\\') if backslash => match self.advance() {
                    Some(escaped) => push_escape(&mut value, escaped),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }
        Err(self.error("unterminated string literal"))
    }

    /// Scans a hex string literal (X'...' or x'...').
    fn scan_hex_string(&mut self) -> Result<Token, LexError> {
        self.advance();
        self.advance();
        let digits_start = self.cursor.offset;
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => {}
                Some(_) => {
                    self.advance_while(|c| c != '\'');
                    self.advance();
                    return Err(self.error("invalid character in hex string literal"));
                }
                None => return Err(self.error("unterminated hex string literal")),
            }
        }
        let digits = &self.input[digits_start..self.cursor.offset - 1];
        if digits.len() % 2 != 0 {
            return Err(self.error("odd number of digits in hex string literal"));
        }
        Ok(self.make_token(TokenKind::HexString(digits.to_string())))
    }

    /// Scans a triple-quoted string or a raw string. The cursor is on the
    /// opening quote; the `r` prefix, if any, is already consumed.
    fn scan_text_block(&mut self, raw: bool) -> Result<Token, LexError> {
        let Some(quote) = self.advance() else {
            return Err(self.error("unterminated string literal"));
        };
        let triple = self.peek() == Some(quote) && self.peek_nth(1) == Some(quote);
        if triple {
            self.advance();
            self.advance();
        }
        let body_start = self.cursor.offset;
        loop {
            let Some(c) = self.advance() else {
                return Err(self.error("unterminated string literal"));
            };
            if c == '\\' {
                self.advance();
                continue;
            }
            if c != quote {
                continue;
            }
            if !triple {
                break;
            }
            if self.peek() == Some(quote) && self.peek_nth(1) == Some(quote) {
                self.advance();
                self.advance();
                break;
            }
        }
        let closing = if triple { 3 } else { 1 };
        let text = self.input[body_start..self.cursor.offset - closing].to_string();
        Ok(self.make_token(TokenKind::TextBlock { text, raw }))
    }

    /// Scans `@name`, `@@name` or `@'quoted name'`.
    fn scan_variable(&mut self) -> Result<Token, LexError> {
        self.advance();
        let system = self.peek() == Some('@');
        if system {
            self.advance();
        }
        let name = match self.peek() {
            Some(q) if !system && (self.dialect.is_string_quote(q) || self.dialect.is_identifier_quote(q)) => {
                self.scan_quoted_string(q)?
            }
            _ => {
                let name_start = self.cursor.offset;
                self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
                self.input[name_start..self.cursor.offset].to_string()
            }
        };
        if name.is_empty() {
            return Err(self.error("expected variable name after @"));
        }
        Ok(self.make_token(TokenKind::Variable { name, system }))
    }

    fn scan_symbol(&mut self, c: char) -> Result<Token, LexError> {
        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '~' => TokenKind::BitNot,
            '^' => TokenKind::BitXor,
            '&' => TokenKind::BitAnd,
            '?' => TokenKind::Question,
            '@' => TokenKind::At,
            '.' => TokenKind::Dot,
            ':' => self.pick(':', TokenKind::DoubleColon, TokenKind::Colon),
            '=' => self.pick('=', TokenKind::Eq, TokenKind::Eq),
            '|' => self.pick('|', TokenKind::Concat, TokenKind::BitOr),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.pick('>', TokenKind::NullSafeEq, TokenKind::LtEq)
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                Some('<') => {
                    self.advance();
                    TokenKind::LeftShift
                }
                _ => TokenKind::Lt,
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::GtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::RightShift
                }
                _ => TokenKind::Gt,
            },
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            other => return Err(self.error(format!("unexpected character '{other}'"))),
        };
        Ok(self.make_token(kind))
    }

    /// Consumes `second` if it follows, choosing between two kinds.
    fn pick(&mut self, second: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            matched
        } else {
            single
        }
    }
}

fn push_escape(value: &mut String, escaped: char) {
    match escaped {
        '0' => value.push('\0'),
        'b' => value.push('\u{8}'),
        'n' => value.push('\n'),
        'r' => value.push('\r'),
        't' => value.push('\t'),
        'Z' => value.push('\u{1a}'),
        // LIKE wildcards keep their backslash.
        '%' | '_' => {
            value.push('\\');
            value.push(escaped);
        }
        other => value.push(other),
    }
}

/// Resolves backslash escapes in the body of a non-raw text block.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut value = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => push_escape(&mut value, escaped),
                None => value.push(c),
            }
        } else {
            value.push(c);
        }
    }
    value
}
