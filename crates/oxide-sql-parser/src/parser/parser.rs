//! SQL Parser implementation.

use tracing::{debug, trace};

use super::error::ParseError;
use crate::ast::{Ident, ObjectName, ParsedStatement, Statement};
use crate::dialect::{Dialect, HookResult};
use crate::features::{Feature, ParserFeatures};
use crate::lexer::{Checkpoint, Keyword, Lexer, Span, Token, TokenKind};

/// A saved parser state for backtracking.
#[derive(Debug, Clone)]
pub struct ParserCheckpoint {
    lexer: Checkpoint,
    prev_end: usize,
    param_counter: usize,
    comments: Vec<String>,
    hints: Vec<String>,
    split_gt: bool,
}

/// Nesting limit used by [`Parser::new`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// SQL Parser.
///
/// One parser owns one input string. Dialect behavior comes from the
/// [`Dialect`] it was created with; all other state is private to the
/// instance, so independent inputs may be parsed on independent threads.
pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
    pub(super) dialect: &'a dyn Dialect,
    pub(super) features: ParserFeatures,
    /// End offset of the last consumed token.
    prev_end: usize,
    /// Parameter counter for ? placeholders.
    param_counter: usize,
    pending_comments: Vec<String>,
    pending_hints: Vec<String>,
    /// Set when the first half of a `>>` closed a type argument list.
    split_gt: bool,
    depth: usize,
    max_depth: usize,
    /// Lexical error met while scanning past a statement terminator. It is
    /// reported by the next call to [`Parser::parse_next`].
    deferred: Option<ParseError>,
    /// The reported deferred error lies after the current `;`.
    skip_current: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if the first token is malformed.
    pub fn new(
        input: &'a str,
        dialect: &'a dyn Dialect,
        features: ParserFeatures,
    ) -> Result<Self, ParseError> {
        let lexer = Lexer::new(input, dialect, features.is_enabled(Feature::KeepComments))?;
        let mut parser = Self::with_lexer(lexer, dialect, features);
        parser.collect_trivia()?;
        Ok(parser)
    }

    /// Creates a parser that never fails up front.
    ///
    /// A malformed first token is reported by the first call to
    /// [`Parser::parse_next`]; [`Parser::synchronize`] then resumes after
    /// the next `;` as for any other error.
    #[must_use]
    pub fn new_recovering(input: &'a str, dialect: &'a dyn Dialect, features: ParserFeatures) -> Self {
        let keep_comments = features.is_enabled(Feature::KeepComments);
        let (lexer, error) = Lexer::new_lenient(input, dialect, keep_comments);
        let mut parser = Self::with_lexer(lexer, dialect, features);
        parser.deferred = match error {
            Some(err) => Some(err.into()),
            None => parser.collect_trivia().err(),
        };
        parser
    }

    fn with_lexer(lexer: Lexer<'a>, dialect: &'a dyn Dialect, features: ParserFeatures) -> Self {
        Self {
            lexer,
            dialect,
            features,
            prev_end: 0,
            param_counter: 0,
            pending_comments: vec![],
            pending_hints: vec![],
            split_gt: false,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            deferred: None,
            skip_current: false,
        }
    }

    /// Sets how deeply expressions, queries, joins and types may nest.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// # Errors
    ///
    /// Returns a syntax error once the nesting limit is exceeded, and
    /// propagates errors from `f`.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                format!("nesting too deep (limit {})", self.max_depth),
                self.current(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// The dialect driving this parser.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    #[must_use]
    pub const fn features(&self) -> ParserFeatures {
        self.features
    }

    /// The token under the cursor.
    #[must_use]
    pub const fn current(&self) -> &Token {
        self.lexer.current()
    }

    /// The source text being parsed.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.lexer.source()
    }

    /// Source text of a token as written.
    #[must_use]
    pub fn text_of(&self, token: &Token) -> &'a str {
        token.span.slice(self.source())
    }

    /// End offset of the last consumed token.
    #[must_use]
    pub const fn prev_end(&self) -> usize {
        self.prev_end
    }

    /// The range from `start` to the end of the last consumed token.
    #[must_use]
    pub const fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end)
    }

    /// Moves comments and hints out of the token stream.
    fn collect_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match &self.lexer.current().kind {
                TokenKind::Comment(text) => self.pending_comments.push(text.clone()),
                TokenKind::Hint(body) => self.pending_hints.push(body.clone()),
                _ => return Ok(()),
            }
            self.lexer.next()?;
        }
    }

    /// Consumes the current token and returns it.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if the following token is malformed.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        let token = self.lexer.current().clone();
        if token.is_eof() {
            return Ok(token);
        }
        self.lexer.next()?;
        self.prev_end = token.span.end;
        self.collect_trivia()?;
        Ok(token)
    }

    /// Returns the token after the current one without consuming anything.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if that token is malformed.
    pub fn peek(&mut self) -> Result<Token, ParseError> {
        let checkpoint = self.mark();
        let result = self.advance().map(|_| self.current().clone());
        self.reset(checkpoint);
        result
    }

    /// Snapshots the parser state.
    #[must_use]
    pub fn mark(&self) -> ParserCheckpoint {
        ParserCheckpoint {
            lexer: self.lexer.mark(),
            prev_end: self.prev_end,
            param_counter: self.param_counter,
            comments: self.pending_comments.clone(),
            hints: self.pending_hints.clone(),
            split_gt: self.split_gt,
        }
    }

    /// Restores a snapshot taken with [`Parser::mark`].
    pub fn reset(&mut self, checkpoint: ParserCheckpoint) {
        self.lexer.reset(checkpoint.lexer);
        self.prev_end = checkpoint.prev_end;
        self.param_counter = checkpoint.param_counter;
        self.pending_comments = checkpoint.comments;
        self.pending_hints = checkpoint.hints;
        self.split_gt = checkpoint.split_gt;
    }

    /// Runs `f` speculatively.
    ///
    /// A syntax error restores the state from before the call and yields
    /// `Ok(None)`. Lexical and unsupported errors are not absorbed.
    ///
    /// # Errors
    ///
    /// Propagates every error that is not a syntax error.
    pub fn maybe_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let checkpoint = self.mark();
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_syntax() => {
                trace!(offset = err.offset(), %err, "speculative parse failed, restoring");
                self.reset(checkpoint);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Calls a dialect hook, restoring the checkpoint when it declines.
    pub(crate) fn run_hook<T>(
        &mut self,
        hook: &'static str,
        f: impl FnOnce(&mut Self) -> HookResult<T>,
    ) -> HookResult<T> {
        let checkpoint = self.mark();
        let result = f(self)?;
        if result.is_none() {
            trace!(dialect = self.dialect.name(), hook, "hook declined");
            self.reset(checkpoint);
        }
        Ok(result)
    }

    /// Repeats `step` until it declines, collecting what it produced.
    ///
    /// The loop stops at the first step that returns `Ok(None)` and restores
    /// the state from before that step, leaving the unrecognized token for
    /// the caller. `step` receives true on its first call.
    ///
    /// # Errors
    ///
    /// Propagates hard errors from `step`.
    pub fn parse_option_loop<T>(
        &mut self,
        what: &'static str,
        mut step: impl FnMut(&mut Self, bool) -> HookResult<T>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            let checkpoint = self.mark();
            if let Some(item) = step(self, items.is_empty())? {
                items.push(item);
            } else {
                self.reset(checkpoint);
                trace!(
                    what,
                    count = items.len(),
                    stop = %self.current().kind,
                    "option loop stopped"
                );
                return Ok(items);
            }
        }
    }

    // Token matching

    /// Returns true if the current token has this kind.
    #[must_use]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    /// Consumes the current token if it has this kind.
    ///
    /// # Errors
    ///
    /// Returns a lexical error from the following token.
    pub fn consume(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a token of this kind and consumes it.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token differs.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(ParseError::unexpected(format!("'{kind}'"), self.current()))
        }
    }

    /// Returns true if the current token is this reserved word.
    #[must_use]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().is_keyword(keyword)
    }

    /// Consumes the current token if it is this reserved word.
    ///
    /// # Errors
    ///
    /// Returns a lexical error from the following token.
    pub fn consume_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a reserved word and consumes it.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token differs.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword)? {
            Ok(())
        } else {
            Err(ParseError::unexpected(keyword.as_str(), self.current()))
        }
    }

    /// Returns true if the current token is a bare word with this hash.
    #[must_use]
    pub const fn check_word(&self, hash: u64) -> bool {
        self.current().is_word_hash(hash)
    }

    /// Consumes the current token if it is a bare word with this hash.
    ///
    /// # Errors
    ///
    /// Returns a lexical error from the following token.
    pub fn consume_word(&mut self, hash: u64) -> Result<bool, ParseError> {
        if self.check_word(hash) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a bare word with this hash and consumes it.
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming `word` if the current token differs.
    pub fn expect_word(&mut self, hash: u64, word: &str) -> Result<(), ParseError> {
        if self.consume_word(hash)? {
            Ok(())
        } else {
            Err(ParseError::unexpected(word, self.current()))
        }
    }

    /// Returns true if the token after the current one satisfies `f`.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if that token is malformed.
    pub fn peek_is(&mut self, f: impl FnOnce(&Token) -> bool) -> Result<bool, ParseError> {
        Ok(f(&self.peek()?))
    }

    /// Builds a syntax error for the current token.
    #[must_use]
    pub fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current())
    }

    /// Consumes the `>` closing a type argument list, splitting `>>`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if no `>` follows.
    pub fn expect_closing_angle(&mut self) -> Result<(), ParseError> {
        if self.split_gt {
            self.split_gt = false;
            self.advance()?;
            return Ok(());
        }
        match self.current().kind {
            TokenKind::Gt => {
                self.advance()?;
                Ok(())
            }
            TokenKind::RightShift => {
                self.split_gt = true;
                Ok(())
            }
            _ => Err(self.error_expected("'>'")),
        }
    }

    // Names and literals

    /// Converts a word token into an identifier. Keywords are accepted
    /// only when `allow_keyword` is set.
    fn token_to_ident(&self, token: &Token, allow_keyword: bool) -> Option<Ident> {
        let ident = match &token.kind {
            TokenKind::Identifier(name) => Ident::new(name.as_str()),
            TokenKind::Keyword(_) | TokenKind::Reserved(_) if allow_keyword => {
                Ident::new(self.text_of(token))
            }
            TokenKind::QuotedIdentifier { value, quote } => {
                if self.features.is_enabled(Feature::KeepNameQuotes) {
                    Ident::quoted(value.as_str(), *quote)
                } else {
                    Ident::new(value.as_str())
                }
            }
            _ => return None,
        };
        Some(ident.with_span(token.span))
    }

    /// Parses an identifier; reserved words are rejected.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token is not an identifier.
    pub fn parse_identifier(&mut self) -> Result<Ident, ParseError> {
        match self.token_to_ident(self.current(), false) {
            Some(ident) => {
                self.advance()?;
                Ok(ident)
            }
            None => Err(self.error_expected("identifier")),
        }
    }

    /// Parses an identifier, accepting reserved words as plain names.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token is not a word.
    pub fn parse_any_word(&mut self) -> Result<Ident, ParseError> {
        match self.token_to_ident(self.current(), true) {
            Some(ident) => {
                self.advance()?;
                Ok(ident)
            }
            None => Err(self.error_expected("identifier")),
        }
    }

    /// Parses a dotted name such as `db.schema.table`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if a part is missing.
    pub fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Dot) {
            self.advance()?;
            parts.push(self.parse_any_word()?);
        }
        Ok(ObjectName(parts))
    }

    /// Parses `(ident, ..)`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for a malformed list.
    pub fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let idents = self.parse_comma_separated(Self::parse_identifier)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(idents)
    }

    /// Parses one or more string literals, concatenating adjacent ones.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token is not a string.
    pub fn parse_string(&mut self) -> Result<String, ParseError> {
        let TokenKind::String(first) = &self.current().kind else {
            return Err(self.error_expected("string literal"));
        };
        let mut value = first.clone();
        self.advance()?;
        while let TokenKind::String(next) = &self.current().kind {
            value.push_str(next);
            self.advance()?;
        }
        Ok(value)
    }

    /// Parses an unsigned integer literal.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token is not one.
    pub fn parse_u64(&mut self) -> Result<u64, ParseError> {
        if let TokenKind::Number { text, .. } = &self.current().kind {
            if let Ok(value) = text.parse::<u64>() {
                self.advance()?;
                return Ok(value);
            }
        }
        Err(self.error_expected("unsigned integer"))
    }

    /// Parses an unsigned integer literal that fits in 32 bits.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the current token is not one.
    pub fn parse_u32(&mut self) -> Result<u32, ParseError> {
        let token = self.current().clone();
        let value = self.parse_u64()?;
        u32::try_from(value).map_err(|_| ParseError::new("integer out of range", &token))
    }

    /// Parses `f` repeatedly, separated by commas.
    ///
    /// # Errors
    ///
    /// Propagates errors from `f`.
    pub fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![f(self)?];
        while self.consume(&TokenKind::Comma)? {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Parses `(f)`.
    ///
    /// # Errors
    ///
    /// Propagates errors from `f` and reports missing parentheses.
    pub fn parse_parenthesized<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let value = f(self)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(value)
    }

    pub(super) fn next_parameter_position(&mut self) -> usize {
        self.param_counter += 1;
        self.param_counter
    }

    /// Consumes a statement keyword and returns the optimizer hints that
    /// directly follow it. Hints seen earlier become comments.
    pub(super) fn expect_keyword_with_hints(
        &mut self,
        keyword: Keyword,
    ) -> Result<Vec<String>, ParseError> {
        self.hints_to_comments();
        self.expect_keyword(keyword)?;
        Ok(std::mem::take(&mut self.pending_hints))
    }

    fn hints_to_comments(&mut self) {
        for hint in self.pending_hints.drain(..) {
            self.pending_comments.push(format!("/*+{hint}*/"));
        }
    }

    // Statement lists

    /// Parses every statement in the input.
    ///
    /// # Errors
    ///
    /// Returns the first error; no partial result is returned.
    pub fn parse_statements(&mut self) -> Result<Vec<ParsedStatement>, ParseError> {
        self.statements().collect()
    }

    /// Iterates statements one at a time. The iterator ends after the first
    /// error; call [`Parser::synchronize`] and resume with
    /// [`Parser::parse_next`] to keep going.
    pub fn statements(&mut self) -> Statements<'_, 'a> {
        Statements {
            parser: self,
            failed: false,
        }
    }

    /// Parses the next statement, or returns `None` at end of input.
    pub fn parse_next(&mut self) -> Option<Result<ParsedStatement, ParseError>> {
        loop {
            if let Some(err) = self.deferred.take() {
                self.skip_current = true;
                return Some(Err(err));
            }
            if !self.consume_terminator() {
                break;
            }
        }
        if self.current().is_eof() {
            return None;
        }
        Some(self.parse_terminated_statement())
    }

    /// Consumes a `;`. A malformed token after it does not fail the
    /// statement it ends; the error is kept for the next
    /// [`Parser::parse_next`].
    fn consume_terminator(&mut self) -> bool {
        if !self.check(&TokenKind::Semicolon) {
            return false;
        }
        if let Err(err) = self.advance() {
            trace!(%err, "lexical error after terminator deferred");
            self.prev_end = self.current().span.end;
            self.deferred = Some(err);
        }
        true
    }

    fn parse_terminated_statement(&mut self) -> Result<ParsedStatement, ParseError> {
        let start = self.current().span.start;
        let statement = self.parse_statement()?;
        let span = Span::new(start, self.prev_end);
        // Trivia after the terminator belongs to the next statement.
        self.hints_to_comments();
        let comments = std::mem::take(&mut self.pending_comments);
        let after_semicolon = self.consume_terminator();
        if !after_semicolon && !self.current().is_eof() {
            return Err(self.error_expected("';' or end of input"));
        }
        debug!(kind = statement.kind_name(), start, end = span.end, "parsed statement");
        Ok(ParsedStatement {
            statement,
            after_semicolon,
            comments,
            span,
        })
    }

    /// Skips past the next `;` after an error so parsing can resume.
    ///
    /// # Errors
    ///
    /// Returns a lexical error met while scanning for the terminator.
    pub fn synchronize(&mut self) -> Result<(), ParseError> {
        self.pending_comments.clear();
        self.pending_hints.clear();
        self.split_gt = false;
        if std::mem::take(&mut self.skip_current) {
            self.lexer.skip_statement()?;
        } else {
            self.lexer.skip_to_terminator()?;
        }
        self.collect_trivia()?;
        self.consume_terminator();
        debug!(offset = self.current().span.start, "resynchronized after error");
        Ok(())
    }

    /// Parses one statement, trying the dialect's statement hook first.
    ///
    /// # Errors
    ///
    /// Returns a syntax or unsupported error for invalid input.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let dialect = self.dialect;
        let start = self.current().span.start;
        let mut statement = self.nested(|p| {
            if let Some(statement) = p.run_hook("statement", |p| dialect.parse_statement(p))? {
                return Ok(statement);
            }
            p.parse_generic_statement()
        })?;
        statement.record_span(self.span_from(start));
        Ok(statement)
    }
}

/// Iterator over the statements of a [`Parser`].
pub struct Statements<'p, 'a> {
    parser: &'p mut Parser<'a>,
    failed: bool,
}

impl Iterator for Statements<'_, '_> {
    type Item = Result<ParsedStatement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.parser.parse_next()?;
        self.failed = item.is_err();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    fn parser(input: &str) -> Parser<'_> {
        Parser::new(input, &GenericDialect, ParserFeatures::new()).unwrap()
    }

    #[test]
    fn test_mark_reset_restores_parameters() {
        let mut p = parser("? ?");
        let checkpoint = p.mark();
        assert_eq!(p.next_parameter_position(), 1);
        p.advance().unwrap();
        p.reset(checkpoint);
        assert_eq!(p.current().kind, TokenKind::Question);
        assert_eq!(p.next_parameter_position(), 1);
    }

    #[test]
    fn test_maybe_parse_restores_on_syntax_error() {
        let mut p = parser("a b");
        let result = p
            .maybe_parse(|p| {
                p.advance()?;
                p.expect(&TokenKind::Comma)
            })
            .unwrap();
        assert!(result.is_none());
        assert_eq!(p.current().kind, TokenKind::Identifier("a".into()));
    }

    #[test]
    fn test_option_loop_stops_before_unknown() {
        let mut p = parser("x x , y");
        let items = p
            .parse_option_loop("test", |p, first| {
                if !first {
                    p.consume(&TokenKind::Comma)?;
                }
                if p.check(&TokenKind::Identifier("x".into())) {
                    p.advance()?;
                    Ok(Some(()))
                } else {
                    Ok(None)
                }
            })
            .unwrap();
        assert_eq!(items.len(), 2);
        // The separator consumed by the failed step is put back.
        assert_eq!(p.current().kind, TokenKind::Comma);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut p = parser("a b");
        assert_eq!(p.peek().unwrap().kind, TokenKind::Identifier("b".into()));
        assert_eq!(p.current().kind, TokenKind::Identifier("a".into()));
    }

    #[test]
    fn test_parse_string_concatenates_adjacent() {
        let mut p = parser("'a' 'b'  'c' x");
        assert_eq!(p.parse_string().unwrap(), "abc");
    }

    #[test]
    fn test_reset_restores_taken_hints() {
        let features = ParserFeatures::new().with(Feature::KeepComments);
        let mut p = Parser::new("/*+ FULL(t) */ SELECT 1", &GenericDialect, features).unwrap();
        let checkpoint = p.mark();
        assert_eq!(p.expect_keyword_with_hints(Keyword::Select).unwrap(), [" FULL(t) "]);
        p.reset(checkpoint);
        assert_eq!(p.expect_keyword_with_hints(Keyword::Select).unwrap(), [" FULL(t) "]);
    }

    #[test]
    fn test_reset_restores_hints_turned_into_comments() {
        let features = ParserFeatures::new().with(Feature::KeepComments);
        let mut p = Parser::new("/*+ A */ x", &GenericDialect, features).unwrap();
        let checkpoint = p.mark();
        p.hints_to_comments();
        p.reset(checkpoint);
        assert_eq!(p.pending_hints, [" A "]);
        assert!(p.pending_comments.is_empty());
    }

    #[test]
    fn test_terminator_defers_lex_error() {
        let mut p = parser("SELECT 1; $");
        let first = p.parse_next().unwrap().unwrap();
        assert!(first.after_semicolon);
        let err = p.parse_next().unwrap().unwrap_err();
        assert_eq!(err.kind, crate::parser::ParseErrorKind::Lex);
        p.synchronize().unwrap();
        assert!(p.parse_next().is_none());
    }

    #[test]
    fn test_nesting_limit_is_configurable() {
        let mut p = parser("f(f(f(1)))").with_max_depth(3);
        let err = p.parse_expr().unwrap_err();
        assert!(err.is_syntax());
        assert!(err.message.contains("nesting too deep"));
        let mut p = parser("f(f(f(1)))").with_max_depth(4);
        assert!(p.parse_expr().is_ok());
    }

    #[test]
    fn test_split_right_shift() {
        let mut p = parser(">> x");
        p.expect_closing_angle().unwrap();
        p.expect_closing_angle().unwrap();
        assert_eq!(p.current().kind, TokenKind::Identifier("x".into()));
    }
}
