//! Context-sensitive lexer for Opus source code.
//!
//! The lexer transforms source bytes into a stream of tokens, one per call
//! to [`Lexer::next_token`]. Tokenization here is context-sensitive in two
//! ways that a classical scanner is not:
//!
//! - A newline is a statement [`Delimiter`](TokenKind::Delimiter) only while
//!   the round and square bracket counters are zero; inside `(...)` or
//!   `[...]` it is plain whitespace. Curly nesting is counted but never
//!   suppresses newlines, since blocks contain newline-terminated
//!   statements.
//! - `!` resolves against the previously emitted token: after a numeric or
//!   an identifier it is the postfix factorial, before `=` it fuses into
//!   `!=`, and otherwise it is prefix logical negation.
//!
//! On a token-level error the lexer still emits a token (of error kind) so
//! the parser can synchronize on the next delimiter, and records the
//! formatted diagnostic with the shared handler.

use opusc_util::{Diagnostic, FxHashMap, Handler, SourceLocation};

use crate::reader::SourceReader;
use crate::token::{keyword_table, LexErrorKind, Token, TokenKind, MAX_LEXEME_LEN};

/// Operator characters: the alphabet all operators are spelled from.
const OPERATOR_CHARS: &[u8] = b"+-*/%!&|=<>";

/// Returns true if the byte can appear inside an operator.
#[inline]
fn is_operator_char(byte: u8) -> bool {
    OPERATOR_CHARS.contains(&byte)
}

/// Returns true if the byte can continue an identifier.
#[inline]
fn is_identifier_continue(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

/// Bracket-nesting counters carried across the whole file.
///
/// Each counter is incremented on its opening bracket and decremented on
/// its closing bracket, never below zero. All three must be zero at end of
/// input, otherwise the file has an unclosed bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BracketNesting {
    /// `(` ... `)` depth.
    pub round: u32,
    /// `{` ... `}` depth.
    pub curly: u32,
    /// `[` ... `]` depth.
    pub square: u32,
}

impl BracketNesting {
    /// True when every counter is zero.
    pub fn is_balanced(&self) -> bool {
        self.round == 0 && self.curly == 0 && self.square == 0
    }

    /// True while newlines are whitespace rather than delimiters.
    ///
    /// Only round and square nesting suppress newlines.
    pub fn suppresses_newline(&self) -> bool {
        self.round > 0 || self.square > 0
    }
}

/// The Opus lexer.
///
/// Each call to [`next_token`](Lexer::next_token) returns exactly one
/// token. State carried across calls: the reader position, the kind of the
/// previously emitted token, the bracket-nesting vector, and an exhaustion
/// flag set once end of input has been reached and finalized.
///
/// # Example
///
/// ```
/// use opusc_lex::{Lexer, TokenKind};
/// use opusc_util::Handler;
///
/// let handler = Handler::new();
/// let mut lexer = Lexer::new("let x: Int\n", &handler);
///
/// assert_eq!(lexer.next_token().kind, TokenKind::Let);
/// assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
/// ```
pub struct Lexer<'a> {
    /// Byte reader over the source.
    reader: SourceReader<'a>,

    /// Diagnostic handler shared with the rest of the pipeline.
    handler: &'a Handler,

    /// Reserved-word reclassification table.
    keywords: FxHashMap<&'static str, TokenKind>,

    /// Kind of the previously emitted token. Seeds as `Eof`.
    previous_kind: TokenKind,

    /// Bracket-nesting vector.
    nesting: BracketNesting,

    /// Set once end of input has been reached and unclosed brackets
    /// reported.
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            reader: SourceReader::new(source),
            handler,
            keywords: keyword_table(),
            previous_kind: TokenKind::Eof,
            nesting: BracketNesting::default(),
            exhausted: false,
        }
    }

    /// Returns the next token.
    ///
    /// Skips trivia, consumes exactly one token's worth of bytes, and
    /// returns the token. At end of input this finalizes the nesting vector
    /// (reporting unclosed brackets once) and returns an `Eof` token on
    /// every subsequent call.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.reader.skip_trivia();

            let location = self.reader.location();
            let byte = match self.reader.peek() {
                Some(byte) => byte,
                None => return self.finish_at_end(location),
            };

            let token = match byte {
                b'\n' => {
                    self.reader.consume();
                    if self.nesting.suppresses_newline() {
                        continue;
                    }
                    Token::new(TokenKind::Delimiter, location, "\n")
                }
                b'(' => {
                    self.reader.consume();
                    self.nesting.round += 1;
                    Token::new(TokenKind::LParen, location, "(")
                }
                b')' => {
                    self.reader.consume();
                    self.nesting.round = self.nesting.round.saturating_sub(1);
                    Token::new(TokenKind::RParen, location, ")")
                }
                b'{' => {
                    self.reader.consume();
                    self.nesting.curly += 1;
                    Token::new(TokenKind::LBrace, location, "{")
                }
                b'}' => {
                    self.reader.consume();
                    self.nesting.curly = self.nesting.curly.saturating_sub(1);
                    Token::new(TokenKind::RBrace, location, "}")
                }
                b'[' => {
                    self.reader.consume();
                    self.nesting.square += 1;
                    Token::new(TokenKind::LBracket, location, "[")
                }
                b']' => {
                    self.reader.consume();
                    self.nesting.square = self.nesting.square.saturating_sub(1);
                    Token::new(TokenKind::RBracket, location, "]")
                }
                b',' => {
                    self.reader.consume();
                    Token::new(TokenKind::Comma, location, ",")
                }
                b':' => {
                    self.reader.consume();
                    Token::new(TokenKind::Colon, location, ":")
                }
                b'"' => self.lex_string(location),
                byte if byte.is_ascii_digit() => self.lex_numeric(location),
                byte if byte == b'_' || byte.is_ascii_alphabetic() => {
                    self.lex_identifier(location)
                }
                byte if is_operator_char(byte) => {
                    self.reader.consume();
                    self.lex_operator(byte, location)
                }
                byte => {
                    self.reader.consume();
                    let lexeme = String::from_utf8_lossy(&[byte]).into_owned();
                    self.error_token(LexErrorKind::Unrecognizable, lexeme, location)
                }
            };

            self.previous_kind = token.kind;
            return token;
        }
    }

    /// Collects every remaining token up to (excluding) end of input.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    /// The current bracket-nesting vector.
    pub fn nesting(&self) -> BracketNesting {
        self.nesting
    }

    /// True once end of input has been reached and finalized.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Lexes a numeric literal: digits with at most one `.`.
    ///
    /// A numeric must terminate on whitespace, a newline, end of input, an
    /// operator character, a closing bracket, or a comma. Anything else
    /// (including a second `.`) makes the token malformed; the remainder is
    /// consumed up to the next terminator so the parser resynchronizes
    /// cleanly.
    fn lex_numeric(&mut self, location: SourceLocation) -> Token {
        let mut lexeme = String::new();
        let mut overflow = false;
        let mut dots = 0u32;
        let mut malformed = false;

        while let Some(byte) = self.reader.peek() {
            if byte.is_ascii_digit() {
                self.reader.consume();
                push_capped(&mut lexeme, byte, &mut overflow);
            } else if byte == b'.' {
                self.reader.consume();
                push_capped(&mut lexeme, byte, &mut overflow);
                dots += 1;
                if dots > 1 {
                    malformed = true;
                }
            } else if Self::is_numeric_terminator(byte) {
                break;
            } else {
                // Illegal continuation; keep draining to the terminator.
                self.reader.consume();
                push_capped(&mut lexeme, byte, &mut overflow);
                malformed = true;
            }
        }

        if overflow {
            self.error_token(LexErrorKind::Overflow, lexeme, location)
        } else if malformed {
            self.error_token(LexErrorKind::MalformedNumeric, lexeme, location)
        } else {
            Token::new(TokenKind::Numeric, location, lexeme)
        }
    }

    /// Returns true if the byte legally ends a numeric literal.
    fn is_numeric_terminator(byte: u8) -> bool {
        SourceReader::is_inline_whitespace(byte)
            || byte == b'\n'
            || is_operator_char(byte)
            || matches!(byte, b')' | b'}' | b']' | b',')
    }

    /// Lexes an identifier or keyword.
    ///
    /// A letter or underscore starts the lexeme; alphanumerics and
    /// underscores extend it. A lone `_` is an orphan-underscore error
    /// (`__` is a valid identifier). The finished lexeme is reclassified
    /// against the reserved-word table.
    fn lex_identifier(&mut self, location: SourceLocation) -> Token {
        let mut lexeme = String::new();
        let mut overflow = false;

        while let Some(byte) = self.reader.peek() {
            if !is_identifier_continue(byte) {
                break;
            }
            self.reader.consume();
            push_capped(&mut lexeme, byte, &mut overflow);
        }

        if overflow {
            return self.error_token(LexErrorKind::Overflow, lexeme, location);
        }
        if lexeme == "_" {
            return self.error_token(LexErrorKind::OrphanUnderscore, lexeme, location);
        }

        let kind = self
            .keywords
            .get(lexeme.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        Token::new(kind, location, lexeme)
    }

    /// Lexes a string literal.
    ///
    /// The opening `"` has not been consumed yet. A backslash escapes the
    /// following byte, which is preserved literally (so `\"` does not close
    /// the string). The stored lexeme excludes the outer quotes. End of
    /// input before the closing quote is an unterminated-string error.
    fn lex_string(&mut self, location: SourceLocation) -> Token {
        self.reader.consume(); // opening quote
        let mut bytes: Vec<u8> = Vec::new();
        let mut overflow = false;

        loop {
            match self.reader.peek() {
                None => {
                    let lexeme = String::from_utf8_lossy(&bytes).into_owned();
                    return self.error_token(LexErrorKind::UnterminatedString, lexeme, location);
                }
                Some(b'"') => {
                    self.reader.consume();
                    break;
                }
                Some(b'\\') => {
                    self.reader.consume();
                    push_byte_capped(&mut bytes, b'\\', &mut overflow);
                    match self.reader.consume() {
                        Some(escaped) => push_byte_capped(&mut bytes, escaped, &mut overflow),
                        None => {
                            let lexeme = String::from_utf8_lossy(&bytes).into_owned();
                            return self.error_token(
                                LexErrorKind::UnterminatedString,
                                lexeme,
                                location,
                            );
                        }
                    }
                }
                Some(byte) => {
                    self.reader.consume();
                    push_byte_capped(&mut bytes, byte, &mut overflow);
                }
            }
        }

        let lexeme = String::from_utf8_lossy(&bytes).into_owned();
        if overflow {
            self.error_token(LexErrorKind::Overflow, lexeme, location)
        } else {
            Token::new(TokenKind::StringLiteral, location, lexeme)
        }
    }

    /// Lexes an operator. `first` has already been consumed.
    ///
    /// Multi-character operators (`->`, `==`, `!=`, `<=`, `>=`, `&&`,
    /// `||`) are recognized by one-byte lookahead. Any further operator
    /// character immediately following a complete operator turns the whole
    /// run into an undefined-operator error.
    fn lex_operator(&mut self, first: u8, location: SourceLocation) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first as char);

        let kind = match first {
            b'-' if self.reader.peek() == Some(b'>') => {
                self.reader.consume();
                lexeme.push('>');
                TokenKind::Arrow
            }
            b'=' if self.reader.peek() == Some(b'=') => {
                self.reader.consume();
                lexeme.push('=');
                TokenKind::EqEq
            }
            b'!' if self.reader.peek() == Some(b'=') => {
                self.reader.consume();
                lexeme.push('=');
                TokenKind::NotEq
            }
            b'<' if self.reader.peek() == Some(b'=') => {
                self.reader.consume();
                lexeme.push('=');
                TokenKind::LtEq
            }
            b'>' if self.reader.peek() == Some(b'=') => {
                self.reader.consume();
                lexeme.push('=');
                TokenKind::GtEq
            }
            b'&' => {
                if self.reader.peek() == Some(b'&') {
                    self.reader.consume();
                    lexeme.push('&');
                    TokenKind::AndAnd
                } else {
                    // A lone `&` spells no operator.
                    return self.drain_operator_run(lexeme, location);
                }
            }
            b'|' => {
                if self.reader.peek() == Some(b'|') {
                    self.reader.consume();
                    lexeme.push('|');
                    TokenKind::OrOr
                } else {
                    return self.drain_operator_run(lexeme, location);
                }
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'=' => TokenKind::Assign,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'!' => {
                // Context-sensitive: postfix factorial after a value token,
                // prefix negation otherwise. The `!=` pair was ruled out
                // above.
                if matches!(
                    self.previous_kind,
                    TokenKind::Numeric | TokenKind::Identifier
                ) {
                    TokenKind::Factorial
                } else {
                    TokenKind::Not
                }
            }
            _ => return self.error_token(LexErrorKind::Unrecognizable, lexeme, location),
        };

        if self.reader.peek().is_some_and(is_operator_char) {
            return self.drain_operator_run(lexeme, location);
        }

        Token::new(kind, location, lexeme)
    }

    /// Consumes the rest of a run of operator characters and produces an
    /// undefined-operator error token carrying the whole run.
    fn drain_operator_run(&mut self, mut lexeme: String, location: SourceLocation) -> Token {
        let mut overflow = false;
        while let Some(byte) = self.reader.peek() {
            if !is_operator_char(byte) {
                break;
            }
            self.reader.consume();
            push_capped(&mut lexeme, byte, &mut overflow);
        }
        if overflow {
            self.error_token(LexErrorKind::Overflow, lexeme, location)
        } else {
            self.error_token(LexErrorKind::UndefinedOperator, lexeme, location)
        }
    }

    /// Finalizes at end of input: reports every non-zero bracket counter
    /// as an unclosed-bracket error, once, then returns the `Eof` token.
    fn finish_at_end(&mut self, location: SourceLocation) -> Token {
        if !self.exhausted {
            self.exhausted = true;
            if self.nesting.round > 0 {
                self.report_unclosed("UnclosedRoundBracket", "(", location);
            }
            if self.nesting.curly > 0 {
                self.report_unclosed("UnclosedCurlyBracket", "{", location);
            }
            if self.nesting.square > 0 {
                self.report_unclosed("UnclosedSquareBracket", "[", location);
            }
        }
        Token::eof(location)
    }

    /// Records a stream-level unclosed-bracket diagnostic.
    fn report_unclosed(&self, name: &str, lexeme: &str, location: SourceLocation) {
        self.handler.emit(Diagnostic::error(
            format!(
                "<ERROR:{}, Lexeme:\"{}\"> at location {}",
                name, lexeme, location
            ),
            location,
        ));
    }

    /// Builds a token-level error token and records its diagnostic.
    fn error_token(
        &self,
        sub_kind: LexErrorKind,
        lexeme: String,
        location: SourceLocation,
    ) -> Token {
        let token = Token::new(TokenKind::Error(sub_kind), location, lexeme);
        self.handler
            .emit(Diagnostic::error(token.to_string(), location));
        token
    }
}

/// Appends a byte to a lexeme unless the cap has been reached, flagging
/// overflow when it has.
fn push_capped(lexeme: &mut String, byte: u8, overflow: &mut bool) {
    if lexeme.len() < MAX_LEXEME_LEN {
        lexeme.push(byte as char);
    } else {
        *overflow = true;
    }
}

/// Byte-buffer variant of [`push_capped`] for string literals.
fn push_byte_capped(bytes: &mut Vec<u8>, byte: u8, overflow: &mut bool) {
    if bytes.len() < MAX_LEXEME_LEN {
        bytes.push(byte);
    } else {
        *overflow = true;
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_tokens(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        lexer.tokenize()
    }

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex_tokens(source).into_iter().map(|t| t.kind).collect()
    }

    fn first_token(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            lex_kinds("var let if else repeat until for in return func class struct"),
            vec![
                TokenKind::Var,
                TokenKind::Let,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Repeat,
                TokenKind::Until,
                TokenKind::For,
                TokenKind::In,
                TokenKind::Return,
                TokenKind::Func,
                TokenKind::Class,
                TokenKind::Struct,
            ]
        );
    }

    #[test]
    fn test_boolean_literals() {
        let tokens = lex_tokens("true false");
        assert_eq!(tokens[0].kind, TokenKind::BooleanLiteral);
        assert_eq!(tokens[0].lexeme, "true");
        assert_eq!(tokens[1].kind, TokenKind::BooleanLiteral);
        assert_eq!(tokens[1].lexeme, "false");
    }

    #[test]
    fn test_identifier_not_keyword() {
        let token = first_token("variable");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "variable");
    }

    #[test]
    fn test_double_underscore_is_identifier() {
        let token = first_token("__");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "__");
    }

    #[test]
    fn test_orphan_underscore() {
        let token = first_token("_ ");
        assert_eq!(
            token.kind,
            TokenKind::Error(LexErrorKind::OrphanUnderscore)
        );
    }

    #[test]
    fn test_underscore_prefixed_identifier() {
        let token = first_token("_count");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "_count");
    }

    #[test]
    fn test_integer_literal() {
        let token = first_token("100\n");
        assert_eq!(token.kind, TokenKind::Numeric);
        assert_eq!(token.lexeme, "100");
    }

    #[test]
    fn test_float_literal() {
        let token = first_token("3.14 ");
        assert_eq!(token.kind, TokenKind::Numeric);
        assert_eq!(token.lexeme, "3.14");
    }

    #[test]
    fn test_numeric_two_dots_is_malformed() {
        let token = first_token("1.2.3\n");
        assert_eq!(
            token.kind,
            TokenKind::Error(LexErrorKind::MalformedNumeric)
        );
        assert_eq!(token.lexeme, "1.2.3");
    }

    #[test]
    fn test_numeric_with_letter_is_malformed() {
        let token = first_token("12ab ");
        assert_eq!(
            token.kind,
            TokenKind::Error(LexErrorKind::MalformedNumeric)
        );
        assert_eq!(token.lexeme, "12ab");
    }

    #[test]
    fn test_numeric_terminates_on_operator() {
        assert_eq!(
            lex_kinds("1+2"),
            vec![TokenKind::Numeric, TokenKind::Plus, TokenKind::Numeric]
        );
    }

    #[test]
    fn test_numeric_terminates_on_closing_bracket_and_comma() {
        assert_eq!(
            lex_kinds("(1)"),
            vec![TokenKind::LParen, TokenKind::Numeric, TokenKind::RParen]
        );
        assert_eq!(
            lex_kinds("[1,2]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Numeric,
                TokenKind::Comma,
                TokenKind::Numeric,
                TokenKind::RBracket,
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        let token = first_token("\"hello\"");
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.lexeme, "hello");
    }

    #[test]
    fn test_string_escape_preserved_literally() {
        let token = first_token(r#""say \"hi\"""#);
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.lexeme, r#"say \"hi\""#);
    }

    #[test]
    fn test_unterminated_string() {
        let token = first_token("\"oops");
        assert_eq!(
            token.kind,
            TokenKind::Error(LexErrorKind::UnterminatedString)
        );
        assert_eq!(token.lexeme, "oops");
    }

    #[test]
    fn test_newline_is_delimiter_at_top_level() {
        assert_eq!(
            lex_kinds("a\nb"),
            vec![
                TokenKind::Identifier,
                TokenKind::Delimiter,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_newline_inside_round_brackets_is_whitespace() {
        assert_eq!(
            lex_kinds("(\n1\n+\n2\n)"),
            vec![
                TokenKind::LParen,
                TokenKind::Numeric,
                TokenKind::Plus,
                TokenKind::Numeric,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_newline_inside_square_brackets_is_whitespace() {
        assert_eq!(
            lex_kinds("[\n1\n]"),
            vec![TokenKind::LBracket, TokenKind::Numeric, TokenKind::RBracket]
        );
    }

    #[test]
    fn test_newline_inside_curly_brackets_is_delimiter() {
        assert_eq!(
            lex_kinds("{\na\n}"),
            vec![
                TokenKind::LBrace,
                TokenKind::Delimiter,
                TokenKind::Identifier,
                TokenKind::Delimiter,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_factorial_after_numeric() {
        assert_eq!(
            lex_kinds("5!"),
            vec![TokenKind::Numeric, TokenKind::Factorial]
        );
    }

    #[test]
    fn test_factorial_after_identifier() {
        assert_eq!(
            lex_kinds("n!"),
            vec![TokenKind::Identifier, TokenKind::Factorial]
        );
    }

    #[test]
    fn test_prefix_not() {
        assert_eq!(
            lex_kinds("!ready"),
            vec![TokenKind::Not, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_not_equal_is_one_token() {
        assert_eq!(
            lex_kinds("x != 2"),
            vec![TokenKind::Identifier, TokenKind::NotEq, TokenKind::Numeric]
        );
    }

    #[test]
    fn test_multi_character_operators() {
        assert_eq!(
            lex_kinds("-> == != <= >= && ||"),
            vec![
                TokenKind::Arrow,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
            ]
        );
    }

    #[test]
    fn test_operator_run_is_undefined() {
        let token = first_token("=== ");
        assert_eq!(
            token.kind,
            TokenKind::Error(LexErrorKind::UndefinedOperator)
        );
        assert_eq!(token.lexeme, "===");
    }

    #[test]
    fn test_lone_ampersand_is_undefined() {
        let token = first_token("& ");
        assert_eq!(
            token.kind,
            TokenKind::Error(LexErrorKind::UndefinedOperator)
        );
        assert_eq!(token.lexeme, "&");
    }

    #[test]
    fn test_unrecognizable_byte() {
        let token = first_token("@");
        assert_eq!(token.kind, TokenKind::Error(LexErrorKind::Unrecognizable));
        assert_eq!(token.lexeme, "@");
    }

    #[test]
    fn test_comment_is_skipped() {
        assert_eq!(
            lex_kinds("a // the rest is gone\nb"),
            vec![
                TokenKind::Identifier,
                TokenKind::Delimiter,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_token_locations() {
        let tokens = lex_tokens("let x\ny");
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(1, 6));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_nesting_balanced_at_eof() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("({[]})", &handler);
        lexer.tokenize();
        assert!(lexer.nesting().is_balanced());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_unclosed_round_bracket_reported_once() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("(1", &handler);
        lexer.tokenize();
        lexer.next_token();
        lexer.next_token();

        let errors = handler.diagnostics();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("UnclosedRoundBracket"));
    }

    #[test]
    fn test_unclosed_brackets_all_classes() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("({[", &handler);
        lexer.tokenize();
        assert_eq!(handler.error_count(), 3);
    }

    #[test]
    fn test_extra_closing_bracket_never_goes_negative() {
        let handler = Handler::new();
        let mut lexer = Lexer::new(")", &handler);
        lexer.tokenize();
        assert!(lexer.nesting().is_balanced());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_lexeme_overflow() {
        let long = "a".repeat(MAX_LEXEME_LEN + 40);
        let token = first_token(&long);
        assert_eq!(token.kind, TokenKind::Error(LexErrorKind::Overflow));
        assert_eq!(token.lexeme.len(), MAX_LEXEME_LEN);
    }

    #[test]
    fn test_error_token_records_diagnostic() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("1.2.3\n", &handler);
        lexer.next_token();

        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "<ERROR:MalformedNumeric, Lexeme:\"1.2.3\"> at location 1:1"
        );
    }

    #[test]
    fn test_iterator_stops_at_eof() {
        let handler = Handler::new();
        let lexer = Lexer::new("a b", &handler);
        assert_eq!(lexer.count(), 2);
    }

    #[test]
    fn test_declaration_with_assignment() {
        assert_eq!(
            lex_kinds("let quizGrade: Int = 100\n"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Numeric,
                TokenKind::Delimiter,
            ]
        );
    }
}
