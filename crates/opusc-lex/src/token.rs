//! Token model: token kinds, lexical error kinds, and the token record.
//!
//! Tokens are immutable value objects. Each carries its kind, the source
//! location where it started, and the lexeme it was built from. Lexemes are
//! bounded by [`MAX_LEXEME_LEN`]; overrunning the bound is itself a lexical
//! error.

use std::fmt;

use opusc_util::{FxHashMap, SourceLocation};

/// Maximum number of bytes a lexeme may hold.
///
/// Collecting a longer token raises [`LexErrorKind::Overflow`].
pub const MAX_LEXEME_LEN: usize = 128;

/// Sub-kind carried by an error token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A numeric literal with more than one `.` or an illegal terminator.
    MalformedNumeric,
    /// A run of operator characters that forms no defined operator.
    UndefinedOperator,
    /// A token longer than [`MAX_LEXEME_LEN`] bytes.
    Overflow,
    /// A lone `_` that continues with no identifier character.
    OrphanUnderscore,
    /// A string literal with no closing quote before end of input.
    UnterminatedString,
    /// A byte that cannot begin any token.
    Unrecognizable,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexErrorKind::MalformedNumeric => "MalformedNumeric",
            LexErrorKind::UndefinedOperator => "UndefinedOperator",
            LexErrorKind::Overflow => "Overflow",
            LexErrorKind::OrphanUnderscore => "OrphanUnderscore",
            LexErrorKind::UnterminatedString => "UnterminatedString",
            LexErrorKind::Unrecognizable => "Unrecognizable",
        };
        write!(f, "{}", name)
    }
}

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// Statement terminator: a newline outside round and square brackets.
    Delimiter,

    /// Integer or floating-point literal.
    Numeric,
    /// String literal (quotes stripped).
    StringLiteral,
    /// `true` or `false`.
    BooleanLiteral,
    /// A name.
    Identifier,

    // Keywords.
    Var,
    Let,
    If,
    Else,
    Repeat,
    Until,
    For,
    In,
    Return,
    Func,
    Class,
    Struct,

    // Operators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// Postfix `!`.
    Factorial,
    /// Prefix `!`.
    Not,
    AndAnd,
    OrOr,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Assign,
    Comma,
    Colon,
    Arrow,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    /// A token-level lexical error, carrying its sub-kind.
    Error(LexErrorKind),
}

impl TokenKind {
    /// Returns true for the error kind.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error(_))
    }

    /// The display name used in token dumps.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EndOfInput",
            TokenKind::Delimiter => "Delimiter",
            TokenKind::Numeric => "Numeric",
            TokenKind::StringLiteral => "String",
            TokenKind::BooleanLiteral => "Boolean",
            TokenKind::Identifier => "Identifier",
            TokenKind::Var => "Var",
            TokenKind::Let => "Let",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::Repeat => "Repeat",
            TokenKind::Until => "Until",
            TokenKind::For => "For",
            TokenKind::In => "In",
            TokenKind::Return => "Return",
            TokenKind::Func => "Func",
            TokenKind::Class => "Class",
            TokenKind::Struct => "Struct",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::Percent => "Percent",
            TokenKind::Factorial => "Factorial",
            TokenKind::Not => "Not",
            TokenKind::AndAnd => "LogicalAnd",
            TokenKind::OrOr => "LogicalOr",
            TokenKind::EqEq => "EqualTo",
            TokenKind::NotEq => "NotEqualTo",
            TokenKind::Lt => "LessThan",
            TokenKind::Gt => "GreaterThan",
            TokenKind::LtEq => "LessThanOrEqualTo",
            TokenKind::GtEq => "GreaterThanOrEqualTo",
            TokenKind::Assign => "Assign",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Arrow => "RightArrow",
            TokenKind::LParen => "OpeningRoundBracket",
            TokenKind::RParen => "ClosingRoundBracket",
            TokenKind::LBrace => "OpeningCurlyBracket",
            TokenKind::RBrace => "ClosingCurlyBracket",
            TokenKind::LBracket => "OpeningSquareBracket",
            TokenKind::RBracket => "ClosingSquareBracket",
            TokenKind::Error(_) => "Error",
        }
    }
}

/// Builds the reserved-word table mapping lexemes to keyword kinds.
///
/// `true` and `false` reclassify to [`TokenKind::BooleanLiteral`]; every
/// other entry maps to its keyword kind.
pub fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    let mut table = FxHashMap::default();
    table.insert("var", TokenKind::Var);
    table.insert("let", TokenKind::Let);
    table.insert("if", TokenKind::If);
    table.insert("else", TokenKind::Else);
    table.insert("repeat", TokenKind::Repeat);
    table.insert("until", TokenKind::Until);
    table.insert("for", TokenKind::For);
    table.insert("in", TokenKind::In);
    table.insert("return", TokenKind::Return);
    table.insert("func", TokenKind::Func);
    table.insert("class", TokenKind::Class);
    table.insert("struct", TokenKind::Struct);
    table.insert("true", TokenKind::BooleanLiteral);
    table.insert("false", TokenKind::BooleanLiteral);
    table
}

/// A lexical token: kind, start location, and lexeme.
///
/// Tokens are immutable once produced. The parser consumes them and may
/// retain copies as anchors inside AST nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Where the token started.
    pub location: SourceLocation,
    /// The text the token was built from. String literals exclude their
    /// quotes; delimiters hold the newline byte.
    pub lexeme: String,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, location: SourceLocation, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            lexeme: lexeme.into(),
        }
    }

    /// Creates the end-of-input token.
    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, location, "")
    }

    /// Returns true for the error kind.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }

    /// The lexeme with control bytes rendered printable (`\n`, `\t`, ...).
    pub fn escaped_lexeme(&self) -> String {
        escape_lexeme(&self.lexeme)
    }
}

/// Renders a lexeme with newlines and other control bytes escaped, so
/// diagnostics stay on one line.
pub fn escape_lexeme(lexeme: &str) -> String {
    let mut out = String::with_capacity(lexeme.len());
    for c in lexeme.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

impl fmt::Display for Token {
    /// Renders the token in the diagnostic wire format:
    ///
    /// - `<Token:Identifier, Lexeme:"x"> at location 1:5`
    /// - `<ERROR:MalformedNumeric, Lexeme:"1.2.3"> at location 2:1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Error(sub) => write!(
                f,
                "<ERROR:{}, Lexeme:\"{}\"> at location {}",
                sub,
                self.escaped_lexeme(),
                self.location
            ),
            _ => write!(
                f,
                "<Token:{}, Lexeme:\"{}\"> at location {}",
                self.kind.name(),
                self.escaped_lexeme(),
                self.location
            ),
        }
    }
}
