//! opusc-lex - Lexical analysis for Opus source code.
//!
//! This crate turns a byte stream into a lazy token sequence. It provides:
//!
//! - [`SourceReader`]: a byte cursor with non-consuming peek, advancing
//!   consume, line/column tracking, and trivia skipping.
//! - [`Token`] / [`TokenKind`] / [`LexErrorKind`]: the token model.
//! - [`Lexer`]: the context-sensitive tokenizer. Newlines terminate
//!   statements only outside round and square brackets, and `!` resolves to
//!   factorial, not-equal, or negation depending on context.
//!
//! Errors never abort lexing: every failure is emitted as an error-kind
//! token (plus a diagnostic on the shared handler) so the parser can
//! synchronize and continue.

pub mod lexer;
pub mod reader;
pub mod token;

pub use lexer::{BracketNesting, Lexer};
pub use reader::SourceReader;
pub use token::{escape_lexeme, LexErrorKind, Token, TokenKind, MAX_LEXEME_LEN};
