//! opusc-par - Syntactic analysis for Opus source code.
//!
//! This crate provides:
//!
//! - [`ast`]: the AST model. Every node is the same uniform binary record
//!   (kind, anchor token, two children, analyzer attributes); sequences are
//!   right-leaning cons-cell chains.
//! - [`Parser`]: a top-down recursive-descent parser with a
//!   precedence-climbing expression grammar and panic-mode error recovery
//!   synchronized on statement delimiters.
//!
//! The parser owns its lexer and pulls tokens on demand; errors substitute
//! `Error` nodes and parsing always runs to end of input.

pub mod ast;
pub mod expr;
pub mod parser;

pub use ast::{Node, NodeKind, Value, TYPE_ANY};
pub use parser::{ParseErrorKind, Parser};
