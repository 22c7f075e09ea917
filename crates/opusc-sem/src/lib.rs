//! opusc-sem - Semantic analysis for Opus programs.
//!
//! This crate walks the AST produced by `opusc-par` and performs name
//! resolution against a scoped symbol table, type inference and checking on
//! every expression, constant folding of compile-time-known subtrees, and
//! static elimination of provably dead conditional branches.
//!
//! The analyzer records diagnostics and keeps going, so a single run
//! surfaces as many problems as possible.

pub mod analyzer;
pub mod fold;
pub mod table;

pub use analyzer::{FunctionInfo, SemanticAnalyzer};
pub use table::{Symbol, SymbolTable};
