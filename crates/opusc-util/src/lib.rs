//! opusc-util - Shared compiler infrastructure.
//!
//! This crate provides the pieces every phase of the compiler needs:
//! source locations, diagnostics, and the diagnostic handler that collects
//! them across a compilation.

pub mod diagnostic;
pub mod location;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use location::SourceLocation;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
