//! Error and warning reporting infrastructure.
//!
//! Every phase of the compiler reports problems through a shared [`Handler`]
//! rather than aborting. The handler collects [`Diagnostic`] values so a
//! single run can surface as many problems as possible; the driver decides
//! afterwards whether compilation may continue.
//!
//! # Examples
//!
//! ```
//! use opusc_util::{Handler, SourceLocation};
//!
//! let handler = Handler::new();
//! handler.error("unexpected token", SourceLocation::new(1, 5));
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.error_count(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

use crate::location::SourceLocation;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that prevents compilation.
    Error,
    /// A warning that does not prevent compilation.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with severity and source location.
///
/// # Examples
///
/// ```
/// use opusc_util::{Diagnostic, Level, SourceLocation};
///
/// let diag = Diagnostic::error("redeclared symbol 'x'", SourceLocation::new(3, 5));
/// assert_eq!(diag.level, Level::Error);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
    /// Source location the message is pinned to.
    pub location: SourceLocation,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(level: Level, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            level,
            message: message.into(),
            location,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Level::Error, message, location)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Level::Warning, message, location)
    }
}

/// Handler for collecting and querying diagnostics.
///
/// The handler is shared by reference across the lexer, parser, and
/// analyzer, so it uses interior mutability for the collected list.
///
/// # Examples
///
/// ```
/// use opusc_util::{Handler, SourceLocation};
///
/// let handler = Handler::new();
/// assert!(!handler.has_errors());
///
/// handler.error("something went wrong", SourceLocation::new(2, 1));
/// assert_eq!(handler.error_count(), 1);
/// ```
pub struct Handler {
    /// Collected diagnostics, in emission order.
    diagnostics: RefCell<Vec<Diagnostic>>,
    /// Whether to panic on errors (for tests).
    panic_on_error: bool,
}

impl Handler {
    /// Create a new handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: false,
        }
    }

    /// Create a handler that panics on the first error (for tests).
    pub fn new_panicking() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: true,
        }
    }

    /// Report an error at the given location.
    pub fn error(&self, message: impl Into<String>, location: SourceLocation) {
        self.emit(Diagnostic::error(message, location));
    }

    /// Report a warning at the given location.
    pub fn warning(&self, message: impl Into<String>, location: SourceLocation) {
        self.emit(Diagnostic::warning(message, location));
    }

    /// Emit a pre-built diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        if self.panic_on_error && diagnostic.level == Level::Error {
            panic!("diagnostic error: {}", diagnostic.message);
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Whether any errors have been reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of reported errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// All collected diagnostics, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Drop all collected diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_handler() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
        assert!(handler.diagnostics().is_empty());
    }

    #[test]
    fn test_collects_errors() {
        let handler = Handler::new();
        handler.error("first", SourceLocation::new(1, 1));
        handler.error("second", SourceLocation::new(2, 3));

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 2);

        let diags = handler.diagnostics();
        assert_eq!(diags[0].message, "first");
        assert_eq!(diags[1].location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let handler = Handler::new();
        handler.warning("just a warning", SourceLocation::new(1, 1));

        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
        assert_eq!(handler.diagnostics().len(), 1);
    }

    #[test]
    fn test_clear() {
        let handler = Handler::new();
        handler.error("oops", SourceLocation::new(1, 1));
        handler.clear();
        assert!(!handler.has_errors());
    }

    #[test]
    #[should_panic(expected = "diagnostic error")]
    fn test_panicking_handler() {
        let handler = Handler::new_panicking();
        handler.error("boom", SourceLocation::new(1, 1));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::Error), "error");
        assert_eq!(format!("{}", Level::Warning), "warning");
    }
}
