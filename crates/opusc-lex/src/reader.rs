//! Byte reader for traversing source code.
//!
//! This module provides the [`SourceReader`] struct which maintains position
//! state while iterating through source bytes. It tracks line/column
//! information for error reporting and knows how to skip the trivia that
//! never reaches the lexer: inline whitespace and `//` comments.
//!
//! Newline is deliberately *not* trivia. It terminates statements outside
//! brackets, so the lexer must see every newline byte and decide for itself.

use opusc_util::SourceLocation;

/// A reader for traversing source code one byte at a time.
///
/// The reader maintains the current position in the source and provides a
/// non-consuming [`peek`](SourceReader::peek) and an advancing
/// [`consume`](SourceReader::consume). Peek never touches the line/column
/// counters; consume is the only primitive that does.
///
/// # Example
///
/// ```
/// use opusc_lex::reader::SourceReader;
///
/// let mut reader = SourceReader::new("var x");
/// assert_eq!(reader.peek(), Some(b'v'));
/// assert_eq!(reader.consume(), Some(b'v'));
/// assert_eq!(reader.peek(), Some(b'a'));
/// ```
pub struct SourceReader<'a> {
    /// The source bytes being traversed.
    source: &'a [u8],

    /// Current byte position in the source.
    position: usize,

    /// Current line/column (1-based).
    location: SourceLocation,
}

impl<'a> SourceReader<'a> {
    /// Creates a new reader over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            location: SourceLocation::start(),
        }
    }

    /// Returns the next byte without consuming it, or `None` at end of
    /// input. Never advances the location counters.
    ///
    /// # Example
    ///
    /// ```
    /// use opusc_lex::reader::SourceReader;
    ///
    /// let reader = SourceReader::new("a");
    /// assert_eq!(reader.peek(), Some(b'a'));
    /// assert_eq!(reader.peek(), Some(b'a'));
    /// ```
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    /// Returns the byte at the given offset past the current position.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.position + offset).copied()
    }

    /// Consumes and returns the next byte, advancing line/column tracking.
    ///
    /// A newline advances the line and resets the column to 1; every other
    /// byte increments the column.
    ///
    /// # Example
    ///
    /// ```
    /// use opusc_lex::reader::SourceReader;
    ///
    /// let mut reader = SourceReader::new("a\nb");
    /// reader.consume();
    /// reader.consume();
    /// assert_eq!(reader.location().line, 2);
    /// assert_eq!(reader.location().column, 1);
    /// ```
    pub fn consume(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        if byte == b'\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(byte)
    }

    /// Returns true if all input has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns the current line/column position.
    #[inline]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Returns true for whitespace that carries no meaning anywhere:
    /// space, tab, vertical tab, carriage return, form feed.
    ///
    /// Newline is excluded: it terminates statements outside brackets.
    #[inline]
    pub fn is_inline_whitespace(byte: u8) -> bool {
        matches!(byte, b' ' | b'\t' | 0x0b | b'\r' | 0x0c)
    }

    /// Skips to the start of the next token: inline whitespace and
    /// `//`-to-end-of-line comments. Stops at a newline without consuming
    /// it.
    ///
    /// # Example
    ///
    /// ```
    /// use opusc_lex::reader::SourceReader;
    ///
    /// let mut reader = SourceReader::new("   // note\nx");
    /// reader.skip_trivia();
    /// assert_eq!(reader.peek(), Some(b'\n'));
    /// ```
    pub fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(byte) if Self::is_inline_whitespace(byte) => {
                    self.consume();
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(byte) = self.peek() {
                        if byte == b'\n' {
                            break;
                        }
                        self.consume();
                    }
                }
                _ => break,
            }
        }
    }

    /// Consumes bytes up to and including the next newline, or to end of
    /// input. Used for line-level error recovery.
    pub fn advance_to_next_line(&mut self) {
        while let Some(byte) = self.consume() {
            if byte == b'\n' {
                break;
            }
        }
    }
}
