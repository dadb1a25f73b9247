//! Source positions for diagnostics.

use std::fmt;

/// Position of the byte about to be processed.
///
/// Advanced once per consumed byte. When the byte that becomes current
/// is `\n`, the line number increments and the column resets to 1, so a
/// newline is reported as column 1 of the line it ends, and the first
/// byte of the input sits at line 1, column 1, byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-based)
    pub line: u64,
    /// Column number (0 before the first byte is read)
    pub column: u64,
    /// Number of bytes consumed so far
    pub byte: u64,
}

impl Position {
    /// Position before any byte has been read.
    pub const START: Position = Position { line: 1, column: 0, byte: 0 };

    /// Create a position.
    #[inline]
    pub fn new(line: u64, column: u64, byte: u64) -> Self {
        Self { line, column, byte }
    }

    /// Account for one consumed byte. `newline` tells whether the new
    /// current byte is `\n`.
    #[inline]
    pub fn advance(&mut self, newline: bool) {
        self.byte += 1;
        self.column += 1;
        if newline {
            self.line += 1;
            self.column = 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {} (byte {})", self.line, self.column, self.byte)
    }
}
