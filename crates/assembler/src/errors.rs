//! Structured error and warning reporting for the assembler.
//!
//! Errors carry the source line they came from when one is known and format
//! in the usual compiler style:
//! ```text
//! Max.asm:12: error: unknown comp mnemonic `D*A` (in `D=D*A`)
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use hack_core::EncodeError;
use thiserror::Error;

/// A source location for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File name as given on input.
    pub file: String,
    /// 1-indexed line number.
    pub line: usize,
    /// Cleaned instruction text on that line.
    pub text: String,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Classification of assembly errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleErrorKind {
    /// Input file does not exist.
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// An instruction could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// An assembly error with optional source context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleError {
    /// The kind of error.
    pub kind: AssembleErrorKind,
    /// Source location if available.
    pub location: Option<SourceLocation>,
}

impl AssembleError {
    /// Creates an error without location.
    #[must_use]
    pub const fn new(kind: AssembleErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    /// Attaches a source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Formats the error for stderr output.
    #[must_use]
    pub fn format_for_stderr(&self) -> String {
        self.location.as_ref().map_or_else(
            || format!("error: {}", self.kind),
            |loc| format!("{loc}: error: {} (in `{}`)", self.kind, loc.text),
        )
    }
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{loc}: {} (in `{}`)", self.kind, loc.text),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for AssembleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<AssembleErrorKind> for AssembleError {
    fn from(kind: AssembleErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<io::Error> for AssembleError {
    fn from(e: io::Error) -> Self {
        Self::new(AssembleErrorKind::Io(e.to_string()))
    }
}

/// A non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleWarning {
    /// Kind of warning.
    pub kind: AssembleWarningKind,
    /// Where it was raised.
    pub location: SourceLocation,
}

/// Classification of assembly warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleWarningKind {
    /// A label declaration was skipped; labels are not resolved.
    #[error("label `{name}` is not resolved and was skipped")]
    UnresolvedLabel {
        /// Label name.
        name: String,
    },
}

impl AssembleWarning {
    /// Formats the warning for stderr output.
    #[must_use]
    pub fn format_for_stderr(&self) -> String {
        format!("{}: warning: {}", self.location, self.kind)
    }
}

impl fmt::Display for AssembleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}
