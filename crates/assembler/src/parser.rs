//! Instruction classification.
//!
//! A cleaned line is classified by its first character alone. No further
//! syntax checking happens here: anything unrecognized is treated as a
//! compute instruction and left for the encoder to reject.

use crate::fields::{extract_fields, ComputeFields};

/// Category of a cleaned instruction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    /// `@value` address instruction.
    Address,
    /// `dest=comp;jump` compute instruction.
    Compute,
    /// `(NAME)` label declaration.
    Label,
    /// `//` comment.
    Comment,
}

/// Classifies a cleaned line by its first character.
#[must_use]
pub fn classify(line: &str) -> InstructionKind {
    match line.chars().next() {
        Some('@') => InstructionKind::Address,
        Some('(') => InstructionKind::Label,
        Some('/') => InstructionKind::Comment,
        _ => InstructionKind::Compute,
    }
}

/// A classified line with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Address instruction.
    Address {
        /// Text following `@`.
        literal: &'a str,
    },
    /// Compute instruction split into its fields.
    Compute(ComputeFields<'a>),
    /// Label declaration. Labels are never resolved to addresses.
    Label {
        /// Text between `(` and `)`.
        name: &'a str,
    },
    /// Comment line.
    Comment,
}

/// Classifies a cleaned line and extracts its payload.
#[must_use]
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    match classify(line) {
        InstructionKind::Address => ParsedLine::Address {
            literal: &line[1..],
        },
        InstructionKind::Compute => ParsedLine::Compute(extract_fields(line)),
        InstructionKind::Label => {
            let inner = &line[1..];
            let name = inner.find(')').map_or(inner, |end| &inner[..end]);
            ParsedLine::Label { name }
        }
        InstructionKind::Comment => ParsedLine::Comment,
    }
}

impl ParsedLine<'_> {
    /// Category of this line.
    #[must_use]
    pub const fn kind(&self) -> InstructionKind {
        match self {
            Self::Address { .. } => InstructionKind::Address,
            Self::Compute(_) => InstructionKind::Compute,
            Self::Label { .. } => InstructionKind::Label,
            Self::Comment => InstructionKind::Comment,
        }
    }
}
