use std::fmt;

use thiserror::Error;

/// The symbolic fields of a compute instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Destination registers (`d1 d2 d3`).
    Dest,
    /// ALU computation (`a c1..c6`).
    Comp,
    /// Jump condition (`j1 j2 j3`).
    Jump,
}

impl Field {
    /// Lowercase field name as written in the instruction format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dest => "dest",
            Self::Comp => "comp",
            Self::Jump => "jump",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures raised while encoding a single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum EncodeError {
    /// A dest/comp/jump substring matched no table entry.
    #[error("unknown {field} mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Field the mnemonic was extracted from.
        field: Field,
        /// The offending text.
        mnemonic: String,
    },
    /// Decimal address literal does not fit in 15 bits.
    #[error("address `{literal}` is out of range (0..=32767)")]
    AddressOutOfRange {
        /// The literal as written after `@`.
        literal: String,
    },
    /// `@name` operand; symbols are never resolved to addresses.
    #[error("symbolic address `{symbol}` is not supported, only decimal literals")]
    SymbolicAddress {
        /// The symbol as written after `@`.
        symbol: String,
    },
    /// Empty or malformed numeric literal.
    #[error("invalid address literal `{literal}`")]
    InvalidAddress {
        /// The literal as written after `@`.
        literal: String,
    },
}

impl EncodeError {
    pub(crate) fn unknown(field: Field, mnemonic: &str) -> Self {
        Self::UnknownMnemonic {
            field,
            mnemonic: mnemonic.to_string(),
        }
    }
}
