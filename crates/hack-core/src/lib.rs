//! Core instruction model for the Hack CPU.

/// Encoding failure taxonomy.
pub mod error;
pub use error::{EncodeError, Field};

/// Mnemonic lookup tables for dest, comp and jump fields.
pub mod encoding;
pub use encoding::{
    a_bit, comp_code, dest_code, jump_code, COMP_TABLE, DEST_TABLE, JUMP_TABLE, NULL_MNEMONIC,
};

/// 16-bit machine word layout and binary rendering.
pub mod word;
pub use word::{bit_string, MachineWord, ADDRESS_BITS, MAX_ADDRESS, WORD_BITS};

#[cfg(test)]
use proptest as _;
