//! Instruction encoding.
//!
//! Turns parsed lines into [`MachineWord`]s, and exposes the per-field
//! encoders that render each bit group as a `0`/`1` string.

use hack_core::{bit_string, comp_code, dest_code, jump_code, EncodeError, MachineWord};

use crate::fields::ComputeFields;
use crate::parser::ParsedLine;

/// Encodes a destination as three bits (`d1 d2 d3`).
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] for unknown destinations.
pub fn dest_to_binary(dest: &str) -> Result<String, EncodeError> {
    dest_code(dest).map(|code| bit_string(code.into(), 3))
}

/// Encodes a computation as seven bits (`a c1..c6`).
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] for unknown computations.
pub fn comp_to_binary(comp: &str) -> Result<String, EncodeError> {
    comp_code(comp).map(|code| bit_string(code.into(), 7))
}

/// Encodes a jump condition as three bits (`j1 j2 j3`).
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] for unknown conditions.
pub fn jump_to_binary(jump: &str) -> Result<String, EncodeError> {
    jump_code(jump).map(|code| bit_string(code.into(), 3))
}

/// Parses the decimal literal of an address instruction.
///
/// # Errors
///
/// - [`EncodeError::SymbolicAddress`] when the literal starts with a
///   non-digit (labels and variables are not resolved).
/// - [`EncodeError::InvalidAddress`] for an empty literal or one mixing
///   digits with other characters.
/// - [`EncodeError::AddressOutOfRange`] above 32767.
pub fn encode_address(literal: &str) -> Result<MachineWord, EncodeError> {
    let Some(first) = literal.chars().next() else {
        return Err(EncodeError::InvalidAddress {
            literal: String::new(),
        });
    };
    if !first.is_ascii_digit() {
        return Err(EncodeError::SymbolicAddress {
            symbol: literal.to_string(),
        });
    }
    if !literal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::InvalidAddress {
            literal: literal.to_string(),
        });
    }

    let out_of_range = || EncodeError::AddressOutOfRange {
        literal: literal.to_string(),
    };
    let value: u16 = literal.parse().map_err(|_| out_of_range())?;
    MachineWord::address(value).map_err(|_| out_of_range())
}

/// Encodes an address literal as a 16-character binary word.
///
/// # Errors
///
/// See [`encode_address`].
pub fn address_to_binary(literal: &str) -> Result<String, EncodeError> {
    encode_address(literal).map(|word| word.to_string())
}

/// Encodes the fields of a compute instruction.
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] for the first field (dest, then
/// comp, then jump) that matches no table entry.
pub fn encode_compute(fields: &ComputeFields<'_>) -> Result<MachineWord, EncodeError> {
    let dest = dest_code(fields.dest)?;
    let comp = comp_code(fields.comp)?;
    let jump = jump_code(fields.jump)?;
    Ok(MachineWord::compute(comp, dest, jump))
}

/// Encodes one parsed line.
///
/// Labels and comments produce no word.
///
/// # Errors
///
/// Propagates address and mnemonic failures.
pub fn encode_line(parsed: &ParsedLine<'_>) -> Result<Option<MachineWord>, EncodeError> {
    match parsed {
        ParsedLine::Address { literal } => encode_address(literal).map(Some),
        ParsedLine::Compute(fields) => encode_compute(fields).map(Some),
        ParsedLine::Label { .. } | ParsedLine::Comment => Ok(None),
    }
}
