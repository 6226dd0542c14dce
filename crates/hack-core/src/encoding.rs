//! Mnemonic lookup tables for the three compute-instruction fields.
//!
//! Bit layout of a compute instruction: `[111][a][c1..c6][d1 d2 d3][j1 j2 j3]`.
//! The COMP table stores only the six `c` bits; the `a` bit is derived from
//! whether the mnemonic reads `M` (see [`a_bit`]).

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{EncodeError, Field};

/// Canonical key for an absent destination or jump.
pub const NULL_MNEMONIC: &str = "null";

/// Register letters in canonical destination order (`d1 d2 d3`).
const DEST_ORDER: [char; 3] = ['A', 'M', 'D'];

/// Destination table keyed by canonical register order.
pub const DEST_TABLE: &[(&str, u8)] = &[
    (NULL_MNEMONIC, 0b000),
    ("M", 0b001),
    ("D", 0b010),
    ("MD", 0b011),
    ("A", 0b100),
    ("AM", 0b101),
    ("AD", 0b110),
    ("AMD", 0b111),
];

/// Computation table: mnemonic to the six `c` bits.
///
/// `A` and `M` forms share the same pattern and differ only in the `a` bit.
pub const COMP_TABLE: &[(&str, u8)] = &[
    ("0", 0b10_1010),
    ("1", 0b11_1111),
    ("-1", 0b11_1010),
    ("D", 0b00_1100),
    ("A", 0b11_0000),
    ("M", 0b11_0000),
    ("!D", 0b00_1101),
    ("!A", 0b11_0001),
    ("!M", 0b11_0001),
    ("-D", 0b00_1111),
    ("-A", 0b11_0011),
    ("-M", 0b11_0011),
    ("D+1", 0b01_1111),
    ("A+1", 0b11_0111),
    ("M+1", 0b11_0111),
    ("D-1", 0b00_1110),
    ("A-1", 0b11_0010),
    ("M-1", 0b11_0010),
    ("D+A", 0b00_0010),
    ("D+M", 0b00_0010),
    ("D-A", 0b01_0011),
    ("D-M", 0b01_0011),
    ("A-D", 0b00_0111),
    ("M-D", 0b00_0111),
    ("D&A", 0b00_0000),
    ("D&M", 0b00_0000),
    ("D|A", 0b01_0101),
    ("D|M", 0b01_0101),
];

/// Jump table: condition mnemonic to `j1 j2 j3`.
pub const JUMP_TABLE: &[(&str, u8)] = &[
    (NULL_MNEMONIC, 0b000),
    ("JGT", 0b001),
    ("JEQ", 0b010),
    ("JGE", 0b011),
    ("JLT", 0b100),
    ("JNE", 0b101),
    ("JLE", 0b110),
    ("JMP", 0b111),
];

struct Tables {
    dest: HashMap<&'static str, u8>,
    comp: HashMap<&'static str, u8>,
    jump: HashMap<&'static str, u8>,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| Tables {
        dest: DEST_TABLE.iter().copied().collect(),
        comp: COMP_TABLE.iter().copied().collect(),
        jump: JUMP_TABLE.iter().copied().collect(),
    })
}

/// Rewrites a destination into canonical `A M D` order.
///
/// Returns `None` for letters outside `A`, `M`, `D` or repeated letters.
fn canonical_dest(dest: &str) -> Option<String> {
    if dest == NULL_MNEMONIC {
        return Some(NULL_MNEMONIC.to_string());
    }
    let mut seen = [false; DEST_ORDER.len()];
    for ch in dest.chars() {
        let slot = DEST_ORDER.iter().position(|&r| r == ch)?;
        if seen[slot] {
            return None;
        }
        seen[slot] = true;
    }
    Some(
        DEST_ORDER
            .iter()
            .zip(seen)
            .filter_map(|(&r, present)| present.then_some(r))
            .collect(),
    )
}

/// Resolves a destination to its 3-bit code.
///
/// Surrounding whitespace is ignored and an empty destination means `null`.
/// Register order is irrelevant: `MD` and `DM` are the same destination.
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] for anything that is not a set of
/// distinct `A`/`M`/`D` registers.
pub fn dest_code(dest: &str) -> Result<u8, EncodeError> {
    let trimmed = dest.trim();
    let key = if trimmed.is_empty() {
        NULL_MNEMONIC
    } else {
        trimmed
    };
    canonical_dest(key)
        .and_then(|canonical| tables().dest.get(canonical.as_str()).copied())
        .ok_or_else(|| EncodeError::unknown(Field::Dest, dest))
}

/// Returns the `a` selector: true when the computation reads `M`.
#[must_use]
pub fn a_bit(comp: &str) -> bool {
    comp.contains('M')
}

/// Resolves a computation to its 7-bit `a c1..c6` code.
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] when the trimmed text is not a
/// known computation.
pub fn comp_code(comp: &str) -> Result<u8, EncodeError> {
    let trimmed = comp.trim();
    let c_bits = tables()
        .comp
        .get(trimmed)
        .copied()
        .ok_or_else(|| EncodeError::unknown(Field::Comp, comp))?;
    Ok((u8::from(a_bit(trimmed)) << 6) | c_bits)
}

/// Resolves a jump condition to its 3-bit code.
///
/// # Errors
///
/// Returns [`EncodeError::UnknownMnemonic`] for unknown conditions.
pub fn jump_code(jump: &str) -> Result<u8, EncodeError> {
    let trimmed = jump.trim();
    let key = if trimmed.is_empty() {
        NULL_MNEMONIC
    } else {
        trimmed
    };
    tables()
        .jump
        .get(key)
        .copied()
        .ok_or_else(|| EncodeError::unknown(Field::Jump, jump))
}
