//! Hack machine words.
//!
//! A word is either an address instruction (marker bit clear, 15-bit value)
//! or a compute instruction (`111` prefix, then the a-bit and comp, dest and
//! jump fields). Words render as sixteen binary digits.

use std::fmt;

use crate::error::EncodeError;

/// Width of a Hack instruction word in bits.
pub const WORD_BITS: usize = 16;
/// Width of the value field of an address instruction.
pub const ADDRESS_BITS: usize = 15;
/// Largest value an address instruction can load.
pub const MAX_ADDRESS: u16 = 0x7FFF;

const COMPUTE_PREFIX: u16 = 0b111 << 13;
const COMP_SHIFT: u16 = 6;
const DEST_SHIFT: u16 = 3;

/// One 16-bit Hack machine word.
///
/// Displays as sixteen `0`/`1` characters, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineWord(u16);

impl MachineWord {
    /// Builds an address instruction `0vvvvvvvvvvvvvvv`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::AddressOutOfRange`] when `value` needs more than
    /// 15 bits.
    pub fn address(value: u16) -> Result<Self, EncodeError> {
        if value > MAX_ADDRESS {
            return Err(EncodeError::AddressOutOfRange {
                literal: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Builds a compute instruction `111accccccdddjjj` from field codes.
    ///
    /// `comp` is the 7-bit `a c1..c6` code; `dest` and `jump` are 3-bit codes.
    #[must_use]
    pub const fn compute(comp: u8, dest: u8, jump: u8) -> Self {
        let comp_part = ((comp & 0x7F) as u16) << COMP_SHIFT;
        let dest_part = ((dest & 0x07) as u16) << DEST_SHIFT;
        let jump_part = (jump & 0x07) as u16;
        Self(COMPUTE_PREFIX | comp_part | dest_part | jump_part)
    }

    /// Raw 16-bit value.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True for address instructions (bit 15 clear).
    #[must_use]
    pub const fn is_address(self) -> bool {
        self.0 & 0x8000 == 0
    }
}

impl fmt::Display for MachineWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = WORD_BITS)
    }
}

/// Formats the low `width` bits of `value` as a zero-padded bit string.
#[must_use]
pub fn bit_string(value: u16, width: usize) -> String {
    let masked = if width >= WORD_BITS {
        value
    } else {
        value & ((1 << width) - 1)
    };
    format!("{masked:0width$b}")
}

#[cfg(test)]
mod tests {
    use super::{bit_string, MachineWord, MAX_ADDRESS};
    use crate::error::EncodeError;

    #[test]
    fn address_word_has_clear_marker_bit() {
        let word = MachineWord::address(443).unwrap();
        assert_eq!(word.to_string(), "0000000110111011");
        assert!(word.is_address());
    }

    #[test]
    fn address_limits() {
        assert_eq!(
            MachineWord::address(0).unwrap().to_string(),
            "0000000000000000"
        );
        assert_eq!(
            MachineWord::address(MAX_ADDRESS).unwrap().to_string(),
            "0111111111111111"
        );
        assert_eq!(
            MachineWord::address(MAX_ADDRESS + 1),
            Err(EncodeError::AddressOutOfRange {
                literal: "32768".into(),
            })
        );
    }

    #[test]
    fn compute_word_layout() {
        // D=D+A
        let word = MachineWord::compute(0b000_0010, 0b010, 0b000);
        assert_eq!(word.to_string(), "1110000010010000");
        assert!(!word.is_address());

        // 0;JMP
        let word = MachineWord::compute(0b010_1010, 0b000, 0b111);
        assert_eq!(word.bits(), 0xEA87);
    }

    #[test]
    fn bit_string_pads_and_masks() {
        assert_eq!(bit_string(0b10, 3), "010");
        assert_eq!(bit_string(0b1111, 3), "111");
        assert_eq!(bit_string(0x8001, 16), "1000000000000001");
    }
}
