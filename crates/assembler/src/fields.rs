//! Field extraction for compute instructions.
//!
//! Splits on the first `=` and the first `;` only. Lines with repeated
//! delimiters are not rejected here; whatever lands in a field is looked up
//! as-is by the encoder.

/// The `dest`, `comp` and `jump` substrings of a compute instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputeFields<'a> {
    /// Text before the first `=`, empty when there is none.
    pub dest: &'a str,
    /// Computation text.
    pub comp: &'a str,
    /// Trimmed text after the first `;`, empty when there is none.
    pub jump: &'a str,
}

/// Returns the destination: everything before the first `=`.
#[must_use]
pub fn dest(instruction: &str) -> &str {
    instruction
        .find('=')
        .map_or("", |eq| &instruction[..eq])
}

/// Returns the computation.
///
/// With an `=`, the text after it up to any following `;`. Without an `=`
/// but with a `;`, the text before the `;`. Otherwise empty.
#[must_use]
pub fn comp(instruction: &str) -> &str {
    if let Some(eq) = instruction.find('=') {
        let rest = &instruction[eq + 1..];
        return rest.find(';').map_or(rest, |semi| &rest[..semi]);
    }
    instruction
        .find(';')
        .map_or("", |semi| &instruction[..semi])
}

/// Returns the jump condition: trimmed text after the first `;`.
#[must_use]
pub fn jump(instruction: &str) -> &str {
    instruction
        .find(';')
        .map_or("", |semi| instruction[semi + 1..].trim())
}

/// Splits a compute instruction into its three fields.
#[must_use]
pub fn extract_fields(instruction: &str) -> ComputeFields<'_> {
    ComputeFields {
        dest: dest(instruction),
        comp: comp(instruction),
        jump: jump(instruction),
    }
}
