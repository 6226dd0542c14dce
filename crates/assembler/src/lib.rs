//! Hack assembler library.

/// Top-level translation pipeline.
pub mod assembler;
/// Binary encoding of address and compute instructions.
pub mod encoder;
/// Structured error and warning types.
pub mod errors;
/// Field extraction for compute instructions.
pub mod fields;
/// Instruction classification.
pub mod parser;
/// Source line loading and comment stripping.
pub mod source;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
