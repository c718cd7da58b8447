//! Global architectural constants.
//!
//! This module defines the fixed geometry of the simulated architecture:
//! 1. **Word Constants:** Bit width and byte width of a machine word.
//! 2. **Register Constants:** Register-file size.

/// Number of binary digits in a machine word.
pub const WORD_BITS: usize = 32;

/// Number of bytes in a machine word.
///
/// Instruction-space byte addresses are divided by this to obtain
/// instruction-memory word indices.
pub const WORD_BYTES: i32 = 4;

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 32;
