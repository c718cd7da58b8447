//! Instruction bit-field layout and extraction.
//!
//! Provides offset/length constants and extraction methods for decoding
//! instruction fields from a fetched 32-bit word. Bit 0 is the
//! most-significant digit, matching the wire order of the encoding:
//!
//! | Field     | Bits  | Used by |
//! |-----------|-------|---------|
//! | opcode    | 0-5   | all     |
//! | rs        | 6-10  | R, I    |
//! | rt        | 11-15 | R, I    |
//! | rd        | 16-20 | R       |
//! | shamt     | 21-25 | R       |
//! | funct     | 26-31 | R       |
//! | immediate | 16-31 | I       |
//! | address   | 6-31  | J       |
//!
//! Decoding is pure slicing; no field combination is validated beyond the
//! opcode-driven dispatch in the execution engine.

use crate::common::bits::BitVector;
use crate::common::error::Result;

/// Offset of the opcode field.
pub const OPCODE_OFFSET: usize = 0;
/// Width of the opcode field.
pub const OPCODE_LEN: usize = 6;
/// Offset of the first source register field.
pub const RS_OFFSET: usize = 6;
/// Offset of the second source register field.
pub const RT_OFFSET: usize = 11;
/// Offset of the destination register field.
pub const RD_OFFSET: usize = 16;
/// Offset of the shift-amount field.
pub const SHAMT_OFFSET: usize = 21;
/// Width of a register or shift-amount field.
pub const REG_LEN: usize = 5;
/// Offset of the function-code field.
pub const FUNCT_OFFSET: usize = 26;
/// Width of the function-code field.
pub const FUNCT_LEN: usize = 6;
/// Offset of the immediate field.
pub const IMM_OFFSET: usize = 16;
/// Width of the immediate field; sign extension happens at use.
pub const IMM_LEN: usize = 16;
/// Offset of the jump address field.
pub const ADDR_OFFSET: usize = 6;
/// Width of the jump address field.
pub const ADDR_LEN: usize = 26;

/// Trait for extracting instruction fields from an encoded word.
///
/// Implemented for [`BitVector`] so the instruction register can be decoded
/// in place. Numeric selectors come back as integers; the immediate and
/// address fields come back as sub-vectors because their interpretation
/// (sign-extended, zero-extended, or concatenated) depends on the consuming
/// instruction.
pub trait InstructionFields {
    /// Extracts the opcode field (bits 0-5).
    fn opcode(&self) -> Result<u32>;

    /// Extracts the first source register index (bits 6-10).
    fn rs(&self) -> Result<usize>;

    /// Extracts the second source register index (bits 11-15).
    fn rt(&self) -> Result<usize>;

    /// Extracts the destination register index (bits 16-20).
    fn rd(&self) -> Result<usize>;

    /// Extracts the shift-amount field (bits 21-25).
    fn shamt(&self) -> Result<u32>;

    /// Extracts the function-code field (bits 26-31).
    fn funct(&self) -> Result<u32>;

    /// Extracts the 16-bit immediate field (bits 16-31) as a sub-vector.
    fn immediate(&self) -> Result<BitVector>;

    /// Extracts the 26-bit jump address field (bits 6-31) as a sub-vector.
    fn address(&self) -> Result<BitVector>;
}

impl InstructionFields for BitVector {
    fn opcode(&self) -> Result<u32> {
        self.slice(OPCODE_OFFSET, OPCODE_LEN)?.to_unsigned()
    }

    fn rs(&self) -> Result<usize> {
        Ok(self.slice(RS_OFFSET, REG_LEN)?.to_unsigned()? as usize)
    }

    fn rt(&self) -> Result<usize> {
        Ok(self.slice(RT_OFFSET, REG_LEN)?.to_unsigned()? as usize)
    }

    fn rd(&self) -> Result<usize> {
        Ok(self.slice(RD_OFFSET, REG_LEN)?.to_unsigned()? as usize)
    }

    fn shamt(&self) -> Result<u32> {
        self.slice(SHAMT_OFFSET, REG_LEN)?.to_unsigned()
    }

    fn funct(&self) -> Result<u32> {
        self.slice(FUNCT_OFFSET, FUNCT_LEN)?.to_unsigned()
    }

    fn immediate(&self) -> Result<BitVector> {
        self.slice(IMM_OFFSET, IMM_LEN)
    }

    fn address(&self) -> Result<BitVector> {
        self.slice(ADDR_OFFSET, ADDR_LEN)
    }
}
