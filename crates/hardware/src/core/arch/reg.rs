//! General-purpose register file.
//!
//! This module implements the 32-entry register file. It performs the
//! following:
//! 1. **Storage:** Maintains 32 word slots, each a full 32-bit vector.
//! 2. **Invariant Enforcement:** Register `$0` is wired to zero; writing it
//!    is an error rather than a silent no-op, because the architecture
//!    treats it as a fault the driver may expect and catch.
//! 3. **Debugging:** Utilities for dumping the complete register state.

use crate::common::bits::BitVector;
use crate::common::constants::{REGISTER_COUNT, WORD_BITS};
use crate::common::error::{Result, SimError};

/// The register file.
///
/// Slots are replaced wholesale on write with a freshly encoded vector, so
/// no architectural slot is ever aliased or partially updated.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [BitVector; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register holding unsigned zero.
    pub fn new() -> Self {
        Self {
            regs: std::array::from_fn(|_| BitVector::from_unsigned(0)),
        }
    }

    /// Reads a register.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Range`] if `idx` is not a valid register index.
    pub fn read(&self, idx: usize) -> Result<&BitVector> {
        self.regs
            .get(idx)
            .ok_or_else(|| SimError::Range(format!("invalid register index {idx}")))
    }

    /// Writes a two's-complement value to a register.
    ///
    /// The slot is replaced with a freshly encoded 32-bit vector.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Range`] if `idx` is not a valid register index,
    /// or [`SimError::Invariant`] for any write to register zero.
    pub fn write(&mut self, idx: usize, value: i32) -> Result<()> {
        self.check_writable(idx)?;
        self.regs[idx] = BitVector::from_signed(value);
        Ok(())
    }

    /// Writes a full word to a register without re-encoding.
    ///
    /// Used by load-word, where the memory word passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Range`] if `idx` is not a valid register index or
    /// the word is not exactly 32 bits, or [`SimError::Invariant`] for any
    /// write to register zero.
    pub fn write_word(&mut self, idx: usize, word: BitVector) -> Result<()> {
        self.check_writable(idx)?;
        if word.len() != WORD_BITS {
            return Err(SimError::Range(format!(
                "register word must be {WORD_BITS} bits, got {}",
                word.len()
            )));
        }
        self.regs[idx] = word;
        Ok(())
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs for debugging purposes.
    pub fn dump(&self) {
        for i in (0..REGISTER_COUNT).step_by(2) {
            println!("${:<2} {}   ${:<2} {}", i, self.regs[i], i + 1, self.regs[i + 1]);
        }
    }

    fn check_writable(&self, idx: usize) -> Result<()> {
        if idx >= REGISTER_COUNT {
            return Err(SimError::Range(format!("invalid register index {idx}")));
        }
        if idx == 0 {
            return Err(SimError::Invariant("register zero is immutable"));
        }
        Ok(())
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
