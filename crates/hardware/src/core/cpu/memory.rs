//! Instruction and data memory banks.
//!
//! This module implements the two disjoint memory arrays of the machine:
//! 1. **Instruction Memory:** Word-indexed; byte addresses are divided by
//!    the word size before indexing. Loaded once by the driver, then read by
//!    fetch and bounds-checked by branch/jump targets.
//! 2. **Data Memory:** Indexed directly by word, no scaling. Read and
//!    written by load-word/store-word.
//!
//! Both banks hold full 32-bit vectors in every slot from construction on;
//! there is no partially initialized state.

use crate::common::addr::{DataAddr, InstrAddr};
use crate::common::bits::BitVector;
use crate::common::constants::WORD_BITS;
use crate::common::error::{Result, SimError};

/// Fixed-capacity instruction memory, addressed by word index.
#[derive(Debug, Clone)]
pub struct InstrMemory {
    words: Vec<BitVector>,
}

impl InstrMemory {
    /// Creates an instruction memory with every word set to unsigned zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![BitVector::from_unsigned(0); capacity],
        }
    }

    /// Returns the word capacity.
    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    /// Places an externally supplied encoded word at a word index.
    ///
    /// This is the loading interface; malformed input is a range error, not
    /// an address-computation bounds error.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Range`] if the index is outside capacity or the
    /// word is not exactly 32 bits.
    pub fn load(&mut self, index: usize, word: BitVector) -> Result<()> {
        if index >= self.words.len() {
            return Err(SimError::Range(format!(
                "instruction memory index {index} outside capacity {}",
                self.words.len()
            )));
        }
        if word.len() != WORD_BITS {
            return Err(SimError::Range(format!(
                "instruction word must be {WORD_BITS} bits, got {}",
                word.len()
            )));
        }
        self.words[index] = word;
        Ok(())
    }

    /// Validates a fetch, branch, or jump target against capacity.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Bounds`] if the byte address is negative or its
    /// word index is outside capacity.
    pub fn check_target(&self, addr: InstrAddr) -> Result<()> {
        let index = addr.word_index();
        if addr.val() < 0 || index as usize >= self.words.len() {
            return Err(SimError::Bounds {
                space: "instruction memory",
                address: i64::from(index),
                capacity: self.words.len(),
            });
        }
        Ok(())
    }

    /// Reads the word at a byte address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Bounds`] if the address is outside capacity.
    pub fn fetch(&self, addr: InstrAddr) -> Result<&BitVector> {
        self.check_target(addr)?;
        Ok(&self.words[addr.word_index() as usize])
    }

    /// Reads the word at a word index, for external inspection.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Range`] if the index is outside capacity.
    pub fn get(&self, index: usize) -> Result<&BitVector> {
        self.words.get(index).ok_or_else(|| {
            SimError::Range(format!(
                "instruction memory index {index} outside capacity {}",
                self.words.len()
            ))
        })
    }
}

/// Fixed-capacity data memory, addressed directly by word index.
#[derive(Debug, Clone)]
pub struct DataMemory {
    words: Vec<BitVector>,
}

impl DataMemory {
    /// Creates a data memory with every word set to unsigned zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![BitVector::from_unsigned(0); capacity],
        }
    }

    /// Returns the word capacity.
    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    /// Reads the word at a data address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Bounds`] if the address is outside `[0, capacity)`.
    pub fn read(&self, addr: DataAddr) -> Result<&BitVector> {
        self.check(addr)?;
        Ok(&self.words[addr.val() as usize])
    }

    /// Writes a full word to a data address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Bounds`] if the address is outside `[0, capacity)`,
    /// or [`SimError::Range`] if the word is not exactly 32 bits.
    pub fn write(&mut self, addr: DataAddr, word: BitVector) -> Result<()> {
        self.check(addr)?;
        if word.len() != WORD_BITS {
            return Err(SimError::Range(format!(
                "data word must be {WORD_BITS} bits, got {}",
                word.len()
            )));
        }
        self.words[addr.val() as usize] = word;
        Ok(())
    }

    fn check(&self, addr: DataAddr) -> Result<()> {
        if addr.val() < 0 || addr.val() as usize >= self.words.len() {
            return Err(SimError::Bounds {
                space: "data memory",
                address: i64::from(addr.val()),
                capacity: self.words.len(),
            });
        }
        Ok(())
    }
}
