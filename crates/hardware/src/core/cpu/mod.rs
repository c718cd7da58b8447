//! Machine state definition and initialization.
//!
//! This module defines the central `Cpu` structure, the container for the
//! entire architectural state. It coordinates the following:
//! 1. **State Management:** Program counter, instruction register, register
//!    file, and the run/halt state flag.
//! 2. **Memory Banks:** The disjoint instruction and data memories.
//! 3. **External Surface:** Program loading before a run and pure state
//!    inspection after it.
//!
//! One `Cpu` owns all of its state; machines never share and any number can
//! coexist in a process.

/// Instruction execution cycle and per-instruction semantics.
pub mod execution;

/// Instruction and data memory banks.
pub mod memory;

use crate::common::addr::DataAddr;
use crate::common::bits::BitVector;
use crate::config::Config;
use crate::core::arch::RegisterFile;
use crate::core::cpu::memory::{DataMemory, InstrMemory};
use crate::common::error::Result;

/// Run-state of the execution cycle.
///
/// The machine leaves `Running` only through the halt system call. Errors do
/// not have a state of their own: they abort the run loop by propagating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineState {
    /// The cycle loop continues.
    Running,
    /// The halt system call was executed; the loop has ended.
    Halted,
}

/// Main machine structure containing all architectural state.
///
/// The machine fetches from instruction memory at the program counter,
/// decodes the instruction register by bit-field slicing, and dispatches on
/// opcode and funct, one instruction per cycle.
#[derive(Debug, Clone)]
pub struct Cpu {
    /// General-purpose registers; `$0` is immutable zero.
    pub regs: RegisterFile,
    /// Program counter: a 32-bit two's-complement byte address, word-aligned
    /// by convention.
    pub pc: BitVector,
    /// Instruction register: the currently fetched instruction word.
    pub ir: BitVector,
    /// Instruction memory, addressed by word index.
    pub imem: InstrMemory,
    /// Data memory, addressed directly by word.
    pub dmem: DataMemory,
    /// Current run-state.
    pub state: MachineState,
    /// Emit per-cycle trace events.
    pub trace: bool,
}

impl Cpu {
    /// Creates a machine with the given configuration.
    ///
    /// Every register and memory word holds unsigned zero, the program
    /// counter is zero, and the state is `Running`.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: BitVector::from_unsigned(0),
            ir: BitVector::from_unsigned(0),
            imem: InstrMemory::new(config.instr_memory_words),
            dmem: DataMemory::new(config.data_memory_words),
            state: MachineState::Running,
            trace: config.trace_instructions,
        }
    }

    /// Returns `true` once the halt system call has executed.
    pub fn is_halted(&self) -> bool {
        self.state == MachineState::Halted
    }

    /// Places an encoded instruction word at a word index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Range`] for an invalid index or a
    /// word that is not exactly 32 bits.
    pub fn load_instr(&mut self, index: usize, word: BitVector) -> Result<()> {
        self.imem.load(index, word)
    }

    /// Reads a register, for external inspection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Range`] for an invalid index.
    pub fn register(&self, idx: usize) -> Result<&BitVector> {
        self.regs.read(idx)
    }

    /// Writes a two's-complement value to a register, for external setup.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Invariant`] for register zero and
    /// [`crate::common::SimError::Range`] for an invalid index.
    pub fn set_register(&mut self, idx: usize, value: i32) -> Result<()> {
        self.regs.write(idx, value)
    }

    /// Reads an instruction-memory word by index, for external inspection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Range`] for an invalid index.
    pub fn instr_word(&self, index: usize) -> Result<&BitVector> {
        self.imem.get(index)
    }

    /// Reads a data-memory word, for external inspection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Bounds`] for an address outside
    /// data memory.
    pub fn data_word(&self, addr: DataAddr) -> Result<&BitVector> {
        self.dmem.read(addr)
    }

    /// Seeds a data-memory word with a two's-complement value, for external
    /// setup.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Bounds`] for an address outside
    /// data memory.
    pub fn set_data_word(&mut self, addr: DataAddr, value: i32) -> Result<()> {
        self.dmem.write(addr, BitVector::from_signed(value))
    }

    /// Dumps the program counter, instruction register, and all registers to
    /// stdout.
    pub fn dump_state(&self) {
        println!("PC {}   IR {}", self.pc, self.ir);
        self.regs.dump();
    }
}
