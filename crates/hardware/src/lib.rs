//! MIPS-subset instruction-set simulator library.
//!
//! This crate implements a word-accurate simulator for a 32-bit MIPS-like
//! load/store architecture with the following:
//! 1. **Common:** The `BitVector` word type, strong address types, and error kinds.
//! 2. **ISA:** Bit-field decoding and opcode/funct constants for R/I/J encodings.
//! 3. **Core:** Register file and the CPU (fetch, decode, dispatch, execute).
//! 4. **Simulation:** Textual program parsing, loading, and configuration.

/// Common leaf types (bit vectors, addresses, errors, constants).
pub mod common;
/// Simulator configuration (defaults, memory capacities, tracing).
pub mod config;
/// CPU core (register file, machine state, execution cycle).
pub mod core;
/// Instruction set (field layout, opcode and funct constants).
pub mod isa;
/// Program loader and textual word format.
pub mod sim;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The machine word type; fixed capacity of 32 binary digits.
pub use crate::common::bits::BitVector;
/// Main machine type; owns registers, memories, PC, and IR.
pub use crate::core::cpu::Cpu;
