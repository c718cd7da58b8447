//! Opcode and function-code constants.
//!
//! Primary opcodes select the instruction; opcode 0 selects the R-format
//! group, which dispatches again on the funct field. Values an encoded word
//! can carry but no constant names here fall through the dispatch as no-ops.

/// R-format group: operation selected by the funct field.
pub const OP_RTYPE: u32 = 0;

/// Jump to a 26-bit pseudo-direct address.
pub const OP_J: u32 = 2;

/// Branch to a PC-relative word offset when `rs == rt`.
pub const OP_BEQ: u32 = 4;

/// Add a sign-extended immediate to `rs`.
pub const OP_ADDI: u32 = 8;

/// Bitwise-and `rs` with a zero-extended immediate.
pub const OP_ANDI: u32 = 12;

/// Load a data-memory word into `rt`.
pub const OP_LW: u32 = 35;

/// Store `rt` into a data-memory word.
pub const OP_SW: u32 = 43;

/// Funct: jump to the byte address held in `rs`.
pub const FUNCT_JR: u32 = 8;

/// Funct: system call. The only service implemented is program halt.
pub const FUNCT_SYSCALL: u32 = 12;

/// Funct: two's-complement register add with overflow detection.
pub const FUNCT_ADD: u32 = 32;

/// Funct: bitwise register and.
pub const FUNCT_AND: u32 = 36;
