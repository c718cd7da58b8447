//! Execution cycle and per-instruction semantics.
//!
//! This module implements the fetch/decode/dispatch/execute loop. It
//! performs the following:
//! 1. **Cycle Control:** Fetch at the PC's word index, unconditional PC+4,
//!    then the instruction's own control-flow effect.
//! 2. **Dispatch:** Primary selection on opcode, secondary on funct for the
//!    R-format group; unrecognized selectors are no-op cycles.
//! 3. **Validation:** Sign-rule overflow detection and address bounds checks
//!    before any state mutation for the instruction.

use tracing::{debug, trace, warn};

use super::{Cpu, MachineState};
use crate::common::addr::{DataAddr, InstrAddr};
use crate::common::bits::BitVector;
use crate::common::constants::WORD_BYTES;
use crate::common::error::{Result, SimError};
use crate::isa::fields::InstructionFields;
use crate::isa::opcodes;

/// Adds two machine values with the hardware overflow rule.
///
/// The sum wraps like the 32-bit datapath; overflow is flagged when both
/// operands share a sign and the wrapped sum's sign differs, never by
/// re-checking ranges.
fn checked_add(lhs: i32, rhs: i32, op: &'static str) -> Result<i32> {
    let sum = lhs.wrapping_add(rhs);
    if (lhs >= 0) == (rhs >= 0) && (sum >= 0) != (lhs >= 0) {
        return Err(SimError::Overflow(op));
    }
    Ok(sum)
}

impl Cpu {
    /// Executes instructions from the current PC until the halt system call.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal error of any cycle; the machine performs
    /// no recovery and the loop does not resume.
    pub fn run(&mut self) -> Result<()> {
        self.state = MachineState::Running;
        while self.state == MachineState::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Executes one fetch/decode/execute cycle.
    ///
    /// The PC is advanced to PC+4 before the instruction executes, so
    /// branch and jump targets are computed relative to the incremented
    /// value.
    ///
    /// # Errors
    ///
    /// Any invariant violation of the cycle (fetch bounds, overflow,
    /// address bounds, register-zero write) is fatal and propagates.
    pub fn step(&mut self) -> Result<()> {
        let fetch_addr = InstrAddr::new(self.pc.to_signed()?);
        self.ir = self.imem.fetch(fetch_addr)?.clone();

        let next = self.pc.to_signed()?.wrapping_add(WORD_BYTES);
        self.pc = BitVector::from_signed(next);

        let opcode = self.ir.opcode()?;
        if self.trace {
            trace!(pc = fetch_addr.val(), opcode, "fetch");
        }
        match opcode {
            opcodes::OP_RTYPE => self.dispatch_rtype(),
            opcodes::OP_ADDI => self.exec_add_immediate(),
            opcodes::OP_ANDI => self.exec_and_immediate(),
            opcodes::OP_LW => self.exec_load_word(),
            opcodes::OP_SW => self.exec_store_word(),
            opcodes::OP_BEQ => self.exec_branch_equal(),
            opcodes::OP_J => self.exec_jump(),
            _ => {
                warn!(opcode, "unrecognized opcode, no-op cycle");
                Ok(())
            }
        }
    }

    /// Secondary dispatch for the R-format group.
    fn dispatch_rtype(&mut self) -> Result<()> {
        match self.ir.funct()? {
            opcodes::FUNCT_ADD => self.exec_reg_add(),
            opcodes::FUNCT_AND => self.exec_reg_and(),
            opcodes::FUNCT_JR => self.exec_jump_register(),
            opcodes::FUNCT_SYSCALL => {
                debug!("halt system call");
                self.state = MachineState::Halted;
                Ok(())
            }
            funct => {
                warn!(funct, "unrecognized funct, no-op cycle");
                Ok(())
            }
        }
    }

    /// `rd = rs + rt`, two's-complement, with overflow detection.
    fn exec_reg_add(&mut self) -> Result<()> {
        let lhs = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let rhs = self.regs.read(self.ir.rt()?)?.to_signed()?;
        let sum = checked_add(lhs, rhs, "register add")?;
        self.regs.write(self.ir.rd()?, sum)
    }

    /// `rd = rs & rt`, bitwise over the two's-complement values.
    fn exec_reg_and(&mut self) -> Result<()> {
        let lhs = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let rhs = self.regs.read(self.ir.rt()?)?.to_signed()?;
        self.regs.write(self.ir.rd()?, lhs & rhs)
    }

    /// `rt = rs + signExtend(immediate)`, with overflow detection.
    fn exec_add_immediate(&mut self) -> Result<()> {
        let lhs = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let imm = self.ir.immediate()?.to_signed()?;
        let sum = checked_add(lhs, imm, "immediate add")?;
        self.regs.write(self.ir.rt()?, sum)
    }

    /// `rt = rs & immediate`, the immediate as a raw unsigned 16-bit pattern.
    fn exec_and_immediate(&mut self) -> Result<()> {
        let lhs = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let imm = self.ir.immediate()?.to_unsigned()? as i32;
        self.regs.write(self.ir.rt()?, lhs & imm)
    }

    /// `rt = dmem[rs + signExtend(immediate)]`.
    ///
    /// Effective-address arithmetic uses the add overflow rule, then the
    /// address is bounds-checked, then the single state mutation happens.
    fn exec_load_word(&mut self) -> Result<()> {
        let base = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let imm = self.ir.immediate()?.to_signed()?;
        let addr = DataAddr::new(checked_add(base, imm, "effective address")?);
        let word = self.dmem.read(addr)?.clone();
        self.regs.write_word(self.ir.rt()?, word)
    }

    /// `dmem[rs + signExtend(immediate)] = rt`.
    fn exec_store_word(&mut self) -> Result<()> {
        let base = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let imm = self.ir.immediate()?.to_signed()?;
        let addr = DataAddr::new(checked_add(base, imm, "effective address")?);
        let word = self.regs.read(self.ir.rt()?)?.clone();
        self.dmem.write(addr, word)
    }

    /// If `rs == rt` (signed), PC = PC + signExtend(immediate) * 4.
    ///
    /// The PC here is already the incremented value from the cycle, and the
    /// resulting target must land inside instruction memory.
    fn exec_branch_equal(&mut self) -> Result<()> {
        let lhs = self.regs.read(self.ir.rs()?)?.to_signed()?;
        let rhs = self.regs.read(self.ir.rt()?)?.to_signed()?;
        if lhs != rhs {
            return Ok(());
        }
        let offset = self.ir.immediate()?.to_signed()?;
        let target = InstrAddr::new(
            self.pc
                .to_signed()?
                .wrapping_add(offset.wrapping_mul(WORD_BYTES)),
        );
        self.imem.check_target(target)?;
        if self.trace {
            debug!(target = target.val(), "branch taken");
        }
        self.pc = BitVector::from_signed(target.val());
        Ok(())
    }

    /// PC = PC[0..4] ++ address ++ 00.
    ///
    /// The jump target is rebuilt from the top four bits of the incremented
    /// PC, the 26-bit address field, and two alignment zeros.
    fn exec_jump(&mut self) -> Result<()> {
        let upper = self.pc.slice(0, 4)?;
        let mut align = BitVector::new();
        align.set_bits(&[false, false])?;
        let target = upper.concat(&self.ir.address()?)?.concat(&align)?;
        let target_addr = InstrAddr::new(target.to_signed()?);
        self.imem.check_target(target_addr)?;
        if self.trace {
            debug!(target = target_addr.val(), "jump");
        }
        self.pc = target;
        Ok(())
    }

    /// PC = rs, taken as a two's-complement byte address.
    fn exec_jump_register(&mut self) -> Result<()> {
        let value = self.regs.read(self.ir.rs()?)?.clone();
        let target_addr = InstrAddr::new(value.to_signed()?);
        self.imem.check_target(target_addr)?;
        if self.trace {
            debug!(target = target_addr.val(), "jump register");
        }
        self.pc = value;
        Ok(())
    }
}
