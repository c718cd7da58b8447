//! Execution-cycle and instruction-semantics tests.
//!
//! Each scenario loads a short encoded program, seeds registers or data
//! memory, runs to halt (or to an expected fatal error), and checks the
//! architectural state afterwards.

use pretty_assertions::assert_eq;
use rstest::rstest;

use mipsim_core::common::addr::DataAddr;
use mipsim_core::common::bits::InstrFormat;
use mipsim_core::common::error::SimError;

use crate::common::builder::InstructionBuilder;
use crate::common::harness::TestContext;

fn b() -> InstructionBuilder {
    InstructionBuilder::new()
}

#[test]
fn test_halt_terminates_without_side_effects() {
    let mut ctx = TestContext::new().load_program(&[b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 4);
    for i in 0..32 {
        assert_eq!(ctx.register_value(i), 0);
    }
}

#[test]
fn test_reg_add() {
    let mut ctx = TestContext::new()
        .set_register(10, 5)
        .set_register(11, 12)
        .load_program(&[b().add(9, 10, 11).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(9), 17);
}

#[test]
fn test_reg_add_negative_operands() {
    let mut ctx = TestContext::new()
        .set_register(10, -5)
        .set_register(11, -12)
        .load_program(&[b().add(9, 10, 11).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(9), -17);
}

#[rstest]
#[case(i32::MAX, i32::MAX)]
#[case(i32::MAX, 1)]
#[case(i32::MIN, i32::MIN)]
#[case(i32::MIN, -1)]
fn test_reg_add_overflow(#[case] lhs: i32, #[case] rhs: i32) {
    let mut ctx = TestContext::new()
        .set_register(10, lhs)
        .set_register(11, rhs)
        .load_program(&[b().add(9, 10, 11).encode(), b().halt().encode()]);
    assert_eq!(ctx.cpu.run(), Err(SimError::Overflow("register add")));
}

#[test]
fn test_reg_add_mixed_signs_never_overflows() {
    let mut ctx = TestContext::new()
        .set_register(10, i32::MAX)
        .set_register(11, i32::MIN)
        .load_program(&[b().add(9, 10, 11).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(9), -1);
}

#[test]
fn test_reg_add_to_register_zero_fails() {
    let mut ctx = TestContext::new()
        .set_register(10, 1)
        .load_program(&[b().add(0, 10, 10).encode(), b().halt().encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Invariant("register zero is immutable"))
    );
}

#[test]
fn test_reg_and() {
    let mut ctx = TestContext::new()
        .set_register(5, 48)
        .set_register(6, 63)
        .load_program(&[b().and(4, 5, 6).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(4), 48);
}

#[test]
fn test_reg_and_negative_values() {
    let mut ctx = TestContext::new()
        .set_register(5, -20)
        .set_register(6, -12)
        .load_program(&[b().and(4, 5, 6).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(4), -28);
}

#[test]
fn test_imm_add() {
    let mut ctx = TestContext::new()
        .set_register(10, 10)
        .load_program(&[b().addi(1, 10, 1).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(1), 11);
}

#[test]
fn test_imm_add_negative_immediate_sign_extends() {
    let mut ctx = TestContext::new()
        .set_register(10, 10)
        .load_program(&[b().addi(1, 10, -4).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(1), 6);
}

#[test]
fn test_imm_add_overflow() {
    let mut ctx = TestContext::new()
        .set_register(10, i32::MAX)
        .load_program(&[b().addi(1, 10, 1).encode(), b().halt().encode()]);
    assert_eq!(ctx.cpu.run(), Err(SimError::Overflow("immediate add")));
}

#[test]
fn test_imm_and() {
    let mut ctx = TestContext::new()
        .set_register(10, 89)
        .load_program(&[b().andi(9, 10, 100).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(9), 64);
}

#[test]
fn test_imm_and_does_not_sign_extend() {
    // The immediate is a raw 16-bit pattern: all-ones masks to 0xFFFF, so
    // anding with an all-ones register yields 65535, not -1.
    let mut ctx = TestContext::new()
        .set_register(10, -1)
        .load_program(&[b().andi(9, 10, -1).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(9), 65535);
}

#[test]
fn test_load_word() {
    let mut ctx = TestContext::new()
        .load_program(&[b().lw(10, 0, 40).encode(), b().halt().encode()]);
    ctx.cpu.set_data_word(DataAddr::new(40), 10).unwrap();
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(10), 10);
}

#[test]
fn test_load_word_negative_offset() {
    let mut ctx = TestContext::new()
        .set_register(5, 50)
        .load_program(&[b().lw(10, 5, -10).encode(), b().halt().encode()]);
    ctx.cpu.set_data_word(DataAddr::new(40), -77).unwrap();
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(10), -77);
}

#[test]
fn test_load_word_address_overflow() {
    let mut ctx = TestContext::new()
        .set_register(1, i32::MAX)
        .load_program(&[b().lw(10, 1, 1).encode(), b().halt().encode()]);
    assert_eq!(ctx.cpu.run(), Err(SimError::Overflow("effective address")));
}

#[test]
fn test_load_word_out_of_bounds() {
    let mut ctx = TestContext::new()
        .set_register(1, 500)
        .load_program(&[b().lw(10, 1, 1).encode(), b().halt().encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Bounds {
            space: "data memory",
            address: 501,
            capacity: 500,
        })
    );
}

#[test]
fn test_store_word() {
    let mut ctx = TestContext::new()
        .set_register(10, 50)
        .set_register(9, 25)
        .load_program(&[b().sw(9, 10, 20).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.data_value(70), 25);
}

#[test]
fn test_store_word_negative_address() {
    let mut ctx = TestContext::new()
        .set_register(10, -30)
        .set_register(9, 25)
        .load_program(&[b().sw(9, 10, 20).encode(), b().halt().encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Bounds {
            space: "data memory",
            address: -10,
            capacity: 500,
        })
    );
}

#[test]
fn test_store_word_address_overflow() {
    let mut ctx = TestContext::new()
        .set_register(10, i32::MAX)
        .set_register(9, 25)
        .load_program(&[b().sw(9, 10, 20).encode(), b().halt().encode()]);
    assert_eq!(ctx.cpu.run(), Err(SimError::Overflow("effective address")));
}

#[test]
fn test_store_word_failure_leaves_memory_untouched() {
    let mut ctx = TestContext::new()
        .set_register(10, -30)
        .set_register(9, 25)
        .load_program(&[b().sw(9, 10, 20).encode(), b().halt().encode()]);
    assert!(ctx.cpu.run().is_err());
    for i in 0..ctx.cpu.dmem.capacity() {
        assert_eq!(ctx.data_value(i as i32), 0);
    }
}

#[test]
fn test_branch_taken_skips_instruction() {
    // Target is the already-incremented PC plus offset*4: word 2, past the
    // first halt.
    let mut ctx = TestContext::new()
        .set_register(9, 10)
        .set_register(10, 10)
        .load_program(&[
            b().beq(9, 10, 1).encode(),
            b().halt().encode(),
            b().halt().encode(),
        ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 12);
}

#[test]
fn test_branch_not_taken_is_noop() {
    let mut ctx = TestContext::new()
        .set_register(9, 1)
        .set_register(10, 2)
        .load_program(&[
            b().beq(9, 10, 1).encode(),
            b().halt().encode(),
            b().halt().encode(),
        ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 8);
}

#[test]
fn test_branch_backward() {
    // Word 0 branches forward to word 2, which branches back to word 1.
    let mut ctx = TestContext::new().load_program(&[
        b().beq(0, 0, 1).encode(),
        b().halt().encode(),
        b().beq(0, 0, -2).encode(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 8);
}

#[test]
fn test_branch_target_out_of_bounds() {
    let mut ctx = TestContext::new()
        .set_register(9, 10)
        .set_register(10, 10)
        .load_program(&[b().beq(9, 10, 255).encode(), b().halt().encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Bounds {
            space: "instruction memory",
            address: 256,
            capacity: 200,
        })
    );
}

#[test]
fn test_jump() {
    let mut ctx = TestContext::new().load_program(&[
        b().j(2).encode(),
        b().halt().encode(),
        b().halt().encode(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 12);
}

#[test]
fn test_jump_target_out_of_bounds() {
    let mut ctx = TestContext::new().load_program(&[b().j(200).encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Bounds {
            space: "instruction memory",
            address: 200,
            capacity: 200,
        })
    );
}

#[test]
fn test_jump_register() {
    let mut ctx = TestContext::new()
        .set_register(8, 8)
        .load_program(&[
            b().jr(8).encode(),
            b().halt().encode(),
            b().halt().encode(),
        ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 12);
}

#[test]
fn test_jump_register_out_of_bounds() {
    let mut ctx = TestContext::new()
        .set_register(8, 800)
        .load_program(&[b().jr(8).encode(), b().halt().encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Bounds {
            space: "instruction memory",
            address: 200,
            capacity: 200,
        })
    );
}

#[test]
fn test_jump_register_negative_target() {
    let mut ctx = TestContext::new()
        .set_register(8, -4)
        .load_program(&[b().jr(8).encode(), b().halt().encode()]);
    assert!(matches!(ctx.cpu.run(), Err(SimError::Bounds { .. })));
}

#[test]
fn test_jump_register_unaligned_truncates() {
    // Byte address 6 is not word-aligned; the fetch index truncates to
    // word 1 and execution continues from there.
    let mut ctx = TestContext::new()
        .set_register(8, 6)
        .load_program(&[b().jr(8).encode(), b().halt().encode()]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 10);
}

#[test]
fn test_unrecognized_opcode_is_noop() {
    let mut ctx = TestContext::new().load_program(&[
        b().opcode(63).imm(7).format(InstrFormat::I).encode(),
        b().halt().encode(),
    ]);
    ctx.run_to_halt();
    for i in 0..32 {
        assert_eq!(ctx.register_value(i), 0);
    }
}

#[test]
fn test_unrecognized_funct_is_noop() {
    // An all-zero word decodes as R-format with funct 0, which no instruction
    // claims.
    let mut ctx = TestContext::new().load_program(&[
        b().funct(0).encode(),
        b().halt().encode(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 8);
}

#[test]
fn test_jump_and_link_is_unsupported() {
    // Opcode 3 is jump-and-link in MIPS; here it takes the
    // unrecognized-opcode path and must not touch the link register.
    let mut ctx = TestContext::new().load_program(&[
        b().opcode(3).format(InstrFormat::J).encode(),
        b().halt().encode(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.register_value(31), 0);
    assert_eq!(ctx.cpu.pc.to_signed().unwrap(), 8);
}

#[test]
fn test_running_off_the_end_is_a_bounds_error() {
    // Without a halt the machine no-ops through the zero-filled words and
    // the fetch after the last one fails.
    let mut ctx = TestContext::new()
        .set_register(10, 1)
        .load_program(&[b().addi(1, 10, 1).encode()]);
    assert_eq!(
        ctx.cpu.run(),
        Err(SimError::Bounds {
            space: "instruction memory",
            address: 200,
            capacity: 200,
        })
    );
    assert_eq!(ctx.register_value(1), 2);
}
