//! Textual program loader.
//!
//! This module provides utilities for reading encoded programs and placing
//! them into instruction memory. It performs:
//! 1. **Parsing:** One 32-digit binary word per line; blank lines and `#`
//!    comments are ignored; spaces and underscores group digits visually.
//! 2. **Loading:** Words are placed at successive word indices from zero.
//! 3. **Driver Policy:** File-level helpers exit the process with a message
//!    when the program cannot be read, so the CLI stays a thin wrapper.

use std::fs;
use std::process;

use tracing::debug;

use crate::common::bits::BitVector;
use crate::common::error::{Result, SimError};
use crate::core::cpu::Cpu;

/// Parses a single encoded word.
///
/// Spaces and underscores are stripped first; what remains must be exactly
/// 32 binary digits.
///
/// # Errors
///
/// Returns [`SimError::Range`] for any other character or length.
pub fn parse_word(line: &str) -> Result<BitVector> {
    let mut bits = Vec::with_capacity(32);
    for c in line.chars() {
        match c {
            '0' => bits.push(false),
            '1' => bits.push(true),
            ' ' | '_' => {}
            other => {
                return Err(SimError::Range(format!(
                    "invalid character {other:?} in encoded word"
                )));
            }
        }
    }
    if bits.len() != 32 {
        return Err(SimError::Range(format!(
            "encoded word must be 32 digits, got {}",
            bits.len()
        )));
    }
    let mut word = BitVector::new();
    word.set_bits(&bits)?;
    Ok(word)
}

/// Parses a whole program.
///
/// # Errors
///
/// Returns [`SimError::Range`] naming the first malformed line.
pub fn parse_program(source: &str) -> Result<Vec<BitVector>> {
    let mut words = Vec::new();
    for (num, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let word = parse_word(line)
            .map_err(|e| SimError::Range(format!("line {}: {e}", num + 1)))?;
        words.push(word);
    }
    Ok(words)
}

/// Loads a program into instruction memory at successive indices from zero.
///
/// # Errors
///
/// Returns [`SimError::Range`] if the program exceeds instruction-memory
/// capacity.
pub fn load_program(cpu: &mut Cpu, words: &[BitVector]) -> Result<()> {
    for (index, word) in words.iter().enumerate() {
        cpu.load_instr(index, word.clone())?;
    }
    debug!(words = words.len(), "program loaded");
    Ok(())
}

/// Reads and parses a program file.
///
/// Exits the process with an error message if the file cannot be read or
/// parsed.
pub fn load_program_file(path: &str) -> Vec<BitVector> {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read program '{path}': {e}");
        process::exit(1);
    });
    parse_program(&source).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not parse program '{path}': {e}");
        process::exit(1);
    })
}
