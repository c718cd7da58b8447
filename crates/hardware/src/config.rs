//! Configuration system for the simulator.
//!
//! This module defines the configuration structure used to parameterize a
//! machine. It provides:
//! 1. **Defaults:** Baseline memory capacities of the simulated machine.
//! 2. **Structure:** A flat config covering memory geometry and tracing.
//!
//! Configuration is supplied via JSON from the CLI or use `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine geometry when not explicitly
/// overridden.
mod defaults {
    /// Word capacity of data memory (500 words).
    pub const DATA_MEMORY_WORDS: usize = 500;

    /// Word capacity of instruction memory (200 words).
    ///
    /// Branch and jump targets are bounds-checked against this capacity.
    pub const INSTR_MEMORY_WORDS: usize = 200;
}

/// Machine configuration.
///
/// Every field has a default, so an empty JSON object deserializes to the
/// baseline machine geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Word capacity of data memory.
    #[serde(default = "Config::default_data_memory_words")]
    pub data_memory_words: usize,

    /// Word capacity of instruction memory.
    #[serde(default = "Config::default_instr_memory_words")]
    pub instr_memory_words: usize,

    /// Enable per-cycle instruction tracing events.
    #[serde(default)]
    pub trace_instructions: bool,
}

impl Config {
    /// Returns the default data-memory capacity.
    fn default_data_memory_words() -> usize {
        defaults::DATA_MEMORY_WORDS
    }

    /// Returns the default instruction-memory capacity.
    fn default_instr_memory_words() -> usize {
        defaults::INSTR_MEMORY_WORDS
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_memory_words: defaults::DATA_MEMORY_WORDS,
            instr_memory_words: defaults::INSTR_MEMORY_WORDS,
            trace_instructions: false,
        }
    }
}
