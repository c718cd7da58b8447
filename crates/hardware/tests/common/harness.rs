use mipsim_core::common::addr::DataAddr;
use mipsim_core::{BitVector, Config, Cpu};

/// Owns a machine and offers program-loading and run helpers.
pub struct TestContext {
    pub cpu: Cpu,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
        }
    }

    /// Loads encoded words into instruction memory at successive indices
    /// from zero.
    pub fn load_program(mut self, words: &[BitVector]) -> Self {
        for (index, word) in words.iter().enumerate() {
            self.cpu.load_instr(index, word.clone()).unwrap();
        }
        self
    }

    /// Seeds a register with a two's-complement value.
    pub fn set_register(mut self, idx: usize, value: i32) -> Self {
        self.cpu.set_register(idx, value).unwrap();
        self
    }

    /// Runs to the halt system call, panicking on any fatal error.
    pub fn run_to_halt(&mut self) {
        self.cpu.run().unwrap();
        assert!(self.cpu.is_halted());
    }

    /// Convenience signed read of a register.
    pub fn register_value(&self, idx: usize) -> i32 {
        self.cpu.register(idx).unwrap().to_signed().unwrap()
    }

    /// Convenience signed read of a data-memory word.
    pub fn data_value(&self, addr: i32) -> i32 {
        self.cpu
            .data_word(DataAddr::new(addr))
            .unwrap()
            .to_signed()
            .unwrap()
    }
}
