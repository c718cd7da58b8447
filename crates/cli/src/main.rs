//! MIPS-subset simulator CLI.
//!
//! This binary provides the driver around the simulator core. It performs:
//! 1. **Program loading:** Reads a textual program (one 32-digit binary word
//!    per line) into instruction memory.
//! 2. **Configuration:** Optional JSON config for memory geometry and tracing.
//! 3. **Execution:** Runs to the halt system call, then prints machine state;
//!    fatal errors print the state and exit with code 1.

use clap::Parser;
use std::{fs, process};

use mipsim_core::sim::loader;
use mipsim_core::{Config, Cpu};

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    version,
    about = "Word-accurate MIPS-subset simulator",
    long_about = "Run an encoded program against a fresh machine.\n\nPrograms are plain text: one 32-digit binary word per line, `#` comments\nand blank lines ignored, spaces/underscores allowed as digit grouping.\n\nExamples:\n  mipsim demos/add_halt.txt\n  mipsim demos/add_halt.txt --trace\n  mipsim demos/add_halt.txt --config machine.json"
)]
struct Cli {
    /// Encoded program to execute.
    program: String,

    /// JSON configuration file (memory capacities, tracing).
    #[arg(short, long)]
    config: Option<String>,

    /// Enable instruction tracing to stderr.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mipsim_core=trace")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = cli.config.as_deref().map_or_else(Config::default, load_config);
    config.trace_instructions |= cli.trace;

    let words = loader::load_program_file(&cli.program);
    let mut cpu = Cpu::new(&config);
    if let Err(e) = loader::load_program(&mut cpu, &words) {
        eprintln!("\n[!] FATAL: Could not load program '{}': {e}", cli.program);
        process::exit(1);
    }

    println!(
        "[*] Executing {} ({} words, imem {} dmem {})",
        cli.program,
        words.len(),
        config.instr_memory_words,
        config.data_memory_words
    );

    match cpu.run() {
        Ok(()) => {
            println!("\n[*] HALT");
            cpu.dump_state();
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            cpu.dump_state();
            process::exit(1);
        }
    }
}

/// Reads and parses a JSON configuration file.
///
/// Exits the process with an error message if the file cannot be read or
/// parsed.
fn load_config(path: &str) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    })
}
