//! Program loading.
//!
//! The driver-facing side of the simulator: parsing textual programs and
//! placing their words into instruction memory before a run.

/// Textual program format parsing and loading.
pub mod loader;
