//! Fatal simulation errors.
//!
//! This module defines the error kinds for the simulator. It provides:
//! 1. **Error Kinds:** One variant per class of invariant the machine checks.
//! 2. **Propagation Policy:** Every error is fatal to the current run; nothing
//!    is caught and retried internally.
//! 3. **Integration:** Standard error traits via `thiserror` for system-level
//!    reporting.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by the bit-vector type, the loader, and the execution engine.
///
/// The simulated architecture is trap-free and single-program: any of these
/// aborts the run loop and is left for the driver to report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Malformed input to a constructor or loader.
    ///
    /// Raised for wrong widths, out-of-range slice bounds, and invalid
    /// externally supplied indices.
    #[error("out of range: {0}")]
    Range(String),

    /// Operation requested on a bit vector that was never assigned digits.
    #[error("bit vector digits must be set first")]
    State,

    /// Signed-arithmetic overflow, detected by the sign-comparison rule.
    ///
    /// The payload names the operation whose result changed sign.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// Computed address outside the valid range of its memory.
    ///
    /// Covers data addresses, instruction fetches, and branch/jump targets.
    #[error("address {address} out of bounds for {space} of {capacity} words")]
    Bounds {
        /// Name of the address space that rejected the access.
        space: &'static str,
        /// The offending address, in that space's own unit.
        address: i64,
        /// Word capacity of the memory.
        capacity: usize,
    },

    /// Violation of an architectural invariant.
    ///
    /// The only such invariant is the immutability of register zero.
    #[error("invariant violation: {0}")]
    Invariant(&'static str),
}
