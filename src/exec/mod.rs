//! Execution control
//!
//! Launching the verifier and collecting its combined output.

pub mod runner;

pub use runner::{verifier_version, Execution, ProcessRunner, RawOutput, VerifierRunner};
