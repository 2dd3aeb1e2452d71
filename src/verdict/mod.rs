//! Verdict classification
//!
//! Derives the run outcome as a pure function of the verifier's output.

pub mod verdict;

pub use verdict::VerdictClassifier;
