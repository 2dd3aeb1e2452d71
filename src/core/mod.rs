//! Run orchestration core.
//!
//! Sequences inspection, flag selection, execution, classification and
//! packaging for one verification attempt.

pub mod orchestrator;

pub use orchestrator::{orchestrate, Run, RunOutcome, RunReport, RunState};
