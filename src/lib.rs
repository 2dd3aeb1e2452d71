//! bmcwrap: Test-Comp wrapper around the ESBMC bounded model checker
//!
//! Turns a benchmark and a property file into one verifier invocation, maps
//! the verifier's output to a competition verdict and packages the generated
//! test cases.
//!
//! # Architecture
//!
//! ## Configuration ([`config`])
//! - [`config::types`]: Closed enums, result codes and the crate error type
//! - [`config::settings`]: Run configuration and the JSON settings file
//! - [`config::property`]: Property file to category resolution
//!
//! ## Inspection ([`inspect`])
//! - [`inspect::benchmark`]: Thread-creation scan of the benchmark source
//!
//! ## Flag Policy ([`policy`])
//! - [`policy::selector`]: Pure mapping from run inputs to verifier flags
//! - [`policy::command`]: Verifier command line
//!
//! ## Execution ([`exec`])
//! - [`exec::runner`]: Verifier launch and combined output capture
//!
//! ## Verdict ([`verdict`])
//! - [`verdict::verdict`]: Ordered marker rules over verifier output
//!
//! ## Evidence ([`evidence`])
//! - [`evidence::packager`]: `test-suite.zip` creation
//!
//! ## Orchestration ([`core`])
//! - [`core::orchestrator`]: Type-state run sequencing
//!
//! # Design Principles
//!
//! 1. **Pure policy** - Flag selection and classification have no side effects
//! 2. **Types prevent errors** - Run steps cannot be skipped or reordered
//! 3. **Ambient state is explicit** - Configuration is built once and passed down

// Configuration
pub mod config;

// Benchmark inspection
pub mod inspect;

// Flag policy
pub mod policy;

// Execution
pub mod exec;

// Verdict classification
pub mod verdict;

// Evidence packaging
pub mod evidence;

// Run orchestration
pub mod core;

// CLI
pub mod cli;
