//! Verifier flag policy
//!
//! A pure mapping from run inputs to the verifier command line.

pub mod command;
pub mod selector;

pub use command::CommandLine;
pub use selector::{select_command, PolicyInput};
