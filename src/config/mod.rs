//! Configuration and policy inputs
//!
//! Closed enums shared by every component, run configuration, and property
//! file recognition.

pub mod property;
pub mod settings;
pub mod types;
