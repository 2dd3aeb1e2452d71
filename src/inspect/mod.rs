//! Benchmark inspection
//!
//! Concurrency is a property of the benchmark source, never of the caller's
//! request.

pub mod benchmark;
