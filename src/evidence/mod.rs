//! Evidence packaging
//!
//! Bundles test-case and metadata artifacts into the submission archive.

pub mod packager;

pub use packager::{EvidenceBundle, EvidencePackager, PackageReport};
