/// Wrapper configuration: per-run values plus optional settings file
use crate::config::types::{Architecture, Result, Strategy, WrapperError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the verifier, relative to the working directory
pub const DEFAULT_VERIFIER_PATH: &str = "./esbmc";

/// Settings that may be supplied through a JSON file (`--config`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrapperSettings {
    /// Verifier executable
    pub verifier_path: PathBuf,
}

impl Default for WrapperSettings {
    fn default() -> Self {
        Self {
            verifier_path: PathBuf::from(DEFAULT_VERIFIER_PATH),
        }
    }
}

impl WrapperSettings {
    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WrapperError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            WrapperError::Config(format!(
                "Failed to parse settings JSON {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Everything one run needs, built once at startup and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperConfig {
    pub architecture: Architecture,
    pub strategy: Strategy,
    pub property_file: PathBuf,
    pub benchmark: PathBuf,
    /// Caller's concurrency hint. Advisory only: the benchmark scan decides.
    pub concurrency_hint: bool,
    pub dry_run: bool,
    /// Reserved for CI runs
    pub ci: bool,
    pub settings: WrapperSettings,
}

impl WrapperConfig {
    pub fn new(property_file: impl Into<PathBuf>, benchmark: impl Into<PathBuf>) -> Self {
        Self {
            architecture: Architecture::default(),
            strategy: Strategy::FixedKInduction,
            property_file: property_file.into(),
            benchmark: benchmark.into(),
            concurrency_hint: false,
            dry_run: false,
            ci: false,
            settings: WrapperSettings::default(),
        }
    }

    pub fn verifier_path(&self) -> &Path {
        &self.settings.verifier_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = WrapperSettings::default();
        assert_eq!(settings.verifier_path, PathBuf::from("./esbmc"));
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"verifier_path": "/opt/esbmc/bin/esbmc"}}"#).unwrap();

        let settings = WrapperSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.verifier_path, PathBuf::from("/opt/esbmc/bin/esbmc"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let settings = WrapperSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings, WrapperSettings::default());
    }

    #[test]
    fn test_malformed_settings_are_config_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "verifier_path = 3").unwrap();

        let err = WrapperSettings::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, WrapperError::Config(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = WrapperConfig::new("prop.prp", "bench.c");
        assert_eq!(config.architecture, Architecture::Bits32);
        assert_eq!(config.strategy, Strategy::FixedKInduction);
        assert!(!config.dry_run);
        assert_eq!(config.verifier_path(), Path::new("./esbmc"));
    }
}
