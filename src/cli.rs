use crate::config::settings::{WrapperConfig, WrapperSettings};
use crate::config::types::{Architecture, Strategy, WrapperError};
use crate::core::{orchestrate, RunOutcome};
use crate::evidence::EvidencePackager;
use crate::exec::{verifier_version, ProcessRunner};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "esbmc-wrapper",
    author,
    about = "Run ESBMC on a Test-Comp benchmark and package the generated test suite",
    long_about = None,
    disable_version_flag = true
)]
struct Cli {
    /// Data model of the benchmark
    #[arg(short = 'a', long = "arch", value_parser = ["32", "64"], default_value = "32")]
    arch: String,

    /// Print the verifier version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Test-Comp property file
    #[arg(short = 'p', long = "propertyfile")]
    propertyfile: Option<PathBuf>,

    /// C benchmark to verify
    benchmark: Option<PathBuf>,

    /// Verification strategy
    #[arg(short = 's', long = "strategy", value_parser = Strategy::NAMES, default_value = "fixed")]
    strategy: String,

    /// Hint that the benchmark is concurrent (the benchmark scan decides)
    #[arg(short = 'c', long = "concurrency")]
    concurrency: bool,

    /// Print the verifier command without running it
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Running on CI
    #[arg(long = "ci")]
    ci: bool,

    /// JSON settings file (verifier location)
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<WrapperSettings> {
        match &self.config {
            Some(path) => Ok(WrapperSettings::load_from_file(path)?),
            None => Ok(WrapperSettings::default()),
        }
    }

    /// Build the run configuration. The property file is checked before the
    /// benchmark.
    fn to_config(&self, settings: WrapperSettings) -> Result<WrapperConfig> {
        let property_file = self
            .propertyfile
            .clone()
            .ok_or(WrapperError::MissingArgument("Please, specify a property file"))?;
        let benchmark = self
            .benchmark
            .clone()
            .ok_or(WrapperError::MissingArgument("Please, specify a benchmark to verify"))?;

        let architecture: Architecture = self.arch.parse()?;
        let strategy: Strategy = self.strategy.parse()?;

        Ok(WrapperConfig {
            architecture,
            strategy,
            property_file,
            benchmark,
            concurrency_hint: self.concurrency,
            dry_run: self.dry_run,
            ci: self.ci,
            settings,
        })
    }
}

pub fn run() -> Result<()> {
    // Warnings (missing evidence files, unwinding assertions) are shown by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    let runner = ProcessRunner::new(cli.dry_run);

    if cli.version {
        if let Some(version) = verifier_version(&runner, &settings.verifier_path)? {
            println!("{}", version);
        }
        return Ok(());
    }

    let config = cli.to_config(settings)?;
    let packager =
        EvidencePackager::in_current_dir().context("Failed to resolve the working directory")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match orchestrate(&config, &runner, &mut out, &packager)? {
        RunOutcome::DryRun => log::debug!("Dry run finished"),
        RunOutcome::Completed(report) => log::debug!(
            "Run finished: {:?} -> {}",
            report.code,
            report.verdict
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["esbmc-wrapper"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["-p", "coverage.prp", "main.c"]);
        let config = cli.to_config(WrapperSettings::default()).unwrap();

        assert_eq!(config.architecture, Architecture::Bits32);
        assert_eq!(config.strategy, Strategy::FixedKInduction);
        assert_eq!(config.property_file, PathBuf::from("coverage.prp"));
        assert_eq!(config.benchmark, PathBuf::from("main.c"));
        assert!(!config.concurrency_hint);
        assert!(!config.dry_run);
        assert!(!config.ci);
        assert_eq!(config.verifier_path(), PathBuf::from("./esbmc"));
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "--arch",
            "64",
            "--strategy",
            "falsi",
            "--concurrency",
            "--dry-run",
            "--ci",
            "--propertyfile",
            "reach.prp",
            "bench.c",
        ]);
        let config = cli.to_config(WrapperSettings::default()).unwrap();

        assert_eq!(config.architecture, Architecture::Bits64);
        assert_eq!(config.strategy, Strategy::Falsification);
        assert!(config.concurrency_hint);
        assert!(config.dry_run);
        assert!(config.ci);
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-a", "64", "-s", "incr", "-c", "-n", "-p", "p.prp", "b.c"]);
        assert_eq!(cli.arch, "64");
        assert_eq!(cli.strategy, "incr");
        assert!(cli.concurrency);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_version_flag_is_verifier_version() {
        let cli = parse(&["-v"]);
        assert!(cli.version);
        assert!(cli.propertyfile.is_none());
    }

    #[test]
    fn test_rejects_unknown_strategy_and_arch() {
        assert!(Cli::try_parse_from(["esbmc-wrapper", "-s", "bmc", "x.c"]).is_err());
        assert!(Cli::try_parse_from(["esbmc-wrapper", "-a", "16", "x.c"]).is_err());
    }

    #[test]
    fn test_missing_property_file() {
        let cli = parse(&["main.c"]);
        let err = cli.to_config(WrapperSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please, specify a property file");
    }

    #[test]
    fn test_missing_benchmark() {
        let cli = parse(&["-p", "coverage.prp"]);
        let err = cli.to_config(WrapperSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please, specify a benchmark to verify");
    }

    #[test]
    fn test_property_checked_before_benchmark() {
        let cli = parse(&[]);
        let err = cli.to_config(WrapperSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please, specify a property file");
    }

    #[test]
    fn test_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"verifier_path": "/opt/esbmc/bin/esbmc"}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &path, "-p", "p.prp", "b.c"]);
        let settings = cli.settings().unwrap();
        let config = cli.to_config(settings).unwrap();
        assert_eq!(config.verifier_path(), PathBuf::from("/opt/esbmc/bin/esbmc"));
    }
}
