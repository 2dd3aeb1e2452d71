/// Verifier flag policy
///
/// Maps (strategy, property, architecture, concurrency) to a verifier
/// command line. The construction order is fixed:
/// 1. base flags shared by every run
/// 2. benchmark path
/// 3. architecture
/// 4. concurrency flags
/// 5. property flags
/// 6. strategy flags (concurrency forces incremental BMC)
use crate::config::types::{Architecture, PropertyCategory, Strategy};
use crate::policy::command::CommandLine;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Flags passed on every run
pub const BASE_FLAGS: &[&str] = &[
    "--no-div-by-zero-check",
    "--force-malloc-success",
    "--state-hashing",
    "--add-symex-value-sets",
    "--no-align-check",
    "--k-step",
    "2",
    "--floatbv",
    "--unlimited-k-steps",
    // https://github.com/esbmc/esbmc/pull/1190#issuecomment-1637047028
    "--no-vla-size-check",
];

/// Partial-order reduction off, context switches bounded to 2
pub const CONCURRENCY_FLAGS: &[&str] = &["--no-por", "--context-bound", "2"];

pub const COVERAGE_FLAGS: &[&str] = &[
    "--goto-unwind",
    "--base-k-step",
    "5",
    "--no-bounds-check",
    "--no-pointer-check",
    "--quiet",
    "--branch-coverage",
    "--generate-testcase",
];

pub const REACH_FLAGS: &[&str] = &["--enable-unreachability-intrinsic"];

pub const REACH_CONCURRENT_FLAGS: &[&str] = &["--no-pointer-check", "--no-bounds-check"];

pub const REACH_SEQUENTIAL_FLAGS: &[&str] = &[
    "--no-pointer-check",
    "--interval-analysis",
    "--no-bounds-check",
    "--error-label",
    "ERROR",
    "--goto-unwind",
    "--unlimited-goto-unwind",
];

pub const K_INDUCTION_FLAGS: &[&str] = &["--k-induction", "--max-inductive-step", "8"];
pub const FALSIFICATION_FLAGS: &[&str] = &["--falsification"];
pub const INCREMENTAL_FLAGS: &[&str] = &["--incremental-bmc"];

/// Inputs of the policy matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInput {
    pub strategy: Strategy,
    pub property: PropertyCategory,
    pub architecture: Architecture,
    /// Result of the benchmark scan, not the caller's hint
    pub concurrency: bool,
    pub benchmark: PathBuf,
}

/// Build the verifier command line for one run.
pub fn select_command(input: &PolicyInput, verifier: &Path) -> CommandLine {
    let mut args: Vec<OsString> = Vec::new();

    push(&mut args, BASE_FLAGS);
    args.push(input.benchmark.as_os_str().to_os_string());
    push(&mut args, &[input.architecture.flag()]);

    if input.concurrency {
        push(&mut args, CONCURRENCY_FLAGS);
    }

    push(&mut args, property_flags(input.property));
    if input.property == PropertyCategory::Reachability {
        if input.concurrency {
            push(&mut args, REACH_CONCURRENT_FLAGS);
        } else {
            push(&mut args, REACH_SEQUENTIAL_FLAGS);
        }
    }

    push(&mut args, strategy_flags(input.strategy, input.concurrency));

    CommandLine::new(verifier.to_path_buf(), args)
}

fn push(args: &mut Vec<OsString>, flags: &[&str]) {
    args.extend(flags.iter().map(OsString::from));
}

fn property_flags(property: PropertyCategory) -> &'static [&'static str] {
    match property {
        PropertyCategory::Coverage => COVERAGE_FLAGS,
        PropertyCategory::Reachability => REACH_FLAGS,
    }
}

/// Strategy flags; concurrent benchmarks are only supported by incremental BMC.
fn strategy_flags(strategy: Strategy, concurrency: bool) -> &'static [&'static str] {
    if concurrency {
        return INCREMENTAL_FLAGS;
    }

    match strategy {
        Strategy::FixedKInduction | Strategy::KInduction => K_INDUCTION_FLAGS,
        Strategy::Falsification => FALSIFICATION_FLAGS,
        Strategy::Incremental => INCREMENTAL_FLAGS,
    }
}
