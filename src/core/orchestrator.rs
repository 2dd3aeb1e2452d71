/// Run orchestration
///
/// One verification attempt is a fixed sequence:
///
/// Init -> CategoryResolved -> ConcurrencyResolved -> CommandBuilt ->
/// Executed -> Classified -> Printed -> Packaged
///
/// Each step consumes the previous `Run<S>` and returns the next one, so a
/// step can neither be skipped nor repeated. Dry-run mode stops the chain
/// before `Executed`. Packaging is best-effort and cannot fail a run that
/// already printed its verdict.
use crate::config::property;
use crate::config::settings::WrapperConfig;
use crate::config::types::{PropertyCategory, Result, ResultCode, Strategy, Verdict};
use crate::evidence::{EvidencePackager, PackageReport};
use crate::exec::{Execution, RawOutput, VerifierRunner};
use crate::inspect::benchmark::benchmark_uses_threads;
use crate::policy::{select_command, CommandLine, PolicyInput};
use crate::verdict::VerdictClassifier;
use std::io::Write;

/// States visited by a run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    CategoryResolved,
    ConcurrencyResolved,
    CommandBuilt,
    Executed,
    Classified,
    Printed,
    Packaged,
}

/// Type-state: nothing resolved yet
pub struct Init;

/// Type-state: property category known
pub struct CategoryResolved {
    pub category: PropertyCategory,
}

/// Type-state: benchmark scanned for threads
pub struct ConcurrencyResolved {
    pub category: PropertyCategory,
    pub concurrency: bool,
}

/// Type-state: verifier command line fixed
pub struct CommandBuilt {
    pub category: PropertyCategory,
    pub concurrency: bool,
    pub command: CommandLine,
}

/// Type-state: verifier ran to completion
pub struct Executed {
    pub category: PropertyCategory,
    pub concurrency: bool,
    pub command: CommandLine,
    pub output: RawOutput,
}

/// Type-state: output classified
pub struct Classified {
    pub category: PropertyCategory,
    pub concurrency: bool,
    pub command: CommandLine,
    pub code: ResultCode,
}

/// Type-state: verdict emitted
pub struct Printed {
    pub category: PropertyCategory,
    pub concurrency: bool,
    pub command: CommandLine,
    pub code: ResultCode,
    pub verdict: Verdict,
}

/// Verification run with type-state tracking
///
/// A step that is skipped does not compile:
///
/// ```compile_fail
/// use bmcwrap::config::settings::WrapperConfig;
/// use bmcwrap::core::Run;
///
/// let config = WrapperConfig::new("coverage.prp", "main.c");
/// // No command before the property category is known
/// let _ = Run::new(&config).build_command();
/// ```
///
/// Neither does reusing a consumed state:
///
/// ```compile_fail
/// use bmcwrap::config::settings::WrapperConfig;
/// use bmcwrap::core::Run;
///
/// let config = WrapperConfig::new("coverage.prp", "main.c");
/// let run = Run::new(&config);
/// let _first = run.resolve_category();
/// let _second = run.resolve_category();
/// ```
pub struct Run<'a, S> {
    config: &'a WrapperConfig,
    trace: Vec<RunState>,
    state: S,
}

/// Result of handing the command to the runner
pub enum ExecutionStep<'a> {
    DryRun,
    Executed(Run<'a, Executed>),
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub category: PropertyCategory,
    pub concurrency: bool,
    pub command: CommandLine,
    pub code: ResultCode,
    pub verdict: Verdict,
    /// `None` when packaging failed
    pub package: Option<PackageReport>,
    pub states: Vec<RunState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Dry-run mode: the command was echoed but not executed
    DryRun,
    Completed(RunReport),
}

impl<'a, S> Run<'a, S> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn trace(&self) -> &[RunState] {
        &self.trace
    }
}

fn step<T>(
    config: &WrapperConfig,
    mut trace: Vec<RunState>,
    next: T,
    state: RunState,
) -> Run<'_, T> {
    log::debug!("Run state: {:?}", state);
    trace.push(state);
    Run {
        config,
        trace,
        state: next,
    }
}

impl<'a> Run<'a, Init> {
    pub fn new(config: &'a WrapperConfig) -> Self {
        Self {
            config,
            trace: vec![RunState::Init],
            state: Init,
        }
    }

    /// Read the property file; unsupported content is fatal
    pub fn resolve_category(self) -> Result<Run<'a, CategoryResolved>> {
        let category = property::read_category(&self.config.property_file)?;
        Ok(step(
            self.config,
            self.trace,
            CategoryResolved { category },
            RunState::CategoryResolved,
        ))
    }
}

impl<'a> Run<'a, CategoryResolved> {
    /// Scan the benchmark. The scan result overrides the caller's hint.
    pub fn resolve_concurrency(self) -> Result<Run<'a, ConcurrencyResolved>> {
        let Run {
            config,
            trace,
            state,
        } = self;

        let concurrency = benchmark_uses_threads(&config.benchmark)?;
        if concurrency != config.concurrency_hint {
            log::info!(
                "Concurrency hint ({}) overridden by benchmark scan ({})",
                config.concurrency_hint,
                concurrency
            );
        }

        let next = ConcurrencyResolved {
            category: state.category,
            concurrency,
        };
        Ok(step(config, trace, next, RunState::ConcurrencyResolved))
    }
}

impl<'a> Run<'a, ConcurrencyResolved> {
    pub fn build_command(self) -> Run<'a, CommandBuilt> {
        let Run {
            config,
            trace,
            state:
                ConcurrencyResolved {
                    category,
                    concurrency,
                },
        } = self;

        if concurrency && config.strategy != Strategy::Incremental {
            log::info!(
                "Concurrent benchmark: using incremental BMC instead of '{}'",
                config.strategy
            );
        }

        let input = PolicyInput {
            strategy: config.strategy,
            property: category,
            architecture: config.architecture,
            concurrency,
            benchmark: config.benchmark.clone(),
        };
        let command = select_command(&input, config.verifier_path());

        let next = CommandBuilt {
            category,
            concurrency,
            command,
        };
        step(config, trace, next, RunState::CommandBuilt)
    }
}

impl<'a> Run<'a, CommandBuilt> {
    /// Echo the command, run it, and echo the raw verifier output.
    pub fn execute<R, W>(self, runner: &R, out: &mut W) -> Result<ExecutionStep<'a>>
    where
        R: VerifierRunner + ?Sized,
        W: Write,
    {
        let Run {
            config,
            trace,
            state:
                CommandBuilt {
                    category,
                    concurrency,
                    command,
                },
        } = self;

        writeln!(out, "Verifying with ESBMC")?;
        writeln!(out, "Command: {}", command)?;
        out.flush()?;

        let output = match runner.run(&command)? {
            Execution::DryRun => return Ok(ExecutionStep::DryRun),
            Execution::Completed(output) => output,
        };
        writeln!(out, "{}", output.text())?;

        let next = Executed {
            category,
            concurrency,
            command,
            output,
        };
        Ok(ExecutionStep::Executed(step(
            config,
            trace,
            next,
            RunState::Executed,
        )))
    }
}

impl<'a> Run<'a, Executed> {
    pub fn classify(self) -> Run<'a, Classified> {
        let Run {
            config,
            trace,
            state:
                Executed {
                    category,
                    concurrency,
                    command,
                    output,
                },
        } = self;

        let code = VerdictClassifier::classify(&output.text(), category);

        let next = Classified {
            category,
            concurrency,
            command,
            code,
        };
        step(config, trace, next, RunState::Classified)
    }
}

impl<'a> Run<'a, Classified> {
    /// Emit the verdict line
    pub fn print<W: Write>(self, out: &mut W) -> Result<Run<'a, Printed>> {
        let Run {
            config,
            trace,
            state:
                Classified {
                    category,
                    concurrency,
                    command,
                    code,
                },
        } = self;

        let verdict = Verdict::from(code);
        writeln!(out, "{}", verdict)?;
        out.flush()?;

        let next = Printed {
            category,
            concurrency,
            command,
            code,
            verdict,
        };
        Ok(step(config, trace, next, RunState::Printed))
    }
}

impl<'a> Run<'a, Printed> {
    /// Archive the evidence. Failures are logged, never propagated.
    pub fn package(self, packager: &EvidencePackager) -> RunReport {
        let package = match packager.package() {
            Ok(report) => Some(report),
            Err(e) => {
                log::warn!(
                    "Evidence packaging in {} failed: {}",
                    packager.dir().display(),
                    e
                );
                None
            }
        };

        let Run {
            config,
            trace,
            state:
                Printed {
                    category,
                    concurrency,
                    command,
                    code,
                    verdict,
                },
        } = self;
        let states = step(config, trace, (), RunState::Packaged).trace;

        RunReport {
            category,
            concurrency,
            command,
            code,
            verdict,
            package,
            states,
        }
    }
}

/// Drive one run from property file to packaged evidence.
pub fn orchestrate<R, W>(
    config: &WrapperConfig,
    runner: &R,
    out: &mut W,
    packager: &EvidencePackager,
) -> Result<RunOutcome>
where
    R: VerifierRunner + ?Sized,
    W: Write,
{
    log::debug!(
        "Starting run: benchmark={} strategy={} arch={} ci={}",
        config.benchmark.display(),
        config.strategy,
        config.architecture.bits(),
        config.ci
    );

    let run = Run::new(config)
        .resolve_category()?
        .resolve_concurrency()?
        .build_command();

    let run = match run.execute(runner, out)? {
        ExecutionStep::DryRun => return Ok(RunOutcome::DryRun),
        ExecutionStep::Executed(run) => run,
    };

    let report = run.classify().print(out)?.package(packager);
    Ok(RunOutcome::Completed(report))
}
