/// Verifier process execution
use crate::config::types::{Result, WrapperError};
use crate::policy::command::CommandLine;
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Combined verifier output: stdout followed by stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    bytes: Vec<u8>,
}

impl RawOutput {
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        let mut bytes = stdout;
        bytes.extend_from_slice(&stderr);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Output as text; invalid UTF-8 is replaced, never rejected
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl From<&str> for RawOutput {
    fn from(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }
}

/// What happened when a command was handed to a runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// Dry-run mode: nothing was launched and the run must stop here
    DryRun,
    Completed(RawOutput),
}

/// Runs verifier command lines.
pub trait VerifierRunner {
    fn run(&self, command: &CommandLine) -> Result<Execution>;
}

/// Runs the verifier as a child process and waits for it.
///
/// No timeout is enforced here; the verifier applies its own limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    dry_run: bool,
}

impl ProcessRunner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl VerifierRunner for ProcessRunner {
    fn run(&self, command: &CommandLine) -> Result<Execution> {
        if self.dry_run {
            log::debug!("Dry run: not launching {}", command.program().display());
            return Ok(Execution::DryRun);
        }

        let start_time = Instant::now();
        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                WrapperError::Process(format!(
                    "Failed to start {}: {}",
                    command.program().display(),
                    e
                ))
            })?;

        log::debug!(
            "{} finished with {} after {:?}",
            command.program().display(),
            output.status,
            start_time.elapsed()
        );

        Ok(Execution::Completed(RawOutput::new(
            output.stdout,
            output.stderr,
        )))
    }
}

/// Query the verifier version through `runner`.
///
/// Returns `None` in dry-run mode. The first six characters of the output
/// (the `ESBMC ` tool prefix) are dropped.
pub fn verifier_version<R: VerifierRunner>(runner: &R, verifier: &Path) -> Result<Option<String>> {
    let command = CommandLine::new(verifier.to_path_buf(), vec![OsString::from("--version")]);
    match runner.run(&command)? {
        Execution::DryRun => Ok(None),
        Execution::Completed(output) => {
            let text = output.text();
            let version: String = text.chars().skip(6).collect();
            Ok(Some(version.trim().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct CannedRunner {
        output: &'static str,
        calls: RefCell<Vec<String>>,
    }

    impl VerifierRunner for CannedRunner {
        fn run(&self, command: &CommandLine) -> Result<Execution> {
            self.calls.borrow_mut().push(command.to_string());
            Ok(Execution::Completed(RawOutput::from(self.output)))
        }
    }

    fn command(program: &str, args: &[&str]) -> CommandLine {
        CommandLine::new(
            PathBuf::from(program),
            args.iter().map(OsString::from).collect(),
        )
    }

    #[test]
    fn test_raw_output_appends_stderr_after_stdout() {
        let output = RawOutput::new(b"VERIFICATION ".to_vec(), b"SUCCESSFUL\n".to_vec());
        assert_eq!(output.text(), "VERIFICATION SUCCESSFUL\n");
    }

    #[test]
    fn test_raw_output_lossy_text() {
        let output = RawOutput::new(vec![0xff, b'o', b'k'], Vec::new());
        assert!(output.text().ends_with("ok"));
    }

    #[test]
    fn test_dry_run_launches_nothing() {
        let runner = ProcessRunner::new(true);
        // The program does not exist; a launch attempt would fail.
        let execution = runner
            .run(&command("/nonexistent/esbmc", &["--version"]))
            .unwrap();
        assert_eq!(execution, Execution::DryRun);
    }

    #[test]
    fn test_missing_executable_is_process_error() {
        let runner = ProcessRunner::new(false);
        let err = runner
            .run(&command("/nonexistent/esbmc", &["bench.c"]))
            .unwrap_err();
        assert!(matches!(err, WrapperError::Process(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_combined_output_and_ignored_exit_status() {
        let runner = ProcessRunner::new(false);
        let execution = runner
            .run(&command(
                "/bin/sh",
                &["-c", "echo VERIFICATION FAILED; echo warning >&2; exit 3"],
            ))
            .unwrap();

        match execution {
            Execution::Completed(output) => {
                assert_eq!(output.text(), "VERIFICATION FAILED\nwarning\n");
            }
            Execution::DryRun => panic!("runner was not in dry-run mode"),
        }
    }

    #[test]
    fn test_version_strips_tool_prefix() {
        let runner = CannedRunner {
            output: "ESBMC 7.6.1\n",
            calls: RefCell::new(Vec::new()),
        };
        let version = verifier_version(&runner, Path::new("./esbmc")).unwrap();
        assert_eq!(version.as_deref(), Some("7.6.1"));
        assert_eq!(runner.calls.borrow().as_slice(), ["./esbmc --version"]);
    }

    #[test]
    fn test_version_in_dry_run() {
        let runner = ProcessRunner::new(true);
        assert_eq!(
            verifier_version(&runner, Path::new("/nonexistent/esbmc")).unwrap(),
            None
        );
    }
}
