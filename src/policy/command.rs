use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Verifier invocation: executable plus ordered arguments.
///
/// Built once by the policy selector. There are no mutators; flag order is
/// significant because later verifier flags may override earlier ones.
/// Arguments stay `OsString` so paths reach the verifier byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandLine {
    pub(crate) fn new(program: PathBuf, args: Vec<OsString>) -> Self {
        Self { program, args }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// True if `flags` appear as one contiguous run of arguments
    pub fn contains_sequence(&self, flags: &[&str]) -> bool {
        if flags.is_empty() {
            return true;
        }
        self.args
            .windows(flags.len())
            .any(|window| {
                window
                    .iter()
                    .zip(flags)
                    .all(|(arg, flag)| arg.as_os_str() == OsStr::new(flag))
            })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
