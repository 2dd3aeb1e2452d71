/// Core types and structures for the wrapper
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Competition property class a run is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    /// Branch/condition/statement coverage; produces test cases
    Coverage,
    /// Reachability of the error call
    Reachability,
}

impl PropertyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coverage => "coverage",
            Self::Reachability => "reachability",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification strategy requested by the caller.
///
/// `FixedKInduction` and `KInduction` currently select the same flags. Both
/// names are accepted because competition scripts pass either one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    FixedKInduction,
    KInduction,
    Falsification,
    Incremental,
}

impl Strategy {
    /// Names accepted on the command line, in the order they are documented.
    pub const NAMES: [&'static str; 4] = ["kinduction", "falsi", "incr", "fixed"];

    pub fn name(self) -> &'static str {
        match self {
            Self::FixedKInduction => "fixed",
            Self::KInduction => "kinduction",
            Self::Falsification => "falsi",
            Self::Incremental => "incr",
        }
    }
}

impl FromStr for Strategy {
    type Err = WrapperError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fixed" => Ok(Self::FixedKInduction),
            "kinduction" => Ok(Self::KInduction),
            "falsi" => Ok(Self::Falsification),
            "incr" => Ok(Self::Incremental),
            _ => Err(WrapperError::Config(format!("Unknown strategy: {}", s))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target word size passed to the verifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Architecture {
    #[default]
    Bits32,
    Bits64,
}

impl Architecture {
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Verifier flag selecting this architecture
    pub fn flag(self) -> &'static str {
        match self {
            Self::Bits32 => "--32",
            Self::Bits64 => "--64",
        }
    }
}

impl TryFrom<u32> for Architecture {
    type Error = WrapperError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(Self::Bits32),
            64 => Ok(Self::Bits64),
            other => Err(WrapperError::Config(format!(
                "Unsupported architecture: {} (expected 32 or 64)",
                other
            ))),
        }
    }
}

impl FromStr for Architecture {
    type Err = WrapperError;

    fn from_str(s: &str) -> Result<Self> {
        let bits: u32 = s
            .trim()
            .parse()
            .map_err(|_| WrapperError::Config(format!("Invalid architecture: {}", s)))?;
        Self::try_from(bits)
    }
}

/// Internal outcome of one verifier run, derived from its textual output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    FailReach,
    TimedOut,
    MemOut,
    /// Solver lacks floating-point support; the run has to be repeated in
    /// another solver mode, which this wrapper does not do.
    ForceFloatMode,
    MemCleanupFail,
    /// Failure caused by an exhausted loop unwinding rather than a property
    /// violation.
    UnwindingAssertion,
    Unknown,
}

impl ResultCode {
    pub const ALL: [ResultCode; 8] = [
        Self::Success,
        Self::FailReach,
        Self::TimedOut,
        Self::MemOut,
        Self::ForceFloatMode,
        Self::MemCleanupFail,
        Self::UnwindingAssertion,
        Self::Unknown,
    ];

    pub fn is_fail(self) -> bool {
        matches!(self, Self::FailReach)
    }

    /// Resource exhaustion or no answer at all
    pub fn is_out(self) -> bool {
        matches!(self, Self::MemOut | Self::TimedOut | Self::Unknown)
    }
}

/// User-facing verdict vocabulary of the competition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    True,
    FalseReach,
    TimedOut,
    Unknown,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::FalseReach => "FALSE_REACH",
            Self::TimedOut => "Timed out",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ResultCode> for Verdict {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Success => Verdict::True,
            ResultCode::FailReach => Verdict::FalseReach,
            ResultCode::TimedOut => Verdict::TimedOut,
            // Memory exhaustion has no verdict of its own in the competition.
            ResultCode::MemOut => Verdict::Unknown,
            ResultCode::ForceFloatMode
            | ResultCode::MemCleanupFail
            | ResultCode::UnwindingAssertion
            | ResultCode::Unknown => Verdict::Unknown,
        }
    }
}

/// Wrapper error types
#[derive(Error, Debug)]
pub enum WrapperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Required command-line input absent; the message is shown verbatim
    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("Unsupported Property")]
    UnsupportedProperty,

    #[error("Cannot read property file {path}: {source}")]
    PropertyUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read benchmark {path}: {source}")]
    BenchmarkUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Process error: {0}")]
    Process(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, WrapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_round_trip() {
        for name in Strategy::NAMES {
            let strategy: Strategy = name.parse().unwrap();
            assert_eq!(strategy.name(), name);
        }
    }

    #[test]
    fn test_unknown_strategy_is_config_error() {
        let err = "bmc".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, WrapperError::Config(_)));
        assert!(err.to_string().contains("Unknown strategy"));
    }

    #[test]
    fn test_architecture_parsing() {
        assert_eq!("32".parse::<Architecture>().unwrap(), Architecture::Bits32);
        assert_eq!("64".parse::<Architecture>().unwrap(), Architecture::Bits64);
        assert!("16".parse::<Architecture>().is_err());
        assert!("x86".parse::<Architecture>().is_err());
        assert_eq!(Architecture::default().flag(), "--32");
    }

    #[test]
    fn test_verdict_projection_is_total() {
        for code in ResultCode::ALL {
            let verdict = Verdict::from(code);
            assert!(["TRUE", "FALSE_REACH", "Timed out", "Unknown"].contains(&verdict.as_str()));
        }
        assert_eq!(Verdict::from(ResultCode::Success).as_str(), "TRUE");
        assert_eq!(Verdict::from(ResultCode::FailReach).as_str(), "FALSE_REACH");
        assert_eq!(Verdict::from(ResultCode::TimedOut).as_str(), "Timed out");
        assert_eq!(Verdict::from(ResultCode::MemOut).as_str(), "Unknown");
        assert_eq!(Verdict::from(ResultCode::UnwindingAssertion).as_str(), "Unknown");
    }

    #[test]
    fn test_result_code_helpers() {
        assert!(ResultCode::FailReach.is_fail());
        assert!(!ResultCode::UnwindingAssertion.is_fail());
        assert!(ResultCode::MemOut.is_out());
        assert!(ResultCode::TimedOut.is_out());
        assert!(ResultCode::Unknown.is_out());
        assert!(!ResultCode::Success.is_out());
    }
}
