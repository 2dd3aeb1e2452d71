/// Verdict classification from verifier output
///
/// Classification is an ordered list of rules over the verifier's free-text
/// output. Several markers may appear in one output; the first rule that
/// matches wins, regardless of where the marker sits in the text.
use crate::config::types::{PropertyCategory, ResultCode, Verdict};

/// Revision of the verifier output markers the rules below expect.
/// Bump it whenever a marker string changes.
pub const OUTPUT_FORMAT_VERSION: u32 = 1;

pub const TIMED_OUT_MARKER: &str = "Timed out";
pub const OUT_OF_MEMORY_MARKER: &str = "Out of memory";
pub const NO_FLOAT_SUPPORT_MARKER: &str = "Chosen solver doesn't support floating-point numbers";
pub const FAILED_MARKER: &str = "VERIFICATION FAILED";
pub const UNWINDING_ASSERTION_MARKER: &str = "unwinding assertion loop";
pub const SUCCESSFUL_MARKER: &str = "VERIFICATION SUCCESSFUL";

/// One classification rule
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub code: ResultCode,
}

/// Verdict classifier - pure function over verifier output
pub struct VerdictClassifier;

impl VerdictClassifier {
    /// Rules in evaluation order for `category`
    pub fn rules(category: PropertyCategory) -> [Rule; 6] {
        [
            Rule {
                name: "timeout",
                matches: |text| text.contains(TIMED_OUT_MARKER),
                code: ResultCode::TimedOut,
            },
            Rule {
                name: "memout",
                matches: |text| text.contains(OUT_OF_MEMORY_MARKER),
                code: ResultCode::MemOut,
            },
            Rule {
                name: "no-float-support",
                matches: |text| text.contains(NO_FLOAT_SUPPORT_MARKER),
                code: ResultCode::ForceFloatMode,
            },
            Rule {
                name: "unwinding-assertion",
                matches: |text| {
                    text.contains(FAILED_MARKER) && text.contains(UNWINDING_ASSERTION_MARKER)
                },
                code: ResultCode::UnwindingAssertion,
            },
            Rule {
                name: "failed",
                matches: |text| text.contains(FAILED_MARKER),
                code: Self::failure_code(category),
            },
            Rule {
                name: "successful",
                matches: |text| text.contains(SUCCESSFUL_MARKER),
                code: ResultCode::Success,
            },
        ]
    }

    /// Classify verifier output. Output without any known marker is
    /// `Unknown`, not an error.
    pub fn classify(text: &str, category: PropertyCategory) -> ResultCode {
        let code = Self::rules(category)
            .iter()
            .find(|rule| (rule.matches)(text))
            .map(|rule| {
                log::debug!("Output matched rule '{}'", rule.name);
                rule.code
            })
            .unwrap_or(ResultCode::Unknown);

        if code == ResultCode::UnwindingAssertion {
            log::warn!(
                "Verification failed on an unwinding assertion; reporting {}",
                Verdict::from(code)
            );
        }

        code
    }

    /// Classify and project to the competition verdict
    pub fn verdict(text: &str, category: PropertyCategory) -> Verdict {
        Verdict::from(Self::classify(text, category))
    }

    /// A property violation is reported as a reach failure for both categories.
    fn failure_code(category: PropertyCategory) -> ResultCode {
        match category {
            PropertyCategory::Coverage => ResultCode::FailReach,
            PropertyCategory::Reachability => ResultCode::FailReach,
        }
    }
}
