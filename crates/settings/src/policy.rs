use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What the dispatcher does with a traversal error other than a vanished
/// path.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TraversalPolicy {
    /// Stop dispatching, drain in-flight work and fail the run.
    #[default]
    Abort,
    /// Skip the offending entry (and its subtree), record it and continue.
    Skip,
}

impl TraversalPolicy {
    /// Configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for TraversalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalPolicy {
    type Err = ParseTraversalPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(ParseTraversalPolicyError(other.to_owned())),
        }
    }
}

/// Error returned for an unknown traversal policy name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown traversal error policy '{0}' (expected 'abort' or 'skip')")]
pub struct ParseTraversalPolicyError(String);
