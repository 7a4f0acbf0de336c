use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Verbosity accepted by `--log`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LogLevel {
    /// Only unrecoverable failures.
    Critical,
    /// Errors.
    Error,
    /// Warnings and errors.
    Warning,
    /// Notable events; rendered at info level.
    Notice,
    /// Per-file progress.
    #[default]
    Info,
    /// Filter and traversal decisions.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// All levels, least verbose first.
    pub const ALL: [Self; 7] = [
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// The most verbose tracing level emitted at this setting.
    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Critical | Self::Error => Level::ERROR,
            Self::Warning => Level::WARN,
            Self::Notice | Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        Self::from_level(level.as_tracing_level())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "notice" => Ok(Self::Notice),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ParseLogLevelError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Error returned when a log level name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLogLevelError {
    input: String,
}

impl ParseLogLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseLogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown log level '{}' (expected one of critical, error, warning, notice, info, debug, trace)",
            self.input
        )
    }
}

impl std::error::Error for ParseLogLevelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_display() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
    }

    #[test]
    fn parsing_is_case_insensitive_and_accepts_warn() {
        assert_eq!("DEBUG".parse(), Ok(LogLevel::Debug));
        assert_eq!(" Warn ".parse(), Ok(LogLevel::Warning));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "loud".parse::<LogLevel>().expect_err("rejected");
        assert_eq!(err.input(), "loud");
        assert!(err.to_string().contains("unknown log level 'loud'"));
    }

    #[test]
    fn critical_and_error_both_map_to_error() {
        assert_eq!(LogLevel::Critical.as_tracing_level(), Level::ERROR);
        assert_eq!(LogLevel::Error.as_tracing_level(), Level::ERROR);
        assert_eq!(LevelFilter::from(LogLevel::Notice), LevelFilter::INFO);
    }

    #[test]
    fn levels_are_ordered_by_verbosity() {
        assert!(LogLevel::Critical < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Trace);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
