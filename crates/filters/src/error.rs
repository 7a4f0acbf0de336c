/// Error produced when a pattern cannot be compiled into a matcher.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The glob syntax is malformed.
    #[error("failed to compile filter pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Parser error reported by `globset`.
        #[source]
        source: globset::Error,
    },
    /// The pattern uses a recursive `**` wildcard.
    #[error("failed to compile filter pattern '{pattern}': recursive '**' wildcards are not supported")]
    RecursiveWildcard {
        /// The offending pattern.
        pattern: String,
    },
}

impl FilterError {
    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidGlob { pattern, .. } | Self::RecursiveWildcard { pattern } => pattern,
        }
    }
}
