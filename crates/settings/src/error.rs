use std::io;
use std::path::PathBuf;

use filters::FilterError;

/// A configuration problem detected before the run starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration file named explicitly does not exist.
    #[error("configuration file '{}' does not exist", path.display())]
    MissingFile {
        /// Path that was requested.
        path: PathBuf,
    },
    /// A configuration file could not be read.
    #[error("failed to read configuration file '{}': {source}", path.display())]
    ReadFile {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A configuration file is not valid TOML or has unknown keys.
    #[error("failed to parse configuration file '{}': {source}", path.display())]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: Box<toml::de::Error>,
    },
    /// A pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] FilterError),
    /// Concurrency was set to zero.
    #[error("concurrency must be at least one")]
    InvalidConcurrency,
    /// The chunk cap was set to zero.
    #[error("maximum chunk size must be at least one byte")]
    InvalidChunkSize,
    /// The source root does not exist.
    #[error("source '{}' does not exist", path.display())]
    MissingSource {
        /// Absolute source path.
        path: PathBuf,
    },
    /// The source root exists but could not be inspected.
    #[error("failed to inspect source '{}': {source}", path.display())]
    InspectSource {
        /// Absolute source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The source root is not a directory.
    #[error("source '{}' is not a directory", path.display())]
    SourceNotDirectory {
        /// Absolute source path.
        path: PathBuf,
    },
    /// Source and destination are equal or one contains the other.
    #[error(
        "source '{}' and destination '{}' appear to be relative to one another",
        source_root.display(),
        destination_root.display()
    )]
    NestedRoots {
        /// Absolute source path.
        source_root: PathBuf,
        /// Absolute destination path.
        destination_root: PathBuf,
    },
    /// Encryption is enabled without a key.
    #[error("encryption is enabled but no encryption key was provided")]
    MissingKey,
    /// The key argument names a file that could not be read.
    #[error("failed to read encryption key from '{}': {source}", path.display())]
    KeyFile {
        /// Path of the key file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The current directory is needed to absolutise a path and is unavailable.
    #[error("failed to resolve '{}' against the current directory: {source}", path.display())]
    Absolutize {
        /// Path being resolved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
