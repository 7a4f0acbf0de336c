use std::io;
use std::path::{Path, PathBuf};

/// A traversal step that failed.
///
/// Every variant names the path involved and carries the operating system
/// error, so the caller can apply its own policy per failure.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The root could not be opened, or is not a directory.
    #[error("cannot open traversal root '{}': {source}", path.display())]
    Root {
        /// Root as given to [`Walker::new`](crate::Walker::new).
        path: PathBuf,
        /// Operating system error.
        #[source]
        source: io::Error,
    },
    /// A directory could not be listed.
    #[error("cannot list directory '{}': {source}", path.display())]
    ListDirectory {
        /// The directory.
        path: PathBuf,
        /// Operating system error.
        #[source]
        source: io::Error,
    },
    /// A listed entry could not be inspected.
    #[error("cannot inspect '{}': {source}", path.display())]
    Inspect {
        /// The entry.
        path: PathBuf,
        /// Operating system error.
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// Path the failure refers to.
    ///
    /// ```
    /// let error = walk::Walker::new("./no-such-root").err().expect("missing root");
    /// assert!(error.path().ends_with("no-such-root"));
    /// assert!(error.is_vanished());
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Root { path, .. } | Self::ListDirectory { path, .. } | Self::Inspect { path, .. } => {
                path
            }
        }
    }

    /// Operating system error behind the failure.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Root { source, .. }
            | Self::ListDirectory { source, .. }
            | Self::Inspect { source, .. } => source,
        }
    }

    /// `true` when the path disappeared between being listed and being
    /// inspected.
    #[must_use]
    pub fn is_vanished(&self) -> bool {
        self.io_error().kind() == io::ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_operation_and_path() {
        let error = WalkError::ListDirectory {
            path: PathBuf::from("/data/locked"),
            source: io::Error::other("denied"),
        };
        assert_eq!(error.to_string(), "cannot list directory '/data/locked': denied");
        assert_eq!(error.path(), Path::new("/data/locked"));
        assert!(error.source().is_some());
    }

    #[test]
    fn only_not_found_counts_as_vanished() {
        let gone = WalkError::Inspect {
            path: PathBuf::from("gone"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let denied = WalkError::Inspect {
            path: PathBuf::from("denied"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(gone.is_vanished());
        assert!(!denied.is_vanished());
    }
}
