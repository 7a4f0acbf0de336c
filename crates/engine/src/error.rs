use std::io;
use std::path::PathBuf;

use walk::WalkError;

/// Failure of a [`ChunkTransformer`](crate::ChunkTransformer).
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The LZMA encoder rejected the chunk.
    #[error("lzma compression failed: {0}")]
    Compress(#[source] io::Error),
    /// A custom transformer refused the chunk.
    #[error("{stage} failed: {reason}")]
    Rejected {
        /// Name of the failing stage.
        stage: &'static str,
        /// Human readable cause.
        reason: String,
    },
}

/// Failure of a single file task. Never aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A filesystem operation failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        /// What was attempted, phrased as a verb.
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A chunk transformer failed.
    #[error("failed to transform '{}': {source}", path.display())]
    Transform {
        /// Source file being transformed.
        path: PathBuf,
        /// Transformer error.
        #[source]
        source: TransformError,
    },
    /// A dispatched path does not lie below the source root.
    #[error("'{}' is not inside the source root '{}'", path.display(), root.display())]
    OutsideRoot {
        /// Offending path.
        path: PathBuf,
        /// Source root.
        root: PathBuf,
    },
    /// The run was cancelled while the task was in flight.
    #[error("cancelled")]
    Cancelled,
}

impl TaskError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Failure of the run as a whole.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Traversal failed under the abort policy.
    #[error("traversal aborted: {0}")]
    Walk(#[from] WalkError),
    /// A symbolic link in the source tree could not be resolved.
    #[error("traversal aborted: failed to resolve symbolic link '{}': {source}", path.display())]
    ResolveLink {
        /// Path of the link.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A worker thread could not be started.
    #[error("failed to spawn worker {index}: {source}")]
    SpawnWorker {
        /// Index of the worker.
        index: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A worker thread panicked.
    #[error("worker thread '{name}' panicked")]
    WorkerPanicked {
        /// Thread name.
        name: String,
    },
}

impl PipelineError {
    /// Path associated with a traversal failure.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Walk(error) => Some(error.path()),
            Self::ResolveLink { path, .. } => Some(path),
            Self::SpawnWorker { .. } | Self::WorkerPanicked { .. } => None,
        }
    }
}
