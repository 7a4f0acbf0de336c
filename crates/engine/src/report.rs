use std::fmt;
use std::path::PathBuf;

/// How a dispatched file ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileOutcome {
    /// Output was written and renamed into place.
    Transferred,
    /// The destination already existed; nothing was written.
    SkippedExisting,
    /// Dry run: the file would have been transferred.
    DryRun,
    /// The task failed; the message describes why.
    Failed(String),
    /// The run was cancelled before the task completed.
    Cancelled,
}

/// Result of one dispatched file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileRecord {
    /// Absolute source path.
    pub source: PathBuf,
    /// Output path, suffixes included.
    pub destination: PathBuf,
    /// How the task ended.
    pub outcome: FileOutcome,
    /// Source bytes read.
    pub bytes_in: u64,
    /// Bytes written to the output.
    pub bytes_out: u64,
}

impl FileRecord {
    pub(crate) fn new(source: PathBuf, destination: PathBuf, outcome: FileOutcome) -> Self {
        Self {
            source,
            destination,
            outcome,
            bytes_in: 0,
            bytes_out: 0,
        }
    }
}

/// Receives every [`FileRecord`] as soon as its task finishes.
///
/// Called concurrently from worker threads. Closures taking `&FileRecord`
/// implement the trait.
pub trait FileObserver: Send + Sync {
    /// Handles one finished task.
    fn on_file(&self, record: &FileRecord);
}

impl<F> FileObserver for F
where
    F: Fn(&FileRecord) + Send + Sync,
{
    fn on_file(&self, record: &FileRecord) {
        self(record);
    }
}

/// A traversal error skipped under the skip policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TraversalIssue {
    /// Path the traversal failed on.
    pub path: PathBuf,
    /// Rendered error.
    pub message: String,
}

/// Aggregate counters of one run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Files transferred.
    pub processed: usize,
    /// Files whose destination already existed.
    pub skipped: usize,
    /// Files a dry run would have transferred.
    pub dry_run: usize,
    /// Files that failed.
    pub failed: usize,
    /// Files abandoned because of cancellation.
    pub cancelled: usize,
    /// Source bytes read by transferred files.
    pub bytes_in: u64,
    /// Bytes written by transferred files.
    pub bytes_out: u64,
    /// Traversal errors that were skipped.
    pub traversal_errors: Vec<TraversalIssue>,
}

impl RunSummary {
    /// Folds one record into the counters.
    pub fn record(&mut self, record: &FileRecord) {
        match record.outcome {
            FileOutcome::Transferred => {
                self.processed += 1;
                self.bytes_in += record.bytes_in;
                self.bytes_out += record.bytes_out;
            }
            FileOutcome::SkippedExisting => self.skipped += 1,
            FileOutcome::DryRun => self.dry_run += 1,
            FileOutcome::Failed(_) => self.failed += 1,
            FileOutcome::Cancelled => self.cancelled += 1,
        }
    }

    /// Number of files that reached a worker.
    #[must_use]
    pub const fn dispatched(&self) -> usize {
        self.processed + self.skipped + self.dry_run + self.failed + self.cancelled
    }

    /// Returns `true` when at least one file failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files transferred: {}", self.processed)?;
        writeln!(f, "Files skipped (already exist): {}", self.skipped)?;
        if self.dry_run > 0 {
            writeln!(f, "Files pending (dry run): {}", self.dry_run)?;
        }
        writeln!(f, "Files failed: {}", self.failed)?;
        if self.cancelled > 0 {
            writeln!(f, "Files cancelled: {}", self.cancelled)?;
        }
        if !self.traversal_errors.is_empty() {
            writeln!(f, "Traversal errors skipped: {}", self.traversal_errors.len())?;
        }
        write!(
            f,
            "Bytes read: {}, bytes written: {}",
            self.bytes_in, self.bytes_out
        )
    }
}
