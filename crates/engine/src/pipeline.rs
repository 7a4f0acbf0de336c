use std::mem;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Sender, bounded};
use logging::{trace_stats, trace_walk};
use settings::{Settings, TraversalPolicy};
use tracing::warn;
use walk::{WalkEntry, Walker};

use crate::report::{RunSummary, TraversalIssue};
use crate::tracker::CompletionTracker;
use crate::worker::{Job, WorkerContext, WorkerPool};
use crate::{ChunkTransformer, FileObserver, LzmaChunkCompressor, PassthroughCipher, PipelineError};

/// One mirroring run.
///
/// The pipeline owns everything a run shares between threads: the settings,
/// the encryption hook, the observer and the cancellation flag. The job
/// channel, worker threads and [`CompletionTracker`] live only for the
/// duration of [`run`](Self::run).
///
/// ```
/// use engine::{FileOutcome, FileRecord, Pipeline};
/// use settings::SettingsBuilder;
/// use std::sync::{Arc, Mutex};
///
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let source = temp.path().join("src");
/// std::fs::create_dir(&source)?;
/// std::fs::write(source.join("a.txt"), b"0123456789")?;
///
/// let settings = SettingsBuilder::new(&source, temp.path().join("dst"))
///     .dry_run(true)
///     .build()?;
/// let outcomes = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&outcomes);
/// let summary = Pipeline::new(settings)
///     .with_observer(move |record: &FileRecord| {
///         sink.lock().unwrap().push(record.outcome.clone());
///     })
///     .run()?;
///
/// assert_eq!(summary.dry_run, 1);
/// assert_eq!(*outcomes.lock().unwrap(), vec![FileOutcome::DryRun]);
/// assert!(!temp.path().join("dst").exists());
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub struct Pipeline {
    settings: Settings,
    cipher: Arc<dyn ChunkTransformer>,
    observer: Option<Arc<dyn FileObserver>>,
    cancel: Arc<AtomicBool>,
}

impl Pipeline {
    /// Pipeline using the LZMA compressor and the pass-through cipher.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let cipher = Arc::new(PassthroughCipher::new(settings.key().cloned()));
        Self {
            settings,
            cipher,
            observer: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces the encryption hook.
    #[must_use]
    pub fn with_cipher<C>(mut self, cipher: C) -> Self
    where
        C: ChunkTransformer + 'static,
    {
        self.cipher = Arc::new(cipher);
        self
    }

    /// Installs an observer receiving every [`FileRecord`](crate::FileRecord).
    #[must_use]
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: FileObserver + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Shares `flag` as the cancellation token. Setting it stops traversal and
    /// makes workers abandon their tasks.
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    /// The cancellation token of this run.
    #[must_use]
    pub fn cancellation(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Settings of this run.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Walks the source tree and mirrors every qualifying file, blocking
    /// until all dispatched work has finished.
    pub fn run(self) -> Result<RunSummary, PipelineError> {
        if self.settings.encrypt() && self.cipher.is_identity() {
            warn!("encryption is enabled but no cipher is configured; output is NOT encrypted");
        }

        let concurrency = self.settings.concurrency().get();
        let context = Arc::new(WorkerContext {
            settings: self.settings,
            compressor: LzmaChunkCompressor,
            cipher: self.cipher,
            observer: self.observer,
            summary: Mutex::new(RunSummary::default()),
            cancel: self.cancel,
        });
        let tracker = Arc::new(CompletionTracker::new());
        let (sender, receiver) = bounded::<Job>(concurrency);

        let pool = WorkerPool::spawn(concurrency, &receiver, &context)?;
        drop(receiver);

        let dispatched = Dispatcher {
            context: &context,
            tracker: &tracker,
            sender: &sender,
        }
        .run();
        drop(sender);

        tracker.wait();
        settle(dispatched, pool.join())?;

        let summary = mem::take(&mut *context.summary());
        trace_stats!(
            "{} transferred, {} skipped, {} dry run, {} failed, {} cancelled, {} bytes in, {} bytes out",
            summary.processed,
            summary.skipped,
            summary.dry_run,
            summary.failed,
            summary.cancelled,
            summary.bytes_in,
            summary.bytes_out
        );
        if summary.has_failures() {
            warn!("{} file(s) failed to copy", summary.failed);
        }
        Ok(summary)
    }
}

/// Combines the traversal and worker outcomes; a traversal failure wins.
fn settle(
    dispatched: Result<(), PipelineError>,
    joined: Result<(), PipelineError>,
) -> Result<(), PipelineError> {
    dispatched?;
    joined
}

/// Mirrors the tree described by `settings` with the default hooks.
///
/// ```
/// use settings::SettingsBuilder;
///
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let source = temp.path().join("src");
/// std::fs::create_dir(&source)?;
/// std::fs::write(source.join("empty"), b"")?;
///
/// let settings = SettingsBuilder::new(&source, temp.path().join("dst")).build()?;
/// let summary = engine::copy(settings)?;
/// assert_eq!(summary.dispatched(), 0);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub fn copy(settings: Settings) -> Result<RunSummary, PipelineError> {
    Pipeline::new(settings).run()
}

/// Walks the source tree on the calling thread and feeds the workers.
struct Dispatcher<'a> {
    context: &'a WorkerContext,
    tracker: &'a Arc<CompletionTracker>,
    sender: &'a Sender<Job>,
}

impl Dispatcher<'_> {
    fn run(&self) -> Result<(), PipelineError> {
        let settings = &self.context.settings;
        let filter = settings.path_filter();
        let mut walker = Walker::new(settings.source())?;

        while let Some(next) = walker.next() {
            if self.context.cancelled() {
                trace_walk!("cancellation requested; traversal stopped");
                break;
            }

            let entry = match next {
                Ok(entry) => entry,
                Err(error) if error.is_vanished() => {
                    trace_walk!("{} vanished during traversal", error.path().display());
                    continue;
                }
                Err(error) => {
                    self.tolerate(error.into())?;
                    continue;
                }
            };

            let path = entry.full_path();
            let relative = entry.relative_path();

            if entry.is_dir() {
                if filter.should_skip(path, relative).is_skip() {
                    walker.skip_current_dir();
                }
                continue;
            }

            let Some(len) = self.file_len(&entry)? else {
                continue;
            };
            if filter.should_skip_file(path, relative, len).is_skip() {
                continue;
            }

            let job = Job {
                source: path.to_path_buf(),
                len,
                pending: self.tracker.register(),
            };
            if self.sender.send(job).is_err() {
                break;
            }
        }
        Ok(())
    }

    /// Size of the regular file behind `entry`, following symbolic links.
    /// `None` for anything else.
    fn file_len(&self, entry: &WalkEntry) -> Result<Option<u64>, PipelineError> {
        match entry.file_len() {
            Ok(Some(len)) => Ok(Some(len)),
            Ok(None) => {
                trace_walk!("{} is not a regular file; ignored", entry.full_path().display());
                Ok(None)
            }
            Err(source) => {
                self.tolerate(PipelineError::ResolveLink {
                    path: entry.full_path().to_path_buf(),
                    source,
                })?;
                Ok(None)
            }
        }
    }

    /// Applies the traversal policy to `error`.
    fn tolerate(&self, error: PipelineError) -> Result<(), PipelineError> {
        match self.context.settings.traversal_policy() {
            TraversalPolicy::Abort => Err(error),
            TraversalPolicy::Skip => {
                warn!("{error}; skipping");
                let path = error.path().unwrap_or_else(|| Path::new("")).to_path_buf();
                self.context.summary().traversal_errors.push(TraversalIssue {
                    path,
                    message: error.to_string(),
                });
                Ok(())
            }
        }
    }
}
