use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use logging::{trace_copy, trace_skip};
use settings::Settings;
use tracing::{debug, error};

use crate::report::{FileObserver, FileOutcome, FileRecord, RunSummary};
use crate::staging::StagedFile;
use crate::stream::{StreamError, StreamTotals, Stages, stream_chunks};
use crate::tracker::PendingGuard;
use crate::{ChunkTransformer, FileTask, LzmaChunkCompressor, PipelineError, TaskError};

/// A qualifying file on its way to a worker.
pub(crate) struct Job {
    pub(crate) source: PathBuf,
    pub(crate) len: u64,
    pub(crate) pending: PendingGuard,
}

/// State shared by every worker of a run.
pub(crate) struct WorkerContext {
    pub(crate) settings: Settings,
    pub(crate) compressor: LzmaChunkCompressor,
    pub(crate) cipher: Arc<dyn ChunkTransformer>,
    pub(crate) observer: Option<Arc<dyn FileObserver>>,
    pub(crate) summary: Mutex<RunSummary>,
    pub(crate) cancel: Arc<AtomicBool>,
}

impl WorkerContext {
    pub(crate) fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub(crate) fn summary(&self) -> std::sync::MutexGuard<'_, RunSummary> {
        self.summary.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, record: &FileRecord) {
        self.summary().record(record);
        if let Some(observer) = &self.observer {
            observer.on_file(record);
        }
    }
}

/// Fixed set of worker threads draining the job channel.
pub(crate) struct WorkerPool {
    workers: Vec<(String, JoinHandle<()>)>,
}

impl WorkerPool {
    /// Starts `count` workers. They exit once the channel is closed and
    /// drained.
    pub(crate) fn spawn(
        count: usize,
        receiver: &Receiver<Job>,
        context: &Arc<WorkerContext>,
    ) -> Result<Self, PipelineError> {
        let mut workers = Vec::with_capacity(count);
        for index in 0..count {
            let name = format!("gcp-worker-{index}");
            let receiver = receiver.clone();
            let context = Arc::clone(context);
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker_loop(&receiver, &context))
                .map_err(|source| PipelineError::SpawnWorker { index, source })?;
            workers.push((name, handle));
        }
        debug!("started {count} workers");
        Ok(Self { workers })
    }

    /// Waits for every worker to exit.
    pub(crate) fn join(self) -> Result<(), PipelineError> {
        let mut outcome = Ok(());
        for (name, handle) in self.workers {
            if handle.join().is_err() && outcome.is_ok() {
                outcome = Err(PipelineError::WorkerPanicked { name });
            }
        }
        outcome
    }
}

fn worker_loop(receiver: &Receiver<Job>, context: &WorkerContext) {
    let mut buffer = Vec::new();
    for job in receiver {
        let record = process(context, &job, &mut buffer);
        context.report(&record);
        drop(job.pending);
    }
}

fn process(context: &WorkerContext, job: &Job, buffer: &mut Vec<u8>) -> FileRecord {
    let task = match FileTask::resolve(&context.settings, &job.source, job.len) {
        Ok(task) => task,
        Err(task_error) => {
            error!("{task_error}");
            return FileRecord::new(
                job.source.clone(),
                PathBuf::new(),
                FileOutcome::Failed(task_error.to_string()),
            );
        }
    };
    let record = |outcome| {
        FileRecord::new(
            task.source().to_path_buf(),
            task.destination().to_path_buf(),
            outcome,
        )
    };

    if context.cancelled() {
        return record(FileOutcome::Cancelled);
    }

    match fs::symlink_metadata(task.destination()) {
        Ok(_) => {
            trace_skip!("{} already exists, skipping", task.destination().display());
            return record(FileOutcome::SkippedExisting);
        }
        Err(inspect_error) if inspect_error.kind() == io::ErrorKind::NotFound => {}
        Err(inspect_error) => {
            let task_error = TaskError::io("inspect", task.destination(), inspect_error);
            error!("{task_error}");
            return record(FileOutcome::Failed(task_error.to_string()));
        }
    }

    if context.settings.dry_run() {
        trace_skip!(
            "dry run: would copy {} to {} (compress: {}, encrypt: {})",
            task.source().display(),
            task.destination().display(),
            task.operations().compress,
            task.operations().encrypt
        );
        return record(FileOutcome::DryRun);
    }

    match transfer(context, &task, buffer) {
        Ok(totals) => {
            trace_copy!(
                "{} -> {} ({} bytes in, {} bytes out, {} chunks)",
                task.source().display(),
                task.destination().display(),
                totals.bytes_in,
                totals.bytes_out,
                totals.chunks
            );
            FileRecord {
                bytes_in: totals.bytes_in,
                bytes_out: totals.bytes_out,
                ..record(FileOutcome::Transferred)
            }
        }
        Err(TaskError::Cancelled) => {
            debug!("abandoned {} after cancellation", task.source().display());
            record(FileOutcome::Cancelled)
        }
        Err(task_error) => {
            error!("{task_error}");
            record(FileOutcome::Failed(task_error.to_string()))
        }
    }
}

/// Streams the task into a staging file and commits it.
fn transfer(
    context: &WorkerContext,
    task: &FileTask,
    buffer: &mut Vec<u8>,
) -> Result<StreamTotals, TaskError> {
    let mut source =
        File::open(task.source()).map_err(|error| TaskError::io("open", task.source(), error))?;
    let mut staged = StagedFile::create(context.settings.temp_dir())?;

    let chunk_size = task.chunk_size();
    if buffer.len() < chunk_size {
        buffer.resize(chunk_size, 0);
    }

    let operations = task.operations();
    let stages = Stages {
        compressor: operations
            .compress
            .then_some(&context.compressor as &dyn ChunkTransformer),
        cipher: operations.encrypt.then_some(context.cipher.as_ref()),
    };

    let totals = stream_chunks(
        &mut source,
        staged.file_mut(),
        &mut buffer[..chunk_size],
        stages,
        &context.cancel,
    )
    .map_err(|stream_error| match stream_error {
        StreamError::Read(error) => TaskError::io("read", task.source(), error),
        StreamError::Write(error) => TaskError::io("write", staged.path(), error),
        StreamError::Transform(source) => TaskError::Transform {
            path: task.source().to_path_buf(),
            source,
        },
        StreamError::Cancelled => TaskError::Cancelled,
    })?;
    drop(source);

    staged.commit(task.destination())?;
    Ok(totals)
}
