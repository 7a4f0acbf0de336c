#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` mirrors a source tree into a destination tree. Each qualifying
//! file is read in chunks, every chunk optionally LZMA-compressed and then
//! passed through an encryption hook, and the result is staged in a temporary
//! file that is renamed into place once complete.
//!
//! # Design
//!
//! - The calling thread walks the source tree and applies the
//!   [`filters::PathFilter`]. Qualifying files are registered with the
//!   [`CompletionTracker`] and sent over a bounded channel whose capacity
//!   equals the worker count, so traversal blocks while every worker is busy.
//! - A fixed pool of named worker threads drains the channel. A worker
//!   resolves a [`FileTask`], streams it through the enabled
//!   [`ChunkTransformer`]s into a staging file and commits it.
//! - Every job carries a guard that settles its tracker registration when the
//!   job is dropped, whatever path the worker took.
//! - Results reach the caller as [`FileRecord`]s through an optional
//!   [`FileObserver`] and as an aggregated [`RunSummary`].
//!
//! # Invariants
//!
//! - Empty files and excluded paths are never dispatched.
//! - No more than `concurrency` files are transformed at the same time.
//! - Chunks of one file are written strictly in order; the last chunk holds
//!   exactly the bytes read.
//! - A destination that already exists is never overwritten.
//! - A staging file never outlives its task: it is renamed into place or
//!   removed.
//!
//! # Errors
//!
//! Per-file failures never abort the run; they are reported as
//! [`FileOutcome::Failed`]. [`PipelineError`] covers failures of the run as a
//! whole, such as traversal errors under [`settings::TraversalPolicy::Abort`].
//!
//! # Examples
//!
//! ```
//! use settings::SettingsBuilder;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("src");
//! std::fs::create_dir(&source)?;
//! std::fs::write(source.join("notes.txt"), b"mirror me")?;
//!
//! let settings = SettingsBuilder::new(&source, temp.path().join("dst"))
//!     .compress(false)
//!     .concurrency(2)
//!     .build()?;
//! let summary = engine::copy(settings)?;
//!
//! assert_eq!(summary.processed, 1);
//! assert_eq!(std::fs::read(temp.path().join("dst/notes.txt"))?, b"mirror me");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod pipeline;
mod report;
mod staging;
mod stream;
mod task;
mod tracker;
mod transform;
mod worker;

pub use error::{PipelineError, TaskError, TransformError};
pub use pipeline::{Pipeline, copy};
pub use report::{FileObserver, FileOutcome, FileRecord, RunSummary, TraversalIssue};
pub use staging::TEMP_PREFIX;
pub use task::{FileTask, destination_path};
pub use tracker::{CompletionTracker, PendingGuard};
pub use transform::{ChunkTransformer, LzmaChunkCompressor, PassthroughCipher};
