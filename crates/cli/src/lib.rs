#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of gcp. It parses arguments with
//! [`clap`](https://docs.rs/clap/), layers them over the configuration files,
//! installs logging and runs the [`engine::Pipeline`].
//!
//! # Design
//!
//! [`run`] is the single entry point. It accepts an iterator of arguments and
//! handles for standard output and error, so tests drive it in-process while
//! the `gcp` binary forwards the real process handles. Diagnostics written by
//! `run` itself (usage errors, configuration errors, the run summary) go to
//! those handles; log events go through `tracing` to the process streams.
//!
//! # Invariants
//!
//! - `run` never panics; every failure maps to a documented exit code.
//! - Configuration is fully validated before the source tree is touched.
//! - On Unix, SIGINT only raises the cancellation flag while a run is in
//!   progress; a second SIGINT terminates the process.
//!
//! # Errors
//!
//! | Exit code | Meaning |
//! |---|---|
//! | [`EXIT_OK`] | Every dispatched file was transferred, skipped or dry-run. |
//! | [`EXIT_CONFIG`] | Usage or configuration error, or traversal aborted. |
//! | [`EXIT_PARTIAL`] | At least one file failed. |
//! | [`EXIT_CANCELLED`] | The run was interrupted. |
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["gcp", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, cli::EXIT_OK);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("gcp "));
//! ```

mod frontend;

pub use frontend::{EXIT_CANCELLED, EXIT_CONFIG, EXIT_OK, EXIT_PARTIAL, exit_code_from, run};
