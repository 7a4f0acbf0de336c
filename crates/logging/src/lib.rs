#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the diagnostics plumbing shared by the gcp crates: the
//! user-facing [`LogLevel`] names accepted by `--log`, the subscriber set up by
//! the binary, and one tracing macro per subsystem so every crate emits events
//! under a stable target.
//!
//! # Design
//!
//! - [`LogLevel`] parses the level names (`critical`, `error`, `warning`,
//!   `notice`, `info`, `debug`, `trace`) and maps them onto
//!   [`tracing::Level`].
//! - [`init_tracing`] installs a `tracing-subscriber` fmt layer. Events at
//!   `ERROR` go to stderr and everything else goes to stdout. The `GCP_LOG`
//!   environment variable, when set, replaces the level-derived filter with an
//!   [`EnvFilter`](tracing_subscriber::EnvFilter) directive string.
//! - The `trace_*` macros wrap the standard tracing macros with fixed targets:
//!
//! | Macro | Level | Target |
//! |---|---|---|
//! | [`trace_copy!`] | info | `gcp::copy` |
//! | [`trace_skip!`] | info | `gcp::skip` |
//! | [`trace_stats!`] | info | `gcp::stats` |
//! | [`trace_filter!`] | debug | `gcp::filter` |
//! | [`trace_walk!`] | debug | `gcp::walk` |
//!
//! Crates using the macros must depend on `tracing` themselves.
//!
//! # Examples
//!
//! ```
//! use logging::LogLevel;
//!
//! let level: LogLevel = "warning".parse().unwrap();
//! assert_eq!(level, LogLevel::Warning);
//! assert_eq!(level.as_tracing_level(), tracing::Level::WARN);
//! ```

mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use levels::{LogLevel, ParseLogLevelError};
pub use tracing_bridge::{LOG_ENV_VAR, env_filter, init_tracing};
