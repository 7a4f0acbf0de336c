//! crates/logging/src/tracing_macros.rs
//! Convenience macros for gcp-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with appropriate targets for gcp subsystems.

/// Emit a transfer trace.
///
/// # Example
/// ```ignore
/// trace_copy!("{} -> {}", source, destination);
/// ```
#[macro_export]
macro_rules! trace_copy {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "gcp::copy", $($arg)*);
    };
}

/// Emit a skipped-file trace (destination exists, dry run).
///
/// # Example
/// ```ignore
/// trace_skip!("{} already exists", destination);
/// ```
#[macro_export]
macro_rules! trace_skip {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "gcp::skip", $($arg)*);
    };
}

/// Emit a filter decision trace.
///
/// # Example
/// ```ignore
/// trace_filter!("exclude '{}' matched {}", pattern, path);
/// ```
#[macro_export]
macro_rules! trace_filter {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "gcp::filter", $($arg)*);
    };
}

/// Emit a traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory {}", path);
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "gcp::walk", $($arg)*);
    };
}

/// Emit a statistics trace.
///
/// # Example
/// ```ignore
/// trace_stats!("transferred {} bytes", bytes);
/// ```
#[macro_export]
macro_rules! trace_stats {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "gcp::stats", $($arg)*);
    };
}
