#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides which paths of a source tree are mirrored and which
//! transforms apply to each mirrored file. Two independent questions are
//! answered here:
//!
//! - *Should this path be skipped?* [`PathFilter`] evaluates ordered exclude
//!   patterns and lets include patterns reinstate excluded paths.
//! - *Which transforms apply?* [`OperationFilter`] resolves, per file, whether
//!   compression and encryption run, based on dedicated exclusion lists.
//!
//! # Design
//!
//! - [`PatternList`] owns the compiled form of an ordered list of shell globs.
//!   Patterns are compiled eagerly so a malformed pattern surfaces once, at
//!   startup, instead of on every visited path.
//! - Every decision is evaluated against a fixed set of candidates derived
//!   from the visited path: the absolute path, the path relative to the source
//!   root, and each component of the relative path. A bare name such as
//!   `.git` therefore excludes that directory at any depth, while `*.iso`
//!   matches by file name.
//! - A candidate matches a pattern when it is byte-for-byte equal to the
//!   pattern text or when the glob matches it.
//!
//! # Invariants
//!
//! - Matching is case-sensitive and `*`/`?` never cross a `/`.
//! - Recursive `**` wildcards are rejected when the list is compiled.
//! - Exclude patterns are evaluated in definition order and the first match
//!   wins. Include patterns only ever reinstate a path that an exclude pattern
//!   matched; they have no effect on paths that are not excluded.
//! - Zero-length files are always skipped by [`PathFilter::should_skip_file`].
//!
//! # Errors
//!
//! [`PatternList::compile`] reports [`FilterError`] for malformed globs and
//! for recursive wildcards. The error carries the offending pattern.
//!
//! # Examples
//!
//! ```
//! use filters::{PathFilter, PatternList};
//! use std::path::Path;
//!
//! let filter = PathFilter::new(
//!     PatternList::compile(["keep.log"]).expect("include compiles"),
//!     PatternList::compile([".git", "*.log"]).expect("exclude compiles"),
//! );
//!
//! let root = Path::new("/src");
//! assert!(filter.should_skip(&root.join(".git/config"), Path::new(".git/config")).is_skip());
//! assert!(filter.should_skip(&root.join("debug.log"), Path::new("debug.log")).is_skip());
//! assert!(!filter.should_skip(&root.join("keep.log"), Path::new("keep.log")).is_skip());
//! assert!(!filter.should_skip(&root.join("main.rs"), Path::new("main.rs")).is_skip());
//! ```

mod candidates;
mod decision;
mod error;
mod operation;
mod path_filter;
mod pattern;

pub use decision::{PathDecision, SkipReason};
pub use error::FilterError;
pub use operation::{OperationFilter, Operations};
pub use path_filter::PathFilter;
pub use pattern::PatternList;
