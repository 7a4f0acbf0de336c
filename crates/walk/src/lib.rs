#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` is the depth-first traversal feeding the gcp pipeline. Names are
//! sorted per directory, so two runs over the same tree visit paths in the
//! same order whatever the filesystem's own listing order.
//!
//! # Design
//!
//! - [`Walker`] implements [`Iterator`] over [`WalkEntry`] values for every
//!   path below the root. A directory is listed only when the iterator is
//!   advanced past it, so [`Walker::skip_current_dir`] prunes a subtree
//!   without reading it.
//! - [`EntryKind`] classifies entries from their own metadata;
//!   [`WalkEntry::file_len`] resolves links to regular files.
//! - Failures are yielded in place of the offending entry and the walk goes
//!   on with the next sibling. Whether that aborts the run is the caller's
//!   decision.
//!
//! # Invariants
//!
//! - Relative paths are never empty and never contain `..`.
//! - Symbolic links below the root are never descended into.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use std::path::{Path, PathBuf};
//! use walk::Walker;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::create_dir(root.join("skip"))?;
//! fs::write(root.join("skip/hidden.txt"), b"data")?;
//! fs::write(root.join("visible.txt"), b"data")?;
//!
//! let mut walker = Walker::new(root)?;
//! let mut seen = Vec::new();
//! while let Some(entry) = walker.next() {
//!     let entry = entry?;
//!     if entry.relative_path() == Path::new("skip") {
//!         walker.skip_current_dir();
//!     }
//!     seen.push(entry.relative_path().to_path_buf());
//! }
//!
//! assert_eq!(seen, [PathBuf::from("skip"), PathBuf::from("visible.txt")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod entry;
mod error;
mod walker;

pub use entry::{EntryKind, WalkEntry};
pub use error::WalkError;
pub use walker::Walker;
