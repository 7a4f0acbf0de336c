#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `settings` turns configuration files, environment variables and command
//! line values into the immutable [`Settings`] consumed by the copy pipeline.
//! Everything that can be wrong with a run's configuration is detected here,
//! before any traversal starts.
//!
//! # Design
//!
//! - [`ConfigFile`] is one TOML document. Every key is optional so documents
//!   can be layered with [`ConfigFile::merge`]; a later document replaces the
//!   earlier value key by key.
//! - [`ConfigSources`] names the documents of one run, in precedence order:
//!   `$GCP_CONFIG`, `$HOME/.gcp.toml`, then an explicit `--config` path.
//! - [`SettingsBuilder`] starts from the built-in defaults, applies a merged
//!   [`ConfigFile`], then command line overrides, and validates the result in
//!   [`SettingsBuilder::build`].
//! - [`EncryptionKey`] holds key material and wipes it on drop.
//!
//! # Invariants
//!
//! - [`Settings::concurrency`] and [`Settings::max_chunk_size`] are at least
//!   one.
//! - Source and destination roots are absolute and lexically normalised; the
//!   source is an existing directory.
//! - Unless explicitly allowed, the source and destination are neither equal
//!   nor nested inside one another.
//! - Every pattern list is compiled; an invalid pattern never reaches the
//!   pipeline.
//! - Encryption enabled implies a key is present.
//!
//! # Errors
//!
//! All failures are reported as [`ConfigError`].
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
//!
//! let settings = SettingsBuilder::new(&source, temp.path().join("dst"))
//!     .concurrency(2)
//!     .exclude(vec![".git".to_owned()])
//!     .build()?;
//!
//! assert_eq!(settings.concurrency().get(), 2);
//! assert!(settings.compress());
//! assert!(!settings.encrypt());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod file;
mod key;
mod paths;
mod policy;
mod settings;

pub use error::ConfigError;
pub use file::{CONFIG_ENV_VAR, ConfigFile, ConfigSources, HOME_CONFIG_NAME, split_patterns};
pub use key::EncryptionKey;
pub use paths::{is_nested, normalize};
pub use policy::{ParseTraversalPolicyError, TraversalPolicy};
pub use settings::{
    DEFAULT_EXCLUDE_COMPRESSION, DEFAULT_EXCLUDE_ENCRYPTION, DEFAULT_MAX_CHUNK_SIZE, Settings,
    SettingsBuilder,
};
