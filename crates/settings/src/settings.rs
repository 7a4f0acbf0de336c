use std::env;
use std::fs;
use std::io;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::thread;

use filters::{OperationFilter, PathFilter, PatternList};
use tracing::warn;

use crate::paths::{absolutize, is_nested};
use crate::{ConfigError, ConfigFile, EncryptionKey, TraversalPolicy};

/// Patterns stored without compression unless configured otherwise.
pub const DEFAULT_EXCLUDE_COMPRESSION: &[&str] = &["*.iso", "*.png", "*.jpg", "*.jpeg"];

/// Patterns stored without encryption unless configured otherwise.
pub const DEFAULT_EXCLUDE_ENCRYPTION: &[&str] = &["*.iso"];

/// Default upper bound of a chunk: 50 MiB.
pub const DEFAULT_MAX_CHUNK_SIZE: u64 = 50 * 1024 * 1024;

/// Validated, immutable configuration of one run.
#[derive(Clone, Debug)]
pub struct Settings {
    source: PathBuf,
    destination: PathBuf,
    concurrency: NonZeroUsize,
    dry_run: bool,
    path_filter: PathFilter,
    operation_filter: OperationFilter,
    compress: bool,
    encrypt: bool,
    key: Option<EncryptionKey>,
    temp_dir: PathBuf,
    max_chunk_size: NonZeroU64,
    traversal_policy: TraversalPolicy,
}

impl Settings {
    /// Absolute, normalised source root.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Absolute, normalised destination root.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of worker threads, also the capacity of the job queue.
    #[must_use]
    pub const fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
    }

    /// Whether the run only reports what it would do.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Include/exclude filter applied during traversal.
    #[must_use]
    pub const fn path_filter(&self) -> &PathFilter {
        &self.path_filter
    }

    /// Per-file compression and encryption resolution.
    #[must_use]
    pub const fn operation_filter(&self) -> &OperationFilter {
        &self.operation_filter
    }

    /// Global compression switch.
    #[must_use]
    pub const fn compress(&self) -> bool {
        self.compress
    }

    /// Global encryption switch.
    #[must_use]
    pub const fn encrypt(&self) -> bool {
        self.encrypt
    }

    /// Key material; present whenever [`encrypt`](Self::encrypt) is `true`.
    #[must_use]
    pub const fn key(&self) -> Option<&EncryptionKey> {
        self.key.as_ref()
    }

    /// Directory receiving temporary output.
    #[must_use]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Upper bound of a chunk in bytes.
    #[must_use]
    pub const fn max_chunk_size(&self) -> NonZeroU64 {
        self.max_chunk_size
    }

    /// Handling of traversal errors other than vanished paths.
    #[must_use]
    pub const fn traversal_policy(&self) -> TraversalPolicy {
        self.traversal_policy
    }
}

/// Collects configuration layers and validates them into [`Settings`].
///
/// Every setter replaces the previous value, so the caller applies layers in
/// precedence order: [`apply_file`](Self::apply_file) for the merged
/// configuration documents, then command line overrides.
#[derive(Clone, Debug)]
pub struct SettingsBuilder {
    source: PathBuf,
    destination: PathBuf,
    concurrency: Option<usize>,
    dry_run: bool,
    include: Vec<String>,
    exclude: Vec<String>,
    exclude_compression: Vec<String>,
    exclude_encryption: Vec<String>,
    compress: bool,
    encrypt: bool,
    key: Option<EncryptionKey>,
    temp_dir: Option<PathBuf>,
    max_chunk_size: u64,
    traversal_policy: TraversalPolicy,
    ignore_relative_check: bool,
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|&pattern| pattern.to_owned()).collect()
}

impl SettingsBuilder {
    /// Starts from the built-in defaults.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            concurrency: None,
            dry_run: false,
            include: Vec::new(),
            exclude: Vec::new(),
            exclude_compression: owned(DEFAULT_EXCLUDE_COMPRESSION),
            exclude_encryption: owned(DEFAULT_EXCLUDE_ENCRYPTION),
            compress: true,
            encrypt: false,
            key: None,
            temp_dir: None,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            traversal_policy: TraversalPolicy::default(),
            ignore_relative_check: false,
        }
    }

    /// Applies every key set in `file`.
    #[must_use]
    pub fn apply_file(mut self, file: &ConfigFile) -> Self {
        if let Some(include) = &file.include {
            self.include.clone_from(include);
        }
        if let Some(exclude) = &file.exclude {
            self.exclude.clone_from(exclude);
        }
        if let Some(patterns) = &file.exclude_compression {
            self.exclude_compression.clone_from(patterns);
        }
        if let Some(patterns) = &file.exclude_encryption {
            self.exclude_encryption.clone_from(patterns);
        }
        if let Some(compress) = file.compress {
            self.compress = compress;
        }
        if let Some(encrypt) = file.encrypt {
            self.encrypt = encrypt;
        }
        if let Some(concurrency) = file.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(temp_dir) = &file.temp_dir {
            self.temp_dir = Some(temp_dir.clone());
        }
        if let Some(max_chunk_size) = file.max_chunk_size {
            self.max_chunk_size = max_chunk_size;
        }
        if let Some(policy) = file.on_traversal_error {
            self.traversal_policy = policy;
        }
        self
    }

    /// Sets the worker count. Zero is rejected by [`build`](Self::build).
    #[must_use]
    pub const fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Replaces the include patterns.
    #[must_use]
    pub fn include(mut self, patterns: Vec<String>) -> Self {
        self.include = patterns;
        self
    }

    /// Replaces the exclude patterns.
    #[must_use]
    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Appends include patterns after the configured ones.
    #[must_use]
    pub fn extend_include<I: IntoIterator<Item = String>>(mut self, patterns: I) -> Self {
        self.include.extend(patterns);
        self
    }

    /// Appends exclude patterns after the configured ones.
    #[must_use]
    pub fn extend_exclude<I: IntoIterator<Item = String>>(mut self, patterns: I) -> Self {
        self.exclude.extend(patterns);
        self
    }

    /// Replaces the exclude-from-compression patterns.
    #[must_use]
    pub fn exclude_compression(mut self, patterns: Vec<String>) -> Self {
        self.exclude_compression = patterns;
        self
    }

    /// Replaces the exclude-from-encryption patterns.
    #[must_use]
    pub fn exclude_encryption(mut self, patterns: Vec<String>) -> Self {
        self.exclude_encryption = patterns;
        self
    }

    /// Sets the global compression switch.
    #[must_use]
    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Sets the global encryption switch.
    #[must_use]
    pub const fn encrypt(mut self, encrypt: bool) -> Self {
        self.encrypt = encrypt;
        self
    }

    /// Supplies key material.
    #[must_use]
    pub fn key(mut self, key: EncryptionKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Sets the directory receiving temporary output.
    #[must_use]
    pub fn temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    /// Sets the chunk cap. Zero is rejected by [`build`](Self::build).
    #[must_use]
    pub const fn max_chunk_size(mut self, bytes: u64) -> Self {
        self.max_chunk_size = bytes;
        self
    }

    /// Sets the traversal error policy.
    #[must_use]
    pub const fn traversal_policy(mut self, policy: TraversalPolicy) -> Self {
        self.traversal_policy = policy;
        self
    }

    /// Downgrades the source/destination nesting check to a warning.
    #[must_use]
    pub const fn ignore_relative_check(mut self, ignore: bool) -> Self {
        self.ignore_relative_check = ignore;
        self
    }

    /// Validates the collected values.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let concurrency = match self.concurrency {
            Some(requested) => NonZeroUsize::new(requested).ok_or(ConfigError::InvalidConcurrency)?,
            None => thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        };
        let max_chunk_size =
            NonZeroU64::new(self.max_chunk_size).ok_or(ConfigError::InvalidChunkSize)?;

        let path_filter = PathFilter::new(
            PatternList::compile(&self.include)?,
            PatternList::compile(&self.exclude)?,
        );
        let operation_filter = OperationFilter::new(
            PatternList::compile(&self.exclude_compression)?,
            PatternList::compile(&self.exclude_encryption)?,
        )
        .compression_enabled(self.compress)
        .encryption_enabled(self.encrypt);

        if self.encrypt && self.key.is_none() {
            return Err(ConfigError::MissingKey);
        }

        let source = absolutize(&self.source)?;
        let destination = absolutize(&self.destination)?;
        check_source(&source)?;

        if is_nested(&source, &destination) {
            if !self.ignore_relative_check {
                return Err(ConfigError::NestedRoots {
                    source_root: source,
                    destination_root: destination,
                });
            }
            warn!(
                "source '{}' and destination '{}' overlap; continuing because the check is disabled",
                source.display(),
                destination.display()
            );
        }

        let temp_dir = match &self.temp_dir {
            Some(dir) => absolutize(dir)?,
            None => env::temp_dir(),
        };

        Ok(Settings {
            source,
            destination,
            concurrency,
            dry_run: self.dry_run,
            path_filter,
            operation_filter,
            compress: self.compress,
            encrypt: self.encrypt,
            key: self.key,
            temp_dir,
            max_chunk_size,
            traversal_policy: self.traversal_policy,
        })
    }
}

fn check_source(source: &Path) -> Result<(), ConfigError> {
    match fs::metadata(source) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::SourceNotDirectory {
            path: source.to_path_buf(),
        }),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(ConfigError::MissingSource {
            path: source.to_path_buf(),
        }),
        Err(error) => Err(ConfigError::InspectSource {
            path: source.to_path_buf(),
            source: error,
        }),
    }
}
