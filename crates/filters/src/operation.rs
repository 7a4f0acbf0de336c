use std::path::Path;

use crate::PatternList;
use crate::candidates::Candidates;

/// Transforms resolved for a single file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Operations {
    /// Whether the file is LZMA-compressed chunk by chunk.
    pub compress: bool,
    /// Whether the encryption transformer runs over each chunk.
    pub encrypt: bool,
}

impl Operations {
    /// Neither transform applies; the file is copied verbatim.
    pub const COPY: Self = Self {
        compress: false,
        encrypt: false,
    };

    /// Returns `true` when at least one transform applies.
    #[must_use]
    pub const fn transforms(self) -> bool {
        self.compress || self.encrypt
    }
}

/// Resolves per-file compression and encryption decisions.
///
/// Both operations default to enabled; a match in the corresponding exclusion
/// list turns that operation off for the file. A globally disabled operation
/// is off for every file regardless of the lists.
#[derive(Clone, Debug)]
pub struct OperationFilter {
    exclude_compression: PatternList,
    exclude_encryption: PatternList,
    compression_enabled: bool,
    encryption_enabled: bool,
}

impl OperationFilter {
    /// Creates a filter with both operations globally enabled.
    #[must_use]
    pub const fn new(exclude_compression: PatternList, exclude_encryption: PatternList) -> Self {
        Self {
            exclude_compression,
            exclude_encryption,
            compression_enabled: true,
            encryption_enabled: true,
        }
    }

    /// Globally enables or disables compression.
    #[must_use]
    pub const fn compression_enabled(mut self, enabled: bool) -> Self {
        self.compression_enabled = enabled;
        self
    }

    /// Globally enables or disables encryption.
    #[must_use]
    pub const fn encryption_enabled(mut self, enabled: bool) -> Self {
        self.encryption_enabled = enabled;
        self
    }

    /// Resolves the operations for the file at `path` (absolute), whose path
    /// relative to the source root is `relative`.
    #[must_use]
    pub fn resolve(&self, path: &Path, relative: &Path) -> Operations {
        let candidates = Candidates::new(path, relative);
        Operations {
            compress: self.compression_enabled
                && self.exclude_compression.first_match(&candidates).is_none(),
            encrypt: self.encryption_enabled
                && self.exclude_encryption.first_match(&candidates).is_none(),
        }
    }
}

impl Default for OperationFilter {
    fn default() -> Self {
        Self::new(PatternList::default(), PatternList::default())
    }
}
