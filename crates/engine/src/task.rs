use std::ffi::OsString;
use std::path::{Path, PathBuf};

use compress::lzma;
use filters::Operations;
use settings::Settings;

use crate::TaskError;

/// Suffix appended to encrypted output.
const ENCRYPTED_EXTENSION: &str = "aes";

/// Everything a worker needs to know about one file, resolved once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileTask {
    source: PathBuf,
    relative: PathBuf,
    destination: PathBuf,
    operations: Operations,
    chunk_size: usize,
    len: u64,
}

impl FileTask {
    /// Resolves the task for the regular file `source` of `len` bytes.
    pub fn resolve(settings: &Settings, source: &Path, len: u64) -> Result<Self, TaskError> {
        let relative = source
            .strip_prefix(settings.source())
            .map_err(|_| TaskError::OutsideRoot {
                path: source.to_path_buf(),
                root: settings.source().to_path_buf(),
            })?
            .to_path_buf();

        let operations = settings.operation_filter().resolve(source, &relative);
        let destination = destination_path(settings.destination(), &relative, operations);
        let capped = len.min(settings.max_chunk_size().get()).max(1);
        let chunk_size = usize::try_from(capped).unwrap_or(usize::MAX);

        Ok(Self {
            source: source.to_path_buf(),
            relative,
            destination,
            operations,
            chunk_size,
            len,
        })
    }

    /// Absolute source path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Source path relative to the source root.
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Final output path.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Transforms applied to each chunk.
    #[must_use]
    pub const fn operations(&self) -> Operations {
        self.operations
    }

    /// Bytes read per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Source size observed during traversal.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` when the observed size was zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Output path for `relative` below `root`: `.lzma` is appended when
/// compressing, then `.aes` when encrypting.
///
/// ```
/// use engine::destination_path;
/// use filters::Operations;
/// use std::path::Path;
///
/// let both = Operations { compress: true, encrypt: true };
/// assert_eq!(
///     destination_path(Path::new("/dst"), Path::new("docs/a.txt"), both),
///     Path::new("/dst/docs/a.txt.lzma.aes"),
/// );
/// assert_eq!(
///     destination_path(Path::new("/dst"), Path::new("b.iso"), Operations::COPY),
///     Path::new("/dst/b.iso"),
/// );
/// ```
#[must_use]
pub fn destination_path(root: &Path, relative: &Path, operations: Operations) -> PathBuf {
    let mut name = OsString::from(root.join(relative));
    if operations.compress {
        name.push(".");
        name.push(lzma::EXTENSION);
    }
    if operations.encrypt {
        name.push(".");
        name.push(ENCRYPTED_EXTENSION);
    }
    PathBuf::from(name)
}
