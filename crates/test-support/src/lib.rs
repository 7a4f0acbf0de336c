#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Scratch directory trees shared by the gcp test suites.
//!
//! [`Sandbox`] owns a temporary directory with empty `src/` and `dst/`
//! subdirectories; helpers populate the source side and snapshot either side
//! for assertions.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory with a source root and a destination root.
///
/// The destination root is not created; the pipeline creates it on demand.
#[derive(Debug)]
pub struct Sandbox {
    temp: TempDir,
    source: PathBuf,
    destination: PathBuf,
}

impl Sandbox {
    /// Creates a sandbox with an empty source directory.
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let source = temp.path().join("src");
        let destination = temp.path().join("dst");
        fs::create_dir(&source)?;
        Ok(Self {
            temp,
            source,
            destination,
        })
    }

    /// Root of the sandbox.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Source root.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination root.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Writes `contents` to `relative` below the source root, creating parent
    /// directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        write_file(&self.source.join(relative), contents.as_ref())
    }

    /// Creates `relative` below the source root as a directory.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.source.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Snapshot of every regular file below the destination root.
    pub fn destination_files(&self) -> io::Result<BTreeMap<PathBuf, Vec<u8>>> {
        if !self.destination.exists() {
            return Ok(BTreeMap::new());
        }
        snapshot(&self.destination)
    }
}

/// Writes `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

/// Deterministic, poorly compressible bytes of length `len`.
#[must_use]
pub fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9e37_79b9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state.to_le_bytes()[0]
        })
        .collect()
}

/// Maps every regular file below `root` (relative path) to its contents.
pub fn snapshot(root: &Path) -> io::Result<BTreeMap<PathBuf, Vec<u8>>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                let relative = path
                    .strip_prefix(root)
                    .map_err(|error| io::Error::other(error.to_string()))?
                    .to_path_buf();
                files.insert(relative, fs::read(&path)?);
            }
        }
    }
    Ok(files)
}

/// Names of entries directly inside `dir` starting with `prefix`.
pub fn entries_with_prefix(dir: &Path, prefix: &str) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
