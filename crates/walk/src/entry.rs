use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a visited entry is, judged without following symbolic links.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// A directory; the walker descends into it unless pruned.
    Directory,
    /// A regular file.
    File,
    /// A symbolic link, never descended into.
    Symlink,
    /// Sockets, FIFOs, devices and the like.
    Other,
}

impl EntryKind {
    fn of(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}

/// One path below the traversal root.
#[derive(Debug)]
pub struct WalkEntry {
    path: PathBuf,
    relative: PathBuf,
    metadata: fs::Metadata,
    kind: EntryKind,
    depth: usize,
}

impl WalkEntry {
    pub(crate) fn new(path: PathBuf, relative: PathBuf, metadata: fs::Metadata, depth: usize) -> Self {
        let kind = EntryKind::of(metadata.file_type());
        Self {
            path,
            relative,
            metadata,
            kind,
            depth,
        }
    }

    /// Absolute path.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the root; never empty.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    /// Metadata of the entry itself.
    #[must_use]
    pub const fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Kind of the entry itself.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Number of components in [`relative_path`](Self::relative_path).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Shorthand for `kind() == EntryKind::Directory`.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Size of the regular file this entry stands for.
    ///
    /// Symbolic links are followed. `None` when the entry (or the link
    /// target) is not a regular file, or the link dangles.
    pub fn file_len(&self) -> io::Result<Option<u64>> {
        match self.kind {
            EntryKind::File => Ok(Some(self.metadata.len())),
            EntryKind::Directory | EntryKind::Other => Ok(None),
            EntryKind::Symlink => match fs::metadata(&self.path) {
                Ok(target) if target.is_file() => Ok(Some(target.len())),
                Ok(_) => Ok(None),
                Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(error) => Err(error),
            },
        }
    }
}
