use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{self, Path, PathBuf};
use std::vec;

use logging::trace_walk;

use crate::entry::WalkEntry;
use crate::error::WalkError;

/// Depth-first iterator over everything below a root directory.
///
/// The root itself is not yielded. A symlinked root is followed; links below
/// it are reported as entries and never descended into.
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    frames: Vec<Frame>,
    /// Directory yielded last, listed on the next call to `next`.
    descend: Option<Descend>,
}

#[derive(Debug)]
struct Descend {
    path: PathBuf,
    relative: PathBuf,
    depth: usize,
}

/// A listed directory being consumed in sorted order.
#[derive(Debug)]
struct Frame {
    path: PathBuf,
    relative: PathBuf,
    depth: usize,
    names: vec::IntoIter<OsString>,
}

impl Walker {
    /// Opens `root`, which must be (or link to) a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, WalkError> {
        let given = root.as_ref();
        let root_error = |source| WalkError::Root {
            path: given.to_path_buf(),
            source,
        };
        let root = path::absolute(given).map_err(root_error)?;
        let metadata = fs::metadata(&root).map_err(root_error)?;
        if !metadata.is_dir() {
            return Err(root_error(io::Error::from(io::ErrorKind::NotADirectory)));
        }
        trace_walk!("walking {}", root.display());

        Ok(Self {
            descend: Some(Descend {
                path: root.clone(),
                relative: PathBuf::new(),
                depth: 0,
            }),
            root,
            frames: Vec::new(),
        })
    }

    /// Absolute traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keeps the walker out of the directory yielded last.
    ///
    /// No effect when the last entry was not a directory.
    pub fn skip_current_dir(&mut self) {
        if let Some(skipped) = self.descend.take() {
            trace_walk!("pruning {}", skipped.path.display());
        }
    }

    fn inspect(&mut self, path: PathBuf, relative: PathBuf, depth: usize) -> Result<WalkEntry, WalkError> {
        let metadata = fs::symlink_metadata(&path).map_err(|source| WalkError::Inspect {
            path: path.clone(),
            source,
        })?;
        let entry = WalkEntry::new(path, relative, metadata, depth);
        if entry.is_dir() {
            self.descend = Some(Descend {
                path: entry.full_path().to_path_buf(),
                relative: entry.relative_path().to_path_buf(),
                depth,
            });
        }
        Ok(entry)
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(descend) = self.descend.take() {
            match Frame::list(descend) {
                Ok(frame) => self.frames.push(frame),
                Err(error) => return Some(Err(error)),
            }
        }

        loop {
            let frame = self.frames.last_mut()?;
            let Some(name) = frame.names.next() else {
                self.frames.pop();
                continue;
            };
            let path = frame.path.join(&name);
            let relative = frame.relative.join(&name);
            let depth = frame.depth + 1;
            return Some(self.inspect(path, relative, depth));
        }
    }
}

impl Frame {
    fn list(descend: Descend) -> Result<Self, WalkError> {
        let listing_error = |source| WalkError::ListDirectory {
            path: descend.path.clone(),
            source,
        };
        let mut names = fs::read_dir(&descend.path)
            .map_err(listing_error)?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<io::Result<Vec<_>>>()
            .map_err(listing_error)?;
        names.sort_unstable();
        trace_walk!("{} entries in {}", names.len(), descend.path.display());

        Ok(Self {
            path: descend.path,
            relative: descend.relative,
            depth: descend.depth,
            names: names.into_iter(),
        })
    }
}
