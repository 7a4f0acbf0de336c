use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

use tempfile::{NamedTempFile, PersistError};

use crate::TaskError;

/// Prefix of every temporary file the pipeline creates.
pub const TEMP_PREFIX: &str = "gcp";

/// Temporary output of one task.
///
/// The file is removed when the value is dropped without being committed.
#[derive(Debug)]
pub(crate) struct StagedFile {
    temp: NamedTempFile,
}

impl StagedFile {
    /// Creates an empty staging file inside `dir`.
    pub(crate) fn create(dir: &Path) -> Result<Self, TaskError> {
        let temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(dir)
            .map_err(|error| TaskError::io("create temporary file in", dir, error))?;
        Ok(Self { temp })
    }

    pub(crate) fn path(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn file_mut(&mut self) -> &mut File {
        self.temp.as_file_mut()
    }

    /// Flushes the staged bytes to disk and renames them to `destination`,
    /// creating missing parent directories.
    pub(crate) fn commit(self, destination: &Path) -> Result<(), TaskError> {
        self.temp
            .as_file()
            .sync_all()
            .map_err(|error| TaskError::io("sync", self.temp.path(), error))?;

        let parent = destination.parent().unwrap_or_else(|| Path::new("."));
        create_private_dir_all(parent)
            .map_err(|error| TaskError::io("create directory", parent, error))?;

        match self.temp.persist(destination) {
            Ok(_) => Ok(()),
            Err(PersistError { error, file })
                if error.kind() == io::ErrorKind::CrossesDevices =>
            {
                relocate(file, parent, destination)
            }
            Err(PersistError { error, file }) => {
                Err(TaskError::io("rename", file.path(), error))
            }
        }
    }
}

/// Copies a staged file that lives on another filesystem into a sibling of
/// `destination` and renames that sibling into place.
fn relocate(staged: NamedTempFile, parent: &Path, destination: &Path) -> Result<(), TaskError> {
    let mut source = staged.reopen().map_err(|error| TaskError::io("reopen", staged.path(), error))?;
    source
        .seek(SeekFrom::Start(0))
        .map_err(|error| TaskError::io("rewind", staged.path(), error))?;

    let mut sibling = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(parent)
        .map_err(|error| TaskError::io("create temporary file in", parent, error))?;
    io::copy(&mut source, sibling.as_file_mut())
        .map_err(|error| TaskError::io("copy", sibling.path(), error))?;
    sibling
        .as_file()
        .sync_all()
        .map_err(|error| TaskError::io("sync", sibling.path(), error))?;

    sibling
        .persist(destination)
        .map_err(|PersistError { error, file }| TaskError::io("rename", file.path(), error))?;
    drop(staged);
    Ok(())
}

#[cfg(unix)]
fn create_private_dir_all(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_private_dir_all(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn staged_file_carries_prefix_and_stays_out_of_destination() {
        let scratch = tempdir().expect("scratch");
        let staged = StagedFile::create(scratch.path()).expect("stage");
        let name = staged
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name");
        assert!(name.starts_with(TEMP_PREFIX));
        assert!(staged.path().starts_with(scratch.path()));
    }

    #[test]
    fn commit_creates_parents_and_moves_bytes() {
        let scratch = tempdir().expect("scratch");
        let out = tempdir().expect("out");
        let destination = out.path().join("a/b/c.txt");

        let mut staged = StagedFile::create(scratch.path()).expect("stage");
        staged.file_mut().write_all(b"payload").expect("write");
        let staged_path = staged.path().to_path_buf();
        staged.commit(&destination).expect("commit");

        assert_eq!(fs::read(&destination).expect("read"), b"payload");
        assert!(!staged_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn created_parents_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let scratch = tempdir().expect("scratch");
        let out = tempdir().expect("out");
        let destination = out.path().join("private/file");

        StagedFile::create(scratch.path())
            .expect("stage")
            .commit(&destination)
            .expect("commit");

        let mode = fs::metadata(out.path().join("private"))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn dropping_uncommitted_file_removes_it() {
        let scratch = tempdir().expect("scratch");
        let staged = StagedFile::create(scratch.path()).expect("stage");
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn relocate_moves_content_into_destination_directory() {
        let scratch = tempdir().expect("scratch");
        let out = tempdir().expect("out");
        let destination = out.path().join("moved.bin");

        let mut staged = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(scratch.path())
            .expect("stage");
        staged.write_all(b"cross device").expect("write");
        let staged_path = staged.path().to_path_buf();

        relocate(staged, out.path(), &destination).expect("relocate");
        assert_eq!(fs::read(&destination).expect("read"), b"cross device");
        assert!(!staged_path.exists());
        let leftovers = test_support::entries_with_prefix(out.path(), TEMP_PREFIX).expect("list");
        assert!(leftovers.is_empty());
    }

    #[test]
    fn missing_scratch_directory_is_reported() {
        let scratch = tempdir().expect("scratch");
        let error = StagedFile::create(&scratch.path().join("absent")).expect_err("no dir");
        assert!(error.to_string().starts_with("failed to create temporary file in"));
    }
}
