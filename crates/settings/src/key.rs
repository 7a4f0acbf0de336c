use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use zeroize::Zeroizing;

use crate::ConfigError;

/// Key material handed to the encryption transformer.
///
/// The bytes are wiped when the key is dropped and never printed.
#[derive(Clone, Eq, PartialEq)]
pub struct EncryptionKey(Zeroizing<Vec<u8>>);

impl EncryptionKey {
    /// Wraps raw key bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Resolves a key argument.
    ///
    /// When `argument` names a readable file its contents are the key.
    /// Otherwise the argument itself is the key. Empty keys are rejected.
    pub fn resolve(argument: &str) -> Result<Self, ConfigError> {
        let path = Path::new(argument);
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::InvalidInput
                ) =>
            {
                argument.as_bytes().to_vec()
            }
            Err(source) => {
                return Err(ConfigError::KeyFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if bytes.is_empty() {
            return Err(ConfigError::MissingKey);
        }
        Ok(Self::from_bytes(bytes))
    }

    /// Key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-length key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}
