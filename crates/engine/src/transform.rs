use std::fmt;

use compress::lzma;
use settings::EncryptionKey;

use crate::TransformError;

/// A per-chunk transform applied while streaming a file.
///
/// Implementations receive each chunk exactly once, in file order, and must
/// be usable from several worker threads at the same time. A chunk never
/// exceeds the task's chunk size and is never padded.
///
/// A real cipher is plugged in through
/// [`Pipeline::with_cipher`](crate::Pipeline::with_cipher):
///
/// ```
/// use engine::{ChunkTransformer, TransformError};
///
/// struct Xor(u8);
///
/// impl ChunkTransformer for Xor {
///     fn transform(&self, chunk: &[u8]) -> Result<Vec<u8>, TransformError> {
///         Ok(chunk.iter().map(|byte| byte ^ self.0).collect())
///     }
/// }
///
/// assert_eq!(Xor(0xff).transform(&[0x0f]).unwrap(), vec![0xf0]);
/// ```
pub trait ChunkTransformer: Send + Sync {
    /// Transforms one chunk.
    fn transform(&self, chunk: &[u8]) -> Result<Vec<u8>, TransformError>;

    /// Returns `true` when the output always equals the input.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Encodes each chunk as an independent LZMA stream at "best" quality.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LzmaChunkCompressor;

impl ChunkTransformer for LzmaChunkCompressor {
    fn transform(&self, chunk: &[u8]) -> Result<Vec<u8>, TransformError> {
        lzma::compress_to_vec(chunk).map_err(TransformError::Compress)
    }
}

/// Encryption stand-in that returns every chunk unchanged.
///
/// It holds the configured key so the key's lifetime matches that of a real
/// cipher, but never reads it.
#[derive(Clone, Default)]
pub struct PassthroughCipher {
    key: Option<EncryptionKey>,
}

impl PassthroughCipher {
    /// Cipher holding `key`.
    #[must_use]
    pub fn new(key: Option<EncryptionKey>) -> Self {
        Self { key }
    }

    /// Key handed to the cipher, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&EncryptionKey> {
        self.key.as_ref()
    }
}

impl fmt::Debug for PassthroughCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassthroughCipher")
            .field("keyed", &self.key.is_some())
            .finish()
    }
}

impl ChunkTransformer for PassthroughCipher {
    fn transform(&self, chunk: &[u8]) -> Result<Vec<u8>, TransformError> {
        Ok(chunk.to_vec())
    }

    fn is_identity(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressor_output_decodes_to_input() {
        let chunk = b"abcabcabcabcabcabc".repeat(100);
        let encoded = LzmaChunkCompressor.transform(&chunk).expect("compress");
        assert!(encoded.len() < chunk.len());
        assert_eq!(lzma::decompress_to_vec(&encoded).expect("decode"), chunk);
    }

    #[test]
    fn passthrough_is_identity() {
        let cipher = PassthroughCipher::new(Some(EncryptionKey::from_bytes(b"key".to_vec())));
        assert!(cipher.is_identity());
        assert_eq!(cipher.transform(b"plain").expect("transform"), b"plain");
        assert_eq!(cipher.key().map(EncryptionKey::len), Some(3));
        assert!(!format!("{cipher:?}").contains("key\""));
    }

    #[test]
    fn compressor_is_not_identity() {
        assert!(!LzmaChunkCompressor.is_identity());
    }
}
