//! # Overview
//!
//! LZMA-alone encoding of independent chunks and decoding of concatenated
//! chunk streams.
//!
//! Every call to [`compress_to_vec`] produces a complete stream (header,
//! payload, end-of-payload marker). Streams carry no framing beyond that, so a
//! file built from several chunks is decoded by running the decoder until one
//! stream ends and restarting it on the remaining bytes, which is what
//! [`decompress_to_vec`] does.
//!
//! # Examples
//!
//! ```
//! use compress::lzma::{compress_to_vec, decompress_to_vec};
//!
//! let data = b"highly compressible payload".repeat(64);
//! let compressed = compress_to_vec(&data).unwrap();
//! assert!(compressed.len() < data.len());
//! assert_eq!(decompress_to_vec(&compressed).unwrap(), data);
//! ```

use std::io::{self, Write};

use xz2::stream::{Action, LzmaOptions, Status, Stream};
use xz2::write::XzEncoder;

/// File name suffix of LZMA-alone output.
pub const EXTENSION: &str = "lzma";

/// liblzma preset used for every chunk: the "best" quality setting.
pub const PRESET: u32 = 9;

/// Smallest dictionary liblzma accepts.
const MIN_DICT_SIZE: u32 = 4096;

/// Dictionary of [`PRESET`]; chunks never need more.
const MAX_DICT_SIZE: u32 = 1 << 26;

/// Minimum growth step for the decoder output buffer.
const DECODE_RESERVE: usize = 64 * 1024;

/// Dictionary size for a chunk of `len` bytes.
fn dict_size_for(len: usize) -> u32 {
    u32::try_from(len)
        .unwrap_or(u32::MAX)
        .clamp(MIN_DICT_SIZE, MAX_DICT_SIZE)
}

fn encoder(len: usize) -> io::Result<Stream> {
    let mut options = LzmaOptions::new_preset(PRESET)?;
    options.dict_size(dict_size_for(len));
    Ok(Stream::new_lzma_encoder(&options)?)
}

/// Compresses `input` into a new, self-contained LZMA stream at [`PRESET`].
pub fn compress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let stream = encoder(input.len())?;
    let mut writer = XzEncoder::new_stream(Vec::with_capacity(input.len() / 2 + 64), stream);
    writer.write_all(input)?;
    writer.finish()
}

/// Decompresses one or more concatenated LZMA streams into a new [`Vec`].
///
/// Empty input decodes to an empty vector. Truncated or corrupt input is an
/// error.
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len().saturating_mul(2));
    let mut remaining = input;
    while !remaining.is_empty() {
        let consumed = decode_stream(remaining, &mut output)?;
        remaining = &remaining[consumed..];
    }
    Ok(output)
}

/// Decodes the stream at the start of `input`, appending to `output`, and
/// returns the number of input bytes it occupied.
fn decode_stream(input: &[u8], output: &mut Vec<u8>) -> io::Result<usize> {
    let mut stream = Stream::new_lzma_decoder(u64::MAX)?;
    loop {
        if output.len() == output.capacity() {
            output.reserve(output.capacity().max(DECODE_RESERVE));
        }

        let consumed = stream.total_in() as usize;
        let produced = stream.total_out();
        let status = stream.process_vec(&input[consumed..], output, Action::Run)?;

        if matches!(status, Status::StreamEnd) {
            return Ok(stream.total_in() as usize);
        }
        if stream.total_in() as usize == consumed && stream.total_out() == produced {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "lzma stream ended before its end marker",
            ));
        }
    }
}
