//! Chunked read-transform-write loop shared by every task.

use std::borrow::Cow;
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ChunkTransformer, TransformError};

/// Transforms applied to each chunk, in order.
#[derive(Clone, Copy, Default)]
pub(crate) struct Stages<'a> {
    pub(crate) compressor: Option<&'a dyn ChunkTransformer>,
    pub(crate) cipher: Option<&'a dyn ChunkTransformer>,
}

impl Stages<'_> {
    fn apply<'c>(&self, chunk: &'c [u8]) -> Result<Cow<'c, [u8]>, TransformError> {
        let mut data = Cow::Borrowed(chunk);
        for stage in [self.compressor, self.cipher].into_iter().flatten() {
            data = Cow::Owned(stage.transform(&data)?);
        }
        Ok(data)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct StreamTotals {
    pub(crate) bytes_in: u64,
    pub(crate) bytes_out: u64,
    pub(crate) chunks: u64,
}

#[derive(Debug)]
pub(crate) enum StreamError {
    Read(io::Error),
    Write(io::Error),
    Transform(TransformError),
    Cancelled,
}

/// Reads until `buf` is full or the reader is exhausted, retrying
/// interrupted reads. Returns the number of bytes read.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

/// Streams `reader` into `writer` one `buffer`-sized chunk at a time.
///
/// `cancel` is checked before every chunk.
pub(crate) fn stream_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
    stages: Stages<'_>,
    cancel: &AtomicBool,
) -> Result<StreamTotals, StreamError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut totals = StreamTotals::default();
    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(StreamError::Cancelled);
        }

        let read = read_full(reader, buffer).map_err(StreamError::Read)?;
        if read == 0 {
            break;
        }

        let chunk = stages
            .apply(&buffer[..read])
            .map_err(StreamError::Transform)?;
        writer.write_all(&chunk).map_err(StreamError::Write)?;

        totals.bytes_in += read as u64;
        totals.bytes_out += chunk.len() as u64;
        totals.chunks += 1;
    }
    writer.flush().map_err(StreamError::Write)?;
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LzmaChunkCompressor;
    use std::sync::Mutex;

    /// Yields at most `step` bytes per read and interrupts every other call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let len = self.step.min(buf.len()).min(self.data.len());
            buf[..len].copy_from_slice(&self.data[..len]);
            self.data = &self.data[len..];
            Ok(len)
        }
    }

    /// Records the length of every chunk it sees.
    #[derive(Default)]
    struct Recorder(Mutex<Vec<usize>>);

    impl ChunkTransformer for Recorder {
        fn transform(&self, chunk: &[u8]) -> Result<Vec<u8>, TransformError> {
            self.0.lock().expect("lock").push(chunk.len());
            Ok(chunk.to_vec())
        }
    }

    struct Failing;

    impl ChunkTransformer for Failing {
        fn transform(&self, _chunk: &[u8]) -> Result<Vec<u8>, TransformError> {
            Err(TransformError::Rejected {
                stage: "test",
                reason: "refused".to_owned(),
            })
        }
    }

    #[test]
    fn read_full_fills_across_short_and_interrupted_reads() {
        let data = [7_u8; 10];
        let mut reader = Trickle {
            data: &data,
            step: 3,
            interrupt: false,
        };
        let mut buf = [0_u8; 8];
        assert_eq!(read_full(&mut reader, &mut buf).expect("read"), 8);
        assert_eq!(read_full(&mut reader, &mut buf).expect("read"), 2);
        assert_eq!(read_full(&mut reader, &mut buf).expect("read"), 0);
    }

    #[test]
    fn plain_copy_reproduces_input() {
        let data: Vec<u8> = (0..1000_u32).map(|i| (i % 256) as u8).collect();
        let mut output = Vec::new();
        let mut buffer = vec![0; 64];
        let totals = stream_chunks(
            &mut data.as_slice(),
            &mut output,
            &mut buffer,
            Stages::default(),
            &AtomicBool::new(false),
        )
        .expect("stream");
        assert_eq!(output, data);
        assert_eq!(totals.bytes_in, 1000);
        assert_eq!(totals.bytes_out, 1000);
        assert_eq!(totals.chunks, 16);
    }

    #[test]
    fn final_chunk_is_not_padded() {
        let recorder = Recorder::default();
        let data = vec![1_u8; 25];
        let mut output = Vec::new();
        let mut buffer = vec![0; 10];
        stream_chunks(
            &mut data.as_slice(),
            &mut output,
            &mut buffer,
            Stages {
                compressor: None,
                cipher: Some(&recorder),
            },
            &AtomicBool::new(false),
        )
        .expect("stream");
        assert_eq!(*recorder.0.lock().expect("lock"), vec![10, 10, 5]);
        assert_eq!(output.len(), 25);
    }

    #[test]
    fn compressed_chunks_concatenate_to_decodable_output() {
        let data = test_support::noise(5000);
        let compressor = LzmaChunkCompressor;
        let mut output = Vec::new();
        let mut buffer = vec![0; 1024];
        let totals = stream_chunks(
            &mut data.as_slice(),
            &mut output,
            &mut buffer,
            Stages {
                compressor: Some(&compressor),
                cipher: None,
            },
            &AtomicBool::new(false),
        )
        .expect("stream");
        assert_eq!(totals.chunks, 5);
        assert_eq!(totals.bytes_out, output.len() as u64);
        assert_eq!(compress::lzma::decompress_to_vec(&output).expect("decode"), data);
    }

    #[test]
    fn transformer_failure_stops_the_stream() {
        let mut output = Vec::new();
        let mut buffer = vec![0; 4];
        let result = stream_chunks(
            &mut &b"abcdefgh"[..],
            &mut output,
            &mut buffer,
            Stages {
                compressor: None,
                cipher: Some(&Failing),
            },
            &AtomicBool::new(false),
        );
        assert!(matches!(result, Err(StreamError::Transform(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn cancellation_is_observed_before_reading() {
        let mut output = Vec::new();
        let mut buffer = vec![0; 4];
        let result = stream_chunks(
            &mut &b"abcdefgh"[..],
            &mut output,
            &mut buffer,
            Stages::default(),
            &AtomicBool::new(true),
        );
        assert!(matches!(result, Err(StreamError::Cancelled)));
    }
}
