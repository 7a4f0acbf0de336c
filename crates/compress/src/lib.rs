#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` exposes the LZMA primitives used by the gcp pipeline. Files are
//! compressed chunk by chunk: every chunk becomes an independent `.lzma`
//! (LZMA-alone) stream, and a compressed file is the concatenation of those
//! streams in read order.
//!
//! # Design
//!
//! - [`lzma::compress_to_vec`] encodes one chunk at liblzma's preset 9
//!   ([`lzma::PRESET`]). The dictionary is sized to the chunk (never larger
//!   than the preset's dictionary), which keeps encoder memory proportional to
//!   the data actually held in memory.
//! - [`lzma::decompress_to_vec`] decodes any number of concatenated streams,
//!   so the whole output file can be decoded in one call.
//!
//! # Errors
//!
//! Encoder and decoder helpers return [`std::io::Result`]; liblzma failures are
//! converted through `xz2`'s `From<xz2::stream::Error> for io::Error`.
//!
//! # Examples
//!
//! ```
//! use compress::lzma::{compress_to_vec, decompress_to_vec};
//!
//! # fn main() -> std::io::Result<()> {
//! let mut file = compress_to_vec(b"first chunk, ")?;
//! file.extend(compress_to_vec(b"second chunk")?);
//!
//! assert_eq!(decompress_to_vec(&file)?, b"first chunk, second chunk");
//! # Ok(())
//! # }
//! ```

pub mod lzma;
