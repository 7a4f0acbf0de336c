//! Integration tests for chunked LZMA output.

use compress::lzma::{EXTENSION, compress_to_vec, decompress_to_vec};

fn text(len: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

// ============================================================================
// Single streams
// ============================================================================

#[test]
fn repetitive_text_shrinks_substantially() {
    let data = text(200_000);
    let compressed = compress_to_vec(&data).expect("compress");
    assert!(compressed.len() < data.len() / 10);
    assert_eq!(decompress_to_vec(&compressed).expect("decompress"), data);
}

// ============================================================================
// Chunked files
// ============================================================================

#[test]
fn short_final_chunk_decodes_to_exact_length() {
    let data = text(10_000 + 17);
    let mut file = Vec::new();
    for chunk in data.chunks(10_000) {
        file.extend(compress_to_vec(chunk).expect("compress"));
    }
    let decoded = decompress_to_vec(&file).expect("decompress");
    assert_eq!(decoded.len(), data.len());
    assert_eq!(decoded, data);
}

#[test]
fn extension_matches_container() {
    assert_eq!(EXTENSION, "lzma");
}
