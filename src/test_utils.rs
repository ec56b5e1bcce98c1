//! Synthetic PNG streams for tests
//!
//! Builders that assemble minimal, well-formed streams in memory so tests
//! never depend on fixture files.

use crate::{chunk::Chunk, stream::SIGNATURE};

pub use crate::stream::SIGNATURE_LEN;

/// The canonical 8-byte signature
pub fn signature() -> [u8; 8] {
    SIGNATURE
}

/// Encode a single well-formed chunk (derived length and CRC)
pub fn chunk_bytes(chunk_type: [u8; 4], data: &[u8]) -> Vec<u8> {
    let chunk = Chunk::new(chunk_type, data.to_vec()).expect("test payload fits a chunk");
    let mut out = Vec::with_capacity(chunk.encoded_len() as usize);
    chunk.encode(&mut out).expect("encoding into a Vec");
    out
}

/// Build a full stream: signature, the given chunks in order, then `IEND`
pub fn build_stream(chunks: &[([u8; 4], &[u8])]) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    for (chunk_type, data) in chunks {
        out.extend_from_slice(&chunk_bytes(*chunk_type, data));
    }
    out.extend_from_slice(&chunk_bytes(*b"IEND", &[]));
    out
}

/// Smallest interesting stream: one `tEXt` chunk ("Hello") plus `IEND`
pub fn minimal_png() -> Vec<u8> {
    build_stream(&[(*b"tEXt", b"Hello")])
}
