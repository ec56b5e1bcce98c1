//! Signature validation and the stream facade
//!
//! [`PngStream`] borrows a whole PNG byte buffer, checks the signature once,
//! and exposes the read-only walk plus the three splice operations. Every
//! mutation builds a brand-new output buffer; the source is never touched.

use crate::{
    chunk::Chunk,
    cipher::xor_transform,
    cursor::ByteCursor,
    error::{Error, Result},
    walk::ChunkWalker,
};

/// Length of the fixed PNG signature
pub const SIGNATURE_LEN: u64 = 8;

/// The canonical 8-byte PNG signature
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Check the 8-byte signature at the cursor's current position.
///
/// Only bytes 1..4 are compared against `"PNG"`, matching the format's
/// identifying marker. On success the cursor is left just past the
/// signature; on failure its position is not restored (the stream is
/// unusable either way).
pub fn validate_signature(cursor: &mut ByteCursor<'_>) -> Result<()> {
    let found: [u8; 8] = cursor.read_array().map_err(|_| Error::InvalidSignature {
        found: padded_head(cursor),
    })?;
    if &found[1..4] != b"PNG" {
        return Err(Error::InvalidSignature { found });
    }
    Ok(())
}

// Best-effort copy of the stream head for the error message when the buffer
// is shorter than a signature.
fn padded_head(cursor: &ByteCursor<'_>) -> [u8; 8] {
    let mut head = [0u8; 8];
    let mut probe = cursor.clone();
    let n = probe.remaining().min(8);
    if let Ok(bytes) = probe.read_slice(n) {
        head[..bytes.len()].copy_from_slice(bytes);
    }
    head
}

/// A validated, borrowed PNG byte stream.
///
/// Construction checks the signature and gates everything else; all
/// operations are pure transformations over the borrowed buffer.
#[derive(Debug, Clone, Copy)]
pub struct PngStream<'a> {
    data: &'a [u8],
}

impl<'a> PngStream<'a> {
    /// Wrap `data`, failing with [`Error::InvalidSignature`] if it does not
    /// start with the PNG marker.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        validate_signature(&mut cursor)?;
        Ok(Self { data })
    }

    /// Total stream length in bytes
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// True if the stream holds no bytes; pairs with [`len`](Self::len)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw bytes of the stream
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Iterate the chunk sequence, starting just after the signature
    pub fn chunks(&self) -> ChunkWalker<'a> {
        let mut cursor = ByteCursor::new(self.data);
        // Cannot fail: new() proved the buffer holds at least 8 bytes
        let _ = cursor.seek_to(SIGNATURE_LEN);
        ChunkWalker::new(cursor)
    }

    /// Insert a brand-new chunk at `offset`.
    ///
    /// The output is the original bytes up to `offset`, the encoded chunk,
    /// then the rest of the original stream: it grows by exactly
    /// `12 + payload.len()` bytes. The payload is spliced as given.
    pub fn insert_chunk(
        &self,
        offset: u64,
        chunk_type: [u8; 4],
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let at = self.checked_offset(offset)?;
        let chunk = Chunk::new(chunk_type, payload.to_vec())?;
        self.splice(at, &chunk, 0)
    }

    /// Insert a new chunk at `offset` with the payload XOR-obscured first.
    pub fn insert_ciphered(
        &self,
        offset: u64,
        chunk_type: [u8; 4],
        payload: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>> {
        let at = self.checked_offset(offset)?;
        let chunk = Chunk::new(chunk_type, xor_transform(payload, key)?)?;
        self.splice(at, &chunk, 0)
    }

    /// Rewrite the chunk at `offset` with its payload XOR-transformed.
    ///
    /// The chunk currently occupying `offset` is decoded, its data passed
    /// through the cipher, and a fresh chunk (same type, recomputed CRC)
    /// spliced over exactly the original `12 + length` byte span. The cipher
    /// is length-preserving, so the output is always the same size as the
    /// input.
    ///
    /// `offset` must point at the start of a chunk's length field; offsets
    /// obtained from a prior walk do. An in-bounds offset that lands inside a
    /// chunk misparses, which is the caller's responsibility.
    pub fn replace_ciphered(&self, offset: u64, key: &[u8]) -> Result<Vec<u8>> {
        let at = self.checked_offset(offset)?;

        let mut cursor = ByteCursor::new(self.data);
        cursor.seek_to(offset)?;
        let existing = Chunk::decode(&mut cursor)?;

        let replaced = existing.encoded_len() as usize;
        let chunk = Chunk::new(existing.chunk_type(), xor_transform(existing.data(), key)?)?;
        self.splice(at, &chunk, replaced)
    }

    // Reject patch targets outside the buffer up front; inserting right at
    // the end (after IEND) is still allowed.
    fn checked_offset(&self, offset: u64) -> Result<usize> {
        if offset > self.data.len() as u64 {
            return Err(Error::InvalidOffset {
                offset,
                len: self.data.len() as u64,
            });
        }
        Ok(offset as usize)
    }

    // Output = prefix up to `at`, the encoded chunk, then the original bytes
    // starting `replaced` bytes past `at`.
    fn splice(&self, at: usize, chunk: &Chunk, replaced: usize) -> Result<Vec<u8>> {
        let tail_start = at + replaced;
        let mut out =
            Vec::with_capacity(self.data.len() - replaced + chunk.encoded_len() as usize);
        out.extend_from_slice(&self.data[..at]);
        chunk.encode(&mut out)?;
        out.extend_from_slice(&self.data[tail_start..]);
        Ok(out)
    }
}
