//! Chunk-sequence walker
//!
//! Iterates chunks from just after the signature to the terminal `IEND`
//! chunk (inclusive), yielding each chunk with its stream offset and a
//! 1-based index. Index 0 is conceptually the signature and is never emitted.

use crate::{
    chunk::Chunk,
    cursor::ByteCursor,
    error::Result,
};

/// One walked chunk together with where it sits in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    /// 1-based chunk index (0 is reserved for the signature)
    pub index: usize,
    /// Byte offset of the chunk's length field from the start of the stream
    pub offset: u64,
    /// The decoded chunk
    pub chunk: Chunk,
}

/// Iterator over the chunks of a PNG stream.
///
/// Yields `Result<ChunkRecord>`; iteration ends after the `IEND` chunk has
/// been yielded, or after the first decode error (the walker is fused and
/// does not resume).
#[derive(Debug)]
pub struct ChunkWalker<'a> {
    cursor: ByteCursor<'a>,
    index: usize,
    done: bool,
}

impl<'a> ChunkWalker<'a> {
    /// Walk chunks starting at the cursor's current position (expected to be
    /// just past the 8-byte signature).
    pub fn new(cursor: ByteCursor<'a>) -> Self {
        Self {
            cursor,
            index: 0,
            done: false,
        }
    }
}

impl Iterator for ChunkWalker<'_> {
    type Item = Result<ChunkRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let offset = self.cursor.position();
        let chunk = match Chunk::decode(&mut self.cursor) {
            Ok(chunk) => chunk,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        if chunk.is_end() {
            self.done = true;
        }
        self.index += 1;

        Some(Ok(ChunkRecord {
            index: self.index,
            offset,
            chunk,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{build_stream, SIGNATURE_LEN};
    use crate::{chunk::Criticality, error::Error};

    #[test]
    fn walks_to_iend_inclusive() {
        let stream = build_stream(&[(*b"tEXt", b"Hello")]);
        let mut cursor = ByteCursor::new(&stream);
        cursor.seek_to(SIGNATURE_LEN).unwrap();

        let records: Vec<_> = ChunkWalker::new(cursor)
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(records.len(), 2);

        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].offset, SIGNATURE_LEN);
        assert_eq!(records[0].chunk.type_str(), "tEXt");
        assert_eq!(records[0].chunk.criticality(), Criticality::Ancillary);
        assert_eq!(records[0].chunk.data(), b"Hello");

        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].offset, SIGNATURE_LEN + 12 + 5);
        assert!(records[1].chunk.is_end());
        assert_eq!(records[1].chunk.criticality(), Criticality::Critical);
    }

    #[test]
    fn stops_after_iend_even_with_trailing_bytes() {
        let mut stream = build_stream(&[]);
        stream.extend_from_slice(b"garbage past the end chunk");
        let mut cursor = ByteCursor::new(&stream);
        cursor.seek_to(SIGNATURE_LEN).unwrap();

        let records: Vec<_> = ChunkWalker::new(cursor).collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].as_ref().unwrap().chunk.is_end());
    }

    #[test]
    fn fuses_after_decode_error() {
        // A lone truncated chunk header after the signature
        let mut stream = crate::test_utils::signature().to_vec();
        stream.extend_from_slice(&[0x00, 0x00]);
        let mut cursor = ByteCursor::new(&stream);
        cursor.seek_to(SIGNATURE_LEN).unwrap();

        let mut walker = ChunkWalker::new(cursor);
        assert!(matches!(walker.next(), Some(Err(Error::Truncated { .. }))));
        assert!(walker.next().is_none());
    }
}
