//! PNG chunk type and codec
//!
//! A chunk is the unit of the PNG container: a big-endian length, a 4-byte
//! type, `length` bytes of opaque data, and a CRC-32 over type + data. This
//! module decodes chunks faithfully (the stored CRC is mirrored, never
//! validated) and constructs new chunks with derived length and CRC only.

use crate::{
    cursor::ByteCursor,
    error::{Error, Result},
};
use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

/// Chunk type that terminates the chunk sequence
pub const END_CHUNK: [u8; 4] = *b"IEND";

/// Fixed per-chunk overhead: length (4) + type (4) + CRC (4)
pub const CHUNK_OVERHEAD: u64 = 12;

/// CRC-32 with the IEEE polynomial, as required for PNG chunks
const CRC32: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Classification of a chunk type by the case of its first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Uppercase first byte: required for correct interpretation
    Critical,
    /// Lowercase (or non-alphabetic) first byte: optional
    Ancillary,
}

impl Criticality {
    /// String representation, as shown in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Ancillary => "Ancillary",
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single PNG chunk
///
/// Invariant: `length == data.len()` and, for chunks built with
/// [`Chunk::new`], `crc` is freshly computed over type + data. Chunks decoded
/// from a stream carry whatever CRC the stream declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    length: u32,
    chunk_type: [u8; 4],
    data: Vec<u8>,
    crc: u32,
}

impl Chunk {
    /// Build a self-consistent chunk for writing.
    ///
    /// `length` is derived from the payload and `crc` is always computed
    /// here; neither is ever accepted from the caller. This is the only
    /// constructor for chunks that get emitted.
    pub fn new(chunk_type: [u8; 4], data: Vec<u8>) -> Result<Self> {
        let length = u32::try_from(data.len())
            .map_err(|_| Error::PayloadTooLarge { size: data.len() })?;
        let crc = compute_crc(&chunk_type, &data);
        Ok(Self {
            length,
            chunk_type,
            data,
            crc,
        })
    }

    /// Decode one chunk starting at the cursor's current position.
    ///
    /// The declared length is checked against the bytes actually remaining
    /// before any allocation, so a corrupt length field fails with
    /// [`Error::Truncated`] instead of requesting an oversized buffer. The
    /// stored CRC is mirrored as read, not recomputed: mismatched streams
    /// must still be reportable.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let length = cursor.read_u32_be()?;
        let chunk_type: [u8; 4] = cursor.read_array()?;

        // data + trailing CRC must fit in what's left
        let needed = length as u64 + 4;
        if needed > cursor.remaining() {
            return Err(Error::Truncated {
                offset: cursor.position(),
                needed,
                available: cursor.remaining(),
            });
        }

        let data = cursor.read_slice(length as u64)?.to_vec();
        let crc = cursor.read_u32_be()?;

        Ok(Self {
            length,
            chunk_type,
            data,
            crc,
        })
    }

    /// Serialize in wire order: length, type, data, CRC
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<BigEndian>(self.length)?;
        writer.write_all(&self.chunk_type)?;
        writer.write_all(&self.data)?;
        writer.write_u32::<BigEndian>(self.crc)?;
        Ok(())
    }

    /// Encoded size in bytes: always `12 + length`
    pub fn encoded_len(&self) -> u64 {
        CHUNK_OVERHEAD + self.length as u64
    }

    /// Declared data length
    pub fn length(&self) -> u32 {
        self.length
    }

    /// The 4 raw type bytes
    pub fn chunk_type(&self) -> [u8; 4] {
        self.chunk_type
    }

    /// The type as a big-endian u32 (storage representation)
    pub fn type_value(&self) -> u32 {
        u32::from_be_bytes(self.chunk_type)
    }

    /// The type bytes as text, each byte passed through verbatim.
    ///
    /// No replacement-character substitution: a malformed type must stay
    /// visible to the operator exactly as it appears on the stream.
    pub fn type_str(&self) -> String {
        self.chunk_type.iter().map(|&b| b as char).collect()
    }

    /// Chunk payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Stored CRC (mirrored from the stream for decoded chunks)
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Critical if the first type byte is ASCII uppercase
    pub fn criticality(&self) -> Criticality {
        if self.chunk_type[0].is_ascii_uppercase() {
            Criticality::Critical
        } else {
            Criticality::Ancillary
        }
    }

    /// True for the terminal `IEND` chunk
    pub fn is_end(&self) -> bool {
        self.chunk_type == END_CHUNK
    }
}

/// CRC-32 (IEEE) over the chunk type followed by the data
pub fn compute_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut digest = CRC32.digest();
    digest.update(chunk_type);
    digest.update(data);
    digest.finalize()
}
