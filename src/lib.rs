//! Chunk-level inspection and payload splicing for PNG byte streams.
//!
//! This crate walks the length-prefixed, CRC-protected chunk sequence of a
//! PNG stream without decoding any pixel data, and can insert or rewrite a
//! chunk payload (optionally obscured with a repeating-key XOR cipher) at a
//! caller-chosen byte offset, producing a new valid stream.
//!
//! # Design Principles
//!
//! - **Faithful mirroring**: chunks are decoded exactly as they appear;
//!   stored CRCs are reported, never rejected at parse time
//! - **Derived consistency**: every chunk this crate emits has its length and
//!   CRC computed from the payload, never taken from the caller
//! - **Pure splicing**: mutations build a brand-new output buffer from an
//!   unchanged prefix, the replacement region, and an unchanged suffix
//!
//! # Quick Start
//!
//! ```
//! use png_splice::PngStream;
//!
//! # fn main() -> png_splice::Result<()> {
//! let data = png_splice::test_utils::minimal_png();
//!
//! // Walk the chunk sequence
//! let png = PngStream::new(&data)?;
//! for record in png.chunks() {
//!     let record = record?;
//!     println!(
//!         "#{} at {:#04x}: {} ({}), {} bytes",
//!         record.index,
//!         record.offset,
//!         record.chunk.type_str(),
//!         record.chunk.criticality(),
//!         record.chunk.length(),
//!     );
//! }
//!
//! // Hide a payload in a new chunk just after the signature
//! let patched = png.insert_ciphered(8, *b"teSt", b"payload", b"key")?;
//! assert_eq!(patched.len(), data.len() + 12 + b"payload".len());
//! # Ok(())
//! # }
//! ```
//!
//! Offsets for [`PngStream::replace_ciphered`] must point at the start of an
//! existing chunk; obtain them from a prior walk.

mod chunk;
mod cipher;
mod cursor;
mod error;
mod stream;
mod walk;

pub use chunk::{compute_crc, Chunk, Criticality, CHUNK_OVERHEAD, END_CHUNK};
pub use cipher::xor_transform;
pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use stream::{validate_signature, PngStream, SIGNATURE, SIGNATURE_LEN};
pub use walk::{ChunkRecord, ChunkWalker};

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
