//! Error types for png-splice

use std::io;

/// Result type for png-splice operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting or patching a PNG stream
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stream does not start with the PNG signature
    #[error("invalid signature: expected PNG marker, found {found:02X?}")]
    InvalidSignature {
        /// The 8 bytes actually present at the start of the stream
        found: [u8; 8],
    },

    /// A read ran past the end of the buffer
    #[error("truncated stream at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// Seek or patch target outside the buffer
    #[error("invalid offset {offset}: stream is {len} bytes")]
    InvalidOffset { offset: u64, len: u64 },

    /// Payload exceeds the 32-bit chunk length field
    #[error("payload too large: {size} bytes exceeds the chunk length field")]
    PayloadTooLarge { size: usize },

    /// Cipher invoked with a zero-length key
    #[error("cipher key must not be empty")]
    EmptyKey,
}
