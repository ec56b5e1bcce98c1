//! Repeating-key XOR transform for chunk payloads
//!
//! Length-preserving and involutive: applying the transform twice with the
//! same key returns the input. This obscures payload bytes from casual
//! inspection; it is not cryptographic security.

use crate::error::{Error, Result};

/// XOR `input` against `key`, repeating the key as needed.
///
/// The same call serves both the encode and decode sides. Fails with
/// [`Error::EmptyKey`] on a zero-length key rather than passing data through
/// unchanged.
pub fn xor_transform(input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(Error::EmptyKey);
    }
    Ok(input
        .iter()
        .enumerate()
        .map(|(i, &byte)| byte ^ key[i % key.len()])
        .collect())
}
