//! Bounded cursor over an in-memory byte buffer

use crate::error::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

/// A seekable, readable view over a borrowed byte buffer.
///
/// Reads never grow or wrap: a read past the end fails with
/// [`Error::Truncated`], a seek outside the buffer with
/// [`Error::InvalidOffset`]. The cursor also implements [`Read`] and [`Seek`]
/// so it can be handed to generic stream consumers.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: u64,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes left between the current position and the end of the buffer
    pub fn remaining(&self) -> u64 {
        (self.buf.len() as u64).saturating_sub(self.pos)
    }

    /// Total buffer length
    pub fn len(&self) -> u64 {
        self.buf.len() as u64
    }

    /// True if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Move to an absolute offset; the target must lie within the buffer
    /// (the end position itself is valid).
    pub fn seek_to(&mut self, offset: u64) -> Result<u64> {
        if offset > self.buf.len() as u64 {
            return Err(Error::InvalidOffset {
                offset,
                len: self.buf.len() as u64,
            });
        }
        self.pos = offset;
        Ok(self.pos)
    }

    /// Borrow the next `n` bytes and advance past them
    pub fn read_slice(&mut self, n: u64) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::Truncated {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let start = self.pos as usize;
        let end = start + n as usize;
        self.pos = end as u64;
        Ok(&self.buf[start..end])
    }

    /// Read a fixed-size array and advance past it
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_slice(N as u64)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a big-endian u32 and advance past it
    pub fn read_u32_be(&mut self) -> Result<u32> {
        // Checked up front so a failed read leaves the cursor where it was,
        // like read_slice
        if self.remaining() < 4 {
            return Err(Error::Truncated {
                offset: self.pos,
                needed: 4,
                available: self.remaining(),
            });
        }
        ReadBytesExt::read_u32::<BigEndian>(self).map_err(Error::from)
    }
}

impl Read for ByteCursor<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // A position seeked past the end reads as EOF, like std::io::Cursor
        if self.pos >= self.buf.len() as u64 {
            return Ok(0);
        }
        let n = (buf.len() as u64).min(self.remaining()) as usize;
        let start = self.pos as usize;
        buf[..n].copy_from_slice(&self.buf[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for ByteCursor<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, delta) = match pos {
            SeekFrom::Start(offset) => {
                self.pos = offset;
                return Ok(self.pos);
            }
            SeekFrom::End(delta) => (self.buf.len() as i64, delta),
            SeekFrom::Current(delta) => (self.pos as i64, delta),
        };
        let target = base
            .checked_add(delta)
            .filter(|t| *t >= 0)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "seek to a negative offset")
            })?;
        self.pos = target as u64;
        Ok(self.pos)
    }
}
