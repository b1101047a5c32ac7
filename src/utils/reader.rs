use crate::{AvlError, Result};

/// Forward-only cursor over an encoded byte slice.
///
/// Every read either yields the requested value or reports the offset at
/// which the input ran out; it never reads past the end of the slice.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset
    #[inline]
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed
    #[inline]
    pub(crate) const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a little-endian `i32`
    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        self.read_array::<4>().map(i32::from_le_bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let bytes = self
            .buf
            .get(self.pos..end)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(AvlError::UnexpectedEof { offset: self.pos })?;
        self.pos = end;
        Ok(bytes)
    }
}
