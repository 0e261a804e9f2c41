use std::io::{Read, Seek, SeekFrom};

use super::SourceError;

/// Sequential little-endian reader over a seekable byte source.
///
/// The cursor tracks its own position and the source length, so truncation
/// and out-of-range conditions surface as structured errors with exact byte
/// counts instead of bare I/O failures.
pub struct Cursor<R> {
    inner: R,
    pos: u64,
    len: u64,
}

impl<R: Read + Seek> Cursor<R> {
    /// Wrap a byte source, measuring its length and rewinding to the start.
    ///
    /// # Errors
    /// Returns [`SourceError::Io`] when the source cannot be seeked.
    pub fn new(mut inner: R) -> Result<Self, SourceError> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, pos: 0, len })
    }

    /// Current position, in bytes from the start of the source.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True when the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let needed = buf.len() as u64;
        let available = self.len - self.pos;
        if needed > available {
            return Err(SourceError::Truncated {
                needed,
                offset: self.pos,
                available,
            });
        }
        self.inner.read_exact(buf)?;
        self.pos += needed;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, SourceError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, SourceError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(i8::from_le_bytes(buf))
    }

    pub fn read_u16(&mut self) -> Result<u16, SourceError> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_i16(&mut self) -> Result<i16, SourceError> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> Result<u32, SourceError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_i32(&mut self) -> Result<i32, SourceError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    /// Read `count` raw bytes as an opaque blob.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SourceError> {
        let mut buf = vec![0u8; count];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Advance past `count` bytes without decoding them.
    ///
    /// Skipping zero bytes is a no-op that touches nothing. Skipping exactly
    /// to the end of the source succeeds; skipping past it fails with
    /// [`SourceError::Truncated`].
    pub fn skip(&mut self, count: u64) -> Result<(), SourceError> {
        if count == 0 {
            return Ok(());
        }
        let available = self.len - self.pos;
        if count > available {
            return Err(SourceError::Truncated {
                needed: count,
                offset: self.pos,
                available,
            });
        }
        self.inner.seek(SeekFrom::Start(self.pos + count))?;
        self.pos += count;
        Ok(())
    }

    /// Move to an absolute offset from the start of the source.
    ///
    /// Offsets up to and including the source length are valid; anything
    /// beyond fails with [`SourceError::OutOfBounds`].
    pub fn seek_to(&mut self, offset: u64) -> Result<(), SourceError> {
        if offset > self.len {
            return Err(SourceError::OutOfBounds {
                target: offset,
                len: self.len,
            });
        }
        self.inner.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn over(bytes: &[u8]) -> Cursor<io::Cursor<Vec<u8>>> {
        Cursor::new(io::Cursor::new(bytes.to_vec())).expect("cursor over memory")
    }

    #[test]
    fn reads_little_endian_primitives() {
        let mut cursor = over(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xFF, 0x80]);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(cursor.read_u8().unwrap(), 0xFF);
        assert_eq!(cursor.read_i8().unwrap(), -128);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn reads_signed_values() {
        let mut cursor = over(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x80]);
        assert_eq!(cursor.read_i32().unwrap(), -1);
        assert_eq!(cursor.read_i16().unwrap(), -32768);
    }

    #[test]
    fn read_bytes_returns_the_exact_blob() {
        let mut cursor = over(&[1, 2, 3, 4, 5]);
        cursor.skip(1).unwrap();
        assert_eq!(cursor.read_bytes(3).unwrap(), vec![2, 3, 4]);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn short_read_reports_exact_counts() {
        let mut cursor = over(&[0xAA, 0xBB, 0xCC]);
        cursor.read_u8().unwrap();
        let err = cursor.read_u32().unwrap_err();
        assert!(matches!(
            err,
            SourceError::Truncated {
                needed: 4,
                offset: 1,
                available: 2,
            }
        ));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn skip_zero_is_a_no_op() {
        let mut cursor = over(&[]);
        cursor.skip(0).unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn skip_to_exact_end_succeeds() {
        let mut cursor = over(&[1, 2, 3]);
        cursor.skip(3).unwrap();
        assert_eq!(cursor.position(), 3);
        assert!(matches!(
            cursor.skip(1).unwrap_err(),
            SourceError::Truncated {
                needed: 1,
                offset: 3,
                available: 0,
            }
        ));
    }

    #[test]
    fn seek_bounds_are_inclusive_of_the_length() {
        let mut cursor = over(&[1, 2, 3, 4]);
        cursor.seek_to(4).unwrap();
        assert_eq!(cursor.position(), 4);
        cursor.seek_to(1).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 2);
        let err = cursor.seek_to(5).unwrap_err();
        assert!(matches!(err, SourceError::OutOfBounds { target: 5, len: 4 }));
    }

    #[test]
    fn empty_source_reports_as_empty() {
        let cursor = over(&[]);
        assert!(cursor.is_empty());
        assert_eq!(cursor.len(), 0);
    }
}
