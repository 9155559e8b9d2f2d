use std::marker::PhantomData;

use crate::error::{Error, Kind as ErrorKind};
use crate::result::Result;

/// Random-access, bounds-checked reads over a borrowed buffer.
///
/// Nothing advances implicitly: every read names its absolute offset,
/// so overlapping ranges (a length byte that both locates and bounds a
/// field) can be read as many times as needed.
#[derive(Clone, Copy)]
pub struct ByteCursor<'buf> {
    buf: &'buf [u8],
}

impl<'buf> ByteCursor<'buf> {
    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> ByteCursor<'buf> {
        ByteCursor { buf }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline(always)]
    fn check(&self, offset: usize, len: usize) -> Result<usize> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| Error::new(ErrorKind::OutOfRange(usize::MAX, self.buf.len())))?;

        if end > self.buf.len() {
            Err(Error::new(ErrorKind::OutOfRange(end, self.buf.len())))
        } else {
            Ok(end)
        }
    }

    #[inline(always)]
    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        self.check(offset, 1)?;
        Ok(self.buf[offset])
    }

    #[inline(always)]
    pub fn u16_be_at(&self, offset: usize) -> Result<u16> {
        self.check(offset, 2)?;
        Ok((u16::from(self.buf[offset]) << 8) | u16::from(self.buf[offset + 1]))
    }

    #[inline(always)]
    pub fn bytes_at(&self, offset: usize, len: usize) -> Result<&'buf [u8]> {
        let end = self.check(offset, len)?;
        Ok(&self.buf[offset..end])
    }

    /// everything from `offset` to the end; empty when `offset` is past it
    #[inline(always)]
    pub fn rest_at(&self, offset: usize) -> &'buf [u8] {
        if offset >= self.buf.len() {
            &self.buf[self.buf.len()..]
        } else {
            &self.buf[offset..]
        }
    }
}

pub trait Szer {
    fn sz(&self) -> usize;
}

pub trait TryNewer<'buf> {
    /// minimal amount of bytes an element starts with;
    /// a shorter tail ends the iteration silently
    const MIN_SZ: usize;

    fn try_new(buf: &'buf [u8]) -> Result<Self>
    where
        Self: Sized;
}

/// Walks a region of consecutive self-delimiting elements.
///
/// A malformed element is yielded once as an error and the rest of the
/// region is dropped.
pub struct Cursor<'buf, T> {
    buf: &'buf [u8],
    phantom: PhantomData<T>,
}

impl<'buf, T> Cursor<'buf, T> {
    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> Cursor<'buf, T> {
        Cursor {
            buf,
            phantom: PhantomData,
        }
    }

    #[inline(always)]
    fn buf_drain(&mut self) {
        self.buf = &self.buf[self.buf.len()..];
    }
}

impl<'buf, T> Iterator for Cursor<'buf, T>
where
    T: TryNewer<'buf> + Szer,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.len() < T::MIN_SZ {
            self.buf_drain();
            return None;
        }

        let row = match T::try_new(self.buf) {
            Ok(row) => row,
            Err(e) => {
                self.buf_drain();
                return Some(Err(e));
            }
        };

        // seek buf
        if self.buf.len() > row.sz() {
            self.buf = &self.buf[row.sz()..];
        } else {
            self.buf_drain();
        }

        Some(Ok(row))
    }
}

#[cfg(test)]
mod tests {
    use super::ByteCursor;
    use crate::error::{Error, Kind as ErrorKind};

    #[test]
    fn reads_overlapping_ranges() {
        let buf = [0x4D, 0x03, 0xAA, 0xBB, 0xCC];
        let c = ByteCursor::new(&buf);

        assert_eq!(c.u8_at(1).unwrap(), 3);
        assert_eq!(c.u16_be_at(2).unwrap(), 0xAABB);
        assert_eq!(c.bytes_at(2, usize::from(c.u8_at(1).unwrap())).unwrap(), &buf[2..]);
        assert_eq!(c.bytes_at(3, 2).unwrap(), &[0xBB, 0xCC]);
    }

    #[test]
    fn err_out_of_range() {
        let buf = [0x00, 0x01];
        let c = ByteCursor::new(&buf);

        assert_eq!(
            c.u16_be_at(1).unwrap_err(),
            Error::new(ErrorKind::OutOfRange(3, 2))
        );
        assert_eq!(
            c.bytes_at(0, 3).unwrap_err(),
            Error::new(ErrorKind::OutOfRange(3, 2))
        );
        assert!(c.bytes_at(2, 0).unwrap().is_empty());
        assert!(c.u8_at(usize::MAX).is_err());
    }

    #[test]
    fn rest_at_clips() {
        let buf = [1, 2, 3];
        let c = ByteCursor::new(&buf);

        assert_eq!(c.rest_at(1), &[2, 3]);
        assert!(c.rest_at(7).is_empty());
    }
}
