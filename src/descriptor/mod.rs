mod tag;

mod desc_dvb_0x4a;
mod desc_dvb_0x4d;
mod desc_dvb_0x4e;
mod desc_dvb_0x50;
mod desc_dvb_0x54;
mod desc_dvb_0x55;
mod desc_dvb_0x69;

use std::fmt;

use crate::cursor::{Szer, TryNewer};
use crate::error::{Error, Kind as ErrorKind};
use crate::result::Result;

pub use self::desc_dvb_0x4a::DescDVB0x4A;
pub use self::desc_dvb_0x4d::DescDVB0x4D;
pub use self::desc_dvb_0x4e::{DescDVB0x4E, Item as ExtendedEventItem};
pub use self::desc_dvb_0x50::DescDVB0x50;
pub use self::desc_dvb_0x54::{ContentItem, DescDVB0x54};
pub use self::desc_dvb_0x55::{DescDVB0x55, Rating};
pub use self::desc_dvb_0x69::DescDVB0x69;
pub use self::tag::Tag;

/// One tag-length-value element of the descriptor loop.
#[derive(Clone)]
pub struct RawDescriptor<'buf> {
    buf: &'buf [u8],
}

impl<'buf> RawDescriptor<'buf> {
    const HEADER_SZ: usize = 2;

    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> RawDescriptor<'buf> {
        RawDescriptor { buf }
    }

    #[inline(always)]
    pub fn validate(&self) -> Result<()> {
        if self.buf.len() < Self::HEADER_SZ {
            Err(Error::new(ErrorKind::OutOfRange(Self::HEADER_SZ, self.buf.len())))
        } else if self.buf.len() < self.sz() {
            Err(Error::new(ErrorKind::OutOfRange(self.sz(), self.buf.len())))
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub fn tag(&self) -> Tag {
        Tag::from(self.buf[0])
    }

    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.buf[1]
    }

    /// seek
    #[inline(always)]
    pub fn buf_data(&self) -> &'buf [u8] {
        &self.buf[Self::HEADER_SZ..]
    }

    /// Decode the payload according to the tag.
    pub fn decode(&self) -> Result<Descriptor<'buf>> {
        let data = self.buf_data();

        Ok(match self.tag() {
            Tag::ShortEvent => Descriptor::ShortEvent(DescDVB0x4D::try_new(data)?),
            Tag::ExtendedEvent => Descriptor::ExtendedEvent(DescDVB0x4E::try_new(data)?),
            Tag::Component => Descriptor::Component(DescDVB0x50::try_new(data)?),
            Tag::Content => Descriptor::Content(DescDVB0x54::new(data)),
            Tag::Linkage => Descriptor::Linkage(DescDVB0x4A::try_new(data)?),
            Tag::ParentalRating => Descriptor::ParentalRating(DescDVB0x55::new(data)),
            Tag::PDC => Descriptor::PDC(DescDVB0x69::new(data)),
            Tag::Other(tag) => Descriptor::Unknown(tag, data),
        })
    }
}

impl<'buf> Szer for RawDescriptor<'buf> {
    #[inline(always)]
    fn sz(&self) -> usize {
        Self::HEADER_SZ + (self.len() as usize)
    }
}

impl<'buf> TryNewer<'buf> for RawDescriptor<'buf> {
    const MIN_SZ: usize = Self::HEADER_SZ;

    #[inline(always)]
    fn try_new(buf: &'buf [u8]) -> Result<RawDescriptor<'buf>> {
        let mut d = RawDescriptor::new(buf);
        d.validate()?;
        d.buf = &buf[..d.sz()]; // slice
        Ok(d)
    }
}

impl<'buf> fmt::Debug for RawDescriptor<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":desc (:tag {:?} :length {})", self.tag(), self.len())
    }
}

/// Decoded descriptor; `Unknown` keeps the payload of any tag this
/// crate does not interpret.
#[derive(Clone)]
pub enum Descriptor<'buf> {
    ShortEvent(DescDVB0x4D<'buf>),
    ExtendedEvent(DescDVB0x4E<'buf>),
    Component(DescDVB0x50<'buf>),
    Content(DescDVB0x54<'buf>),
    Linkage(DescDVB0x4A<'buf>),
    ParentalRating(DescDVB0x55<'buf>),
    PDC(DescDVB0x69<'buf>),

    Unknown(u8, &'buf [u8]),
}

impl<'buf> fmt::Debug for Descriptor<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::ShortEvent(d) => d.fmt(f),
            Descriptor::ExtendedEvent(d) => d.fmt(f),
            Descriptor::Component(d) => d.fmt(f),
            Descriptor::Content(d) => d.fmt(f),
            Descriptor::Linkage(d) => d.fmt(f),
            Descriptor::ParentalRating(d) => d.fmt(f),
            Descriptor::PDC(d) => d.fmt(f),
            Descriptor::Unknown(tag, data) => {
                write!(f, ":unknown (:tag 0x{:02X} :data {:02X?})", tag, data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn walk_loop() {
        let buf = hex!("55 04 44 45 55 09  69 03 F0 4C 98  80 01 FF");
        let descs: Vec<_> = Cursor::<RawDescriptor>::new(&buf)
            .map(|r| r.and_then(|d| d.decode()))
            .collect();

        assert_eq!(descs.len(), 3);
        assert_matches!(descs[0], Ok(Descriptor::ParentalRating(..)));
        assert_matches!(descs[1], Ok(Descriptor::PDC(..)));
        assert_matches!(descs[2], Ok(Descriptor::Unknown(0x80, data)) if data == &[0xFF][..]);
    }

    #[test]
    fn overrun_ends_loop() {
        let buf = hex!("80 01 FF  4D 20 44 45 55");
        let mut it = Cursor::<RawDescriptor>::new(&buf);

        assert_matches!(it.next(), Some(Ok(..)));
        assert_eq!(
            it.next().map(|r| r.unwrap_err()),
            Some(Error::new(ErrorKind::OutOfRange(34, 5)))
        );
        assert!(it.next().is_none());
    }

    #[test]
    fn trailing_byte_is_ignored() {
        let buf = hex!("80 00  4D");
        let descs: Vec<_> = Cursor::<RawDescriptor>::new(&buf).collect();

        assert_eq!(descs.len(), 1);
        assert!(descs[0].is_ok());
    }
}
