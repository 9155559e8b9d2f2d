use std::fmt;

use crate::cursor::ByteCursor;
use crate::result::Result;

/// ETSI EN 300 468 V1.16.1
///
/// Linkage descriptor
#[derive(Clone)]
pub struct DescDVB0x4A<'buf> {
    buf: &'buf [u8],
}

impl<'buf> DescDVB0x4A<'buf> {
    const HEADER_SZ: usize = 7;

    pub fn try_new(buf: &'buf [u8]) -> Result<DescDVB0x4A<'buf>> {
        ByteCursor::new(buf).bytes_at(0, Self::HEADER_SZ)?;
        Ok(DescDVB0x4A { buf })
    }

    #[inline(always)]
    pub fn transport_stream_id(&self) -> u16 {
        (u16::from(self.buf[0]) << 8) | u16::from(self.buf[1])
    }

    #[inline(always)]
    pub fn original_network_id(&self) -> u16 {
        (u16::from(self.buf[2]) << 8) | u16::from(self.buf[3])
    }

    #[inline(always)]
    pub fn service_id(&self) -> u16 {
        (u16::from(self.buf[4]) << 8) | u16::from(self.buf[5])
    }

    #[inline(always)]
    pub fn linkage_type(&self) -> u8 {
        self.buf[6]
    }

    /// linkage-type specific remainder
    #[inline(always)]
    pub fn private_data(&self) -> &'buf [u8] {
        &self.buf[Self::HEADER_SZ..]
    }
}

impl<'buf> fmt::Debug for DescDVB0x4A<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ":dvb-0x4a (:tsid {} :onid {} :sid {} :linkage-type 0x{:02X} :private-sz {})",
            self.transport_stream_id(),
            self.original_network_id(),
            self.service_id(),
            self.linkage_type(),
            self.private_data().len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DescDVB0x4A;
    use crate::error::{Error, Kind as ErrorKind};
    use hex_literal::hex;

    #[test]
    fn parse() {
        let buf = hex!("04 31 00 01 6D 66 0D AA");
        let d = DescDVB0x4A::try_new(&buf).unwrap();

        assert_eq!(d.transport_stream_id(), 1073);
        assert_eq!(d.original_network_id(), 1);
        assert_eq!(d.service_id(), 28006);
        assert_eq!(d.linkage_type(), 0x0D);
        assert_eq!(d.private_data(), &[0xAA]);
    }

    #[test]
    fn err_short() {
        assert_eq!(
            DescDVB0x4A::try_new(&hex!("04 31 00 01")).unwrap_err(),
            Error::new(ErrorKind::OutOfRange(7, 4))
        );
    }
}
