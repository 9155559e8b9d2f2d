use std::fmt;

use crate::iso_639::ISO639;

/// ETSI EN 300 468 V1.16.1
///
/// Parental rating descriptor
#[derive(Clone)]
pub struct DescDVB0x55<'buf> {
    buf: &'buf [u8],
}

impl<'buf> DescDVB0x55<'buf> {
    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> DescDVB0x55<'buf> {
        DescDVB0x55 { buf }
    }

    #[inline(always)]
    pub fn buf(&self) -> &'buf [u8] {
        self.buf
    }

    #[inline(always)]
    pub fn ratings(&self) -> impl Iterator<Item = Rating> + 'buf {
        self.buf.chunks_exact(4).map(|b| Rating {
            country: ISO639::new([b[0], b[1], b[2]]),
            rating: b[3],
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rating {
    /// ISO 3166 country code, read the same way as a language code
    pub country: ISO639,
    pub rating: u8,
}

impl Rating {
    /// 0x01..=0x0F encode "minimum age = rating + 3"
    pub fn min_age(&self) -> Option<u8> {
        match self.rating {
            0x01..=0x0F => Some(self.rating + 3),
            _ => None,
        }
    }
}

impl<'buf> fmt::Debug for DescDVB0x55<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":dvb-0x55")?;

        for r in self.ratings() {
            write!(f, r#" (:country "{}" :rating 0x{:02X})"#, r.country, r.rating)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DescDVB0x55;
    use hex_literal::hex;

    #[test]
    fn ratings() {
        let buf = hex!("44 45 55 09  46 52 41 00");
        let ratings: Vec<_> = DescDVB0x55::new(&buf).ratings().collect();

        assert_eq!(ratings.len(), 2);
        assert_eq!(format!("{}", ratings[0].country), "DEU");
        assert_eq!(ratings[0].min_age(), Some(12));
        assert_eq!(ratings[1].min_age(), None);
    }
}
