use std::fmt;

/// ETSI EN 300 468 V1.16.1
///
/// PDC descriptor
#[derive(Clone)]
pub struct DescDVB0x69<'buf> {
    buf: &'buf [u8],
}

impl<'buf> DescDVB0x69<'buf> {
    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> DescDVB0x69<'buf> {
        DescDVB0x69 { buf }
    }

    #[inline(always)]
    pub fn buf(&self) -> &'buf [u8] {
        self.buf
    }

    /// 20-bit programme identification label: day(5) month(4) hour(5) minute(6)
    pub fn programme_identification_label(&self) -> Option<u32> {
        if self.buf.len() < 3 {
            return None;
        }

        Some(
            (u32::from(self.buf[0] & 0x0F) << 16)
                | (u32::from(self.buf[1]) << 8)
                | u32::from(self.buf[2]),
        )
    }

    /// (day, month, hour, minute)
    pub fn pil(&self) -> Option<(u8, u8, u8, u8)> {
        self.programme_identification_label().map(|l| {
            (
                ((l >> 15) & 0x1F) as u8,
                ((l >> 11) & 0x0F) as u8,
                ((l >> 6) & 0x1F) as u8,
                (l & 0x3F) as u8,
            )
        })
    }
}

impl<'buf> fmt::Debug for DescDVB0x69<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pil() {
            Some((day, month, hour, minute)) => write!(
                f,
                ":dvb-0x69 (:pil {:02}.{:02}. {:02}:{:02})",
                day, month, hour, minute
            ),
            None => write!(f, ":dvb-0x69 ~"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DescDVB0x69;
    use hex_literal::hex;

    #[test]
    fn pil() {
        // 21.11. 20:15
        let label: u32 = (21 << 15) | (11 << 11) | (20 << 6) | 15;
        let buf = [
            0xF0 | (label >> 16) as u8,
            (label >> 8) as u8,
            label as u8,
        ];

        let d = DescDVB0x69::new(&buf);

        assert_eq!(d.programme_identification_label(), Some(label));
        assert_eq!(d.pil(), Some((21, 11, 20, 15)));
        assert_eq!(format!("{:?}", d), ":dvb-0x69 (:pil 21.11. 20:15)");
    }

    #[test]
    fn short() {
        assert_eq!(DescDVB0x69::new(&hex!("F0 4C")).pil(), None);
    }
}
