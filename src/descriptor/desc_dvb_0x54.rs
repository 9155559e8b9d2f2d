use std::fmt;

/// ETSI EN 300 468 V1.16.1
///
/// Content descriptor
#[derive(Clone)]
pub struct DescDVB0x54<'buf> {
    buf: &'buf [u8],
}

impl<'buf> DescDVB0x54<'buf> {
    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> DescDVB0x54<'buf> {
        DescDVB0x54 { buf }
    }

    /// `len / 2` genre classifications; an odd trailing byte is ignored
    #[inline(always)]
    pub fn items(&self) -> impl Iterator<Item = ContentItem> + 'buf {
        self.buf.chunks_exact(2).map(|b| ContentItem {
            level_1: (b[0] & 0xF0) >> 4,
            level_2: b[0] & 0x0F,
            user_byte: b[1],
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContentItem {
    pub level_1: u8,
    pub level_2: u8,
    pub user_byte: u8,
}

impl<'buf> fmt::Debug for DescDVB0x54<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":dvb-0x54")?;

        for item in self.items() {
            write!(
                f,
                " (:nibble 0x{:X}/0x{:X} :user 0x{:02X})",
                item.level_1, item.level_2, item.user_byte
            )?;
        }

        Ok(())
    }
}
