use std::fmt;

use crate::cursor::ByteCursor;
use crate::iso_639::ISO639;
use crate::result::Result;
use crate::text::TextField;

/// ETSI EN 300 468 V1.16.1
///
/// Component descriptor
#[derive(Clone)]
pub struct DescDVB0x50<'buf> {
    buf: &'buf [u8],
    language: ISO639,
    text: TextField<'buf>,
}

impl<'buf> DescDVB0x50<'buf> {
    const HEADER_SZ: usize = 6;

    pub fn try_new(buf: &'buf [u8]) -> Result<DescDVB0x50<'buf>> {
        let c = ByteCursor::new(buf);

        c.bytes_at(0, 3)?;
        let language = ISO639::try_from_bytes_3(&c, 3)?;

        Ok(DescDVB0x50 {
            buf,
            language,
            text: TextField::new(c.rest_at(Self::HEADER_SZ)),
        })
    }

    #[inline(always)]
    pub fn stream_content_ext(&self) -> u8 {
        (self.buf[0] & 0xF0) >> 4
    }

    #[inline(always)]
    pub fn stream_content(&self) -> u8 {
        self.buf[0] & 0x0F
    }

    #[inline(always)]
    pub fn component_type(&self) -> u8 {
        self.buf[1]
    }

    #[inline(always)]
    pub fn component_tag(&self) -> u8 {
        self.buf[2]
    }

    #[inline(always)]
    pub fn language(&self) -> ISO639 {
        self.language
    }

    #[inline(always)]
    pub fn text(&self) -> &TextField<'buf> {
        &self.text
    }
}

impl<'buf> fmt::Debug for DescDVB0x50<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#":dvb-0x50 (:stream-content 0x{:X}/0x{:X} :component-type 0x{:02X} :component-tag {} :lang "{}" :text {:?})"#,
            self.stream_content_ext(),
            self.stream_content(),
            self.component_type(),
            self.component_tag(),
            self.language,
            self.text,
        )
    }
}
