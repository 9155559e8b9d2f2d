use std::fmt;

use crate::cursor::ByteCursor;
use crate::iso_639::ISO639;
use crate::result::Result;
use crate::text::TextField;

/// ETSI EN 300 468 V1.16.1
///
/// Short event descriptor
#[derive(Clone)]
pub struct DescDVB0x4D<'buf> {
    language: ISO639,
    event_name: TextField<'buf>,
    text: TextField<'buf>,
}

impl<'buf> DescDVB0x4D<'buf> {
    const HEADER_SZ: usize = 4;

    pub fn try_new(buf: &'buf [u8]) -> Result<DescDVB0x4D<'buf>> {
        let c = ByteCursor::new(buf);

        let language = ISO639::try_from_bytes_3(&c, 0)?;

        let event_name_length = usize::from(c.u8_at(3)?);
        let event_name = c.bytes_at(Self::HEADER_SZ, event_name_length)?;

        let buf_pos_text_length = Self::HEADER_SZ + event_name_length;
        let text_length = usize::from(c.u8_at(buf_pos_text_length)?);
        let text = c.bytes_at(buf_pos_text_length + 1, text_length)?;

        Ok(DescDVB0x4D {
            language,
            event_name: TextField::new(event_name),
            text: TextField::new(text),
        })
    }

    #[inline(always)]
    pub fn language(&self) -> ISO639 {
        self.language
    }

    #[inline(always)]
    pub fn event_name(&self) -> &TextField<'buf> {
        &self.event_name
    }

    #[inline(always)]
    pub fn text(&self) -> &TextField<'buf> {
        &self.text
    }
}

impl<'buf> fmt::Debug for DescDVB0x4D<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#":dvb-0x4d (:lang "{}" :event-name {:?} :text {:?})"#,
            self.language, self.event_name, self.text
        )
    }
}
