use std::fmt;

use crate::cursor::{ByteCursor, Cursor, Szer, TryNewer};
use crate::iso_639::ISO639;
use crate::result::Result;
use crate::text::TextField;

/// ETSI EN 300 468 V1.16.1
///
/// Extended event descriptor
///
/// A long description is split over several of these, numbered
/// `0..=last_descriptor_number` in broadcast order.
#[derive(Clone)]
pub struct DescDVB0x4E<'buf> {
    buf: &'buf [u8],
    language: ISO639,
    items: &'buf [u8],
    text: TextField<'buf>,
}

impl<'buf> DescDVB0x4E<'buf> {
    const HEADER_SZ: usize = 5;

    pub fn try_new(buf: &'buf [u8]) -> Result<DescDVB0x4E<'buf>> {
        let c = ByteCursor::new(buf);

        c.u8_at(0)?;
        let language = ISO639::try_from_bytes_3(&c, 1)?;

        let length_of_items = usize::from(c.u8_at(4)?);
        let items = c.bytes_at(Self::HEADER_SZ, length_of_items)?;

        let buf_pos_text_length = Self::HEADER_SZ + length_of_items;
        let text_length = usize::from(c.u8_at(buf_pos_text_length)?);
        let text = c.bytes_at(buf_pos_text_length + 1, text_length)?;

        Ok(DescDVB0x4E {
            buf,
            language,
            items,
            text: TextField::new(text),
        })
    }

    #[inline(always)]
    pub fn descriptor_number(&self) -> u8 {
        (self.buf[0] & 0xF0) >> 4
    }

    #[inline(always)]
    pub fn last_descriptor_number(&self) -> u8 {
        self.buf[0] & 0x0F
    }

    #[inline(always)]
    pub fn language(&self) -> ISO639 {
        self.language
    }

    #[inline(always)]
    pub fn items(&self) -> Cursor<'buf, Item<'buf>> {
        Cursor::new(self.items)
    }

    #[inline(always)]
    pub fn text(&self) -> &TextField<'buf> {
        &self.text
    }
}

impl<'buf> fmt::Debug for DescDVB0x4E<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#":dvb-0x4e (:number {}/{} :lang "{}""#,
            self.descriptor_number(),
            self.last_descriptor_number(),
            self.language
        )?;

        for resi in self.items() {
            match resi {
                Ok(item) => item.fmt(f)?,
                Err(err) => write!(f, " (error parse item: {})", err)?,
            }
        }

        write!(f, " :text {:?})", self.text)
    }
}

/// Key/value pair of the items loop ("Regie" / "Max Mustermann").
pub struct Item<'buf> {
    description: TextField<'buf>,
    item: TextField<'buf>,
    sz: usize,
}

impl<'buf> Item<'buf> {
    #[inline(always)]
    pub fn description(&self) -> &TextField<'buf> {
        &self.description
    }

    #[inline(always)]
    pub fn item(&self) -> &TextField<'buf> {
        &self.item
    }
}

impl<'buf> Szer for Item<'buf> {
    #[inline(always)]
    fn sz(&self) -> usize {
        self.sz
    }
}

impl<'buf> TryNewer<'buf> for Item<'buf> {
    const MIN_SZ: usize = 2;

    fn try_new(buf: &'buf [u8]) -> Result<Item<'buf>> {
        let c = ByteCursor::new(buf);

        let description_length = usize::from(c.u8_at(0)?);
        let description = c.bytes_at(1, description_length)?;

        let buf_pos_item_length = 1 + description_length;
        let item_length = usize::from(c.u8_at(buf_pos_item_length)?);
        let item = c.bytes_at(buf_pos_item_length + 1, item_length)?;

        Ok(Item {
            description: TextField::new(description),
            item: TextField::new(item),
            sz: buf_pos_item_length + 1 + item_length,
        })
    }
}

impl<'buf> fmt::Debug for Item<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " (:item {:?} {:?})", self.description, self.item)
    }
}
