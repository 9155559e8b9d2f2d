//! Decoder for enigma2 `.eit` event records (one DVB-SI EIT event per
//! file) into title, descriptions and timing.

mod annex_a2;
mod annex_c;
mod assembler;
mod cursor;
mod descriptor;
mod event;
mod iso_639;
mod record;
mod running_status;
mod store;
mod text;

pub mod error;
pub mod result;

pub use annex_a2::{AnnexA2, Codepage, Decoded};
pub use annex_c::{bcd, bcd_triple, duration_secs, mjd_to_ymd, to_date_time};
pub use assembler::{parse, Assembler};
pub use cursor::{ByteCursor, Cursor, Szer, TryNewer};
pub use descriptor::{
    ContentItem, DescDVB0x4A, DescDVB0x4D, DescDVB0x4E, DescDVB0x50, DescDVB0x54, DescDVB0x55,
    DescDVB0x69, Descriptor, ExtendedEventItem, Rating, RawDescriptor, Tag as DescriptorTag,
};
pub use event::Event;
pub use iso_639::{iso639_2to3, DEFAULT_LANGUAGE, ISO639};
pub use record::EventRecord;
pub use running_status::{RunningStatus, When};
pub use store::RecordStore;
pub use text::{fix_missing_line_breaks, merge, Fragment, Separator, TextField};
