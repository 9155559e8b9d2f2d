/// ETSI EN 300 468 V1.16.1 table 12, the subset found in EIT event loops
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tag {
    Linkage,
    ShortEvent,
    ExtendedEvent,
    Component,
    Content,
    ParentalRating,
    PDC,

    Other(u8),
}

impl From<u8> for Tag {
    fn from(d: u8) -> Self {
        match d {
            0x4A => Tag::Linkage,
            0x4D => Tag::ShortEvent,
            0x4E => Tag::ExtendedEvent,
            0x50 => Tag::Component,
            0x54 => Tag::Content,
            0x55 => Tag::ParentalRating,
            0x69 => Tag::PDC,

            _ => Tag::Other(d),
        }
    }
}

impl From<Tag> for u8 {
    fn from(t: Tag) -> u8 {
        match t {
            Tag::Linkage => 0x4A,
            Tag::ShortEvent => 0x4D,
            Tag::ExtendedEvent => 0x4E,
            Tag::Component => 0x50,
            Tag::Content => 0x54,
            Tag::ParentalRating => 0x55,
            Tag::PDC => 0x69,

            Tag::Other(d) => d,
        }
    }
}
