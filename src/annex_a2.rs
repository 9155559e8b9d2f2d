//! ETSI EN 300 468 Annex A.2: selection of character table
use std::fmt;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::{Error, Kind as ErrorKind};

/// Table A.3 character coding tables reachable through the first byte
/// of a text field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Codepage {
    IsoIec8859_5,
    IsoIec8859_6,
    IsoIec8859_7,
    IsoIec8859_8,
    IsoIec8859_9,
    IsoIec8859_10,
    IsoIec8859_11,
    IsoIec8859_13,
    IsoIec8859_14,
    IsoIec8859_15,

    Utf8encodingOfIsoIec10646,

    /// 0x10 (table a.4), 0x11 (ucs-2), 0x12 (ks x 1001), 0x13 (gb-2312),
    /// 0x14 (big5), 0x1F (encoding_type_id)
    Unresolved(u8),
}

impl Codepage {
    /// Maps a selector byte. Anything without an entry is not a selector
    /// and belongs to the text itself.
    pub fn from_selector(d: u8) -> Option<Codepage> {
        Some(match d {
            0x01 => Codepage::IsoIec8859_5,
            0x02 => Codepage::IsoIec8859_6,
            0x03 => Codepage::IsoIec8859_7,
            0x04 => Codepage::IsoIec8859_8,
            0x05 => Codepage::IsoIec8859_9,
            0x06 => Codepage::IsoIec8859_10,
            0x07 => Codepage::IsoIec8859_11,

            0x09 => Codepage::IsoIec8859_13,
            0x0A => Codepage::IsoIec8859_14,
            0x0B => Codepage::IsoIec8859_15,

            // FIXME: aliased for compatibility with existing recordings;
            // table a.3 lists these as reserved
            0x0C..=0x0E => Codepage::IsoIec8859_15,

            0x15 => Codepage::Utf8encodingOfIsoIec10646,

            0x10..=0x14 | 0x1F => Codepage::Unresolved(d),

            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Codepage::IsoIec8859_5 => "iso-8859-5",
            Codepage::IsoIec8859_6 => "iso-8859-6",
            Codepage::IsoIec8859_7 => "iso-8859-7",
            Codepage::IsoIec8859_8 => "iso-8859-8",
            Codepage::IsoIec8859_9 => "iso-8859-9",
            Codepage::IsoIec8859_10 => "iso-8859-10",
            Codepage::IsoIec8859_11 => "iso-8859-11",
            Codepage::IsoIec8859_13 => "iso-8859-13",
            Codepage::IsoIec8859_14 => "iso-8859-14",
            Codepage::IsoIec8859_15 => "iso-8859-15",
            Codepage::Utf8encodingOfIsoIec10646 => "utf-8",
            Codepage::Unresolved(0x10) => "iso-8859 (table a.4)",
            Codepage::Unresolved(0x11) => "iso-10646 (ucs-2)",
            Codepage::Unresolved(0x12) => "ks x 1001-2004",
            Codepage::Unresolved(0x13) => "gb-2312-1980",
            Codepage::Unresolved(0x14) => "big5",
            Codepage::Unresolved(..) => "encoding_type_id",
        }
    }

    /// iso-8859-9 and iso-8859-11 resolve to their WHATWG supersets
    /// (windows-1254, windows-874).
    pub fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Codepage::IsoIec8859_5 => Some(encoding_rs::ISO_8859_5),
            Codepage::IsoIec8859_6 => Some(encoding_rs::ISO_8859_6),
            Codepage::IsoIec8859_7 => Some(encoding_rs::ISO_8859_7),
            Codepage::IsoIec8859_8 => Some(encoding_rs::ISO_8859_8),
            Codepage::IsoIec8859_9 => Some(encoding_rs::WINDOWS_1254),
            Codepage::IsoIec8859_10 => Some(encoding_rs::ISO_8859_10),
            Codepage::IsoIec8859_11 => Some(encoding_rs::WINDOWS_874),
            Codepage::IsoIec8859_13 => Some(encoding_rs::ISO_8859_13),
            Codepage::IsoIec8859_14 => Some(encoding_rs::ISO_8859_14),
            Codepage::IsoIec8859_15 => Some(encoding_rs::ISO_8859_15),
            Codepage::Utf8encodingOfIsoIec10646 => Some(encoding_rs::UTF_8),

            // best-effort
            Codepage::Unresolved(0x11) => Some(encoding_rs::UTF_16BE),
            Codepage::Unresolved(0x12) => Some(encoding_rs::EUC_KR),
            Codepage::Unresolved(0x13) => Some(encoding_rs::GBK),
            Codepage::Unresolved(0x14) => Some(encoding_rs::BIG5),
            Codepage::Unresolved(..) => None,
        }
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of decoding one text field.
#[derive(Debug, PartialEq)]
pub enum Decoded {
    Full(String),
    /// best-effort text (replacement characters where bytes were
    /// invalid) with the reason it is degraded
    Partial(String, Error),
}

impl Decoded {
    #[inline(always)]
    pub fn text(&self) -> &str {
        match self {
            Decoded::Full(s) => s,
            Decoded::Partial(s, _) => s,
        }
    }

    #[inline(always)]
    pub fn into_text(self) -> String {
        match self {
            Decoded::Full(s) => s,
            Decoded::Partial(s, _) => s,
        }
    }

    #[inline(always)]
    pub fn is_partial(&self) -> bool {
        match self {
            Decoded::Partial(..) => true,
            _ => false,
        }
    }
}

pub struct AnnexA2;

/// ETSI EN 300 468 V1.16.1
impl AnnexA2 {
    /// Codepage selected by the field's first byte and the offset the
    /// text starts at.
    pub fn resolve(buf: &[u8]) -> (Option<Codepage>, usize) {
        match buf.first().copied().and_then(Codepage::from_selector) {
            Some(cp) => (Some(cp), 1),
            None => (None, 0),
        }
    }

    /// Statistical guess for fields that carry no selector.
    pub fn detect(buf: &[u8]) -> &'static Encoding {
        let mut detector = EncodingDetector::new();
        detector.feed(buf, true);
        detector.guess(None, true)
    }

    /// Decode `buf` (selector already stripped) into a `String`.
    ///
    /// Never fails: invalid sequences and unsupported tables come back as
    /// `Decoded::Partial`.
    pub fn decode(buf: &[u8], codepage: Option<Codepage>) -> Decoded {
        if buf.is_empty() {
            return Decoded::Full(String::new());
        }

        match codepage {
            Some(cp) => {
                let encoding = cp.encoding().unwrap_or_else(|| Self::detect(buf));
                let decoded = Self::decode_with(buf, encoding);

                match cp {
                    Codepage::Unresolved(b) => Decoded::Partial(
                        decoded.into_text(),
                        Error::new(ErrorKind::AnnexA2Unresolved(b)),
                    ),
                    _ => decoded,
                }
            }
            None => {
                let encoding = Self::detect(buf);
                log::debug!("(annex-a2) detected encoding {}", encoding.name());

                if encoding == encoding_rs::UTF_8 {
                    match String::from_utf8(buf.to_vec()) {
                        Ok(s) => Decoded::Full(s),
                        Err(_) => Self::decode_with(buf, encoding),
                    }
                } else {
                    Self::decode_with(buf, encoding)
                }
            }
        }
    }

    pub fn decode_with(buf: &[u8], encoding: &'static Encoding) -> Decoded {
        if buf.is_empty() {
            return Decoded::Full(String::new());
        }

        let (text, had_errors) = encoding.decode_without_bom_handling(buf);

        if had_errors {
            Decoded::Partial(
                text.into_owned(),
                Error::new(ErrorKind::AnnexA2Decode(encoding.name())),
            )
        } else {
            Decoded::Full(text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnexA2, Codepage, Decoded};
    use crate::error::{Error, Kind as ErrorKind};
    use assert_matches::assert_matches;

    #[test]
    fn resolve_table_a3() {
        assert_eq!(AnnexA2::resolve(&[0x01, b'x']), (Some(Codepage::IsoIec8859_5), 1));
        assert_eq!(AnnexA2::resolve(&[0x05]), (Some(Codepage::IsoIec8859_9), 1));
        assert_eq!(AnnexA2::resolve(&[0x0B]), (Some(Codepage::IsoIec8859_15), 1));
        assert_eq!(
            AnnexA2::resolve(&[0x15]),
            (Some(Codepage::Utf8encodingOfIsoIec10646), 1)
        );
    }

    #[test]
    fn resolve_aliases_and_holes() {
        for b in 0x0C..=0x0E {
            assert_eq!(AnnexA2::resolve(&[b]), (Some(Codepage::IsoIec8859_15), 1));
        }

        assert_eq!(AnnexA2::resolve(&[0x08]), (None, 0));
        assert_eq!(AnnexA2::resolve(&[0x00]), (None, 0));
        assert_eq!(AnnexA2::resolve(&[0x0F]), (None, 0));
        assert_eq!(AnnexA2::resolve(&[0x16]), (None, 0));
        assert_eq!(AnnexA2::resolve(b"Tagesschau"), (None, 0));
        assert_eq!(AnnexA2::resolve(&[]), (None, 0));
    }

    #[test]
    fn resolve_unresolved() {
        for b in [0x10u8, 0x11, 0x12, 0x13, 0x14, 0x1F].iter() {
            assert_eq!(AnnexA2::resolve(&[*b]), (Some(Codepage::Unresolved(*b)), 1));
        }
    }

    #[test]
    fn decode_utf8() {
        assert_eq!(
            AnnexA2::decode("Tagesschau".as_bytes(), Some(Codepage::Utf8encodingOfIsoIec10646)),
            Decoded::Full("Tagesschau".to_string())
        );
    }

    #[test]
    fn decode_latin() {
        assert_eq!(
            AnnexA2::decode(&[0x4D, 0xFC, 0x6C, 0x6C, 0x65, 0x72], Some(Codepage::IsoIec8859_15)),
            Decoded::Full("Müller".to_string())
        );
        assert_eq!(
            AnnexA2::decode(&[0xA4], Some(Codepage::IsoIec8859_15)),
            Decoded::Full("€".to_string())
        );
        assert_eq!(
            AnnexA2::decode(&[0xB0], Some(Codepage::IsoIec8859_5)),
            Decoded::Full("\u{0410}".to_string())
        );
    }

    #[test]
    fn decode_invalid_is_partial() {
        let decoded = AnnexA2::decode(&[b'a', 0xFF, b'b'], Some(Codepage::Utf8encodingOfIsoIec10646));

        assert_eq!(decoded.text(), "a\u{FFFD}b");
        assert_matches!(
            decoded,
            Decoded::Partial(_, ref err) if *err == Error::new(ErrorKind::AnnexA2Decode("UTF-8"))
        );
    }

    #[test]
    fn decode_unresolved_is_partial() {
        let decoded = AnnexA2::decode(&[0x00, 0x41, 0x00, 0x42], Some(Codepage::Unresolved(0x11)));

        assert_eq!(decoded.text(), "AB");
        assert!(decoded.is_partial());
    }

    #[test]
    fn decode_detects_utf8() {
        let raw = "Schöne Grüße aus Köln".as_bytes();

        assert_eq!(AnnexA2::decode(raw, None), Decoded::Full("Schöne Grüße aus Köln".to_string()));
    }

    #[test]
    fn decode_detects_latin() {
        let raw = b"Sch\xF6ne Gr\xFC\xDFe aus K\xF6ln, die Stra\xDFe ist \xFCberf\xFCllt";

        assert_eq!(
            AnnexA2::decode(raw, None).into_text(),
            "Schöne Grüße aus Köln, die Straße ist überfüllt"
        );
    }

    #[test]
    fn decode_empty() {
        assert_eq!(AnnexA2::decode(&[], None), Decoded::Full(String::new()));
    }
}
