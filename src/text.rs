//! Text fields of event descriptors and the policy that merges them.
use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::annex_a2::{AnnexA2, Codepage, Decoded};
use crate::iso_639::ISO639;

/// Text span of a descriptor with its character table selector
/// already split off.
#[derive(Clone, Copy)]
pub struct TextField<'buf> {
    codepage: Option<Codepage>,
    buf: &'buf [u8],
}

impl<'buf> TextField<'buf> {
    pub fn new(raw: &'buf [u8]) -> TextField<'buf> {
        let (codepage, start) = AnnexA2::resolve(raw);

        TextField {
            codepage,
            buf: &raw[start..],
        }
    }

    /// explicit selector, if the field carried one
    #[inline(always)]
    pub fn codepage(&self) -> Option<Codepage> {
        self.codepage
    }

    /// bytes after the selector
    #[inline(always)]
    pub fn buf(&self) -> &'buf [u8] {
        self.buf
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Keeps LF and everything above 0x1F, dropping the remaining
    /// control bytes. UCS-2 text is left alone.
    pub fn printable(&self) -> Cow<'buf, [u8]> {
        match self.codepage {
            Some(Codepage::Unresolved(0x11)) => Cow::Borrowed(self.buf),
            _ => Cow::Owned(printable(self.buf)),
        }
    }
}

impl<'buf> fmt::Debug for TextField<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match AnnexA2::decode(&self.printable(), self.codepage) {
            Decoded::Full(s) => write!(f, "{:?}", s),
            Decoded::Partial(s, err) => write!(f, "{:?} (error: {})", s, err),
        }
    }
}

#[inline(always)]
pub fn printable(buf: &[u8]) -> Vec<u8> {
    buf.iter().copied().filter(|b| *b == 0x0A || *b > 0x1F).collect()
}

/// One occurrence of a text field in the descriptor loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub language: ISO639,
    pub codepage: Option<Codepage>,
    /// printable bytes, selector stripped
    pub raw: Vec<u8>,
    pub text: String,
}

impl Fragment {
    pub fn new(language: ISO639, field: &TextField) -> Fragment {
        Fragment {
            language,
            codepage: field.codepage(),
            raw: field.printable().into_owned(),
            text: String::new(),
        }
    }
}

/// What goes in front of a fragment whose language differs from the
/// previous one when every language is kept.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Separator {
    /// event names
    Space,
    /// short and extended texts
    Paragraph,
}

impl Separator {
    #[inline(always)]
    fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Paragraph => "\n\n",
        }
    }
}

/// Fragments in the target language only, joined as-is; or, when none
/// is in the target language, all of them with a separator at every
/// language change, trimmed.
pub fn merge(fragments: &[Fragment], target: ISO639, sep: Separator) -> String {
    if fragments.iter().any(|f| f.language == target) {
        return fragments
            .iter()
            .filter(|f| f.language == target)
            .map(|f| f.text.as_str())
            .collect();
    }

    let (merged, _) = fragments.iter().fold(
        (String::new(), None),
        |(mut acc, prev): (String, Option<ISO639>), f| {
            match prev {
                Some(lang) if lang != f.language => acc.push_str(sep.as_str()),
                _ => {}
            }
            acc.push_str(&f.text);
            (acc, Some(f.language))
        },
    );

    merged.trim().to_string()
}

/// Codepage of the first fragment that named one explicitly.
pub fn first_codepage(fragments: &[Fragment]) -> Option<Codepage> {
    fragments.iter().find_map(|f| f.codepage)
}

/// Decode every fragment with the category codepage. Without one the
/// encoding is guessed once over the whole category so that all
/// fragments agree.
pub fn decode_fragments(fragments: &mut [Fragment], category: &str) -> Option<Codepage> {
    let codepage = first_codepage(fragments);

    let detected = match codepage {
        Some(cp) => {
            log::debug!("(text) {}: codepage {}", category, cp);
            None
        }
        None => {
            let all: Vec<u8> = fragments.iter().flat_map(|f| f.raw.iter().copied()).collect();
            let encoding = AnnexA2::detect(&all);
            log::debug!("(text) {}: detected encoding {}", category, encoding.name());
            Some(encoding)
        }
    };

    for fragment in fragments.iter_mut() {
        let decoded = match detected {
            Some(encoding) => AnnexA2::decode_with(&fragment.raw, encoding),
            None => AnnexA2::decode(&fragment.raw, codepage),
        };

        if let Decoded::Partial(_, ref err) = decoded {
            log::warn!("(text) {}: partially decoded: {}", category, err);
        }

        fragment.text = decoded.into_text();
    }

    codepage
}

static RE_MISSING_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"((?:Moderat(?:ion:|or(?:in)?)|Vorsitz: |Jur(?:isten|y): |G(?:ä|Ã¤|a)st(?:e)?: ",
        r"|Mit (?:Staatsanwalt|Richter(?:in)?|den Schadenregulierern) |Julia Leisch)",
        r".*?[a-z]+)('?[0-9A-Z'])",
    ))
    .expect("line break pattern is valid")
});

/// RTL group recordings glue credits ("Moderation: ...", "Jury: ...")
/// to the next sentence; put a paragraph break in between.
pub fn fix_missing_line_breaks(text: &str) -> Cow<'_, str> {
    RE_MISSING_BREAK.replace_all(text, "${1}\n\n${2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(lang: &[u8; 3], text: &str) -> Fragment {
        Fragment {
            language: ISO639::new(*lang),
            codepage: None,
            raw: text.as_bytes().to_vec(),
            text: text.to_string(),
        }
    }

    #[test]
    fn field_selector_is_split_off() {
        let raw = b"\x15Tagesschau";
        let field = TextField::new(raw);

        assert_eq!(field.codepage(), Some(Codepage::Utf8encodingOfIsoIec10646));
        assert_eq!(field.buf(), b"Tagesschau");
        assert_eq!(
            AnnexA2::decode(&field.printable(), field.codepage()).into_text(),
            "Tagesschau"
        );
    }

    #[test]
    fn field_without_selector() {
        let field = TextField::new(b"Tatort");

        assert_eq!(field.codepage(), None);
        assert_eq!(field.buf(), b"Tatort");
    }

    #[test]
    fn control_bytes_dropped() {
        assert_eq!(printable(b"a\x05b\nc\x1Fd\x8Ae"), b"ab\ncd\x8Ae".to_vec());

        let field = TextField::new(b"\x08Krimi\x0D");
        assert_eq!(field.codepage(), None);
        assert_eq!(&*field.printable(), b"Krimi");
    }

    #[test]
    fn merge_target_only() {
        let fragments = [fragment(b"ENG", "News"), fragment(b"DEU", "Nachrichten")];

        assert_eq!(
            merge(&fragments, ISO639::new(*b"deu"), Separator::Space),
            "Nachrichten"
        );
    }

    #[test]
    fn merge_target_only_keeps_order_without_separators() {
        let fragments = [
            fragment(b"DEU", "Teil 1 "),
            fragment(b"ENG", "Part 1"),
            fragment(b"DEU", "Teil 2"),
        ];

        assert_eq!(
            merge(&fragments, ISO639::new(*b"DEU"), Separator::Paragraph),
            "Teil 1 Teil 2"
        );
    }

    #[test]
    fn merge_all_languages() {
        let fragments = [fragment(b"ENG", "News"), fragment(b"DEU", "Nachrichten")];
        let fra = ISO639::new(*b"FRA");

        assert_eq!(merge(&fragments, fra, Separator::Space), "News Nachrichten");
        assert_eq!(merge(&fragments, fra, Separator::Paragraph), "News\n\nNachrichten");
    }

    #[test]
    fn merge_same_language_segments() {
        let fragments = [
            fragment(b"ENG", " Once upon"),
            fragment(b"ENG", " a time "),
            fragment(b"DEU", "Es war"),
            fragment(b"DEU", " einmal"),
        ];

        assert_eq!(
            merge(&fragments, ISO639::new(*b"FRA"), Separator::Paragraph),
            "Once upon a time \n\nEs war einmal"
        );
    }

    #[test]
    fn merge_empty() {
        assert_eq!(merge(&[], ISO639::new(*b"DEU"), Separator::Space), "");
    }

    #[test]
    fn decode_with_first_explicit_codepage() {
        let mut fragments = [
            Fragment::new(ISO639::new(*b"DEU"), &TextField::new(b"Stra\xDFe ")),
            Fragment::new(ISO639::new(*b"DEU"), &TextField::new(b"\x0B\xA4 5")),
            Fragment::new(ISO639::new(*b"DEU"), &TextField::new(b"\x15 \xC3\xA4")),
        ];

        let codepage = decode_fragments(&mut fragments, "name");

        assert_eq!(codepage, Some(Codepage::IsoIec8859_15));
        assert_eq!(fragments[0].text, "Straße ");
        assert_eq!(fragments[1].text, "€ 5");
        // explicit markers after the first are not re-derived
        assert_eq!(fragments[2].text, " Ã€");
    }

    #[test]
    fn decode_detects_once_per_category() {
        let mut fragments = [
            Fragment::new(ISO639::new(*b"DEU"), &TextField::new("Grüße ".as_bytes())),
            Fragment::new(ISO639::new(*b"DEU"), &TextField::new("aus Köln".as_bytes())),
        ];

        assert_eq!(decode_fragments(&mut fragments, "short"), None);
        assert_eq!(fragments[0].text, "Grüße ");
        assert_eq!(fragments[1].text, "aus Köln");
    }

    #[test]
    fn line_break_after_credits() {
        assert_eq!(
            fix_missing_line_breaks("Moderation: Anna SchmidtJury: Hans Meier"),
            "Moderation: Anna Schmidt\n\nJury: Hans Meier"
        );
        assert_eq!(
            fix_missing_line_breaks("Gäste: Tom MustermannDie Sendung"),
            "Gäste: Tom Mustermann\n\nDie Sendung"
        );
        assert_eq!(fix_missing_line_breaks("Ein ruhiger Abend."), "Ein ruhiger Abend.");
    }
}
