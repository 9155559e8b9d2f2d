use std::fmt;

use once_cell::sync::Lazy;

use crate::cursor::ByteCursor;
use crate::result::Result;

pub const DEFAULT_LANGUAGE: &str = "deu";

/// ISO 639-2 three letter code, uppercased, never checked against a
/// registry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ISO639([u8; 3]);

impl ISO639 {
    #[inline(always)]
    pub fn new(b: [u8; 3]) -> ISO639 {
        ISO639([
            b[0].to_ascii_uppercase(),
            b[1].to_ascii_uppercase(),
            b[2].to_ascii_uppercase(),
        ])
    }

    pub fn try_from_bytes_3(c: &ByteCursor, offset: usize) -> Result<ISO639> {
        let b = c.bytes_at(offset, 3)?;
        Ok(ISO639::new([b[0], b[1], b[2]]))
    }

    /// Target language from caller input: 2-letter codes go through the
    /// legacy table, anything else is taken as-is (first three bytes).
    pub fn target(code: &str) -> ISO639 {
        let code = iso639_2to3(code.trim());
        let b = code.as_bytes();
        let at = |i: usize| b.get(i).copied().unwrap_or(b' ');

        ISO639::new([at(0), at(1), at(2)])
    }
}

impl fmt::Display for ISO639 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            char::from(self.0[0]),
            char::from(self.0[1]),
            char::from(self.0[2])
        )
    }
}

/// (aliases, language); the first 3-letter alias is canonical
static LANGUAGE_CODES: Lazy<Vec<(&'static [&'static str], &'static str)>> = Lazy::new(|| {
    vec![
        (&["deu", "ger", "de"][..], "German"),
        (&["fra", "fre", "fr"][..], "French"),
    ]
});

/// Legacy 2-letter to 3-letter mapping. Unknown codes come back
/// unchanged.
pub fn iso639_2to3(alpha: &str) -> &str {
    let lower = alpha.to_ascii_lowercase();

    LANGUAGE_CODES
        .iter()
        .find(|(aliases, _)| aliases.iter().any(|a| *a == lower))
        .and_then(|(aliases, _)| aliases.iter().find(|a| a.len() == 3).copied())
        .unwrap_or(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_verbatim() {
        let buf = *b"xdeu";
        let c = ByteCursor::new(&buf);

        assert_eq!(format!("{}", ISO639::try_from_bytes_3(&c, 1).unwrap()), "DEU");
        assert!(ISO639::try_from_bytes_3(&c, 2).is_err());
        assert_eq!(format!("{}", ISO639::new(*b"q1_")), "Q1_");
    }

    #[test]
    fn legacy_table() {
        assert_eq!(iso639_2to3("de"), "deu");
        assert_eq!(iso639_2to3("ger"), "deu");
        assert_eq!(iso639_2to3("FR"), "fra");
        assert_eq!(iso639_2to3("sv"), "sv");
        assert_eq!(iso639_2to3("eng"), "eng");
    }

    #[test]
    fn target_language() {
        assert_eq!(ISO639::target(DEFAULT_LANGUAGE), ISO639::new(*b"DEU"));
        assert_eq!(ISO639::target("de"), ISO639::new(*b"DEU"));
        assert_eq!(ISO639::target("fra"), ISO639::new(*b"FRA"));
        assert_eq!(ISO639::target("en"), ISO639::new(*b"EN "));
    }
}
