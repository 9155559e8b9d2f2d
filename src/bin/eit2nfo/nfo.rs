//! Kodi movie `.nfo` rendering.
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use eit::EventRecord;

use crate::error::Result;

pub const HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Two-field document: HTML-unescaped title and plot, both XML-escaped.
pub fn render(record: &EventRecord) -> String {
    format!(
        "{}\n<movie>\n  <title>{}</title>\n  <plot>{}</plot>\n</movie>",
        HEADER,
        xml_escape(&html_unescape(record.name())),
        xml_escape(record.description()),
    )
}

/// Sibling path with the extension replaced (`a.eit` -> `a.nfo`).
#[inline(always)]
pub fn path_for(eit: &Path) -> PathBuf {
    eit.with_extension("nfo")
}

pub fn write(path: &Path, record: &EventRecord) -> Result<()> {
    fs::write(path, render(record))
        .map_err(|err| crate::error::Error::from(err).with_details(path.display().to_string()))
}

pub fn xml_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

static RE_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]+);?|#[xX]([0-9a-fA-F]+);?|([a-zA-Z][a-zA-Z0-9]*)(;?))")
        .expect("entity pattern is valid")
});

/// HTML 4 names that are still decoded without the trailing `;`
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Replacement for `&name;` from the HTML5 named character references.
fn named_entity(name: &str) -> Option<String> {
    let entity = format!("&{};", name);

    match html_escape::decode_html_entities(&entity) {
        Cow::Owned(s) if s != entity => Some(s),
        _ => None,
    }
}

fn char_ref(code: Option<u32>) -> String {
    match code {
        // C1 range is read as windows-1252
        Some(n @ 0x80..=0x9F) => encoding_rs::WINDOWS_1252
            .decode_without_bom_handling(&[n as u8])
            .0
            .into_owned(),
        Some(0) | None => '\u{FFFD}'.to_string(),
        Some(n) => std::char::from_u32(n).unwrap_or('\u{FFFD}').to_string(),
    }
}

/// Decodes character references the way browsers do: numeric references
/// (invalid code points become U+FFFD), every HTML5 named reference, and
/// the legacy names even without `;`. Unknown names are left untouched.
pub fn html_unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    RE_ENTITY.replace_all(s, |caps: &Captures| {
        if let Some(dec) = caps.get(1) {
            return char_ref(dec.as_str().parse::<u32>().ok().filter(|n| *n <= 0x10FFFF));
        }
        if let Some(hex) = caps.get(2) {
            return char_ref(u32::from_str_radix(hex.as_str(), 16).ok().filter(|n| *n <= 0x10FFFF));
        }

        let name = &caps[3];
        let semicolon = &caps[4];

        if !semicolon.is_empty() {
            if let Some(decoded) = named_entity(name) {
                return decoded;
            }
        }

        // longest legacy prefix, rest kept verbatim ("&ampx" is "&x")
        (1..=name.len())
            .rev()
            .map(|end| name.split_at(end))
            .find(|(prefix, _)| LEGACY_ENTITIES.contains(prefix))
            .and_then(|(prefix, rest)| named_entity(prefix).map(|d| d + rest + semicolon))
            .unwrap_or_else(|| caps[0].to_string())
    })
}
