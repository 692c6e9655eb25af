//! Printed set codes: parsing, region detection and normalisation.
//!
//! A printed code has the shape `PREFIX-<marker><letter?><digits>`, e.g.
//! `LDK2-FRK40`: set prefix `LDK2`, region marker `FR`, optional letter `K`,
//! number `40`. Older prints omit the marker (`LOB-001`) and are English.
//! Region markers are looked up in a fixed table rather than matched with a
//! pattern, so unusual codes fall back to English instead of being
//! misclassified.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language/region of a printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageTag {
    /// English.
    En,
    /// French.
    Fr,
    /// German.
    De,
    /// Italian.
    It,
    /// Portuguese.
    Pt,
    /// Spanish.
    Sp,
    /// Japanese.
    Ja,
    /// Korean.
    Ko,
}

impl LanguageTag {
    /// Canonical two-letter tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Fr => "FR",
            Self::De => "DE",
            Self::It => "IT",
            Self::Pt => "PT",
            Self::Sp => "SP",
            Self::Ja => "JA",
            Self::Ko => "KO",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region markers printed on cards, keyed by their exact two characters.
const REGION_MARKERS: [(&str, LanguageTag); 10] = [
    ("EN", LanguageTag::En),
    ("FR", LanguageTag::Fr),
    ("DE", LanguageTag::De),
    ("IT", LanguageTag::It),
    ("PT", LanguageTag::Pt),
    ("SP", LanguageTag::Sp),
    ("JP", LanguageTag::Ja),
    ("JA", LanguageTag::Ja),
    ("KR", LanguageTag::Ko),
    ("KO", LanguageTag::Ko),
];

const ENGLISH_MARKER: &str = "EN";

fn marker_language(marker: &str) -> Option<LanguageTag> {
    REGION_MARKERS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(marker))
        .map(|(_, tag)| *tag)
}

/// A code split around its two-character region marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkedCode<'a> {
    prefix: &'a str,
    marker: &'a str,
    /// Optional letter plus the numeric suffix.
    tail: &'a str,
}

fn split_marker(code: &str) -> Option<MarkedCode<'_>> {
    let (prefix, suffix) = code.split_once('-')?;
    if prefix.is_empty() {
        return None;
    }
    let marker = suffix.get(..2)?;
    if !marker.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    let tail = suffix.get(2..)?;
    let digits = tail
        .strip_prefix(|ch: char| ch.is_ascii_alphabetic())
        .unwrap_or(tail);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(MarkedCode {
        prefix,
        marker,
        tail,
    })
}

/// Detect the language of a printed code.
///
/// Missing or unknown markers default to [`LanguageTag::En`].
///
/// # Examples
/// ```
/// use deck_engine::domain::{LanguageTag, detect_language};
///
/// assert_eq!(detect_language("LDK2-FRK40"), LanguageTag::Fr);
/// assert_eq!(detect_language("LOB-001"), LanguageTag::En);
/// ```
pub fn detect_language(code: &str) -> LanguageTag {
    split_marker(code.trim())
        .and_then(|marked| marker_language(marked.marker))
        .unwrap_or(LanguageTag::En)
}

/// Rewrite a regional code to its English form.
///
/// Only a recognised non-English marker is replaced; the prefix, optional
/// letter and number are preserved. Everything else passes through, so the
/// function is idempotent.
///
/// # Examples
/// ```
/// use deck_engine::domain::normalize_set_code;
///
/// assert_eq!(normalize_set_code("LDK2-FRK40"), "LDK2-ENK40");
/// assert_eq!(normalize_set_code("LOB-001"), "LOB-001");
/// ```
pub fn normalize_set_code(code: &str) -> String {
    let trimmed = code.trim();
    match split_marker(trimmed) {
        Some(marked)
            if marker_language(marked.marker).is_some_and(|tag| tag != LanguageTag::En) =>
        {
            format!("{}-{ENGLISH_MARKER}{}", marked.prefix, marked.tail)
        }
        _ => trimmed.to_owned(),
    }
}

/// Upper-cased set prefix of a hyphenated code (`lob-001` gives `LOB`).
pub fn set_prefix(code: &str) -> Option<String> {
    let (prefix, _) = code.trim().split_once('-')?;
    let prefix = prefix.trim();
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_ascii_uppercase())
    }
}

/// Whether `identifier` is a purely numeric catalog id.
pub fn is_catalog_id(identifier: &str) -> bool {
    let trimmed = identifier.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit())
}
