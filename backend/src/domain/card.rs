//! Card catalog records as seen by the deck engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::banlist::RestrictionStatus;

/// Validation errors raised while constructing card identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("card id must not be empty")]
    EmptyId,
    /// Identifier carries leading or trailing whitespace.
    #[error("card id must not contain surrounding whitespace")]
    PaddedId,
}

/// Catalog identifier of a card (the passcode printed on the card).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Validate and construct a [`CardId`].
    pub fn new(value: impl Into<String>) -> Result<Self, CardValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CardValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(CardValidationError::PaddedId);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CardId> for String {
    fn from(value: CardId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CardId {
    type Error = CardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One printing of a card in a specific set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printing {
    /// Printed code, e.g. `LDK2-ENK40`.
    pub set_code: String,
    /// Rarity label, e.g. `Common`.
    pub rarity: String,
    /// Full name of the issuing set.
    pub set_name: String,
}

impl Printing {
    /// Case-insensitive comparison against a printed code.
    pub fn matches_code(&self, code: &str) -> bool {
        self.set_code.eq_ignore_ascii_case(code.trim())
    }
}

/// A card as supplied by the card repository or the catalog API.
///
/// `restriction` is the card's status on the banlist format the engine
/// enforces (the TCG list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Catalog identifier.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Category label, e.g. `Normal Monster` or `Spell Card`.
    pub category: String,
    /// Frame category (`normal`, `effect`, `fusion`, `link`, ...).
    pub frame_category: String,
    /// Banlist status.
    #[serde(default)]
    pub restriction: RestrictionStatus,
    /// Known printings.
    #[serde(default)]
    pub printings: Vec<Printing>,
}

impl Card {
    /// Find the printing whose code matches any of `codes`.
    pub fn printing_matching(&self, codes: &[&str]) -> Option<&Printing> {
        self.printings
            .iter()
            .find(|printing| codes.iter().any(|code| printing.matches_code(code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", CardValidationError::EmptyId)]
    #[case("  ", CardValidationError::EmptyId)]
    #[case(" 46986414", CardValidationError::PaddedId)]
    fn card_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: CardValidationError) {
        assert_eq!(CardId::new(raw), Err(expected));
    }

    #[rstest]
    fn printing_lookup_ignores_case() {
        let card = Card {
            id: CardId::new("46986414").expect("valid id"),
            name: "Dark Magician".to_owned(),
            category: "Normal Monster".to_owned(),
            frame_category: "normal".to_owned(),
            restriction: RestrictionStatus::Unrestricted,
            printings: vec![Printing {
                set_code: "LOB-005".to_owned(),
                rarity: "Ultra Rare".to_owned(),
                set_name: "Legend of Blue Eyes White Dragon".to_owned(),
            }],
        };

        let printing = card.printing_matching(&["lob-005"]).expect("printing found");
        assert_eq!(printing.rarity, "Ultra Rare");
        assert!(card.printing_matching(&["LOB-EN005"]).is_none());
    }
}
