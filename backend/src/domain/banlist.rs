//! Banlist restriction statuses and the copy ceiling they imply.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Maximum copies of any card when no banlist restriction applies.
pub const DEFAULT_COPY_CEILING: u32 = 3;

/// Restriction status of a card on a banlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionStatus {
    /// Up to three copies.
    #[default]
    Unrestricted,
    /// Up to two copies.
    SemiLimited,
    /// One copy.
    Limited,
    /// Not playable.
    Forbidden,
}

impl RestrictionStatus {
    /// Map a catalog banlist label onto a status.
    ///
    /// Unknown or missing labels mean the card is unrestricted.
    ///
    /// # Examples
    /// ```
    /// use deck_engine::domain::RestrictionStatus;
    ///
    /// assert_eq!(
    ///     RestrictionStatus::from_catalog_label(Some("Semi-Limited")),
    ///     RestrictionStatus::SemiLimited
    /// );
    /// assert_eq!(
    ///     RestrictionStatus::from_catalog_label(None),
    ///     RestrictionStatus::Unrestricted
    /// );
    /// ```
    pub fn from_catalog_label(label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim) else {
            return Self::Unrestricted;
        };
        if label.eq_ignore_ascii_case("banned") || label.eq_ignore_ascii_case("forbidden") {
            Self::Forbidden
        } else if label.eq_ignore_ascii_case("limited") {
            Self::Limited
        } else if label.eq_ignore_ascii_case("semi-limited")
            || label.eq_ignore_ascii_case("semi limited")
        {
            Self::SemiLimited
        } else {
            Self::Unrestricted
        }
    }

    /// Number of copies this status permits.
    pub const fn ceiling(self) -> u32 {
        match self {
            Self::Forbidden => 0,
            Self::Limited => 1,
            Self::SemiLimited => 2,
            Self::Unrestricted => DEFAULT_COPY_CEILING,
        }
    }
}

/// Maximum aggregate copies of `card` a banlist-enforcing deck may hold.
pub fn limit_for(card: &Card) -> u32 {
    card.restriction.ceiling()
}

/// Ceiling applied to `card` in a deck, honouring the deck's enforcement flag.
pub fn ceiling_for(card: &Card, enforce_banlist: bool) -> u32 {
    if enforce_banlist {
        limit_for(card)
    } else {
        DEFAULT_COPY_CEILING
    }
}
