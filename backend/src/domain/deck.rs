//! Deck aggregates and format bounds.
//!
//! A deck owns a ledger of [`DeckCardEntry`] rows, at most one per
//! `(deck, card, partition)`. The bounds below are the competitive format's
//! construction rules: [`MAIN_DECK_MAX`] and [`EXTRA_DECK_MAX`] are enforced
//! at insert time, [`MAIN_DECK_MIN`] only by the legality audit.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::CardId;
use super::classifier::Partition;
use super::user::UserId;

/// Smallest legal Main Deck.
pub const MAIN_DECK_MIN: u32 = 40;
/// Largest legal Main Deck.
pub const MAIN_DECK_MAX: u32 = 60;
/// Largest legal Extra Deck.
pub const EXTRA_DECK_MAX: u32 = 15;
/// Smallest quantity accepted by a single add.
pub const MIN_ADD_QUANTITY: u32 = 1;
/// Largest quantity accepted by a single add.
pub const MAX_ADD_QUANTITY: u32 = 3;

/// Upper size bound of `partition`.
pub const fn partition_capacity(partition: Partition) -> u32 {
    match partition {
        Partition::Main => MAIN_DECK_MAX,
        Partition::Extra => EXTRA_DECK_MAX,
    }
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_identifier!(
    /// Deck identifier.
    DeckId
);
uuid_identifier!(
    /// Deck ledger entry identifier.
    EntryId
);

/// Deck header: ownership and banlist enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Deck identifier.
    pub id: DeckId,
    /// Owning user.
    pub owner: UserId,
    /// Whether the banlist ceiling applies instead of the default of three.
    pub enforce_banlist: bool,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    /// Whether `caller` may mutate this deck.
    pub fn is_owned_by(&self, caller: &UserId) -> bool {
        self.owner == *caller
    }
}

/// One ledger row: a quantity of a card in one partition of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCardEntry {
    /// Entry identifier.
    pub id: EntryId,
    /// Deck the entry belongs to.
    pub deck_id: DeckId,
    /// Card held by the entry.
    pub card_id: CardId,
    /// Partition the card is placed in.
    pub partition: Partition,
    /// Number of copies, always at least one.
    pub quantity: u32,
}

/// Aggregate card counts of both partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionCounts {
    /// Sum of Main Deck quantities.
    pub main: u32,
    /// Sum of Extra Deck quantities.
    pub extra: u32,
}

impl PartitionCounts {
    /// Total held in `partition`.
    pub const fn of(self, partition: Partition) -> u32 {
        match partition {
            Partition::Main => self.main,
            Partition::Extra => self.extra,
        }
    }

    /// Sum counts from a list of entries.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a DeckCardEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut counts, entry| {
                match entry.partition {
                    Partition::Main => counts.main = counts.main.saturating_add(entry.quantity),
                    Partition::Extra => counts.extra = counts.extra.saturating_add(entry.quantity),
                }
                counts
            })
    }
}
