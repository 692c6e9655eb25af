//! Driving port for deck ledger mutations.

use async_trait::async_trait;

use crate::domain::{CardId, DeckId, EntryId, Error, Partition, UserId};

/// Request to add copies of a card to a deck partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCardRequest {
    /// Target deck.
    pub deck_id: DeckId,
    /// Card to add.
    pub card_id: CardId,
    /// Copies to add, within `1..=3`.
    pub quantity: u32,
    /// Partition the caller wants the card in.
    pub partition: Partition,
    /// Authenticated caller.
    pub caller_id: UserId,
}

/// Request to overwrite an entry's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuantityRequest {
    /// Target deck.
    pub deck_id: DeckId,
    /// Entry to update.
    pub entry_id: EntryId,
    /// New quantity; zero or below removes the entry.
    pub quantity: i64,
    /// Authenticated caller.
    pub caller_id: UserId,
}

/// Request to remove an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveCardRequest {
    /// Target deck.
    pub deck_id: DeckId,
    /// Entry to remove.
    pub entry_id: EntryId,
    /// Authenticated caller.
    pub caller_id: UserId,
}

/// Port for rule-enforced deck mutations.
///
/// Every rule violation is returned as an [`Error`] whose
/// [`ErrorCode`](crate::domain::ErrorCode) names the rule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeckLedgerCommand: Send + Sync {
    /// Add copies of a card, merging into an existing entry.
    async fn add_card(&self, request: AddCardRequest) -> Result<(), Error>;

    /// Overwrite an entry's quantity, removing it when the quantity is not
    /// positive.
    async fn update_quantity(&self, request: UpdateQuantityRequest) -> Result<(), Error>;

    /// Remove an entry, reporting whether a row was deleted.
    async fn remove_card(&self, request: RemoveCardRequest) -> Result<bool, Error>;
}
