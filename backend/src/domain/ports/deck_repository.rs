//! Port for the transactional deck ledger store.
//!
//! The ledger service calls these operations while holding the deck's
//! advisory lock, so adapters only need each call to be atomic on its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CardId, Deck, DeckCardEntry, DeckId, EntryId, Partition, PartitionCounts};

use super::define_port_error;

define_port_error! {
    /// Errors raised by deck repository adapters.
    pub enum DeckRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "deck repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "deck repository query failed: {message}",
    }
}

/// Port for deck headers and their ledger entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Fetch a deck header.
    async fn find_deck(&self, deck_id: &DeckId) -> Result<Option<Deck>, DeckRepositoryError>;

    /// Aggregate Main and Extra quantities of a deck.
    async fn partition_counts(&self, deck_id: &DeckId)
    -> Result<PartitionCounts, DeckRepositoryError>;

    /// Total quantity of `card_id` across both partitions of a deck.
    async fn card_quantity(
        &self,
        deck_id: &DeckId,
        card_id: &CardId,
    ) -> Result<u32, DeckRepositoryError>;

    /// Fetch one entry of a deck.
    async fn find_entry(
        &self,
        deck_id: &DeckId,
        entry_id: &EntryId,
    ) -> Result<Option<DeckCardEntry>, DeckRepositoryError>;

    /// List every entry of a deck.
    async fn list_entries(&self, deck_id: &DeckId)
    -> Result<Vec<DeckCardEntry>, DeckRepositoryError>;

    /// Upsert the `(deck, card, partition)` entry, adding `quantity` to any
    /// existing row.
    async fn merge_entry(
        &self,
        deck_id: &DeckId,
        card_id: &CardId,
        partition: Partition,
        quantity: u32,
    ) -> Result<DeckCardEntry, DeckRepositoryError>;

    /// Overwrite an entry's quantity.
    async fn set_entry_quantity(
        &self,
        deck_id: &DeckId,
        entry_id: &EntryId,
        quantity: u32,
    ) -> Result<(), DeckRepositoryError>;

    /// Delete an entry, reporting whether a row was removed.
    async fn delete_entry(
        &self,
        deck_id: &DeckId,
        entry_id: &EntryId,
    ) -> Result<bool, DeckRepositoryError>;

    /// Record the deck's modification time.
    async fn touch_deck(
        &self,
        deck_id: &DeckId,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DeckRepositoryError>;
}
