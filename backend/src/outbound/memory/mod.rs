//! In-memory deck and card store.
//!
//! Backs the repository ports with process-local maps. Each port call takes
//! the store lock once, so every call is atomic on its own; the ledger
//! service supplies the per-deck serialisation of multi-call sequences.
//! Used by the command-line tools and integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CardRepository, CardRepositoryError, DeckRepository, DeckRepositoryError,
};
use crate::domain::{
    Card, CardId, Deck, DeckCardEntry, DeckId, EntryId, Partition, PartitionCounts,
};

#[derive(Debug, Default)]
struct StoreState {
    decks: HashMap<DeckId, Deck>,
    entries: Vec<DeckCardEntry>,
    cards: BTreeMap<CardId, Card>,
}

impl StoreState {
    fn deck_entries<'a>(&'a self, deck_id: &'a DeckId) -> impl Iterator<Item = &'a DeckCardEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.deck_id == *deck_id)
    }
}

/// Process-local implementation of [`DeckRepository`] and [`CardRepository`].
#[derive(Debug, Default)]
pub struct InMemoryDeckStore {
    state: Mutex<StoreState>,
}

impl InMemoryDeckStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace a deck header.
    pub fn insert_deck(&self, deck: Deck) {
        self.state().decks.insert(deck.id, deck);
    }

    /// Insert or replace a card record.
    pub fn insert_card(&self, card: Card) {
        self.state().cards.insert(card.id.clone(), card);
    }
}

#[async_trait]
impl DeckRepository for InMemoryDeckStore {
    async fn find_deck(&self, deck_id: &DeckId) -> Result<Option<Deck>, DeckRepositoryError> {
        Ok(self.state().decks.get(deck_id).cloned())
    }

    async fn partition_counts(
        &self,
        deck_id: &DeckId,
    ) -> Result<PartitionCounts, DeckRepositoryError> {
        Ok(PartitionCounts::from_entries(self.state().deck_entries(deck_id)))
    }

    async fn card_quantity(
        &self,
        deck_id: &DeckId,
        card_id: &CardId,
    ) -> Result<u32, DeckRepositoryError> {
        Ok(self
            .state()
            .deck_entries(deck_id)
            .filter(|entry| entry.card_id == *card_id)
            .map(|entry| entry.quantity)
            .fold(0, u32::saturating_add))
    }

    async fn find_entry(
        &self,
        deck_id: &DeckId,
        entry_id: &EntryId,
    ) -> Result<Option<DeckCardEntry>, DeckRepositoryError> {
        Ok(self
            .state()
            .deck_entries(deck_id)
            .find(|entry| entry.id == *entry_id)
            .cloned())
    }

    async fn list_entries(
        &self,
        deck_id: &DeckId,
    ) -> Result<Vec<DeckCardEntry>, DeckRepositoryError> {
        Ok(self.state().deck_entries(deck_id).cloned().collect())
    }

    async fn merge_entry(
        &self,
        deck_id: &DeckId,
        card_id: &CardId,
        partition: Partition,
        quantity: u32,
    ) -> Result<DeckCardEntry, DeckRepositoryError> {
        let mut state = self.state();
        if !state.decks.contains_key(deck_id) {
            return Err(DeckRepositoryError::query(format!(
                "deck {deck_id} does not exist"
            )));
        }
        if let Some(entry) = state.entries.iter_mut().find(|entry| {
            entry.deck_id == *deck_id && entry.card_id == *card_id && entry.partition == partition
        }) {
            entry.quantity = entry.quantity.saturating_add(quantity);
            return Ok(entry.clone());
        }

        let entry = DeckCardEntry {
            id: EntryId::random(),
            deck_id: *deck_id,
            card_id: card_id.clone(),
            partition,
            quantity,
        };
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn set_entry_quantity(
        &self,
        deck_id: &DeckId,
        entry_id: &EntryId,
        quantity: u32,
    ) -> Result<(), DeckRepositoryError> {
        let mut state = self.state();
        let entry = state
            .entries
            .iter_mut()
            .find(|entry| entry.deck_id == *deck_id && entry.id == *entry_id)
            .ok_or_else(|| {
                DeckRepositoryError::query(format!("entry {entry_id} does not exist"))
            })?;
        entry.quantity = quantity;
        Ok(())
    }

    async fn delete_entry(
        &self,
        deck_id: &DeckId,
        entry_id: &EntryId,
    ) -> Result<bool, DeckRepositoryError> {
        let mut state = self.state();
        let before = state.entries.len();
        state
            .entries
            .retain(|entry| !(entry.deck_id == *deck_id && entry.id == *entry_id));
        Ok(state.entries.len() < before)
    }

    async fn touch_deck(
        &self,
        deck_id: &DeckId,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DeckRepositoryError> {
        let mut state = self.state();
        let deck = state.decks.get_mut(deck_id).ok_or_else(|| {
            DeckRepositoryError::query(format!("deck {deck_id} does not exist"))
        })?;
        deck.updated_at = updated_at;
        Ok(())
    }
}

#[async_trait]
impl CardRepository for InMemoryDeckStore {
    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardRepositoryError> {
        Ok(self.state().cards.get(id).cloned())
    }

    async fn find_by_set_code(&self, code: &str) -> Result<Option<Card>, CardRepositoryError> {
        Ok(self
            .state()
            .cards
            .values()
            .find(|card| card.printing_matching(&[code]).is_some())
            .cloned())
    }

    async fn save(&self, card: &Card) -> Result<(), CardRepositoryError> {
        self.insert_card(card.clone());
        Ok(())
    }
}
