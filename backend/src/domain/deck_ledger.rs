//! Rule-enforced deck mutations.
//!
//! Every mutation reads the deck header and runs its count-then-write
//! sequence under a per-deck advisory lock, so two concurrent adds to the same deck cannot both pass
//! the size or copy checks before either commits. Mutations on different
//! decks proceed independently.
//!
//! Checks for an add, in order: quantity range, deck ownership, card
//! existence, partition placement, partition size, banlist ban, copy
//! ceiling. A quantity update re-runs the size, ban and ceiling checks with
//! the signed change in copies, so a banned card or one held above its
//! ceiling cannot be updated in an enforcing deck, only removed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::ports::{
    AddCardRequest, CardRepository, CardRepositoryError, DeckLedgerCommand, DeckRepository,
    DeckRepositoryError, RemoveCardRequest, UpdateQuantityRequest,
};
use crate::domain::{
    Card, CardId, Deck, DeckId, Error, MAX_ADD_QUANTITY, MIN_ADD_QUANTITY, Partition, UserId,
    ceiling_for, classify, partition_capacity,
};

/// Advisory locks keyed by deck.
#[derive(Default)]
struct DeckLocks {
    locks: Mutex<HashMap<DeckId, Arc<AsyncMutex<()>>>>,
}

impl DeckLocks {
    async fn acquire(&self, deck_id: DeckId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Drop locks nobody holds or waits on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(deck_id).or_default())
        };
        lock.lock_owned().await
    }
}

fn copies(count: u32) -> &'static str {
    if count == 1 { "copy" } else { "copies" }
}

fn placement_error(actual: Partition) -> Error {
    match actual {
        Partition::Extra => Error::placement("Extra Deck monsters must be added to Extra Deck"),
        Partition::Main => Error::placement(
            "Only Fusion, Synchro, XYZ, and Link monsters can be added to Extra Deck",
        ),
    }
}

/// Deck ledger service implementing [`DeckLedgerCommand`].
#[derive(Clone)]
pub struct DeckLedgerService<D, C> {
    deck_repo: Arc<D>,
    card_repo: Arc<C>,
    clock: Arc<dyn Clock>,
    locks: Arc<DeckLocks>,
}

impl<D, C> DeckLedgerService<D, C> {
    /// Create a service over the given repositories.
    pub fn new(deck_repo: Arc<D>, card_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            deck_repo,
            card_repo,
            clock,
            locks: Arc::new(DeckLocks::default()),
        }
    }
}

impl<D, C> DeckLedgerService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    fn map_deck_error(error: DeckRepositoryError) -> Error {
        match error {
            DeckRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("deck repository unavailable: {message}"))
            }
            DeckRepositoryError::Query { message } => {
                Error::internal(format!("deck repository error: {message}"))
            }
        }
    }

    fn map_card_error(error: CardRepositoryError) -> Error {
        match error {
            CardRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("card repository unavailable: {message}"))
            }
            CardRepositoryError::Query { message } => {
                Error::internal(format!("card repository error: {message}"))
            }
        }
    }

    async fn owned_deck(&self, deck_id: &DeckId, caller_id: &UserId) -> Result<Deck, Error> {
        let deck = self
            .deck_repo
            .find_deck(deck_id)
            .await
            .map_err(Self::map_deck_error)?
            .ok_or_else(|| Error::not_found(format!("deck {deck_id} not found")))?;
        if !deck.is_owned_by(caller_id) {
            return Err(Error::authorization("only the deck owner may modify this deck"));
        }
        Ok(deck)
    }

    async fn card(&self, card_id: &CardId) -> Result<Card, Error> {
        self.card_repo
            .find_by_id(card_id)
            .await
            .map_err(Self::map_card_error)?
            .ok_or_else(|| Error::not_found(format!("card {card_id} not found")))
    }

    /// Check that changing `card`'s holding in `partition` by `delta` copies
    /// keeps the deck within its size bound and the card within its ceiling.
    ///
    /// A banned card is rejected whatever the sign of `delta`.
    async fn check_delta(
        &self,
        deck: &Deck,
        card: &Card,
        partition: Partition,
        delta: i64,
    ) -> Result<(), Error> {
        let counts = self
            .deck_repo
            .partition_counts(&deck.id)
            .await
            .map_err(Self::map_deck_error)?;
        let capacity = partition_capacity(partition);
        if i64::from(counts.of(partition)) + delta > i64::from(capacity) {
            return Err(Error::size(format!(
                "{partition} cannot exceed {capacity} cards"
            )));
        }

        let ceiling = ceiling_for(card, deck.enforce_banlist);
        if ceiling == 0 {
            return Err(Error::forbidden(format!(
                "{} is forbidden and cannot be added to this deck",
                card.name
            ))
            .with_details(json!({ "cardId": card.id })));
        }

        let held = self
            .deck_repo
            .card_quantity(&deck.id, &card.id)
            .await
            .map_err(Self::map_deck_error)?;
        if i64::from(held) + delta > i64::from(ceiling) {
            return Err(Error::limit(format!(
                "Maximum {ceiling} {} of {} allowed per deck",
                copies(ceiling),
                card.name
            ))
            .with_details(json!({
                "cardId": card.id,
                "ceiling": ceiling,
                "held": held,
            })));
        }
        Ok(())
    }

    async fn touch(&self, deck_id: &DeckId) -> Result<(), Error> {
        self.deck_repo
            .touch_deck(deck_id, self.clock.utc())
            .await
            .map_err(Self::map_deck_error)
    }
}

#[async_trait]
impl<D, C> DeckLedgerCommand for DeckLedgerService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn add_card(&self, request: AddCardRequest) -> Result<(), Error> {
        if !(MIN_ADD_QUANTITY..=MAX_ADD_QUANTITY).contains(&request.quantity) {
            return Err(Error::validation(format!(
                "quantity must be between {MIN_ADD_QUANTITY} and {MAX_ADD_QUANTITY}"
            )));
        }
        let _guard = self.locks.acquire(request.deck_id).await;
        let deck = self
            .owned_deck(&request.deck_id, &request.caller_id)
            .await?;

        let card = self.card(&request.card_id).await?;
        let actual = classify(&card.frame_category);
        if actual != request.partition {
            debug!(
                deck_id = %deck.id,
                card_id = %card.id,
                requested = %request.partition,
                actual = %actual,
                "rejected misplaced card"
            );
            return Err(placement_error(actual));
        }
        self.check_delta(&deck, &card, actual, i64::from(request.quantity))
            .await?;

        let entry = self
            .deck_repo
            .merge_entry(&deck.id, &card.id, actual, request.quantity)
            .await
            .map_err(Self::map_deck_error)?;
        self.touch(&deck.id).await?;
        debug!(
            deck_id = %deck.id,
            entry_id = %entry.id,
            card_id = %card.id,
            quantity = entry.quantity,
            "added card to deck"
        );
        Ok(())
    }

    async fn update_quantity(&self, request: UpdateQuantityRequest) -> Result<(), Error> {
        if request.quantity <= 0 {
            return self
                .remove_card(RemoveCardRequest {
                    deck_id: request.deck_id,
                    entry_id: request.entry_id,
                    caller_id: request.caller_id,
                })
                .await
                .map(|_| ());
        }
        let quantity = u32::try_from(request.quantity)
            .map_err(|_| Error::validation(format!("quantity {} is too large", request.quantity)))?;
        let _guard = self.locks.acquire(request.deck_id).await;
        let deck = self
            .owned_deck(&request.deck_id, &request.caller_id)
            .await?;

        let entry = self
            .deck_repo
            .find_entry(&deck.id, &request.entry_id)
            .await
            .map_err(Self::map_deck_error)?
            .ok_or_else(|| {
                Error::not_found(format!("deck entry {} not found", request.entry_id))
            })?;
        let card = self.card(&entry.card_id).await?;
        let delta = i64::from(quantity) - i64::from(entry.quantity);
        self.check_delta(&deck, &card, entry.partition, delta)
            .await?;

        self.deck_repo
            .set_entry_quantity(&deck.id, &entry.id, quantity)
            .await
            .map_err(Self::map_deck_error)?;
        self.touch(&deck.id).await?;
        debug!(
            deck_id = %deck.id,
            entry_id = %entry.id,
            from = entry.quantity,
            to = quantity,
            "updated entry quantity"
        );
        Ok(())
    }

    async fn remove_card(&self, request: RemoveCardRequest) -> Result<bool, Error> {
        let _guard = self.locks.acquire(request.deck_id).await;
        let deck = self
            .owned_deck(&request.deck_id, &request.caller_id)
            .await?;

        let removed = self
            .deck_repo
            .delete_entry(&deck.id, &request.entry_id)
            .await
            .map_err(Self::map_deck_error)?;
        if removed {
            self.touch(&deck.id).await?;
        }
        debug!(deck_id = %deck.id, entry_id = %request.entry_id, removed, "removed entry");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "deck_ledger_tests.rs"]
mod tests;
