//! Read-side deck legality audits.
//!
//! `validate_deck` only checks partition sizes; cards admitted under an older
//! banlist are reported separately by `banlist_violations`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    BanlistViolation, CardRepository, CardRepositoryError, DeckRepository, DeckRepositoryError,
    DeckValidation, DeckValidationQuery,
};
use crate::domain::{
    CardId, DeckId, EXTRA_DECK_MAX, Error, MAIN_DECK_MAX, MAIN_DECK_MIN, PartitionCounts,
    limit_for,
};

/// Violations of the partition size bounds, in a stable order.
pub fn size_violations(counts: PartitionCounts) -> Vec<String> {
    let mut violations = Vec::new();
    if counts.main < MAIN_DECK_MIN {
        violations.push(format!("Main Deck must have at least {MAIN_DECK_MIN} cards"));
    }
    if counts.main > MAIN_DECK_MAX {
        violations.push(format!("Main Deck cannot exceed {MAIN_DECK_MAX} cards"));
    }
    if counts.extra > EXTRA_DECK_MAX {
        violations.push(format!("Extra Deck cannot exceed {EXTRA_DECK_MAX} cards"));
    }
    violations
}

/// Deck validation service implementing [`DeckValidationQuery`].
#[derive(Clone)]
pub struct DeckValidationService<D, C> {
    deck_repo: Arc<D>,
    card_repo: Arc<C>,
}

impl<D, C> DeckValidationService<D, C> {
    /// Create a service over the given repositories.
    pub fn new(deck_repo: Arc<D>, card_repo: Arc<C>) -> Self {
        Self {
            deck_repo,
            card_repo,
        }
    }
}

impl<D, C> DeckValidationService<D, C>
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

    async fn ensure_deck(&self, deck_id: &DeckId) -> Result<(), Error> {
        self.deck_repo
            .find_deck(deck_id)
            .await
            .map_err(Self::map_deck_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("deck {deck_id} not found")))
    }
}

#[async_trait]
impl<D, C> DeckValidationQuery for DeckValidationService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn validate_deck(&self, deck_id: &DeckId) -> Result<DeckValidation, Error> {
        self.ensure_deck(deck_id).await?;
        let counts = self
            .deck_repo
            .partition_counts(deck_id)
            .await
            .map_err(Self::map_deck_error)?;
        let violations = size_violations(counts);
        debug!(
            %deck_id,
            main = counts.main,
            extra = counts.extra,
            violations = violations.len(),
            "validated deck"
        );
        Ok(DeckValidation {
            valid: violations.is_empty(),
            violations,
            main_count: counts.main,
            extra_count: counts.extra,
        })
    }

    async fn banlist_violations(&self, deck_id: &DeckId) -> Result<Vec<BanlistViolation>, Error> {
        self.ensure_deck(deck_id).await?;
        let entries = self
            .deck_repo
            .list_entries(deck_id)
            .await
            .map_err(Self::map_deck_error)?;

        let mut held: BTreeMap<CardId, u32> = BTreeMap::new();
        for entry in entries {
            let total = held.entry(entry.card_id).or_default();
            *total = total.saturating_add(entry.quantity);
        }

        let mut violations = Vec::new();
        for (card_id, quantity) in held {
            let card = self
                .card_repo
                .find_by_id(&card_id)
                .await
                .map_err(Self::map_card_error)?
                .ok_or_else(|| Error::not_found(format!("card {card_id} not found")))?;
            let ceiling = limit_for(&card);
            if quantity > ceiling {
                violations.push(BanlistViolation {
                    card_id,
                    card_name: card.name,
                    quantity,
                    ceiling,
                });
            }
        }
        Ok(violations)
    }
}
