//! "Add card by code" flow.
//!
//! Resolves a user-entered identifier, records the resolved card locally so
//! the ledger can see its frame category and restriction, then adds it to
//! the partition its frame category requires.
//!
//! The card repository is a local cache of catalog records, not a record of
//! deck contents. The ledger reads cards from it, so the resolved card is
//! saved before the add and stays cached when the ledger rejects the add.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{
    AddCardRequest, CardCodeResolution, CardRepository, CardRepositoryError, CardResolution,
    DeckLedgerCommand,
};
use crate::domain::{DeckId, Error, UserId, classify};

/// Orchestrates resolution and insertion of a card identified by code.
#[derive(Clone)]
pub struct CardIntakeService<Res, R, L> {
    resolver: Arc<Res>,
    card_repo: Arc<R>,
    ledger: Arc<L>,
}

impl<Res, R, L> CardIntakeService<Res, R, L> {
    /// Create a service from its collaborators.
    pub fn new(resolver: Arc<Res>, card_repo: Arc<R>, ledger: Arc<L>) -> Self {
        Self {
            resolver,
            card_repo,
            ledger,
        }
    }
}

impl<Res, R, L> CardIntakeService<Res, R, L>
where
    Res: CardCodeResolution,
    R: CardRepository,
    L: DeckLedgerCommand,
{
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

    /// Resolve `code` and add `quantity` copies of the card to `deck_id`.
    ///
    /// Returns the resolution so callers can show the matched printing and
    /// detected language.
    pub async fn add_card_by_code(
        &self,
        deck_id: DeckId,
        code: &str,
        quantity: u32,
        caller_id: UserId,
    ) -> Result<CardResolution, Error> {
        let resolution = self.resolver.resolve(code).await?;
        self.card_repo
            .save(&resolution.card)
            .await
            .map_err(Self::map_card_error)?;

        let partition = classify(&resolution.card.frame_category);
        self.ledger
            .add_card(AddCardRequest {
                deck_id,
                card_id: resolution.card.id.clone(),
                quantity,
                partition,
                caller_id,
            })
            .await?;
        debug!(
            %deck_id,
            card_id = %resolution.card.id,
            code = %resolution.original_code,
            language = %resolution.detected_language,
            "added card by code"
        );
        Ok(resolution)
    }
}
