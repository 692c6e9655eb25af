//! Card-code resolution service.
//!
//! Users enter either a numeric catalog id or the code printed on their card,
//! possibly a regional one such as `LDK2-FRK40`. Resolution:
//! - hyphenated input is a set code: its prefix is looked up in the cached set
//!   directory, then the set's cards are searched for a printing matching the
//!   code as entered or its English form;
//! - numeric input is a catalog id;
//! - anything else is tried as a catalog id first, then as a code known to
//!   the local card repository.
//!
//! The detected language always comes from the identifier as entered.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CardCatalogSource, CardCodeResolution, CardRepository, CardRepositoryError, CardResolution,
};
use crate::domain::{
    Card, CardId, CardSetDirectory, CardSetDirectoryCache, Error, Printing, detect_language,
    is_catalog_id, normalize_set_code, set_prefix,
};

fn map_card_repository_error(error: CardRepositoryError) -> Error {
    match error {
        CardRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("card repository unavailable: {message}"))
        }
        CardRepositoryError::Query { message } => {
            Error::internal(format!("card repository error: {message}"))
        }
    }
}

/// Resolves user-entered identifiers against the catalog.
pub struct SetCodeResolver<C, R> {
    catalog: Arc<C>,
    set_directory: Arc<CardSetDirectoryCache<C>>,
    card_repo: Arc<R>,
}

impl<C, R> SetCodeResolver<C, R> {
    /// Create a resolver sharing `set_directory` with other callers.
    pub fn new(
        catalog: Arc<C>,
        set_directory: Arc<CardSetDirectoryCache<C>>,
        card_repo: Arc<R>,
    ) -> Self {
        Self {
            catalog,
            set_directory,
            card_repo,
        }
    }
}

impl<C, R> SetCodeResolver<C, R>
where
    C: CardCatalogSource,
    R: CardRepository,
{
    /// Cached set directory, refreshed on demand.
    pub async fn card_sets(&self) -> Arc<CardSetDirectory> {
        self.set_directory.get_card_sets().await
    }

    async fn lookup_catalog_id(&self, identifier: &str) -> Option<Card> {
        let id = CardId::new(identifier).ok()?;
        match self.catalog.fetch_card_by_id(&id).await {
            Ok(card) => card,
            Err(error) => {
                warn!(%error, card_id = %id, "catalog id lookup failed");
                None
            }
        }
    }

    async fn resolve_set_code(&self, code: &str) -> Result<(Card, Option<Printing>), Error> {
        let prefix = set_prefix(code)
            .ok_or_else(|| Error::validation(format!("set code {code} has no set prefix")))?;
        let directory = self.set_directory.get_card_sets().await;
        let Some(set_name) = directory.set_name(&prefix).map(str::to_owned) else {
            return Err(Error::resolution(
                format!("Unknown set code prefix {prefix}"),
                directory.suggestions(&prefix),
            ));
        };

        let normalized = normalize_set_code(code);
        let candidates = match self.catalog.fetch_cards_in_set(&set_name).await {
            Ok(cards) => cards,
            Err(error) => {
                warn!(%error, set_name = %set_name, "catalog set listing failed");
                Vec::new()
            }
        };
        debug!(
            code,
            normalized = %normalized,
            set_name = %set_name,
            candidates = candidates.len(),
            "searching set for printing"
        );

        candidates
            .into_iter()
            .find_map(|card| {
                let printing = card
                    .printing_matching(&[code, normalized.as_str()])
                    .cloned()?;
                Some((card, Some(printing)))
            })
            .ok_or_else(|| {
                Error::resolution(
                    format!(
                        "Card {code} was not found in set \"{set_name}\". \
                         Please verify the code printed on the card."
                    ),
                    Vec::new(),
                )
            })
    }

    async fn resolve_stored_code(&self, code: &str) -> Result<(Card, Option<Printing>), Error> {
        let normalized = normalize_set_code(code);
        let mut candidates = vec![code];
        if normalized != code {
            candidates.push(normalized.as_str());
        }
        for candidate in candidates {
            if let Some(card) = self
                .card_repo
                .find_by_set_code(candidate)
                .await
                .map_err(map_card_repository_error)?
            {
                let printing = card.printing_matching(&[code, normalized.as_str()]).cloned();
                return Ok((card, printing));
            }
        }
        Err(Error::resolution(
            format!("No card matches {code}. Enter a catalog id or the code printed on the card."),
            Vec::new(),
        ))
    }
}

#[async_trait]
impl<C, R> CardCodeResolution for SetCodeResolver<C, R>
where
    C: CardCatalogSource,
    R: CardRepository,
{
    async fn resolve(&self, identifier: &str) -> Result<CardResolution, Error> {
        let original = identifier.trim();
        if original.is_empty() {
            return Err(Error::validation("card identifier must not be empty"));
        }

        let (card, matched_printing) = if original.contains('-') {
            self.resolve_set_code(original).await?
        } else if is_catalog_id(original) {
            let card = self.lookup_catalog_id(original).await.ok_or_else(|| {
                Error::resolution(format!("No card found with id {original}"), Vec::new())
            })?;
            (card, None)
        } else if let Some(card) = self.lookup_catalog_id(original).await {
            (card, None)
        } else {
            self.resolve_stored_code(original).await?
        };

        Ok(CardResolution {
            card,
            matched_printing,
            detected_language: detect_language(original),
            original_code: original.to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "set_code_resolver_tests.rs"]
mod tests;
