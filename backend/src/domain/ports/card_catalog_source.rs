//! Driven port for the third-party card catalog API.
//!
//! Only the endpoints the resolver needs are modelled: the set directory and
//! card records filtered by id or by containing set.

use async_trait::async_trait;

use crate::domain::{Card, CardId};

use super::define_port_error;

/// One row of the catalog's set directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSetListing {
    /// Set code prefix, e.g. `LOB`.
    pub set_code: String,
    /// Full set name.
    pub set_name: String,
}

define_port_error! {
    /// Errors surfaced while calling the catalog.
    pub enum CardCatalogSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "catalog transport failed: {message}",
        /// Catalog call exceeded its timeout.
        Timeout { message: String } =>
            "catalog timeout: {message}",
        /// Catalog rate-limited the request.
        RateLimited { message: String } =>
            "catalog rate limited request: {message}",
        /// Catalog response could not be decoded.
        Decode { message: String } =>
            "catalog response decode failed: {message}",
        /// Adapter rejected the request before execution.
        InvalidRequest { message: String } =>
            "catalog request invalid: {message}",
    }
}

/// Port for querying the card catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardCatalogSource: Send + Sync {
    /// Fetch the full set-code to set-name directory.
    async fn fetch_card_sets(&self) -> Result<Vec<CardSetListing>, CardCatalogSourceError>;

    /// Fetch one card by catalog id; `None` when the catalog has no such card.
    async fn fetch_card_by_id(&self, id: &CardId) -> Result<Option<Card>, CardCatalogSourceError>;

    /// Fetch every card printed in the named set.
    async fn fetch_cards_in_set(&self, set_name: &str)
    -> Result<Vec<Card>, CardCatalogSourceError>;
}

/// Fixture implementation returning an empty catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCardCatalogSource;

#[async_trait]
impl CardCatalogSource for FixtureCardCatalogSource {
    async fn fetch_card_sets(&self) -> Result<Vec<CardSetListing>, CardCatalogSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_card_by_id(&self, _id: &CardId) -> Result<Option<Card>, CardCatalogSourceError> {
        Ok(None)
    }

    async fn fetch_cards_in_set(
        &self,
        _set_name: &str,
    ) -> Result<Vec<Card>, CardCatalogSourceError> {
        Ok(Vec::new())
    }
}
