//! Port for the local card store.
//!
//! The repository supplies the frame category and restriction status the deck
//! rules depend on.

use async_trait::async_trait;

use crate::domain::{Card, CardId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by card repository adapters.
    pub enum CardRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "card repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "card repository query failed: {message}",
    }
}

/// Port for card lookups and for recording cards resolved from the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Fetch a card by catalog id.
    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardRepositoryError>;

    /// Fetch a card by one of its printed codes (case-insensitive).
    async fn find_by_set_code(&self, code: &str) -> Result<Option<Card>, CardRepositoryError>;

    /// Insert or replace a card record.
    async fn save(&self, card: &Card) -> Result<(), CardRepositoryError>;
}
