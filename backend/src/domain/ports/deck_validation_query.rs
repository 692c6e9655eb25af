//! Driving port for read-side deck legality audits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CardId, DeckId, Error};

/// Result of a partition size audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckValidation {
    /// Whether no violations were found.
    pub valid: bool,
    /// Human-readable violations in a stable order.
    pub violations: Vec<String>,
    /// Main Deck size.
    pub main_count: u32,
    /// Extra Deck size.
    pub extra_count: u32,
}

/// A card held above its current banlist ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanlistViolation {
    /// Offending card.
    pub card_id: CardId,
    /// Card display name.
    pub card_name: String,
    /// Copies held across both partitions.
    pub quantity: u32,
    /// Copies the banlist permits.
    pub ceiling: u32,
}

/// Port for auditing a deck independently of insert-time enforcement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeckValidationQuery: Send + Sync {
    /// Check partition sizes against the format bounds.
    async fn validate_deck(&self, deck_id: &DeckId) -> Result<DeckValidation, Error>;

    /// List cards exceeding their banlist ceiling, e.g. after the banlist
    /// changed or enforcement was switched on.
    async fn banlist_violations(&self, deck_id: &DeckId) -> Result<Vec<BanlistViolation>, Error>;
}
