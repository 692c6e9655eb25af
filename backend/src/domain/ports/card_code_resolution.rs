//! Driving port for resolving printed card codes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Card, Error, LanguageTag, Printing};

/// A card identity resolved from a user-entered identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResolution {
    /// Resolved card.
    pub card: Card,
    /// Printing matching the code, absent when resolved by catalog id.
    pub matched_printing: Option<Printing>,
    /// Language detected from the identifier as entered.
    pub detected_language: LanguageTag,
    /// Identifier as entered (trimmed).
    pub original_code: String,
}

/// Port for turning catalog ids or printed set codes into cards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardCodeResolution: Send + Sync {
    /// Resolve a numeric catalog id or a hyphenated printed code.
    async fn resolve(&self, identifier: &str) -> Result<CardResolution, Error>;
}
