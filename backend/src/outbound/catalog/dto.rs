//! DTOs for decoding card catalog JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records (`Card`, `CardSetListing`) in one pass.

use serde::Deserialize;

use crate::domain::ports::CardSetListing;
use crate::domain::{Card, CardId, Printing, RestrictionStatus};

#[derive(Debug, Deserialize)]
pub(super) struct CardSetDto {
    pub(super) set_name: String,
    pub(super) set_code: String,
}

impl From<CardSetDto> for CardSetListing {
    fn from(dto: CardSetDto) -> Self {
        Self {
            set_code: dto.set_code,
            set_name: dto.set_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CardInfoResponseDto {
    #[serde(default)]
    pub(super) data: Vec<CardDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CardDto {
    pub(super) id: u64,
    pub(super) name: String,
    #[serde(rename = "type")]
    pub(super) category: String,
    #[serde(rename = "frameType")]
    pub(super) frame_type: String,
    #[serde(default)]
    pub(super) card_sets: Vec<CardPrintingDto>,
    pub(super) banlist_info: Option<BanlistInfoDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CardPrintingDto {
    pub(super) set_name: String,
    pub(super) set_code: String,
    #[serde(default)]
    pub(super) set_rarity: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct BanlistInfoDto {
    pub(super) ban_tcg: Option<String>,
}

impl CardInfoResponseDto {
    pub(super) fn into_domain_cards(self) -> Result<Vec<Card>, String> {
        self.data.into_iter().map(CardDto::into_domain_card).collect()
    }
}

impl CardDto {
    fn into_domain_card(self) -> Result<Card, String> {
        let id = CardId::new(self.id.to_string())
            .map_err(|error| format!("card {} has an invalid id: {error}", self.name))?;
        let restriction = RestrictionStatus::from_catalog_label(
            self.banlist_info
                .as_ref()
                .and_then(|info| info.ban_tcg.as_deref()),
        );
        let printings = self
            .card_sets
            .into_iter()
            .map(|printing| Printing {
                set_code: printing.set_code,
                rarity: printing.set_rarity,
                set_name: printing.set_name,
            })
            .collect();

        Ok(Card {
            id,
            name: self.name,
            category: self.category,
            frame_category: self.frame_type,
            restriction,
            printings,
        })
    }
}
