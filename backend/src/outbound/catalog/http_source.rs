//! Reqwest-backed card catalog adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain cards.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{CardInfoResponseDto, CardSetDto};
use crate::domain::ports::{CardCatalogSource, CardCatalogSourceError, CardSetListing};
use crate::domain::{Card, CardId};

const DEFAULT_USER_AGENT: &str = "deck-engine-catalog/0.1";
const CARD_SETS_PATH: &str = "cardsets.php";
const CARD_INFO_PATH: &str = "cardinfo.php";
const NO_MATCH_MARKER: &str = "No card matching";

/// Catalog source adapter issuing GET requests against one API base URL.
pub struct CatalogHttpSource {
    client: Client,
    base_url: Url,
}

impl CatalogHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `base_url` should end with a slash so endpoint paths join beneath it.
    /// ```rust,ignore
    /// let source = CatalogHttpSource::new(base_url, Duration::from_secs(10));
    /// assert!(source.is_ok() || source.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(
        &self,
        path: &str,
        query: Option<(&str, &str)>,
    ) -> Result<Url, CardCatalogSourceError> {
        let mut url = self.base_url.join(path).map_err(|error| {
            CardCatalogSourceError::invalid_request(format!("invalid catalog URL: {error}"))
        })?;
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// GET `url`, returning `None` when the catalog reports no matching card.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Option<T>, CardCatalogSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if is_no_match(status, body.as_ref()) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref()).map(Some)
    }
}

#[async_trait]
impl CardCatalogSource for CatalogHttpSource {
    async fn fetch_card_sets(&self) -> Result<Vec<CardSetListing>, CardCatalogSourceError> {
        let url = self.endpoint(CARD_SETS_PATH, None)?;
        let sets: Vec<CardSetDto> = self.get_json(url).await?.unwrap_or_default();
        Ok(sets.into_iter().map(CardSetListing::from).collect())
    }

    async fn fetch_card_by_id(&self, id: &CardId) -> Result<Option<Card>, CardCatalogSourceError> {
        let url = self.endpoint(CARD_INFO_PATH, Some(("id", id.as_str())))?;
        let cards = self.fetch_cards(url).await?;
        Ok(cards.into_iter().find(|card| card.id == *id))
    }

    async fn fetch_cards_in_set(
        &self,
        set_name: &str,
    ) -> Result<Vec<Card>, CardCatalogSourceError> {
        let url = self.endpoint(CARD_INFO_PATH, Some(("cardset", set_name)))?;
        self.fetch_cards(url).await
    }
}

impl CatalogHttpSource {
    async fn fetch_cards(&self, url: Url) -> Result<Vec<Card>, CardCatalogSourceError> {
        let Some(response) = self.get_json::<CardInfoResponseDto>(url).await? else {
            return Ok(Vec::new());
        };
        response
            .into_domain_cards()
            .map_err(CardCatalogSourceError::decode)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CardCatalogSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        CardCatalogSourceError::decode(format!("invalid catalog JSON payload: {error}"))
    })
}

/// The catalog answers lookups without results with a 400 and an error body.
fn is_no_match(status: StatusCode, body: &[u8]) -> bool {
    matches!(status, StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND)
        && String::from_utf8_lossy(body).contains(NO_MATCH_MARKER)
}

fn map_transport_error(error: reqwest::Error) -> CardCatalogSourceError {
    if error.is_timeout() {
        CardCatalogSourceError::timeout(error.to_string())
    } else {
        CardCatalogSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CardCatalogSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => CardCatalogSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CardCatalogSourceError::timeout(message)
        }
        _ if status.is_client_error() => CardCatalogSourceError::invalid_request(message),
        _ => CardCatalogSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network catalog mapping helpers.

    use super::*;
    use crate::domain::RestrictionStatus;
    use rstest::rstest;

    fn source() -> CatalogHttpSource {
        let base_url = Url::parse("https://catalog.test/api/v7/").expect("valid URL");
        CatalogHttpSource::new(base_url, Duration::from_secs(5)).expect("client builds")
    }

    #[test]
    fn endpoint_joins_path_and_encodes_query() {
        let url = source()
            .endpoint(CARD_INFO_PATH, Some(("cardset", "Legendary Decks II")))
            .expect("endpoint builds");
        assert_eq!(
            url.as_str(),
            "https://catalog.test/api/v7/cardinfo.php?cardset=Legendary+Decks+II"
        );
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_http_statuses_to_domain_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"error\":\"backend unavailable\"}");
        let mapped = match status {
            StatusCode::TOO_MANY_REQUESTS => {
                matches!(error, CardCatalogSourceError::RateLimited { .. })
            }
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                matches!(error, CardCatalogSourceError::Timeout { .. })
            }
            StatusCode::BAD_REQUEST => {
                matches!(error, CardCatalogSourceError::InvalidRequest { .. })
            }
            _ => matches!(error, CardCatalogSourceError::Transport { .. }),
        };
        assert!(mapped, "unexpected mapping for {status}: {error:?}");
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, "{\"error\":\"No card matching your query was found.\"}", true)]
    #[case(StatusCode::BAD_REQUEST, "{\"error\":\"Malformed query\"}", false)]
    #[case(StatusCode::OK, "No card matching", false)]
    fn recognises_empty_lookup_responses(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_no_match(status, body.as_bytes()), expected);
    }

    #[test]
    fn decodes_cards_with_printings_and_banlist_status() {
        let body = r#"{
            "data": [
                {
                    "id": 55144522,
                    "name": "Pot of Greed",
                    "type": "Spell Card",
                    "frameType": "spell",
                    "card_sets": [
                        { "set_name": "Legend of Blue Eyes White Dragon", "set_code": "LOB-119", "set_rarity": "Rare" }
                    ],
                    "banlist_info": { "ban_tcg": "Banned" }
                },
                {
                    "id": 44508094,
                    "name": "Stardust Dragon",
                    "type": "Synchro Monster",
                    "frameType": "synchro"
                }
            ]
        }"#;

        let cards = decode::<CardInfoResponseDto>(body.as_bytes())
            .and_then(|dto| dto.into_domain_cards().map_err(CardCatalogSourceError::decode))
            .expect("payload decodes");

        let [pot, stardust] = cards.as_slice() else {
            panic!("expected two cards, got {}", cards.len());
        };
        assert_eq!(pot.id.as_str(), "55144522");
        assert_eq!(pot.restriction, RestrictionStatus::Forbidden);
        assert_eq!(
            pot.printings.first().map(|printing| printing.rarity.as_str()),
            Some("Rare")
        );
        assert_eq!(stardust.frame_category, "synchro");
        assert_eq!(stardust.restriction, RestrictionStatus::Unrestricted);
        assert!(stardust.printings.is_empty());
    }

    #[test]
    fn decodes_set_directory() {
        let body = r#"[
            { "set_name": "Legendary Decks II", "set_code": "LDK2", "num_of_cards": 120 }
        ]"#;
        let sets: Vec<CardSetDto> = decode(body.as_bytes()).expect("payload decodes");
        let listings: Vec<CardSetListing> = sets.into_iter().map(CardSetListing::from).collect();
        assert_eq!(
            listings,
            vec![CardSetListing {
                set_code: "LDK2".to_owned(),
                set_name: "Legendary Decks II".to_owned(),
            }]
        );
    }

    #[test]
    fn rejects_malformed_payloads_as_decode_errors() {
        let error = decode::<CardInfoResponseDto>(b"{\"data\": [{\"id\": \"x\"}]}")
            .expect_err("malformed payload");
        assert!(matches!(error, CardCatalogSourceError::Decode { .. }));
    }
}
