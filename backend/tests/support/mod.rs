//! Shared helpers for deck engine integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! crate's own unit-test fixtures are not visible here. This module holds the
//! small doubles the scenario suites share.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use deck_engine::domain::ports::{CardCatalogSource, CardCatalogSourceError, CardSetListing};
use deck_engine::domain::{
    Card, CardId, Deck, DeckId, DeckLedgerService, DeckValidationService, Printing,
    RestrictionStatus, UserId,
};
use deck_engine::outbound::memory::InMemoryDeckStore;
use mockable::Clock;

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that only moves when told to.
pub struct SteppedClock(Mutex<DateTime<Utc>>);

impl SteppedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_hours(&self, hours: i64) {
        *self.0.lock().expect("clock mutex") += TimeDelta::hours(hours);
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

/// Build a card with the given catalog id.
pub fn card(id: &str, name: &str, frame: &str, restriction: RestrictionStatus) -> Card {
    Card {
        id: CardId::new(id).expect("valid card id"),
        name: name.to_owned(),
        category: format!("{frame} card"),
        frame_category: frame.to_owned(),
        restriction,
        printings: Vec::new(),
    }
}

/// Attach a printing to a card.
pub fn printed(mut card: Card, set_code: &str, set_name: &str) -> Card {
    card.printings.push(Printing {
        set_code: set_code.to_owned(),
        rarity: "Common".to_owned(),
        set_name: set_name.to_owned(),
    });
    card
}

pub type Ledger = DeckLedgerService<InMemoryDeckStore, InMemoryDeckStore>;
pub type Validator = DeckValidationService<InMemoryDeckStore, InMemoryDeckStore>;

/// One deck in an in-memory store with services wired over it.
pub struct DeckHarness {
    pub store: Arc<InMemoryDeckStore>,
    pub clock: Arc<SteppedClock>,
    pub ledger: Arc<Ledger>,
    pub validator: Validator,
    pub deck_id: DeckId,
    pub owner: UserId,
}

impl DeckHarness {
    pub fn new(enforce_banlist: bool) -> Self {
        let store = Arc::new(InMemoryDeckStore::new());
        let clock = Arc::new(SteppedClock::new(fixture_timestamp()));
        let owner = UserId::random();
        let deck_id = DeckId::random();
        store.insert_deck(Deck {
            id: deck_id,
            owner,
            enforce_banlist,
            updated_at: fixture_timestamp(),
        });
        let ledger = Arc::new(DeckLedgerService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));
        let validator = DeckValidationService::new(Arc::clone(&store), Arc::clone(&store));
        Self {
            store,
            clock,
            ledger,
            validator,
            deck_id,
            owner,
        }
    }

    pub fn with_cards(self, cards: impl IntoIterator<Item = Card>) -> Self {
        for card in cards {
            self.store.insert_card(card);
        }
        self
    }
}

/// Catalog double serving a fixed directory and card list.
///
/// Set directory fetches are counted, can be slowed down to widen race
/// windows, and can be switched to fail.
#[derive(Default)]
pub struct ScriptedCatalog {
    sets: Vec<CardSetListing>,
    cards: Vec<Card>,
    delay: Option<Duration>,
    failing: AtomicBool,
    set_fetches: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn new(sets: &[(&str, &str)], cards: Vec<Card>) -> Self {
        Self {
            sets: sets
                .iter()
                .map(|(code, name)| CardSetListing {
                    set_code: (*code).to_owned(),
                    set_name: (*name).to_owned(),
                })
                .collect(),
            cards,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_from_now(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn set_fetches(&self) -> usize {
        self.set_fetches.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), CardCatalogSourceError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CardCatalogSourceError::transport("catalog offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CardCatalogSource for ScriptedCatalog {
    async fn fetch_card_sets(&self) -> Result<Vec<CardSetListing>, CardCatalogSourceError> {
        self.set_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.check_available()?;
        Ok(self.sets.clone())
    }

    async fn fetch_card_by_id(&self, id: &CardId) -> Result<Option<Card>, CardCatalogSourceError> {
        self.check_available()?;
        Ok(self.cards.iter().find(|card| card.id == *id).cloned())
    }

    async fn fetch_cards_in_set(
        &self,
        set_name: &str,
    ) -> Result<Vec<Card>, CardCatalogSourceError> {
        self.check_available()?;
        Ok(self
            .cards
            .iter()
            .filter(|card| {
                card.printings
                    .iter()
                    .any(|printing| printing.set_name == set_name)
            })
            .cloned()
            .collect())
    }
}
