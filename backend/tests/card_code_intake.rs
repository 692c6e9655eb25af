//! Card-code resolution, set directory caching and the add-by-code flow.

use std::sync::Arc;
use std::time::Duration;

use deck_engine::domain::ports::{CardCodeResolution, CardRepository, DeckRepository};
use deck_engine::domain::{
    CacheState, CardIntakeService, CardSetDirectoryCache, DEFAULT_SET_DIRECTORY_TTL, ErrorCode,
    LanguageTag, Partition, RestrictionStatus, SetCodeResolver,
};
use deck_engine::outbound::memory::InMemoryDeckStore;
use mockable::Clock;

mod support;

use support::{DeckHarness, ScriptedCatalog, SteppedClock, card, fixture_timestamp, printed};

const LDK2: &str = "Legendary Decks II";

fn catalog() -> ScriptedCatalog {
    ScriptedCatalog::new(
        &[
            ("LDK2", LDK2),
            ("LD01", "Legendary Duelists"),
            ("LOB", "Legend of Blue Eyes White Dragon"),
        ],
        vec![
            printed(
                card("44508094", "Stardust Dragon", "synchro", RestrictionStatus::Unrestricted),
                "LDK2-ENK40",
                LDK2,
            ),
            printed(
                card("46986414", "Dark Magician", "normal", RestrictionStatus::Unrestricted),
                "LOB-005",
                "Legend of Blue Eyes White Dragon",
            ),
        ],
    )
}

type Resolver = SetCodeResolver<ScriptedCatalog, InMemoryDeckStore>;

struct ResolverHarness {
    catalog: Arc<ScriptedCatalog>,
    clock: Arc<SteppedClock>,
    directory: Arc<CardSetDirectoryCache<ScriptedCatalog>>,
    resolver: Arc<Resolver>,
}

fn resolver_over(catalog: ScriptedCatalog, store: Arc<InMemoryDeckStore>) -> ResolverHarness {
    let catalog = Arc::new(catalog);
    let clock = Arc::new(SteppedClock::new(fixture_timestamp()));
    let directory = Arc::new(CardSetDirectoryCache::new(
        Arc::clone(&catalog),
        Arc::clone(&clock) as Arc<dyn Clock>,
        DEFAULT_SET_DIRECTORY_TTL,
    ));
    let resolver = Arc::new(SetCodeResolver::new(
        Arc::clone(&catalog),
        Arc::clone(&directory),
        store,
    ));
    ResolverHarness {
        catalog,
        clock,
        directory,
        resolver,
    }
}

#[tokio::test]
async fn regional_code_resolves_to_english_printing() {
    let harness = resolver_over(catalog(), Arc::new(InMemoryDeckStore::new()));

    let resolution = harness
        .resolver
        .resolve("LDK2-FRK40")
        .await
        .expect("resolves");

    assert_eq!(resolution.card.name, "Stardust Dragon");
    assert_eq!(resolution.detected_language, LanguageTag::Fr);
    assert_eq!(
        resolution
            .matched_printing
            .map(|printing| printing.set_code),
        Some("LDK2-ENK40".to_owned())
    );
}

#[tokio::test]
async fn unknown_prefix_suggests_related_sets() {
    let harness = resolver_over(catalog(), Arc::new(InMemoryDeckStore::new()));

    let error = harness
        .resolver
        .resolve("LDX1-EN001")
        .await
        .expect_err("unknown prefix");

    assert_eq!(error.code(), ErrorCode::Resolution);
    assert_eq!(error.suggestions(), vec!["LD01", "LDK2"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cold_lookups_share_one_directory_fetch() {
    let harness = resolver_over(
        catalog().with_delay(Duration::from_millis(50)),
        Arc::new(InMemoryDeckStore::new()),
    );

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let resolver = Arc::clone(&harness.resolver);
            tokio::spawn(async move { resolver.resolve("LOB-005").await })
        })
        .collect();
    for task in tasks {
        let resolution = task.await.expect("task completes").expect("resolves");
        assert_eq!(resolution.card.name, "Dark Magician");
    }

    assert_eq!(harness.catalog.set_fetches(), 1);
    assert_eq!(harness.directory.state(), CacheState::Warm);
}

#[tokio::test]
async fn expired_directory_is_refetched_and_failures_keep_last_snapshot() {
    let harness = resolver_over(catalog(), Arc::new(InMemoryDeckStore::new()));
    harness.resolver.card_sets().await;

    harness.clock.advance_hours(25);
    assert_eq!(harness.directory.state(), CacheState::Expired);
    harness.resolver.card_sets().await;
    assert_eq!(harness.catalog.set_fetches(), 2);

    harness.catalog.fail_from_now();
    harness.directory.invalidate();
    let stale = harness.resolver.card_sets().await;

    assert_eq!(harness.catalog.set_fetches(), 3);
    assert_eq!(stale.set_name("LDK2"), Some(LDK2));
}

#[tokio::test]
async fn adding_by_code_records_card_and_places_it_by_frame() {
    let deck = DeckHarness::new(true);
    let resolver = resolver_over(catalog(), Arc::clone(&deck.store));
    let intake = CardIntakeService::new(
        Arc::clone(&resolver.resolver),
        Arc::clone(&deck.store),
        Arc::clone(&deck.ledger),
    );

    let resolution = intake
        .add_card_by_code(deck.deck_id, "ldk2-frk40", 2, deck.owner)
        .await
        .expect("card added");

    let stored = deck
        .store
        .find_by_id(&resolution.card.id)
        .await
        .expect("lookup");
    assert_eq!(stored.map(|card| card.name), Some("Stardust Dragon".to_owned()));
    let entries = deck
        .store
        .list_entries(&deck.deck_id)
        .await
        .expect("entries");
    assert_eq!(entries.len(), 1);
    assert!(
        entries
            .iter()
            .all(|entry| entry.partition == Partition::Extra && entry.quantity == 2)
    );

    let error = intake
        .add_card_by_code(deck.deck_id, "LDK2-ENK40", 2, deck.owner)
        .await
        .expect_err("ceiling reached");
    assert_eq!(error.code(), ErrorCode::Limit);
}

#[tokio::test]
async fn stored_codes_resolve_without_the_catalog() {
    let store = Arc::new(InMemoryDeckStore::new());
    store.insert_card(printed(
        card("89631139", "Blue-Eyes White Dragon", "normal", RestrictionStatus::Unrestricted),
        "SDK001",
        "Starter Deck: Kaiba",
    ));
    let harness = resolver_over(ScriptedCatalog::default(), store);

    let resolution = harness
        .resolver
        .resolve("sdk001")
        .await
        .expect("resolves from store");

    assert_eq!(resolution.card.name, "Blue-Eyes White Dragon");
    assert_eq!(resolution.detected_language, LanguageTag::En);
    assert_eq!(harness.catalog.set_fetches(), 0);
}
