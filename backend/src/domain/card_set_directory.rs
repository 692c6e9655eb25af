//! Cached set-code to set-name directory.
//!
//! The catalog's set directory is large and changes rarely, so it is fetched
//! lazily and kept for a TTL (24 hours by default). The cache is an injected
//! service rather than a process global:
//! - cold until the first access, warm while fresh, expired after the TTL or
//!   an explicit [`CardSetDirectoryCache::invalidate`];
//! - concurrent refreshes collapse into one in-flight fetch;
//! - a failed fetch keeps serving the previous snapshot (or an empty
//!   directory if nothing was ever fetched).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::error::MAX_RESOLUTION_SUGGESTIONS;
use crate::domain::ports::{CardCatalogSource, CardSetListing};

/// Default freshness window of the set directory.
pub const DEFAULT_SET_DIRECTORY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Snapshot of the catalog's set directory keyed by upper-cased set prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardSetDirectory {
    sets: BTreeMap<String, String>,
}

impl CardSetDirectory {
    /// Build a directory from catalog listings. The first listing of a code
    /// wins; blank codes are skipped.
    pub fn from_listings(listings: impl IntoIterator<Item = CardSetListing>) -> Self {
        let mut sets = BTreeMap::new();
        for listing in listings {
            let code = listing.set_code.trim().to_ascii_uppercase();
            if code.is_empty() {
                continue;
            }
            sets.entry(code).or_insert(listing.set_name);
        }
        Self { sets }
    }

    /// Full set name for a set prefix (case-insensitive).
    pub fn set_name(&self, prefix: &str) -> Option<&str> {
        self.sets
            .get(&prefix.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Up to five known codes sharing the first two characters of `prefix`.
    ///
    /// # Examples
    /// ```
    /// use deck_engine::domain::CardSetDirectory;
    /// use deck_engine::domain::ports::CardSetListing;
    ///
    /// let directory = CardSetDirectory::from_listings([
    ///     CardSetListing { set_code: "LDK2".into(), set_name: "Legendary Decks II".into() },
    ///     CardSetListing { set_code: "LOB".into(), set_name: "Legend of Blue Eyes".into() },
    /// ]);
    /// assert_eq!(directory.suggestions("LDX9"), vec!["LDK2".to_owned()]);
    /// ```
    pub fn suggestions(&self, prefix: &str) -> Vec<String> {
        let stem: String = prefix.trim().to_ascii_uppercase().chars().take(2).collect();
        if stem.is_empty() {
            return Vec::new();
        }
        self.sets
            .keys()
            .filter(|code| code.starts_with(stem.as_str()))
            .take(MAX_RESOLUTION_SUGGESTIONS)
            .cloned()
            .collect()
    }

    /// Number of known sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the directory holds no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Freshness state of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing fetched yet.
    Cold,
    /// Snapshot within its TTL.
    Warm,
    /// Snapshot past its TTL or invalidated.
    Expired,
}

#[derive(Debug, Clone)]
struct CachedDirectory {
    directory: Arc<CardSetDirectory>,
    fetched_at: DateTime<Utc>,
    invalidated: bool,
}

/// TTL cache over the catalog's set directory with single-flight refresh.
pub struct CardSetDirectoryCache<S> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    snapshot: RwLock<Option<CachedDirectory>>,
    refresh_gate: Mutex<()>,
    refresh_attempts: AtomicU64,
}

impl<S> CardSetDirectoryCache<S> {
    /// Create a cold cache.
    pub fn new(source: Arc<S>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            snapshot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            refresh_attempts: AtomicU64::new(0),
        }
    }

    /// Current freshness state.
    pub fn state(&self) -> CacheState {
        match self.read_snapshot() {
            None => CacheState::Cold,
            Some(cached) if self.is_fresh(&cached) => CacheState::Warm,
            Some(_) => CacheState::Expired,
        }
    }

    /// Mark the snapshot expired so the next access refetches. The old
    /// snapshot remains available as a fallback.
    pub fn invalidate(&self) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = guard.as_mut() {
            cached.invalidated = true;
        }
    }

    fn read_snapshot(&self) -> Option<CachedDirectory> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_fresh(&self, cached: &CachedDirectory) -> bool {
        !cached.invalidated && self.clock.utc() - cached.fetched_at < self.ttl
    }

    fn fresh_directory(&self) -> Option<Arc<CardSetDirectory>> {
        self.read_snapshot()
            .filter(|cached| self.is_fresh(cached))
            .map(|cached| cached.directory)
    }

    fn last_known_directory(&self) -> Arc<CardSetDirectory> {
        self.read_snapshot()
            .map(|cached| cached.directory)
            .unwrap_or_default()
    }

    fn store(&self, directory: Arc<CardSetDirectory>) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CachedDirectory {
            directory,
            fetched_at: self.clock.utc(),
            invalidated: false,
        });
    }
}

impl<S> CardSetDirectoryCache<S>
where
    S: CardCatalogSource,
{
    /// Return the set directory, refreshing it when cold or expired.
    ///
    /// Never fails: fetch errors are logged and the last known snapshot (or
    /// an empty directory) is returned instead.
    pub async fn get_card_sets(&self) -> Arc<CardSetDirectory> {
        if let Some(directory) = self.fresh_directory() {
            return directory;
        }

        let observed_attempts = self.refresh_attempts.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;
        if self.refresh_attempts.load(Ordering::Acquire) != observed_attempts {
            // Another caller refreshed while this one waited on the gate.
            return self.last_known_directory();
        }

        let directory = match self.source.fetch_card_sets().await {
            Ok(listings) => {
                let directory = Arc::new(CardSetDirectory::from_listings(listings));
                debug!(sets = directory.len(), "refreshed card set directory");
                self.store(Arc::clone(&directory));
                directory
            }
            Err(error) => {
                let fallback = self.last_known_directory();
                warn!(
                    %error,
                    cached_sets = fallback.len(),
                    "card set directory refresh failed; serving last known snapshot"
                );
                fallback
            }
        };
        self.refresh_attempts.fetch_add(1, Ordering::AcqRel);
        directory
    }
}
