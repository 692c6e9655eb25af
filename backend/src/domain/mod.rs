//! Deck construction domain.
//!
//! Purpose: define the card, deck and banlist types the engine reasons about
//! and the services that enforce deck construction rules over them. Services
//! depend only on the traits in [`ports`]; adapters live in `outbound`.
//!
//! Public surface:
//! - [`classify`] maps a frame category to its [`Partition`].
//! - [`limit_for`] and [`ceiling_for`] derive copy ceilings from a card's
//!   [`RestrictionStatus`].
//! - [`detect_language`] and [`normalize_set_code`] interpret printed codes.
//! - [`CardSetDirectoryCache`] caches the catalog's set directory.
//! - [`SetCodeResolver`], [`DeckLedgerService`], [`DeckValidationService`]
//!   and [`CardIntakeService`] implement the driving ports.
//! - [`Error`] carries every rule outcome as an [`ErrorCode`].

pub mod banlist;
pub mod card;
pub mod card_intake;
pub mod card_set_directory;
pub mod classifier;
pub mod deck;
pub mod deck_ledger;
pub mod deck_validator;
pub mod error;
pub mod ports;
pub mod set_code;
pub mod set_code_resolver;
pub mod user;

pub use self::banlist::{DEFAULT_COPY_CEILING, RestrictionStatus, ceiling_for, limit_for};
pub use self::card::{Card, CardId, CardValidationError, Printing};
pub use self::card_intake::CardIntakeService;
pub use self::card_set_directory::{
    CacheState, CardSetDirectory, CardSetDirectoryCache, DEFAULT_SET_DIRECTORY_TTL,
};
pub use self::classifier::{Partition, classify};
pub use self::deck::{
    Deck, DeckCardEntry, DeckId, EXTRA_DECK_MAX, EntryId, MAIN_DECK_MAX, MAIN_DECK_MIN,
    MAX_ADD_QUANTITY, MIN_ADD_QUANTITY, PartitionCounts, partition_capacity,
};
pub use self::deck_ledger::DeckLedgerService;
pub use self::deck_validator::{DeckValidationService, size_violations};
pub use self::error::{Error, ErrorCode, ErrorValidationError, MAX_RESOLUTION_SUGGESTIONS};
pub use self::set_code::{
    LanguageTag, detect_language, is_catalog_id, normalize_set_code, set_prefix,
};
pub use self::set_code_resolver::SetCodeResolver;
pub use self::user::UserId;

/// Result alias for engine operations.
///
/// # Examples
/// ```
/// use deck_engine::domain::{DeckResult, Error};
///
/// fn reject() -> DeckResult<()> {
///     Err(Error::size("Main Deck cannot exceed 60 cards"))
/// }
/// assert!(reject().is_err());
/// ```
pub type DeckResult<T> = Result<T, Error>;
