//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CardRepository`, `DeckRepository`, `CardCatalogSource`)
//! describe the collaborators the engine consumes. Driving ports
//! (`DeckLedgerCommand`, `DeckValidationQuery`, `CardCodeResolution`) are what
//! controllers and UI adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod card_catalog_source;
mod card_code_resolution;
mod card_repository;
mod deck_ledger_command;
mod deck_repository;
mod deck_validation_query;

#[cfg(test)]
pub use card_catalog_source::MockCardCatalogSource;
pub use card_catalog_source::{
    CardCatalogSource, CardCatalogSourceError, CardSetListing, FixtureCardCatalogSource,
};
#[cfg(test)]
pub use card_code_resolution::MockCardCodeResolution;
pub use card_code_resolution::{CardCodeResolution, CardResolution};
#[cfg(test)]
pub use card_repository::MockCardRepository;
pub use card_repository::{CardRepository, CardRepositoryError};
#[cfg(test)]
pub use deck_ledger_command::MockDeckLedgerCommand;
pub use deck_ledger_command::{
    AddCardRequest, DeckLedgerCommand, RemoveCardRequest, UpdateQuantityRequest,
};
#[cfg(test)]
pub use deck_repository::MockDeckRepository;
pub use deck_repository::{DeckRepository, DeckRepositoryError};
#[cfg(test)]
pub use deck_validation_query::MockDeckValidationQuery;
pub use deck_validation_query::{BanlistViolation, DeckValidation, DeckValidationQuery};
