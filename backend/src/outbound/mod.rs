//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **catalog**: reqwest-backed client for the third-party card catalog API
//! - **memory**: process-local deck and card store
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod catalog;
pub mod memory;
