//! Deck construction and legality engine.
//!
//! The crate owns the rule-dense core of a trading card deck builder: deck
//! partition ledgers with banlist enforcement, read-side legality audits, and
//! resolution of localized printed card codes against an external catalog.
//! Transport, authentication and persistence schemas live elsewhere and reach
//! the engine through the ports in [`domain::ports`].

pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;
