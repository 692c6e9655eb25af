//! Card catalog outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `CardCatalogSource` port.

mod dto;
mod http_source;

pub use http_source::CatalogHttpSource;
