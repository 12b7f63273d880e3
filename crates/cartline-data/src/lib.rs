//! HTTP lookups against the storefront API.
//!
//! [`StorefrontApi`] implements the commerce crate's [`TaxConfigSource`] and
//! [`DiscountResolver`] seams on top of a small JSON client.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartline_data::{ApiEndpoints, FetchClient, StorefrontApi};
//!
//! let client = FetchClient::new()?.with_base_url("https://shop.example.com/api");
//! let api = StorefrontApi::new(client, ApiEndpoints::default());
//!
//! let tax = api.fetch_tax_config().await?;
//! let discount = api.resolve_discount("SAVE10").await?;
//! ```
//!
//! [`TaxConfigSource`]: cartline_commerce::lookup::TaxConfigSource
//! [`DiscountResolver`]: cartline_commerce::lookup::DiscountResolver

mod api;
mod client;
mod error;

pub use api::{parse_discount, parse_tax_config, ApiEndpoints, StorefrontApi};
pub use client::{FetchClient, DEFAULT_TIMEOUT};
pub use error::FetchError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiEndpoints, FetchClient, FetchError, StorefrontApi};
}
