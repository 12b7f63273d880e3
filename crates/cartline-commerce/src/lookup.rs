//! Remote lookups the cart page depends on.
//!
//! Implementations live outside this crate (see `cartline-data` for the
//! HTTP one). Both operations are idempotent and safe to call repeatedly.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::cart::{Discount, TaxConfig};

/// A lookup that did not produce an answer.
///
/// "Not found" is not an error; resolvers return `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Transport-level failure (connection refused, DNS, TLS...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with an unexpected status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The lookup did not complete in time.
    #[error("Lookup timed out")]
    Timeout,
}

/// Source of the store's shipping and GST configuration.
#[async_trait]
pub trait TaxConfigSource: Send + Sync {
    /// Fetch the current tax/shipping configuration.
    async fn fetch_tax_config(&self) -> Result<TaxConfig, LookupError>;
}

/// Resolves discount codes.
#[async_trait]
pub trait DiscountResolver: Send + Sync {
    /// Resolve `code`; `Ok(None)` means the code does not exist or expired.
    async fn resolve_discount(&self, code: &str) -> Result<Option<Discount>, LookupError>;
}

#[async_trait]
impl<T: TaxConfigSource + ?Sized> TaxConfigSource for Arc<T> {
    async fn fetch_tax_config(&self) -> Result<TaxConfig, LookupError> {
        (**self).fetch_tax_config().await
    }
}

#[async_trait]
impl<T: DiscountResolver + ?Sized> DiscountResolver for Arc<T> {
    async fn resolve_discount(&self, code: &str) -> Result<Option<Discount>, LookupError> {
        (**self).resolve_discount(code).await
    }
}
