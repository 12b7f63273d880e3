//! Storefront API lookups: tax configuration and discount codes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cartline_commerce::cart::{Discount, DiscountKind, TaxConfig};
use cartline_commerce::lookup::{DiscountResolver, LookupError, TaxConfigSource};
use cartline_commerce::Money;

use crate::{FetchClient, FetchError};

/// Paths of the two lookups, relative to the client's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    /// Tax and shipping configuration.
    pub tax_path: String,
    /// Discount lookup; the code is appended as a path segment.
    pub discount_path: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            tax_path: "/order/tax".to_string(),
            discount_path: "/discount".to_string(),
        }
    }
}

/// Tax payload as served by the storefront backend.
#[derive(Debug, Default, Deserialize)]
struct TaxPayload {
    #[serde(rename = "ShiippingCharge", alias = "shippingCharge", alias = "shipping_charge")]
    shipping_charge: Option<Decimal>,
    #[serde(rename = "GSTtax", alias = "gstPercent", alias = "gst_percent")]
    gst_percent: Option<Decimal>,
}

impl From<TaxPayload> for TaxConfig {
    fn from(payload: TaxPayload) -> Self {
        TaxConfig::new(
            Money::new(payload.shipping_charge.unwrap_or_default()),
            payload.gst_percent,
        )
    }
}

/// Discount payload as served by the storefront backend.
#[derive(Debug, Deserialize)]
struct DiscountPayload {
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    value: Decimal,
}

impl DiscountPayload {
    fn into_discount(self, requested: &str) -> Discount {
        let kind = if self.kind == "PERCENTAGE" {
            DiscountKind::Percentage
        } else {
            DiscountKind::Flat
        };
        Discount {
            code: self.code.unwrap_or_else(|| requested.to_string()),
            kind,
            value: self.value,
        }
    }
}

/// Parse a tax configuration body. Missing or null fields default to none.
pub fn parse_tax_config(body: &[u8]) -> Result<TaxConfig, FetchError> {
    let payload: Option<TaxPayload> = crate::client::decode_body(body)?;
    Ok(payload.unwrap_or_default().into())
}

/// Parse a discount lookup body. A `null` body means the code is unknown.
pub fn parse_discount(body: &[u8], requested: &str) -> Result<Option<Discount>, FetchError> {
    let payload: Option<DiscountPayload> = crate::client::decode_body(body)?;
    Ok(payload.map(|p| p.into_discount(requested)))
}

/// HTTP implementation of both storefront lookups.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
    endpoints: ApiEndpoints,
}

impl StorefrontApi {
    /// Create an API over a configured client.
    pub fn new(client: FetchClient, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// The configured endpoints.
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl TaxConfigSource for StorefrontApi {
    async fn fetch_tax_config(&self) -> Result<TaxConfig, LookupError> {
        let url = self.client.url(&self.endpoints.tax_path, None)?;
        let payload: Option<TaxPayload> = self.client.get_json(url).await?;
        let config = TaxConfig::from(payload.unwrap_or_default());
        tracing::debug!(
            shipping = %config.shipping_charge,
            gst = ?config.gst_percent,
            "fetched tax config"
        );
        Ok(config)
    }
}

#[async_trait]
impl DiscountResolver for StorefrontApi {
    async fn resolve_discount(&self, code: &str) -> Result<Option<Discount>, LookupError> {
        let url = self.client.url(&self.endpoints.discount_path, Some(code))?;
        let payload: Option<DiscountPayload> = self.client.get_json(url).await?;
        let discount = payload.map(|p| p.into_discount(code));
        tracing::debug!(code, found = discount.is_some(), "resolved discount");
        Ok(discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_tax_config_backend_names() {
        let config = parse_tax_config(br#"{"ShiippingCharge": 40, "GSTtax": "18"}"#).unwrap();
        assert_eq!(config.shipping_charge, Money::new(dec!(40)));
        assert_eq!(config.gst_percent, Some(dec!(18)));
    }

    #[test]
    fn test_parse_tax_config_aliases_and_nulls() {
        let config = parse_tax_config(br#"{"shippingCharge": "49.50", "gstPercent": null}"#).unwrap();
        assert_eq!(config.shipping_charge, Money::new(dec!(49.50)));
        assert_eq!(config.gst_percent, None);

        assert_eq!(parse_tax_config(b"{}").unwrap(), TaxConfig::default());
        assert_eq!(parse_tax_config(b"null").unwrap(), TaxConfig::default());
    }

    #[test]
    fn test_parse_discount_kinds() {
        let pct = parse_discount(br#"{"code":"SAVE10","type":"PERCENTAGE","value":10}"#, "save10")
            .unwrap()
            .unwrap();
        assert_eq!(pct, Discount::percentage("SAVE10", dec!(10)));

        let flat = parse_discount(br#"{"type":"FIXED","value":"50"}"#, "FLAT50")
            .unwrap()
            .unwrap();
        assert_eq!(flat, Discount::flat("FLAT50", dec!(50)));

        // lowercase is not PERCENTAGE
        let lower = parse_discount(br#"{"type":"percentage","value":5}"#, "X")
            .unwrap()
            .unwrap();
        assert_eq!(lower.kind, DiscountKind::Flat);
    }

    #[test]
    fn test_parse_discount_unknown_and_malformed() {
        assert_eq!(parse_discount(b"null", "NOPE").unwrap(), None);
        assert!(matches!(
            parse_discount(br#"{"type":"PERCENTAGE"}"#, "X"),
            Err(FetchError::ParseError(_))
        ));
    }

    #[test]
    fn test_endpoints_default_and_partial() {
        let endpoints: ApiEndpoints = serde_json::from_str(r#"{"tax_path":"/v2/tax"}"#).unwrap();
        assert_eq!(endpoints.tax_path, "/v2/tax");
        assert_eq!(endpoints.discount_path, "/discount");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = FetchClient::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let api = StorefrontApi::new(client, ApiEndpoints::default());

        let err = api.resolve_discount("SAVE10").await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_) | LookupError::Timeout));
    }
}
