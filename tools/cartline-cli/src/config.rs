//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use cartline_commerce::cart::DEFAULT_STORAGE_KEY;
use cartline_commerce::Currency;
use cartline_data::ApiEndpoints;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartlineConfig {
    /// Storefront API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CartlineConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the lookup paths are joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tax configuration path.
    #[serde(default = "default_tax_path")]
    pub tax_path: String,

    /// Discount lookup path; the code is appended as a segment.
    #[serde(default = "default_discount_path")]
    pub discount_path: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Lookup endpoints for the data client.
    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints {
            tax_path: self.tax_path.clone(),
            discount_path: self.discount_path.clone(),
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_tax_path() -> String {
    ApiEndpoints::default().tax_path
}

fn default_discount_path() -> String {
    ApiEndpoints::default().discount_path
}

fn default_timeout_secs() -> u64 {
    cartline_data::DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tax_path: default_tax_path(),
            discount_path: default_discount_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Key the applied discount code is stored under.
    #[serde(default = "default_discount_key")]
    pub discount_key: String,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".cartline").join("storage.json")
}

fn default_discount_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            discount_key: default_discount_key(),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Display currency (ISO code, any case).
    #[serde(default, deserialize_with = "currency_code")]
    pub currency: Currency,

    /// Link printed under a non-empty cart.
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,

    /// Link printed under an empty cart.
    #[serde(default = "default_shop_url")]
    pub shop_url: String,
}

fn currency_code<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Currency::from_code(&code)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown currency: {}", code)))
}

fn default_checkout_url() -> String {
    "/shipping-address".to_string()
}

fn default_shop_url() -> String {
    "/shop".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            checkout_url: default_checkout_url(),
            shop_url: default_shop_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: CartlineConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.tax_path, "/order/tax");
        assert_eq!(config.api.discount_path, "/discount");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.storage.path, PathBuf::from(".cartline/storage.json"));
        assert_eq!(config.storage.discount_key, "discountCode");
        assert_eq!(config.display.currency, Currency::INR);
        assert_eq!(config.display.checkout_url, "/shipping-address");
        assert_eq!(config.display.shop_url, "/shop");
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartline.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://shop.example.com/api"
timeout_secs = 3

[display]
currency = "usd"
checkout_url = "https://shop.example.com/checkout"
"#,
        )
        .unwrap();

        let config = CartlineConfig::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.endpoints(), ApiEndpoints::default());
        assert_eq!(config.display.currency, Currency::USD);
        assert_eq!(config.display.checkout_url, "https://shop.example.com/checkout");
        assert_eq!(config.display.shop_url, "/shop");
        assert_eq!(config.storage.discount_key, "discountCode");
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartline.json");
        std::fs::write(&path, r#"{"storage": {"discount_key": "promo"}}"#).unwrap();

        let config = CartlineConfig::load(&path).unwrap();
        assert_eq!(config.storage.discount_key, "promo");
        assert_eq!(config.storage.path, PathBuf::from(".cartline/storage.json"));
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartline.toml");
        std::fs::write(&path, "[api\n").unwrap();

        let err = CartlineConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let err = toml::from_str::<CartlineConfig>("[display]\ncurrency = \"XYZ\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown currency: XYZ"));
    }
}
