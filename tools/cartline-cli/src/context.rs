//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use cartline_cache::FileStore;
use cartline_commerce::cart::{CartStore, DiscountSession};
use cartline_commerce::page::CartPage;
use cartline_data::{FetchClient, StorefrontApi};

use crate::config::CartlineConfig;
use crate::output::{ConsoleNotifier, Output};

/// File names searched for when no `--config` is given, in order.
const CONFIG_NAMES: [&str; 3] = ["cartline.toml", ".cartline.toml", "cartline.json"];

/// A cart page backed by the file store and the storefront API.
pub type Page = CartPage<Arc<FileStore>, StorefrontApi, ConsoleNotifier>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CartlineConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CartlineConfig::load(path)?,
            None => match find_config(&cwd) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using config file");
                    CartlineConfig::load(&path)?
                }
                None => CartlineConfig::default(),
            },
        };

        Ok(Self { config, output, cwd })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the configured discount code storage.
    pub fn open_store(&self) -> Result<Arc<FileStore>> {
        let path = self.resolve_path(&self.config.storage.path);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;
        Ok(Arc::new(store))
    }

    /// Storefront API client from the `[api]` section.
    pub fn api(&self) -> Result<StorefrontApi> {
        let api = &self.config.api;
        let client = FetchClient::new()
            .context("Failed to create HTTP client")?
            .with_base_url(&api.base_url)
            .with_default_header("Accept", "application/json")
            .with_timeout(api.timeout());
        Ok(StorefrontApi::new(client, api.endpoints()))
    }

    /// Load the cart file at `cart_path`; a missing file is an empty cart.
    pub fn load_cart(&self, cart_path: &str) -> Result<Arc<CartStore>> {
        let path = self.resolve_path(cart_path);
        let cart = match std::fs::read_to_string(&path) {
            Ok(json) => CartStore::from_json(&json)
                .with_context(|| format!("Failed to parse cart file: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.output
                    .debug(&format!("No cart file at {}, starting empty", path.display()));
                CartStore::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read cart file: {}", path.display()))
            }
        };
        Ok(Arc::new(cart))
    }

    /// Load the cart page: tax settings, stored code, cart subscription.
    pub async fn open_page(&self, cart_path: &str) -> Result<Page> {
        let cart = self.load_cart(cart_path)?;
        let api = self.api()?;
        let session = DiscountSession::new(
            self.open_store()?,
            api.clone(),
            ConsoleNotifier::new(self.output.clone()),
        )
        .with_storage_key(&self.config.storage.discount_key);

        Ok(CartPage::load(cart, &api, Arc::new(session)).await)
    }
}

/// Find a config file in `start` or its parents.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cartline.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("cartline.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cartline.toml"), "").unwrap();
        std::fs::write(nested.join("cartline.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("cartline.json")));
    }
}
