//! Durable client-side key-value storage for cartline.
//!
//! The discount flow only needs string values under a handful of fixed
//! keys, the way a browser page uses local storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartline_cache::{FileStore, KeyValueStore};
//!
//! let store = FileStore::open(".cartline/storage.json")?;
//!
//! // Store a value
//! store.set("discountCode", "SAVE10")?;
//!
//! // Retrieve a value
//! let code: Option<String> = store.get("discountCode")?;
//!
//! // Delete a value
//! store.remove("discountCode")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, FileStore, KeyValueStore, MemoryStore};
}
