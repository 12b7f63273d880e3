//! Cart line items.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Image shown when a line item has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Identity of a cart entry.
///
/// The same product in a different color or size is a different entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    /// Product ID.
    pub id: ProductId,
    /// Selected color.
    pub color: String,
    /// Selected size.
    pub size: String,
}

impl LineKey {
    /// Build a key from its parts.
    pub fn new(id: impl Into<ProductId>, color: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            size: size.into(),
        }
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product ID.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Price before markdown, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Selected color.
    #[serde(default)]
    pub color: String,
    /// Selected size.
    #[serde(default)]
    pub size: String,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Create a new line item.
    ///
    /// Returns an error if quantity is not positive or exceeds
    /// [`MAX_QUANTITY_PER_ITEM`].
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        validate_quantity(quantity)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            quantity,
            color: String::new(),
            size: String::new(),
            image: None,
        })
    }

    /// Set the variant color and size.
    pub fn with_variant(mut self, color: impl Into<String>, size: impl Into<String>) -> Self {
        self.color = color.into();
        self.size = size.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The entry's identity key.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.id.clone(), self.color.clone(), self.size.clone())
    }

    /// Check whether this entry has the given key.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.color == key.color && self.size == key.size
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// Image URL, or the placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Name cut to `max_chars` characters with a trailing "..." when longer.
    pub fn short_name(&self, max_chars: usize) -> String {
        if self.name.chars().count() > max_chars {
            let head: String = self.name.chars().take(max_chars).collect();
            format!("{}...", head)
        } else {
            self.name.clone()
        }
    }
}

pub(crate) fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}
