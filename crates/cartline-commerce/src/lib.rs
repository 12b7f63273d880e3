//! Storefront cart pricing and discount persistence.
//!
//! - **Cart**: line items keyed by product, color and size, with change
//!   notification
//! - **Pricing**: subtotal, shipping, GST, discount and grand total
//! - **Discounts**: code application, persistence and re-application on
//!   cart changes
//! - **Page**: the pieces above wired to the tax and discount lookups
//!
//! # Example
//!
//! ```rust,ignore
//! use cartline_commerce::prelude::*;
//!
//! let cart = Arc::new(CartStore::new());
//! cart.add_item(LineItem::new("kurta-1", "Cotton Kurta", Money::new(dec!(899)), 2)?)?;
//!
//! let session = Arc::new(DiscountSession::new(store, api.clone(), TracingNotifier));
//! let page = CartPage::load(cart, &api, session).await;
//! page.apply("SAVE10").await?;
//!
//! println!("Total: {}", page.totals().grand_total.display(Currency::INR));
//! ```

pub mod error;
pub mod ids;
pub mod lookup;
pub mod money;
pub mod notify;

pub mod cart;
pub mod page;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        compute_totals, ApplyOutcome, CartStore, CartSummary, Discount, DiscountKind,
        DiscountSession, DiscountState, LineItem, LineKey, PricingResult, RehydrateOutcome,
        SummaryLine, SummaryLineKind, TaxConfig,
    };

    // Seams
    pub use crate::lookup::{DiscountResolver, LookupError, TaxConfigSource};
    pub use crate::notify::{Notifier, TracingNotifier};

    // Page
    pub use crate::page::CartPage;
}
