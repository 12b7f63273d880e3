//! Shopping cart module.
//!
//! Contains the cart store, pricing, discounts, and the discount
//! persistence session.

mod discount;
mod item;
mod persistence;
mod pricing;
mod store;
mod summary;

pub use discount::{Discount, DiscountKind};
pub use item::{LineItem, LineKey, MAX_QUANTITY_PER_ITEM, PLACEHOLDER_IMAGE};
pub use persistence::{
    ApplyOutcome, DiscountSession, DiscountState, RehydrateOutcome, Subscription,
    DEFAULT_STORAGE_KEY,
};
pub use pricing::{compute_totals, PricingResult, TaxConfig};
pub use store::{CartContents, CartStore};
pub use summary::{CartSummary, SummaryLine, SummaryLineKind};
