//! The cart page: cart contents, tax settings and discount session wired
//! together.

use std::sync::Arc;

use cartline_cache::KeyValueStore;

use crate::cart::{
    compute_totals, ApplyOutcome, CartStore, CartSummary, DiscountSession, DiscountState,
    PricingResult, Subscription, TaxConfig,
};
use crate::error::CommerceError;
use crate::lookup::{DiscountResolver, TaxConfigSource};
use crate::notify::Notifier;

/// A loaded cart page.
///
/// Totals are recomputed from live inputs on every call and never cached.
pub struct CartPage<S, R, N> {
    cart: Arc<CartStore>,
    tax: TaxConfig,
    session: Arc<DiscountSession<S, R, N>>,
    subscription: Option<Subscription>,
}

impl<S, R, N> CartPage<S, R, N>
where
    S: KeyValueStore + 'static,
    R: DiscountResolver + 'static,
    N: Notifier + 'static,
{
    /// Fetch tax settings once, re-apply any stored discount code, and
    /// subscribe the discount session to the cart.
    ///
    /// A failed tax lookup falls back to no shipping and no GST.
    pub async fn load<T: TaxConfigSource + ?Sized>(
        cart: Arc<CartStore>,
        tax_source: &T,
        session: Arc<DiscountSession<S, R, N>>,
    ) -> Self {
        let tax = match tax_source.fetch_tax_config().await {
            Ok(tax) => tax,
            Err(e) => {
                tracing::warn!(error = %e, "tax config unavailable, pricing without shipping or GST");
                TaxConfig::default()
            }
        };

        let subscription = Some(session.subscribe(&cart));
        session.rehydrate(&cart.items()).await;

        Self {
            cart,
            tax,
            session,
            subscription,
        }
    }

    /// The cart store.
    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    /// The tax settings fetched at load.
    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }

    /// The discount session.
    pub fn session(&self) -> &Arc<DiscountSession<S, R, N>> {
        &self.session
    }

    /// Current discount state.
    pub fn discount_state(&self) -> DiscountState {
        self.session.state()
    }

    /// Price the cart as it is right now.
    pub fn totals(&self) -> PricingResult {
        let discount = self.session.active_discount();
        compute_totals(&self.cart.items(), &self.tax, discount.as_ref())
    }

    /// Summary rows for the current cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary::build(
            &self.totals(),
            &self.tax,
            &self.session.state(),
            self.cart.is_empty(),
        )
    }

    /// Apply a user-submitted code.
    pub async fn apply(&self, code: &str) -> Result<ApplyOutcome, CommerceError> {
        self.session.apply(code).await
    }

    /// Stop reacting to cart changes.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
