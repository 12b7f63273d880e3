//! Discount code persistence across page loads.
//!
//! A [`DiscountSession`] holds at most one active discount, remembers the
//! last successfully applied code in a [`KeyValueStore`], and re-resolves
//! that code whenever the cart changes.
//!
//! Every lookup takes a ticket from one shared sequence when it is issued.
//! A user intent (apply or clear) is discarded only by a newer user intent.
//! Replaying the stored code is not an intent of its own: a rehydrate is
//! discarded when a user intent was pending or issued since it read the
//! stored code, or when a newer rehydrate was issued.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cartline_cache::KeyValueStore;
use tokio::task::JoinHandle;

use crate::cart::store::CartStore;
use crate::cart::{Discount, LineItem};
use crate::error::CommerceError;
use crate::lookup::DiscountResolver;
use crate::notify::{notices, Notifier};

/// Storage key used by the storefront for the applied code.
pub const DEFAULT_STORAGE_KEY: &str = "discountCode";

/// Discount state exposed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountState {
    /// Active code, if any.
    pub code: Option<String>,
    /// Active descriptor, if any.
    pub discount: Option<Discount>,
    /// Whether a discount is active.
    pub is_active: bool,
}

impl DiscountState {
    /// State with `discount` active.
    pub fn active(discount: Discount) -> Self {
        Self {
            code: Some(discount.code.clone()),
            discount: Some(discount),
            is_active: true,
        }
    }
}

/// Result of an apply attempt that reached the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The code resolved and is now active.
    Applied(Discount),
    /// The code does not exist; no discount is active.
    NotFound,
    /// A newer lookup was issued before this one completed.
    Superseded,
}

/// Result of re-resolving the stored code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RehydrateOutcome {
    /// Nothing to do: the cart is empty or no code is stored.
    Skipped,
    /// The stored code is still valid and active.
    Applied(Discount),
    /// The stored code is gone and has been erased.
    Cleared,
    /// The lookup failed; state is unchanged.
    Failed,
    /// A newer lookup was issued before this one completed.
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    active: Option<Discount>,
    input: String,
}

/// Discount state machine: `NONE` or `ACTIVE(code, descriptor)`.
pub struct DiscountSession<S, R, N> {
    store: S,
    resolver: R,
    notifier: N,
    storage_key: String,
    state: Mutex<SessionState>,
    issued: AtomicU64,
    // Ticket of the latest apply or clear.
    intent: AtomicU64,
    // Ticket of the latest rehydrate.
    replay: AtomicU64,
    pending_applies: AtomicUsize,
}

impl<S, R, N> DiscountSession<S, R, N>
where
    S: KeyValueStore,
    R: DiscountResolver,
    N: Notifier,
{
    /// Create a session using [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S, resolver: R, notifier: N) -> Self {
        Self {
            store,
            resolver,
            notifier,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            state: Mutex::new(SessionState::default()),
            issued: AtomicU64::new(0),
            intent: AtomicU64::new(0),
            replay: AtomicU64::new(0),
            pending_applies: AtomicUsize::new(0),
        }
    }

    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Current state snapshot.
    pub fn state(&self) -> DiscountState {
        match &self.lock().active {
            Some(discount) => DiscountState::active(discount.clone()),
            None => DiscountState::default(),
        }
    }

    /// The active discount, if any.
    pub fn active_discount(&self) -> Option<Discount> {
        self.lock().active.clone()
    }

    /// Text currently in the code input.
    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Replace the code input text.
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().input = text.into();
    }

    /// The code currently persisted, if any.
    pub fn stored_code(&self) -> Result<Option<String>, CommerceError> {
        Ok(self.store.get(&self.storage_key)?)
    }

    /// Apply whatever is in the code input.
    pub async fn submit(&self) -> Result<ApplyOutcome, CommerceError> {
        let code = self.input();
        self.apply(&code).await
    }

    /// Apply a user-submitted code.
    ///
    /// Empty input is rejected without a lookup. Every attempt that reaches
    /// the resolver clears the code input, whatever the result.
    pub async fn apply(&self, code: &str) -> Result<ApplyOutcome, CommerceError> {
        let code = code.trim();
        if code.is_empty() {
            self.notifier.notify_error(notices::EMPTY_CODE);
            return Err(CommerceError::EmptyDiscountCode);
        }

        // Held until the outcome is written so no rehydrate starts in between.
        let _pending = PendingApply::start(&self.pending_applies);
        let ticket = self.issue_intent();
        tracing::debug!(code, ticket, "resolving discount code");
        let resolved = self.resolver.resolve_discount(code).await;

        let mut state = self.lock();
        state.input.clear();

        if self.intent.load(Ordering::SeqCst) != ticket {
            tracing::debug!(code, ticket, "discarding superseded discount lookup");
            return Ok(ApplyOutcome::Superseded);
        }

        match resolved {
            Ok(Some(discount)) => {
                state.active = Some(discount.clone());
                if let Err(e) = self.store.set(&self.storage_key, code) {
                    tracing::warn!(error = %e, "failed to persist discount code");
                }
                drop(state);
                self.notifier.notify_success(notices::APPLIED);
                Ok(ApplyOutcome::Applied(discount))
            }
            Ok(None) => {
                state.active = None;
                drop(state);
                self.notifier.notify_error(notices::INVALID_CODE);
                Ok(ApplyOutcome::NotFound)
            }
            Err(e) => {
                drop(state);
                tracing::error!(code, error = %e, "discount lookup failed");
                self.notifier.notify_error(notices::LOOKUP_FAILED);
                Err(CommerceError::Lookup(e))
            }
        }
    }

    /// Re-resolve the stored code against the cart's current contents.
    ///
    /// Does nothing for an empty cart or when no code is stored. A code the
    /// resolver no longer knows is erased from storage.
    pub async fn rehydrate(&self, items: &[LineItem]) -> RehydrateOutcome {
        if items.is_empty() {
            return RehydrateOutcome::Skipped;
        }

        // Snapshot before checking for pending applies so an apply issued
        // after the check still moves `intent` past the snapshot.
        let intent = self.intent.load(Ordering::SeqCst);
        if self.pending_applies.load(Ordering::SeqCst) > 0 {
            tracing::debug!("apply in flight, not replaying stored discount code");
            return RehydrateOutcome::Superseded;
        }

        let code = match self.store.get(&self.storage_key) {
            Ok(Some(code)) => code,
            Ok(None) => return RehydrateOutcome::Skipped,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored discount code");
                return RehydrateOutcome::Skipped;
            }
        };

        let ticket = self.issue();
        self.replay.store(ticket, Ordering::SeqCst);
        tracing::debug!(code = %code, ticket, "rehydrating stored discount code");
        let resolved = self.resolver.resolve_discount(&code).await;

        let mut state = self.lock();
        if self.intent.load(Ordering::SeqCst) != intent
            || self.replay.load(Ordering::SeqCst) != ticket
            || self.pending_applies.load(Ordering::SeqCst) > 0
        {
            tracing::debug!(code = %code, ticket, "discarding superseded discount lookup");
            return RehydrateOutcome::Superseded;
        }

        match resolved {
            Ok(Some(discount)) => {
                state.active = Some(discount.clone());
                state.input.clear();
                RehydrateOutcome::Applied(discount)
            }
            Ok(None) => {
                state.active = None;
                if let Err(e) = self.store.remove(&self.storage_key) {
                    tracing::warn!(error = %e, "failed to erase stale discount code");
                }
                RehydrateOutcome::Cleared
            }
            Err(e) => {
                tracing::error!(code = %code, error = %e, "failed to apply stored discount");
                RehydrateOutcome::Failed
            }
        }
    }

    /// Drop the active discount and forget the stored code.
    pub fn clear(&self) -> Result<(), CommerceError> {
        // A lookup still in flight must not resurrect the discount.
        let mut state = self.lock();
        self.issue_intent();
        state.active = None;
        self.store.remove(&self.storage_key)?;
        Ok(())
    }

    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn issue_intent(&self) -> u64 {
        let ticket = self.issue();
        self.intent.store(ticket, Ordering::SeqCst);
        ticket
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, R, N> DiscountSession<S, R, N>
where
    S: KeyValueStore + 'static,
    R: DiscountResolver + 'static,
    N: Notifier + 'static,
{
    /// Rehydrate after every change to `cart`.
    ///
    /// Contents present at subscription time are not a change; callers run
    /// the initial [`rehydrate`](Self::rehydrate) themselves. Must be called
    /// from within a tokio runtime. The returned handle stops the
    /// subscription when unsubscribed or dropped.
    pub fn subscribe(self: &Arc<Self>, cart: &CartStore) -> Subscription {
        let session = Arc::clone(self);
        let mut contents = cart.subscribe();

        let task = tokio::spawn(async move {
            while contents.changed().await.is_ok() {
                let items = contents.borrow_and_update().clone();
                session.rehydrate(&items).await;
            }
        });

        Subscription { task: Some(task) }
    }
}

/// Counts an apply as in flight until dropped, including on cancellation.
struct PendingApply<'a>(&'a AtomicUsize);

impl<'a> PendingApply<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingApply<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to a session's cart subscription.
#[derive(Debug)]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop reacting to cart changes.
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    /// Whether the subscription is still running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
