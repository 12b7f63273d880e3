//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cartline_cache::MemoryStore;
use cartline_commerce::notify::RecordingNotifier;
use cartline_commerce::prelude::*;
use rust_decimal::Decimal;
use tokio::sync::oneshot;

pub type TestSession = DiscountSession<Arc<MemoryStore>, Arc<FakeApi>, Arc<RecordingNotifier>>;

/// In-memory tax and discount backend.
#[derive(Default)]
pub struct FakeApi {
    codes: Mutex<HashMap<String, Discount>>,
    tax: Mutex<Option<TaxConfig>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_code(self: Arc<Self>, discount: Discount) -> Arc<Self> {
        self.insert(discount);
        self
    }

    pub fn insert(&self, discount: Discount) {
        self.codes
            .lock()
            .unwrap()
            .insert(discount.code.clone(), discount);
    }

    pub fn revoke(&self, code: &str) {
        self.codes.lock().unwrap().remove(code);
    }

    pub fn set_tax(&self, tax: TaxConfig) {
        *self.tax.lock().unwrap() = Some(tax);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Hold lookups of `code` until the returned sender fires.
    pub fn gate(&self, code: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(code.to_string(), rx);
        tx
    }
}

#[async_trait]
impl DiscountResolver for FakeApi {
    async fn resolve_discount(&self, code: &str) -> Result<Option<Discount>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().remove(code);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::Transport("connection refused".to_string()));
        }
        Ok(self.codes.lock().unwrap().get(code).cloned())
    }
}

#[async_trait]
impl TaxConfigSource for FakeApi {
    async fn fetch_tax_config(&self) -> Result<TaxConfig, LookupError> {
        self.tax
            .lock()
            .unwrap()
            .clone()
            .ok_or(LookupError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
    }
}

pub struct Fixture {
    pub api: Arc<FakeApi>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: Arc<TestSession>,
}

pub fn fixture(api: Arc<FakeApi>) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let session = Arc::new(DiscountSession::new(
        Arc::clone(&store),
        Arc::clone(&api),
        Arc::clone(&notifier),
    ));
    Fixture {
        api,
        store,
        notifier,
        session,
    }
}

pub fn item(id: &str, price: Decimal, quantity: i64) -> LineItem {
    LineItem::new(id, format!("Product {id}"), Money::new(price), quantity).unwrap()
}

/// Poll `condition` until it holds, failing after one second.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 1s");
}

/// Yield until the fake has seen `n` lookups.
pub async fn wait_for_calls(api: &FakeApi, n: usize) {
    eventually(|| api.calls() >= n).await;
}
