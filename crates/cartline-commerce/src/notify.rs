//! User-facing notification channel.

use std::sync::{Arc, Mutex, PoisonError};

/// Messages surfaced by the discount flow.
pub mod notices {
    /// Submitted code was empty or whitespace.
    pub const EMPTY_CODE: &str = "Please enter a discount code.";
    /// Code resolved and is now active.
    pub const APPLIED: &str = "Discount applied!";
    /// Code does not exist.
    pub const INVALID_CODE: &str = "Invalid discount code.";
    /// Lookup failed for a transient reason.
    pub const LOOKUP_FAILED: &str = "Error applying discount. Please try again.";
}

/// Receives success and error notices for the user.
pub trait Notifier: Send + Sync {
    /// Show a success notice.
    fn notify_success(&self, text: &str);

    /// Show an error notice.
    fn notify_error(&self, text: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify_success(&self, text: &str) {
        (**self).notify_success(text)
    }

    fn notify_error(&self, text: &str) {
        (**self).notify_error(text)
    }
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, text: &str) {
        tracing::info!(notice = text, "success notice");
    }

    fn notify_error(&self, text: &str) {
        tracing::info!(notice = text, "error notice");
    }
}

/// A notice captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Notifier that keeps every notice, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn push(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, text: &str) {
        self.push(Notice::Success(text.to_string()));
    }

    fn notify_error(&self, text: &str) {
        self.push(Notice::Error(text.to_string()));
    }
}
