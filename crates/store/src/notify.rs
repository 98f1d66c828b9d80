//! User-facing notifications.
//!
//! The store reports every operation outcome as a [`Notice`]; delivery is
//! fire-and-forget and must never block or fail a cart mutation.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notice severity, as rendered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A user-facing message about a cart operation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for user-facing notices. Fire-and-forget: no return value consumed.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!("notice: {}", notice.message),
            Severity::Error => tracing::error!("notice: {}", notice.message),
        }
    }
}

/// Notifier that fans notices out to subscribers over a broadcast channel.
#[derive(Debug)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notice>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notice: Notice) {
        // Lossy; no subscribers and lagging receivers must not backpressure
        // the store.
        let _ = self.tx.send(notice);
    }
}

/// Notifier that buffers notices for inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    inner: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.inner.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.inner.lock().unwrap().push(notice);
    }
}
