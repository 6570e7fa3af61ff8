/// Transient banners
///
/// Every user-facing outcome (saved, failed, playing) becomes an `Alert`
/// that stays visible for a few seconds or until dismissed.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::messaging::{Event, EventBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub id: u64,
    pub level: AlertLevel,
    pub message: String,
    pub raised_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, dismiss_after: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= dismiss_after
    }
}

/// Shared banner list; clones share state
#[derive(Clone)]
pub struct AlertCenter {
    alerts: Arc<Mutex<Vec<Alert>>>,
    next_id: Arc<AtomicU64>,
    dismiss_after: Duration,
    bus: EventBus,
}

impl AlertCenter {
    pub fn new(bus: EventBus, dismiss_after: Duration) -> Self {
        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            dismiss_after,
            bus,
        }
    }

    /// Show a banner and notify subscribers
    pub fn raise(&self, level: AlertLevel, message: impl Into<String>) -> Alert {
        let message = message.into();
        match level {
            AlertLevel::Danger => tracing::error!("[alert] {}", message),
            AlertLevel::Warning => tracing::warn!("[alert] {}", message),
            AlertLevel::Info | AlertLevel::Success => tracing::info!("[alert] {}", message),
        }

        let alert = Alert {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            level,
            message,
            raised_at: Instant::now(),
        };
        self.alerts.lock().push(alert.clone());
        self.bus.publish(Event::AlertRaised(alert.clone()));
        alert
    }

    pub fn info(&self, message: impl Into<String>) -> Alert {
        self.raise(AlertLevel::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Alert {
        self.raise(AlertLevel::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Alert {
        self.raise(AlertLevel::Warning, message)
    }

    pub fn danger(&self, message: impl Into<String>) -> Alert {
        self.raise(AlertLevel::Danger, message)
    }

    /// Banners still on screen; expired ones are dropped
    pub fn visible(&self) -> Vec<Alert> {
        self.visible_at(Instant::now())
    }

    pub fn visible_at(&self, now: Instant) -> Vec<Alert> {
        let mut alerts = self.alerts.lock();
        alerts.retain(|a| !a.is_expired(self.dismiss_after, now));
        alerts.clone()
    }

    pub fn dismiss_all(&self) {
        self.alerts.lock().clear();
        self.bus.publish(Event::AlertsDismissed);
    }
}
