// Notification system - user-facing event reporting
//
// The core never presents anything itself; it pushes these records into a
// ring buffer and the host shell decides how to show them (toast, status
// line, log). Fire-and-forget: a full buffer drops the notification.

use std::time::{SystemTime, UNIX_EPOCH};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Which part of the board the notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Transport,
    Grid,
    Library,
    Audio,
}

/// Notification with timestamp and metadata
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub category: NotificationCategory,
    /// Short headline, e.g. "Song saved"
    pub title: String,
    /// One-line description shown under the headline
    pub detail: String,
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        category: NotificationCategory,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            level,
            category,
            title: title.into(),
            detail: detail.into(),
            timestamp,
        }
    }

    pub fn info(
        category: NotificationCategory,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(NotificationLevel::Info, category, title, detail)
    }

    pub fn warning(
        category: NotificationCategory,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(NotificationLevel::Warning, category, title, detail)
    }

    pub fn error(
        category: NotificationCategory,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(NotificationLevel::Error, category, title, detail)
    }

    /// Whether the notification is younger than `max_age_ms`
    pub fn is_recent(&self, max_age_ms: u64) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        now.saturating_sub(self.timestamp) < max_age_ms
    }
}
