//! User notification hook
//!
//! The host application owns the actual toast/notification widget; the
//! controller only reports what happened and at which severity.

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Danger,
}

/// Sink for transient user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);
}

/// Notifier that drops everything, for hosts without a notification area
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _level: NotificationLevel, _message: &str) {}
}
