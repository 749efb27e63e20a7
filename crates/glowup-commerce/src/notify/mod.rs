//! Transient user-facing status messages.
//!
//! Store operations hand a [`Notification`] to a [`Notifier`] and move on;
//! delivery is fire-and-forget and never feeds back into cart state.

mod toast;

pub use toast::{Toast, ToastQueue, DEFAULT_DISMISS_AFTER};

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Kind of notification, which decides how it is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
        }
    }
}

/// A status message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }
}

/// Sink for notifications.
pub trait Notifier {
    /// Deliver `notification`. Must not block and cannot fail.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                tracing::warn!(kind = notification.kind.as_str(), "{}", notification.message)
            }
            _ => tracing::info!(kind = notification.kind.as_str(), "{}", notification.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Notification::success("ok").kind, NotificationKind::Success);
        assert_eq!(Notification::info("fyi").kind, NotificationKind::Info);
        assert_eq!(Notification::error("no").message, "no");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&Notification::error("Your cart is empty")).unwrap();
        assert_eq!(json, r#"{"message":"Your cart is empty","kind":"error"}"#);
    }

    #[test]
    fn test_notifier_through_rc() {
        let queue = Rc::new(ToastQueue::new());
        let sink: Rc<ToastQueue> = Rc::clone(&queue);
        sink.notify(Notification::info("Item removed from cart"));
        TracingNotifier.notify(Notification::info("logged only"));
        assert_eq!(queue.len(), 1);
    }
}
