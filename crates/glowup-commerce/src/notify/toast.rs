//! Auto-dismissing toast queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::{Notification, Notifier};

/// How long a toast stays on screen.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// A notification scheduled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
    pub dismiss_at: Instant,
}

impl Toast {
    /// Check if the toast should still be shown at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.dismiss_at
    }
}

/// FIFO of toasts, each dismissed a fixed interval after it was shown.
///
/// Dismissal is modelled as a deadline on the toast rather than a timer, so
/// nothing runs behind the cart's back: the host prunes the queue whenever
/// it redraws.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: RefCell<VecDeque<Toast>>,
    dismiss_after: Duration,
}

impl ToastQueue {
    /// Create a queue using [`DEFAULT_DISMISS_AFTER`].
    pub fn new() -> Self {
        Self::with_dismiss_after(DEFAULT_DISMISS_AFTER)
    }

    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            toasts: RefCell::new(VecDeque::new()),
            dismiss_after,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Queue `notification` as shown at `now`.
    pub fn push_at(&self, notification: Notification, now: Instant) {
        self.toasts.borrow_mut().push_back(Toast {
            notification,
            shown_at: now,
            dismiss_at: now + self.dismiss_after,
        });
    }

    /// Toasts still on screen at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        self.toasts
            .borrow()
            .iter()
            .filter(|t| t.is_visible(now))
            .cloned()
            .collect()
    }

    /// Drop toasts dismissed by `now`, returning how many were dropped.
    pub fn prune(&self, now: Instant) -> usize {
        let mut toasts = self.toasts.borrow_mut();
        let before = toasts.len();
        toasts.retain(|t| t.is_visible(now));
        before - toasts.len()
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts.borrow_mut().drain(..).collect()
    }

    /// Notifications currently queued, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.toasts
            .borrow()
            .iter()
            .map(|t| t.notification.clone())
            .collect()
    }

    /// The most recently queued notification.
    pub fn last(&self) -> Option<Notification> {
        self.toasts.borrow().back().map(|t| t.notification.clone())
    }

    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = ToastQueue::new();
        queue.notify(Notification::success("Item added to cart!"));
        queue.notify(Notification::info("Item removed from cart"));

        let messages: Vec<String> = queue
            .notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, ["Item added to cart!", "Item removed from cart"]);
        assert_eq!(queue.last().unwrap().message, "Item removed from cart");
    }

    #[test]
    fn test_dismissed_after_interval() {
        let queue = ToastQueue::with_dismiss_after(Duration::from_millis(3000));
        let start = Instant::now();
        queue.push_at(Notification::success("first"), start);
        queue.push_at(Notification::success("second"), start + Duration::from_secs(2));

        assert_eq!(queue.visible(start + Duration::from_millis(2999)).len(), 2);

        let later = start + Duration::from_secs(3);
        let visible = queue.visible(later);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification.message, "second");

        assert_eq!(queue.prune(later), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.prune(start + Duration::from_secs(10)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_empties_queue() {
        let queue = ToastQueue::new();
        queue.notify(Notification::error("Your cart is empty"));
        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
    }
}
