//! Cart, checkout and preference state for the Glow Up shop.
//!
//! This crate provides the stateful core behind the site's shop page:
//!
//! - **Cart**: ordered items with unique ids and an always-recomputed total
//! - **Checkout**: review-then-confirm flow that empties the cart
//! - **Store**: [`CartStore`], which persists every change to client-local
//!   storage and reports each one through a [`Notifier`]
//! - **Theme**: the persisted dark-mode preference
//! - **Catalog**: the parlour's service price list
//! - **Booking**: validated appointment requests and their confirmation
//!
//! # Example
//!
//! ```rust
//! use glowup_cache::MemoryStore;
//! use glowup_commerce::prelude::*;
//!
//! let storage = MemoryStore::new();
//! let toasts = ToastQueue::new();
//! let mut store = CartStore::initialize(&storage, &toasts);
//!
//! let haircut = store.add_displayed("Haircut", "$30.00", "images/haircut.jpg").unwrap();
//! store.add_displayed("Facial", "$40.00", "images/facial.jpg").unwrap();
//! assert_eq!(store.total().display(), "$70.00");
//!
//! store.remove_item(haircut);
//! store.begin_checkout().unwrap();
//! store.confirm_checkout().unwrap();
//! assert_eq!(store.count(), 0);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notify;
pub mod store;
pub mod theme;

pub use error::CommerceError;
pub use ids::{CartItemId, IdSequence};
pub use money::{Currency, Money};
pub use notify::{Notification, NotificationKind, Notifier};
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::CartItemId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartSnapshot, NewCartItem};

    // Checkout
    pub use crate::checkout::{CheckoutReview, CheckoutStep, OrderConfirmation};

    // Store and notifications
    pub use crate::notify::{Notification, NotificationKind, Notifier, ToastQueue, TracingNotifier};
    pub use crate::store::CartStore;
    pub use crate::theme::{Theme, ThemeStore};

    // Booking
    pub use crate::booking::{BookingConfirmation, BookingForm, BookingRequest};

    // Catalog
    pub use crate::catalog::{find_service, Service, ServiceCategory, PRICE_LIST};
}
