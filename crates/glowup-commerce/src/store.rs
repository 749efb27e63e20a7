//! The cart store: authoritative cart state with write-through persistence.

use glowup_cache::{Cache, KeyValueStore};
use tracing::instrument;

use crate::cart::{Cart, CartItem, CartSnapshot, NewCartItem, PersistedItem};
use crate::checkout::{CheckoutFlow, CheckoutReview, CheckoutStep, OrderConfirmation};
use crate::error::CommerceError;
use crate::ids::CartItemId;
use crate::money::{Currency, Money};
use crate::notify::{Notification, Notifier};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

pub const MSG_ITEM_ADDED: &str = "Item added to cart!";
pub const MSG_ITEM_REMOVED: &str = "Item removed from cart";
pub const MSG_CART_EMPTY: &str = "Your cart is empty";
pub const MSG_ORDER_CONFIRMED: &str = "Order confirmed! Thank you for your purchase.";
pub const MSG_SAVE_FAILED: &str = "Could not save your cart";

/// Owns the cart, keeps it in sync with client-local storage, and drives
/// the checkout flow.
///
/// Each store is an independent value; nothing is shared between
/// instances except what they share through `S`. Construction loads the
/// persisted cart, so a store is always initialized before use.
///
/// Every mutation writes the full cart back to storage before it returns.
/// A failed write is logged and reported through the notifier, but the
/// in-memory change stands.
#[derive(Debug)]
pub struct CartStore<S, N> {
    cache: Cache<S>,
    notifier: N,
    cart: Cart,
    checkout: CheckoutFlow,
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    /// Load the persisted cart priced in the default currency.
    pub fn initialize(store: S, notifier: N) -> Self {
        Self::initialize_in(store, notifier, Currency::default())
    }

    /// Load the persisted cart priced in `currency`.
    ///
    /// A missing key yields an empty cart. Unreadable or invalid data is
    /// logged and also yields an empty cart; it is never reported to the
    /// caller.
    #[instrument(skip(store, notifier))]
    pub fn initialize_in(store: S, notifier: N, currency: Currency) -> Self {
        let cache = Cache::new(store);
        let cart = match Self::load(&cache, currency) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!("Discarding persisted cart: {e}");
                Cart::new(currency)
            }
        };
        tracing::debug!(items = cart.len(), "cart initialized");

        Self {
            cache,
            notifier,
            cart,
            checkout: CheckoutFlow::new(),
        }
    }

    fn load(cache: &Cache<S>, currency: Currency) -> Result<Cart, CommerceError> {
        match cache.get::<Vec<PersistedItem>>(CART_KEY)? {
            Some(records) => Cart::from_persisted(records, currency),
            None => Ok(Cart::new(currency)),
        }
    }

    /// Append a validated item, persist, and announce it.
    #[instrument(skip(self, item), fields(title = item.title()))]
    pub fn add_item(&mut self, item: NewCartItem) -> Result<CartItemId, CommerceError> {
        let id = self.cart.add(item)?;
        tracing::debug!(%id, count = self.cart.len(), "item added");
        self.persist();
        self.notifier.notify(Notification::success(MSG_ITEM_ADDED));
        Ok(id)
    }

    /// Parse the displayed price text, then add the item.
    ///
    /// Malformed price text is rejected with an error notification instead
    /// of being stored.
    pub fn add_displayed(
        &mut self,
        title: &str,
        price_text: &str,
        image: &str,
    ) -> Result<CartItemId, CommerceError> {
        match NewCartItem::parse(title, price_text, image, self.cart.currency()) {
            Ok(item) => self.add_item(item),
            Err(e) => {
                tracing::warn!(title, price_text, "Rejected item: {e}");
                self.notifier
                    .notify(Notification::error(format!("Could not add {}: {e}", title.trim())));
                Err(e)
            }
        }
    }

    /// Remove the item with `id`, persist, and announce it.
    ///
    /// Returns the removed item. An unknown id is a silent no-op: nothing
    /// is written and no notification is sent.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: CartItemId) -> Option<CartItem> {
        let removed = self.cart.remove(id)?;
        tracing::debug!(count = self.cart.len(), "item removed");
        self.persist();
        self.notifier.notify(Notification::info(MSG_ITEM_REMOVED));
        Some(removed)
    }

    /// Number of items in the cart.
    pub fn count(&self) -> usize {
        self.cart.len()
    }

    /// Count to show on the cart badge; `None` hides the badge.
    pub fn badge(&self) -> Option<usize> {
        Some(self.count()).filter(|n| *n > 0)
    }

    /// Whether the checkout button should be offered.
    pub fn can_checkout(&self) -> bool {
        !self.cart.is_empty()
    }

    /// Sum of item prices.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Items in display order.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Read-only copy of the cart for rendering.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.cart.currency()
    }

    /// Current checkout step.
    pub fn checkout_step(&self) -> CheckoutStep {
        self.checkout.step()
    }

    /// The review awaiting confirmation, if any.
    pub fn pending_review(&self) -> Option<&CheckoutReview> {
        self.checkout.pending()
    }

    /// Open the checkout review.
    ///
    /// On an empty cart this fails with [`CommerceError::EmptyCart`],
    /// sends an error notification, and leaves the state unchanged.
    #[instrument(skip(self))]
    pub fn begin_checkout(&mut self) -> Result<&CheckoutReview, CommerceError> {
        if self.cart.is_empty() {
            tracing::debug!("checkout refused on empty cart");
            self.notifier.notify(Notification::error(MSG_CART_EMPTY));
            return Err(CommerceError::EmptyCart);
        }
        self.checkout.begin(&self.cart)
    }

    /// Confirm the pending review: empty the cart, persist, and announce it.
    #[instrument(skip(self))]
    pub fn confirm_checkout(&mut self) -> Result<OrderConfirmation, CommerceError> {
        let order = self.checkout.confirm(&mut self.cart)?;
        tracing::info!(items = order.items.len(), total = %order.total, "order confirmed");
        self.persist();
        self.notifier.notify(Notification::success(MSG_ORDER_CONFIRMED));
        Ok(order)
    }

    /// Discard the pending review without touching the cart.
    #[instrument(skip(self))]
    pub fn cancel_checkout(&mut self) -> Result<CheckoutReview, CommerceError> {
        self.checkout.cancel()
    }

    /// The notification sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Write the full cart to storage, reporting a failed write.
    fn persist(&self) {
        if let Err(e) = self.cache.set(CART_KEY, &self.cart.to_persisted()) {
            tracing::warn!(key = CART_KEY, "Failed to persist cart: {e}");
            self.notifier.notify(Notification::error(MSG_SAVE_FAILED));
        }
    }
}
