//! Checkout flow state machine.
//!
//! ```text
//! Idle --begin (cart non-empty)--> PendingConfirmation --confirm--> Idle
//!                                  PendingConfirmation --cancel---> Idle
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem, CartSnapshot};
use crate::error::CommerceError;
use crate::money::Money;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// No checkout in progress.
    Idle,
    /// Itemized review shown, waiting for the user to confirm or cancel.
    PendingConfirmation,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Idle => "idle",
            CheckoutStep::PendingConfirmation => "pending_confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Idle => "Idle",
            CheckoutStep::PendingConfirmation => "Awaiting confirmation",
        }
    }
}

/// Itemized contents and total presented for review before confirming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReview {
    /// Cart contents when the review was opened.
    pub snapshot: CartSnapshot,
    /// When the review was opened.
    pub started_at: DateTime<Utc>,
}

impl CheckoutReview {
    pub fn items(&self) -> &[CartItem] {
        &self.snapshot.items
    }

    pub fn total(&self) -> Money {
        self.snapshot.total
    }
}

/// Result of a confirmed (simulated) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Items that were in the cart when it was cleared.
    pub items: Vec<CartItem>,
    /// Sum of their prices.
    pub total: Money,
    /// When the order was confirmed.
    pub confirmed_at: DateTime<Utc>,
}

/// Checkout flow state.
///
/// Holds no cart of its own; every transition takes the cart it acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutFlow {
    pending: Option<CheckoutReview>,
}

impl CheckoutFlow {
    /// Create a flow in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        if self.pending.is_some() {
            CheckoutStep::PendingConfirmation
        } else {
            CheckoutStep::Idle
        }
    }

    /// The review awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&CheckoutReview> {
        self.pending.as_ref()
    }

    /// Open the review for `cart`.
    ///
    /// Fails with [`CommerceError::EmptyCart`] without changing state when
    /// the cart is empty. Calling it again while a review is pending
    /// replaces the review with the cart's current contents.
    pub fn begin(&mut self, cart: &Cart) -> Result<&CheckoutReview, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let review = CheckoutReview {
            snapshot: cart.snapshot(),
            started_at: Utc::now(),
        };
        Ok(self.pending.insert(review))
    }

    /// Confirm the pending review and empty `cart`.
    ///
    /// The cart is cleared as it is now, including anything added after the
    /// review was opened.
    pub fn confirm(&mut self, cart: &mut Cart) -> Result<OrderConfirmation, CommerceError> {
        if self.pending.take().is_none() {
            return Err(self.not_pending("confirmed"));
        }

        let total = cart.total();
        let items = cart.clear();
        Ok(OrderConfirmation {
            items,
            total,
            confirmed_at: Utc::now(),
        })
    }

    /// Discard the pending review, leaving the cart untouched.
    pub fn cancel(&mut self) -> Result<CheckoutReview, CommerceError> {
        self.pending.take().ok_or_else(|| self.not_pending("cancelled"))
    }

    fn not_pending(&self, to: &str) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step().as_str().to_string(),
            to: to.to_string(),
        }
    }
}
