//! Checkout module.
//!
//! Review-then-confirm flow over the cart. Confirmation is a local
//! simulation that empties the cart; nothing is charged or submitted.

mod flow;

pub use flow::{CheckoutFlow, CheckoutReview, CheckoutStep, OrderConfirmation};
