//! Shopping cart module.
//!
//! Contains the cart, its items, and the record format the cart is
//! persisted in.

mod cart;
mod persisted;

pub use cart::{Cart, CartItem, CartSnapshot, NewCartItem};
pub use persisted::PersistedItem;
