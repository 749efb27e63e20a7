//! Storage format for cart items.

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::CartItemId;
use crate::money::{Currency, Money};

/// One cart item as written to client-local storage.
///
/// The cart key holds a JSON array of these, e.g.
/// `[{"id":1,"title":"Haircut","price":30,"image":"images/haircut.jpg"}]`.
/// Prices are plain decimal numbers; the currency is a property of the
/// store, not of the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedItem {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl PersistedItem {
    /// Validate the record and turn it into a cart item priced in `currency`.
    pub fn into_item(self, currency: Currency) -> Result<CartItem, CommerceError> {
        let price = Money::from_decimal(self.price, currency).map_err(|_| {
            CommerceError::MalformedPersistedState(format!(
                "item {} has invalid price {}",
                self.id, self.price
            ))
        })?;
        Ok(CartItem {
            id: CartItemId::new(self.id),
            title: self.title,
            price,
            image: self.image,
        })
    }
}

impl From<&CartItem> for PersistedItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.get(),
            title: item.title.clone(),
            price: item.price.to_decimal(),
            image: item.image.clone(),
        }
    }
}
