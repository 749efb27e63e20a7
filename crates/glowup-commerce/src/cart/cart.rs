//! Cart and cart item types.

use std::collections::HashSet;

use crate::cart::PersistedItem;
use crate::error::CommerceError;
use crate::ids::{CartItemId, IdSequence};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One line in the cart.
///
/// Title, price and image are copied when the item is added; the cart
/// never refers back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique among the items currently held by the cart.
    pub id: CartItemId,
    /// Display name.
    pub title: String,
    /// Non-negative price.
    pub price: Money,
    /// URL or path of the display image.
    pub image: String,
}

/// A validated item that has not been added to a cart yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    title: String,
    price: Money,
    image: String,
}

impl NewCartItem {
    /// Build an item from an already-parsed price.
    ///
    /// The title is trimmed and must not be blank; the price must not be
    /// negative.
    pub fn new(
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(CommerceError::ValidationError(
                "item title must not be blank".to_string(),
            ));
        }
        if price.amount_cents < 0 {
            return Err(CommerceError::InvalidPrice(price.display()));
        }
        Ok(Self {
            title,
            price,
            image: image.into().trim().to_string(),
        })
    }

    /// Build an item from the price text shown on the page (e.g. "$30.00").
    pub fn parse(
        title: impl Into<String>,
        price_text: &str,
        image: impl Into<String>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let price = Money::parse_display(price_text, currency)?;
        Self::new(title, price, image)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

/// Read-only view of the cart handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Items in display order.
    pub items: Vec<CartItem>,
    /// Sum of item prices.
    pub total: Money,
}

impl CartSnapshot {
    /// Number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Check if the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered sequence of cart items; insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
    ids: IdSequence,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
            ids: IdSequence::new(),
        }
    }

    /// Rebuild a cart from items read back from storage.
    ///
    /// Later items whose id repeats an earlier one are given fresh ids, so
    /// the uniqueness invariant holds even for carts written by older code
    /// that derived ids from the clock.
    pub fn from_items(items: Vec<CartItem>, currency: Currency) -> Result<Self, CommerceError> {
        if let Some(item) = items.iter().find(|i| i.price.currency != currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            });
        }

        let mut ids = IdSequence::after(items.iter().map(|i| &i.id));
        let mut seen = HashSet::with_capacity(items.len());
        let mut cart_items = Vec::with_capacity(items.len());

        let all_ids: HashSet<CartItemId> = items.iter().map(|i| i.id).collect();
        for mut item in items {
            if !seen.insert(item.id) {
                let fresh = ids.next_unused(|id| all_ids.contains(&id) || seen.contains(&id));
                tracing::warn!(duplicate = %item.id, reassigned = %fresh, "duplicate cart item id");
                item.id = fresh;
                seen.insert(fresh);
            }
            cart_items.push(item);
        }

        Ok(Self {
            items: cart_items,
            currency,
            ids,
        })
    }

    /// Rebuild a cart from its storage records.
    pub fn from_persisted(
        records: Vec<PersistedItem>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let items = records
            .into_iter()
            .map(|r| r.into_item(currency))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_items(items, currency)
    }

    /// Storage records for every item, in order.
    pub fn to_persisted(&self) -> Vec<PersistedItem> {
        self.items.iter().map(PersistedItem::from).collect()
    }

    /// Append an item with a freshly generated id.
    pub fn add(&mut self, item: NewCartItem) -> Result<CartItemId, CommerceError> {
        if item.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            });
        }

        let items = &self.items;
        let id = self.ids.next_unused(|id| items.iter().any(|i| i.id == id));
        self.items.push(CartItem {
            id,
            title: item.title,
            price: item.price,
            image: item.image,
        });
        Ok(id)
    }

    /// Remove the item with `id`, returning it. `None` if no such item.
    pub fn remove(&mut self, id: CartItemId) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Remove every item, returning them in order.
    pub fn clear(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    /// Get an item by id.
    pub fn get(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of item prices, recomputed on every call.
    ///
    /// Item prices are capped at [`crate::money::MAX_ITEM_PRICE_CENTS`], so
    /// the sum cannot overflow for any cart that fits in memory; it
    /// saturates rather than panicking if it ever did.
    pub fn total(&self) -> Money {
        Money::try_sum(self.items.iter().map(|i| &i.price), self.currency)
            .unwrap_or(Money::new(i64::MAX, self.currency))
    }

    /// Copy of the items and their total.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn item(title: &str, cents: i64) -> NewCartItem {
        NewCartItem::new(title, usd(cents), format!("images/{}.jpg", title.to_lowercase()))
            .unwrap()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), usd(0));
    }

    #[test]
    fn test_add_item_appends_in_order() {
        let mut cart = Cart::default();
        let a = cart.add(item("Haircut", 3000)).unwrap();
        let b = cart.add(item("Facial", 4000)).unwrap();

        assert_ne!(a, b);
        assert_eq!(cart.len(), 2);
        let titles: Vec<&str> = cart.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Haircut", "Facial"]);
        assert_eq!(cart.total(), usd(7000));
    }

    #[test]
    fn test_same_product_twice_gets_two_lines() {
        let mut cart = Cart::default();
        let a = cart.add(item("Haircut", 3000)).unwrap();
        let b = cart.add(item("Haircut", 3000)).unwrap();

        assert_ne!(a, b);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::default();
        let id = cart.add(item("Haircut", 3000)).unwrap();

        let removed = cart.remove(id).unwrap();
        assert_eq!(removed.title, "Haircut");
        assert!(cart.is_empty());
        assert!(cart.remove(id).is_none());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut cart = Cart::default();
        let a = cart.add(item("Haircut", 3000)).unwrap();
        cart.remove(a);
        let b = cart.add(item("Facial", 4000)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_item_validation() {
        assert!(matches!(
            NewCartItem::new("   ", usd(100), ""),
            Err(CommerceError::ValidationError(_))
        ));
        assert!(matches!(
            NewCartItem::new("Refund", usd(-100), ""),
            Err(CommerceError::InvalidPrice(_))
        ));

        let parsed = NewCartItem::parse(" Spa Treatment ", "$60.00", "spa.jpg", Currency::USD)
            .unwrap();
        assert_eq!(parsed.title(), "Spa Treatment");
        assert_eq!(parsed.price(), usd(6000));
        assert_eq!(parsed.image(), "spa.jpg");
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::new(Currency::GBP);
        assert!(matches!(
            cart.add(item("Haircut", 3000)),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_items_reassigns_duplicate_ids() {
        let dup = CartItemId::new(1712345678901);
        let items = vec![
            CartItem {
                id: dup,
                title: "Haircut".to_string(),
                price: usd(3000),
                image: String::new(),
            },
            CartItem {
                id: dup,
                title: "Facial".to_string(),
                price: usd(4000),
                image: String::new(),
            },
        ];

        let mut cart = Cart::from_items(items, Currency::USD).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, dup);
        assert_ne!(cart.items()[1].id, dup);

        let next = cart.add(item("Spa", 6000)).unwrap();
        let ids: HashSet<_> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(next > dup);
    }

    #[test]
    fn test_persisted_round_trip() {
        let mut cart = Cart::default();
        cart.add(item("Haircut", 3000)).unwrap();
        cart.add(item("Facial", 4050)).unwrap();

        let restored = Cart::from_persisted(cart.to_persisted(), Currency::USD).unwrap();
        assert_eq!(restored.items(), cart.items());
    }

    #[test]
    fn test_clear_returns_items() {
        let mut cart = Cart::default();
        cart.add(item("Haircut", 3000)).unwrap();
        let cleared = cart.clear();
        assert_eq!(cleared.len(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot() {
        let mut cart = Cart::default();
        cart.add(item("Haircut", 3000)).unwrap();
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.count(), 1);
        assert_eq!(snapshot.total, usd(3000));
    }
}
