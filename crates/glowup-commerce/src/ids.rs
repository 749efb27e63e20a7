//! Cart item identifiers.
//!
//! Ids are plain integers so the persisted cart stays readable by the
//! site's storage format. Fresh ids come from an [`IdSequence`] rather than
//! the clock, so two items added in quick succession never collide.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one item instance in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(u64);

impl CartItemId {
    /// Create an id from its raw value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CartItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for CartItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Monotonic source of [`CartItemId`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Start a sequence at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Start a sequence just past the largest of `existing`.
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a CartItemId>) -> Self {
        let next = existing
            .into_iter()
            .map(|id| id.0.wrapping_add(1))
            .max()
            .unwrap_or(1);
        Self { next }
    }

    /// Hand out the next id for which `in_use` is false.
    ///
    /// Terminates as long as fewer than `u64::MAX` ids are in use.
    pub fn next_unused(&mut self, in_use: impl Fn(CartItemId) -> bool) -> CartItemId {
        loop {
            let id = CartItemId(self.next);
            self.next = self.next.wrapping_add(1);
            if !in_use(id) {
                return id;
            }
        }
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let mut seq = IdSequence::new();
        let a = seq.next_unused(|_| false);
        let b = seq.next_unused(|_| false);
        assert_eq!(a, CartItemId::new(1));
        assert_eq!(b, CartItemId::new(2));
    }

    #[test]
    fn test_sequence_seeded_after_existing() {
        let existing = [CartItemId::new(7), CartItemId::new(1712345678901)];
        let mut seq = IdSequence::after(&existing);
        assert_eq!(seq.next_unused(|_| false), CartItemId::new(1712345678902));
    }

    #[test]
    fn test_sequence_skips_ids_in_use() {
        let held = [CartItemId::new(1), CartItemId::new(2)];
        let mut seq = IdSequence::new();
        let id = seq.next_unused(|id| held.contains(&id));
        assert_eq!(id, CartItemId::new(3));
    }

    #[test]
    fn test_sequence_wraps_past_max() {
        let existing = [CartItemId::new(u64::MAX)];
        let mut seq = IdSequence::after(&existing);
        let id = seq.next_unused(|id| existing.contains(&id));
        assert_eq!(id, CartItemId::new(0));
    }

    #[test]
    fn test_id_parse_and_display() {
        let id: CartItemId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<CartItemId>().is_err());
    }
}
