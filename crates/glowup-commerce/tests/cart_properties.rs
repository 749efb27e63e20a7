use glowup_cache::{KeyValueStore, MemoryStore};
use glowup_commerce::prelude::*;
use glowup_commerce::store::CART_KEY;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn new_item(title: &str, cents: i64) -> NewCartItem {
    NewCartItem::new(title, Money::new(cents, Currency::USD), "images/item.jpg").unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn count_and_total_track_adds(prices in prop::collection::vec(0_i64..1_000_000, 0..40)) {
        let storage = MemoryStore::new();
        let toasts = ToastQueue::new();
        let mut store = CartStore::initialize(&storage, &toasts);

        for (n, cents) in prices.iter().enumerate() {
            store.add_item(new_item(&format!("Service {n}"), *cents)).unwrap();
        }

        prop_assert_eq!(store.count(), prices.len());
        prop_assert_eq!(store.total().amount_cents, prices.iter().sum::<i64>());
        prop_assert_eq!(toasts.len(), prices.len());
    }

    #[test]
    fn ids_unique_under_adds_and_removes(ops in prop::collection::vec((any::<bool>(), 0_usize..8), 0..60)) {
        let storage = MemoryStore::new();
        let toasts = ToastQueue::new();
        let mut store = CartStore::initialize(&storage, &toasts);

        for (add, pick) in ops {
            if add || store.count() == 0 {
                store.add_item(new_item("Haircut", 3000)).unwrap();
            } else {
                let id = store.items()[pick % store.count()].id;
                store.remove_item(id).unwrap();
            }

            let mut ids: Vec<CartItemId> = store.items().iter().map(|i| i.id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), store.count());
        }
    }

    #[test]
    fn removing_absent_id_changes_nothing(prices in prop::collection::vec(0_i64..100_000, 1..10), absent in any::<u64>()) {
        let storage = MemoryStore::new();
        let toasts = ToastQueue::new();
        let mut store = CartStore::initialize(&storage, &toasts);
        for cents in &prices {
            store.add_item(new_item("Facial", *cents)).unwrap();
        }
        let absent = CartItemId::new(absent);
        prop_assume!(store.items().iter().all(|i| i.id != absent));

        let before = store.snapshot();
        let written = storage.get(CART_KEY).unwrap();
        let notified = toasts.len();

        prop_assert!(store.remove_item(absent).is_none());
        prop_assert_eq!(store.snapshot(), before);
        prop_assert_eq!(storage.get(CART_KEY).unwrap(), written);
        prop_assert_eq!(toasts.len(), notified);
    }

    #[test]
    fn persisted_cart_round_trips(entries in prop::collection::vec(("[A-Za-z &]{1,24}", 0_i64..10_000_000), 1..20)) {
        let storage = MemoryStore::new();
        let toasts = ToastQueue::new();
        let mut store = CartStore::initialize(&storage, &toasts);
        for (title, cents) in &entries {
            prop_assume!(!title.trim().is_empty());
            store.add_item(new_item(title, *cents)).unwrap();
        }
        let before = store.snapshot();

        let reloaded = CartStore::initialize(&storage, &toasts);
        prop_assert_eq!(reloaded.snapshot(), before);
    }

    #[test]
    fn confirm_always_empties(prices in prop::collection::vec(0_i64..100_000, 1..20)) {
        let storage = MemoryStore::new();
        let toasts = ToastQueue::new();
        let mut store = CartStore::initialize(&storage, &toasts);
        for cents in &prices {
            store.add_item(new_item("Spa", *cents)).unwrap();
        }

        store.begin_checkout().unwrap();
        let order = store.confirm_checkout().unwrap();

        prop_assert_eq!(order.items.len(), prices.len());
        prop_assert_eq!(store.count(), 0);
        let written = storage.get(CART_KEY).unwrap();
        prop_assert_eq!(written.as_deref(), Some("[]"));
    }
}
