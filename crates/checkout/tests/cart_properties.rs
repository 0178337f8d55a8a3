//! Property tests for cart arithmetic over arbitrary operation sequences.

#![allow(clippy::unwrap_used)]

use attar_checkout::cart::storage::{JsonFileStore, KeyedStore, MemoryStore};
use attar_checkout::cart::CartStore;
use attar_core::{CartItem, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// One shopper action against the cart.
#[derive(Debug, Clone)]
enum CartOp {
    Add { product: u8, quantity: u32 },
    Remove { product: u8 },
    Update { product: u8, delta: i64 },
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        (0u8..8, 0u32..5).prop_map(|(product, quantity)| CartOp::Add { product, quantity }),
        (0u8..8).prop_map(|product| CartOp::Remove { product }),
        (0u8..8, -4i64..4).prop_map(|(product, delta)| CartOp::Update { product, delta }),
    ]
}

fn item(product: u8, quantity: u32) -> CartItem {
    CartItem {
        id: format!("gid://{product}"),
        product_id: ProductId::new(i64::from(product)),
        title: format!("Attar {product}"),
        // Distinct prices so subtotal errors cannot cancel out.
        unit_price: Decimal::from(100 + u32::from(product) * 7),
        image: String::new(),
        quantity,
        category: "Attars".to_string(),
    }
}

fn apply<S: KeyedStore>(cart: &mut CartStore<S>, op: &CartOp) {
    match op {
        CartOp::Add { product, quantity } => cart.add_item(item(*product, *quantity)),
        CartOp::Remove { product } => cart.remove_item(&format!("gid://{product}")),
        CartOp::Update { product, delta } => {
            cart.update_quantity(&format!("gid://{product}"), *delta);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // The invariants must hold after every single mutation, not just at the
    // end of a sequence, so each property re-checks inside the loop.

    #[test]
    fn subtotal_is_sum_of_line_totals(ops in proptest::collection::vec(cart_op(), 0..40)) {
        let mut cart = CartStore::load(MemoryStore::new());
        for op in &ops {
            apply(&mut cart, op);

            let expected: Decimal = cart
                .items()
                .iter()
                .map(|i| i.unit_price * Decimal::from(i.quantity))
                .sum();
            prop_assert_eq!(cart.subtotal(), expected);
            prop_assert_eq!(
                cart.item_count(),
                cart.items().iter().map(|i| i.quantity).sum::<u32>()
            );
        }
    }

    #[test]
    fn quantities_never_drop_below_one(ops in proptest::collection::vec(cart_op(), 0..40)) {
        let mut cart = CartStore::load(MemoryStore::new());
        for op in &ops {
            apply(&mut cart, op);

            for item in cart.items() {
                prop_assert!(item.quantity >= 1);
            }
        }
    }

    #[test]
    fn item_ids_stay_unique(ops in proptest::collection::vec(cart_op(), 0..40)) {
        let mut cart = CartStore::load(MemoryStore::new());
        for op in &ops {
            apply(&mut cart, op);

            let mut ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }
    }

    #[test]
    fn cart_survives_reload(ops in proptest::collection::vec(cart_op(), 0..25)) {
        let dir = tempfile::tempdir().unwrap();

        let mut cart = CartStore::load(JsonFileStore::open(dir.path()).unwrap());
        for op in &ops {
            apply(&mut cart, op);
        }
        let before: Vec<CartItem> = cart.items().to_vec();
        drop(cart);

        let reloaded = CartStore::load(JsonFileStore::open(dir.path()).unwrap());
        prop_assert_eq!(reloaded.items(), before.as_slice());
    }
}
