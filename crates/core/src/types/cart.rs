//! Cart line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A single purchasable line in the shopping cart.
///
/// `id` identifies the purchasable variant and is the merge key: the cart
/// holds at most one item per `id`, and repeated adds accumulate quantity.
/// `product_id` is the backend catalog id the order management service
/// needs at checkout.
///
/// Invariant: `quantity >= 1`. An item never exists at quantity zero; it is
/// removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique id of the purchasable variant.
    pub id: String,
    /// Backend catalog id.
    pub product_id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency. Display-only: prices are never
    /// sent back to the backend, which is the price authority.
    pub unit_price: Decimal,
    /// Product image URI.
    pub image: String,
    /// Quantity, always at least 1.
    pub quantity: u32,
    /// Product category name.
    pub category: String,
}

impl CartItem {
    /// Price for this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(quantity: u32) -> CartItem {
        CartItem {
            id: "gid://product/1".to_string(),
            product_id: ProductId::new(3291),
            title: "Saffron Attar 12ml".to_string(),
            unit_price: Decimal::from(500),
            image: "https://cdn.example.com/attar.jpg".to_string(),
            quantity,
            category: "Attars".to_string(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(2).line_total(), Decimal::from(1000));
        assert_eq!(item(1).line_total(), Decimal::from(500));
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = item(3);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
