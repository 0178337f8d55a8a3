//! Payment method selection.

use serde::{Deserialize, Serialize};

/// Payment method selected at checkout.
///
/// Both methods are first-class in the data model, but only cash on
/// delivery is fully wired to the backend today. Online payment is shown
/// as unavailable; this is a policy flag, not a structural limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Online,
}

impl PaymentMethod {
    /// Gateway code understood by the order management service.
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::Online => "razorpay",
        }
    }

    /// Human-readable title recorded on the order.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Online => "Online Payment",
        }
    }

    /// Whether this method can currently be used to place an order.
    #[must_use]
    pub const fn available(self) -> bool {
        matches!(self, Self::CashOnDelivery)
    }
}
