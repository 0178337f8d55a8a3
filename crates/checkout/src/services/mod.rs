//! REST clients for the external collaborators.
//!
//! - [`orders`] - the order management service (system of record for
//!   orders: creation and status)
//! - [`pincode`] - the postal lookup service (postcode to locality)
//!
//! Both are consumed through small traits so the checkout and tracking
//! flows can be exercised against fakes in tests.

pub mod orders;
pub mod pincode;

pub use orders::{
    OrderConfirmation, OrderRecord, OrderRequest, OrderService, OrdersClient, OrdersError,
};
pub use pincode::PincodeClient;
