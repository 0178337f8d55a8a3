//! Core types for the Attar storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod contact;
pub mod email;
pub mod id;
pub mod payment;
pub mod phone;
pub mod postcode;
pub mod status;

pub use cart::CartItem;
pub use contact::ShippingContact;
pub use email::{Email, EmailError};
pub use id::*;
pub use payment::PaymentMethod;
pub use phone::{Phone, PhoneError};
pub use postcode::{Postcode, PostcodeError};
pub use status::OrderStatus;
