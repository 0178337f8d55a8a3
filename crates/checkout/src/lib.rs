//! Attar Checkout - cart, checkout, and order-tracking subsystem.
//!
//! This crate is the engineered core of the storefront: the UI layer renders
//! pages and calls into it. Product data, pricing, and fulfillment are owned
//! by the external order management service; this crate holds the cart,
//! validates and submits orders, and verifies order-tracking requests.
//!
//! # Components
//!
//! - [`cart`] - durable client-side cart state with merge semantics and
//!   derived aggregates
//! - [`address`] - postcode to locality lookup with stale-result discarding
//! - [`checkout`] - form validation, order assembly, and submission
//! - [`tracking`] - order lookup gated by an id + billing-email match
//! - [`services`] - REST clients for the order management and postal
//!   lookup services
//!
//! # Example
//!
//! ```rust,ignore
//! use attar_checkout::cart::{CartStore, storage::MemoryStore};
//! use attar_checkout::checkout::{Checkout, CheckoutForm};
//!
//! let mut cart = CartStore::load(MemoryStore::new());
//! cart.add_item(item);
//!
//! let checkout = Checkout::new(orders_client);
//! let confirmation = checkout.submit(&mut cart, &contacts, &form).await?;
//! println!("order #{} placed", confirmation.order_id);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod services;
pub mod tracking;

pub use checkout::{Checkout, CheckoutError, CheckoutForm, Field, FieldError, FormErrors};
pub use config::CheckoutConfig;
pub use tracking::{OrderSummary, SummaryLine, TrackingError, TrackingVerifier};
