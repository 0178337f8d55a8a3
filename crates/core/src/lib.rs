//! Attar Core - Shared types library.
//!
//! This crate provides the domain types shared across the Attar storefront
//! components:
//! - `checkout` - cart, checkout, and order-tracking subsystem
//! - the (separate) UI layer that consumes it
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, phone numbers, postcodes,
//!   plus the cart line item, shipping contact, payment method, and order
//!   status types.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
