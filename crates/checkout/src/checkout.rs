//! Checkout orchestration: validate, assemble, submit.
//!
//! The orchestrator takes the raw checkout form and the current cart,
//! re-validates everything at submit time (field-level checks in the UI are
//! advisory only), builds the order request, and submits it. Only a
//! successful submission clears the cart; every failure leaves cart and
//! form state intact so the shopper can retry.

use attar_core::{Email, PaymentMethod, Phone, Postcode, ShippingContact};
use thiserror::Error;
use tracing::instrument;

use crate::address::Locality;
use crate::cart::saved::{ContactStore, SavePreference};
use crate::cart::storage::KeyedStore;
use crate::cart::CartStore;
use crate::services::orders::{OrderConfirmation, OrderRequest, OrderService, OrdersError};

/// A checkout form field, used to scope validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Address1,
    City,
    State,
    Postcode,
    Country,
    Payment,
    Cart,
}

/// A validation failure scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// The set of outstanding validation errors on the form.
///
/// The UI clears a field's error the moment the shopper edits that field
/// (optimistically, before re-validation) via [`FormErrors::clear`];
/// submission re-validates everything regardless.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether the form is clean.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All outstanding errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The message for a field, if it has an error.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Drop the error for a field. Called when the shopper edits it.
    pub fn clear(&mut self, field: Field) {
        self.0.retain(|e| e.field != field);
    }
}

/// Raw checkout form state as entered by the shopper.
///
/// Everything is free text until validation; `city` and `state` are
/// overwritten by a resolved postcode lookup and rendered read-only by the
/// UI from that point on.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    /// "Save my information" toggle.
    pub save_info: bool,
}

impl CheckoutForm {
    /// Overwrite city and state from a resolved locality.
    pub fn apply_locality(&mut self, locality: &Locality) {
        self.city = locality.city.clone();
        self.state = locality.state.clone();
    }
}

/// Errors from the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more form fields failed validation. Never reaches the
    /// network layer.
    #[error("please correct the highlighted fields")]
    Validation(FormErrors),

    /// Could not reach the order management service. Retryable.
    #[error("network error, please try again: {0}")]
    Network(String),

    /// The order management service rejected the order. Retryable after
    /// review.
    #[error("order could not be placed: {0}")]
    Backend(String),
}

impl From<OrdersError> for CheckoutError {
    fn from(e: OrdersError) -> Self {
        match e {
            OrdersError::Http(inner) => Self::Network(inner.to_string()),
            other => Self::Backend(other.to_string()),
        }
    }
}

/// The checkout orchestrator.
pub struct Checkout<S: OrderService> {
    orders: S,
}

impl<S: OrderService> Checkout<S> {
    /// Create an orchestrator over the given order service.
    pub const fn new(orders: S) -> Self {
        Self { orders }
    }

    /// Validate the form against the current cart.
    ///
    /// Returns the typed shipping contact on success, or the full set of
    /// field-scoped errors. Exposed separately so the UI can run the same
    /// checks before enabling the submit button.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing every failing field.
    pub fn validate<K: KeyedStore>(
        form: &CheckoutForm,
        cart: &CartStore<K>,
    ) -> Result<ShippingContact, FormErrors> {
        let mut errors = FormErrors::default();

        let required = [
            (Field::FirstName, &form.first_name, "First name is required"),
            (Field::LastName, &form.last_name, "Last name is required"),
            (Field::Address1, &form.address1, "Street address is required"),
            (Field::City, &form.city, "City is required"),
            (Field::State, &form.state, "State is required"),
            (Field::Country, &form.country, "Country is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(field, message);
            }
        }

        let email = match Email::parse(&form.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(Field::Email, e.to_string());
                None
            }
        };
        let phone = match Phone::parse(&form.phone) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errors.push(Field::Phone, e.to_string());
                None
            }
        };
        let postcode = match Postcode::parse(&form.postcode) {
            Ok(postcode) => Some(postcode),
            Err(e) => {
                errors.push(Field::Postcode, e.to_string());
                None
            }
        };

        if !form.payment_method.available() {
            errors.push(
                Field::Payment,
                format!("{} is not available yet", form.payment_method.title()),
            );
        }

        if cart.is_empty() {
            errors.push(Field::Cart, "Your cart is empty");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // All three parses succeeded if we got here.
        match (email, phone, postcode) {
            (Some(email), Some(phone), Some(postcode)) => Ok(ShippingContact {
                first_name: form.first_name.trim().to_owned(),
                last_name: form.last_name.trim().to_owned(),
                email,
                phone,
                address1: form.address1.trim().to_owned(),
                city: form.city.trim().to_owned(),
                state: form.state.trim().to_owned(),
                postcode,
                country: form.country.trim().to_owned(),
            }),
            _ => Err(errors),
        }
    }

    /// Validate, build the order request, and submit it.
    ///
    /// On success the cart is cleared, the contact is persisted or removed
    /// according to the save preference, and the confirmation (order id and
    /// key) is returned for the confirmation view. On any failure the cart
    /// and form are left untouched.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::Validation`] before any network call;
    /// [`CheckoutError::Network`] or [`CheckoutError::Backend`] when
    /// submission fails.
    #[instrument(skip_all, fields(items = cart.items().len()))]
    pub async fn submit<K: KeyedStore, C: KeyedStore>(
        &self,
        cart: &mut CartStore<K>,
        contacts: &ContactStore<C>,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let contact = Self::validate(form, cart).map_err(CheckoutError::Validation)?;

        let request = OrderRequest::new(contact.clone(), form.payment_method, cart.items());
        let confirmation = self.orders.create_order(&request).await?;

        tracing::info!(order_id = %confirmation.order_id, "order placed");

        // The only path that clears the cart.
        cart.clear();
        contacts.apply(
            SavePreference {
                save_contact: form.save_info,
            },
            &contact,
        );

        Ok(confirmation)
    }
}
