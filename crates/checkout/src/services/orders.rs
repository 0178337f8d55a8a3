//! Order management service client.
//!
//! The order backend is the system of record: it owns pricing, inventory,
//! and order state. Order creation sends only catalog ids and quantities;
//! the backend computes every amount itself.

use attar_core::{CartItem, OrderId, OrderStatus, PaymentMethod, ShippingContact};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::config::CheckoutConfig;

/// REST API prefix on the order management site.
const API_PREFIX: &str = "wp-json/wc/v3";

/// Errors that can occur when talking to the order management service.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No order with the given id.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A single order line sent to the backend: catalog id and quantity only.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LineItemInput {
    pub product_id: attar_core::ProductId,
    pub quantity: u32,
}

/// An order creation request, built fresh at submit time.
///
/// Carries a client-generated idempotency key so transport-level retries of
/// the same submission can be deduplicated server-side.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub payment_method: PaymentMethod,
    pub billing: ShippingContact,
    pub line_items: Vec<LineItemInput>,
    pub idempotency_key: Uuid,
}

impl OrderRequest {
    /// Assemble a request from the validated contact and the current cart.
    #[must_use]
    pub fn new(
        billing: ShippingContact,
        payment_method: PaymentMethod,
        items: &[CartItem],
    ) -> Self {
        Self {
            payment_method,
            billing,
            line_items: items
                .iter()
                .map(|item| LineItemInput {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            idempotency_key: Uuid::new_v4(),
        }
    }

    /// The JSON body the backend expects.
    ///
    /// The shipping address duplicates the billing address, payment is
    /// recorded but not captured (`set_paid: false`), and no prices are
    /// included anywhere.
    #[must_use]
    pub fn to_body(&self) -> serde_json::Value {
        json!({
            "payment_method": self.payment_method.wire_code(),
            "payment_method_title": self.payment_method.title(),
            "set_paid": false,
            "billing": self.billing,
            "shipping": self.billing,
            "line_items": self.line_items,
            "status": "processing",
        })
    }
}

/// Result of a successful order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub order_key: String,
}

/// An order as returned by the backend. Read-only to this system.
///
/// Only the fields this subsystem consumes are modeled; the backend sends
/// many more, which serde ignores.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub billing: BillingRecord,
    #[serde(default)]
    pub line_items: Vec<OrderRecordLine>,
}

/// Billing details on an order record. Only the email is consumed, for the
/// tracking ownership check.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingRecord {
    #[serde(default)]
    pub email: String,
}

/// One line on an order record.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecordLine {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Seam over the order management service.
///
/// The checkout orchestrator and tracking verifier are generic over this
/// trait; tests run them against a recording fake.
pub trait OrderService {
    /// Create an order.
    fn create_order(
        &self,
        request: &OrderRequest,
    ) -> impl Future<Output = Result<OrderConfirmation, OrdersError>>;

    /// Fetch an order by id.
    fn get_order(&self, id: OrderId) -> impl Future<Output = Result<OrderRecord, OrdersError>>;
}

/// REST client for the order management service.
#[derive(Debug, Clone)]
pub struct OrdersClient {
    client: reqwest::Client,
    base_url: String,
}

impl OrdersClient {
    /// Create a new client from configuration.
    ///
    /// Requests authenticate with HTTP Basic auth built from the consumer
    /// key and secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CheckoutConfig) -> Result<Self, OrdersError> {
        let credentials = format!(
            "{}:{}",
            config.consumer_key.expose_secret(),
            config.consumer_secret.expose_secret()
        );
        let auth_value = format!("Basic {}", BASE64.encode(credentials));

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth_header = reqwest::header::HeaderValue::from_str(&auth_value)
            .map_err(|e| OrdersError::Parse(format!("invalid credentials: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let base_url = format!(
            "{}/{API_PREFIX}",
            config.site_url.as_str().trim_end_matches('/')
        );

        Ok(Self { client, base_url })
    }
}

impl OrderService for OrdersClient {
    #[instrument(skip(self, request), fields(lines = request.line_items.len()))]
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderConfirmation, OrdersError> {
        let url = format!("{}/orders", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("X-Idempotency-Key", request.idempotency_key.to_string())
            .json(&request.to_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "order creation rejected");
            return Err(OrdersError::Api {
                status: status.as_u16(),
                message,
            });
        }

        #[derive(Deserialize)]
        struct CreateOrderResponse {
            id: OrderId,
            order_key: String,
        }

        let created: CreateOrderResponse = response
            .json()
            .await
            .map_err(|e| OrdersError::Parse(e.to_string()))?;

        Ok(OrderConfirmation {
            order_id: created.id,
            order_key: created.order_key,
        })
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn get_order(&self, id: OrderId) -> Result<OrderRecord, OrdersError> {
        let url = format!("{}/orders/{id}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OrdersError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrdersError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OrdersError::Parse(e.to_string()))
    }
}
