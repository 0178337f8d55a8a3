//! Order tracking with ownership verification.
//!
//! Anyone can type an order id; the order's details are released only when
//! the requester also supplies the billing email on record. The projection
//! returned on success is deliberately narrow: no billing address, no
//! payment details, nothing the full backend record carries beyond what a
//! status page shows.

use attar_core::{Email, OrderId, OrderStatus};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use crate::services::orders::{OrderService, OrdersError};

/// Errors from the tracking flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingError {
    /// Order id or email missing.
    #[error("please enter both order ID and email address")]
    MissingInput,

    /// No such order. Also returned for ids that cannot possibly exist, so
    /// the response does not distinguish malformed ids from absent ones.
    #[error("no order found with that ID")]
    NotFound,

    /// The order exists but the email does not match its billing email.
    /// The caller learns nothing else about the order.
    #[error("email address does not match this order")]
    Forbidden,

    /// The order management service failed.
    #[error("could not look up the order: {0}")]
    Service(String),
}

/// A sanitized view of an order, safe to show to whoever passed the
/// ownership check.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub date: Option<NaiveDateTime>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency_symbol: String,
    pub items: Vec<SummaryLine>,
}

/// One line of the sanitized order view.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Verifies order ownership and projects the sanitized summary.
pub struct TrackingVerifier<S: OrderService> {
    orders: S,
}

impl<S: OrderService> TrackingVerifier<S> {
    /// Create a verifier over the given order service.
    pub const fn new(orders: S) -> Self {
        Self { orders }
    }

    /// Look up an order by id, releasing details only if the email matches
    /// the billing email on record.
    ///
    /// Both inputs are raw user entry. A non-numeric order id is reported
    /// as not found rather than as a distinct error, so probing with
    /// malformed ids looks the same as probing with absent ones.
    ///
    /// # Errors
    ///
    /// [`TrackingError::MissingInput`] when either field is blank,
    /// [`TrackingError::NotFound`] for unknown or malformed ids,
    /// [`TrackingError::Forbidden`] on an email mismatch, and
    /// [`TrackingError::Service`] for backend failures.
    #[instrument(skip_all, fields(order_id = %order_id.trim()))]
    pub async fn track(&self, order_id: &str, email: &str) -> Result<OrderSummary, TrackingError> {
        let order_id = order_id.trim();
        let email = email.trim();
        if order_id.is_empty() || email.is_empty() {
            return Err(TrackingError::MissingInput);
        }

        let Ok(id) = order_id.parse::<OrderId>() else {
            return Err(TrackingError::NotFound);
        };

        let record = match self.orders.get_order(id).await {
            Ok(record) => record,
            Err(OrdersError::NotFound(_)) => return Err(TrackingError::NotFound),
            Err(e) => {
                tracing::warn!("order lookup failed: {e}");
                return Err(TrackingError::Service(e.to_string()));
            }
        };

        // The email is only compared once the order is known to exist, so a
        // malformed address on an unknown id still reads as not found. An
        // unparseable address can never match the one on record.
        let matches = Email::parse(email)
            .is_ok_and(|email| email.matches_ignore_case(&record.billing.email));
        if !matches {
            return Err(TrackingError::Forbidden);
        }

        Ok(OrderSummary {
            id: record.id,
            status: record.status,
            date: record.date_created,
            total: record.total,
            currency_symbol: record.currency_symbol,
            items: record
                .line_items
                .into_iter()
                .map(|line| SummaryLine {
                    name: line.name,
                    quantity: line.quantity,
                    total: line.total,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::services::orders::{
        BillingRecord, OrderConfirmation, OrderRecord, OrderRecordLine, OrderRequest,
    };

    use super::*;

    /// Order service fake holding a single order.
    struct SingleOrder {
        id: i64,
        billing_email: String,
    }

    impl OrderService for SingleOrder {
        async fn create_order(
            &self,
            _request: &OrderRequest,
        ) -> Result<OrderConfirmation, OrdersError> {
            unreachable!("tracking never creates orders")
        }

        async fn get_order(&self, id: OrderId) -> Result<OrderRecord, OrdersError> {
            if id != OrderId::new(self.id) {
                return Err(OrdersError::NotFound(id));
            }
            Ok(OrderRecord {
                id,
                status: OrderStatus::Processing,
                date_created: "2026-03-22T16:28:02".parse().ok(),
                currency_symbol: "₹".to_string(),
                total: Decimal::from(1000),
                billing: BillingRecord {
                    email: self.billing_email.clone(),
                },
                line_items: vec![OrderRecordLine {
                    name: "Saffron Attar".to_string(),
                    quantity: 2,
                    total: Decimal::from(1000),
                }],
            })
        }
    }

    struct FailingOrders;

    impl OrderService for FailingOrders {
        async fn create_order(
            &self,
            _request: &OrderRequest,
        ) -> Result<OrderConfirmation, OrdersError> {
            unreachable!()
        }

        async fn get_order(&self, _id: OrderId) -> Result<OrderRecord, OrdersError> {
            Err(OrdersError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn verifier() -> TrackingVerifier<SingleOrder> {
        TrackingVerifier::new(SingleOrder {
            id: 1502,
            billing_email: "A@B.COM".to_string(),
        })
    }

    #[tokio::test]
    async fn test_matching_email_releases_summary() {
        let summary = verifier().track("1502", "a@b.com").await.unwrap();
        assert_eq!(summary.id, OrderId::new(1502));
        assert_eq!(summary.status, OrderStatus::Processing);
        assert_eq!(summary.total, Decimal::from(1000));
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].name, "Saffron Attar");
    }

    #[tokio::test]
    async fn test_email_match_ignores_case_and_whitespace() {
        assert!(verifier().track(" 1502 ", "  A@b.Com ").await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_email_is_forbidden() {
        let err = verifier().track("1502", "mallory@evil.com").await.unwrap_err();
        assert_eq!(err, TrackingError::Forbidden);
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let err = verifier().track("9999", "a@b.com").await.unwrap_err();
        assert_eq!(err, TrackingError::NotFound);
    }

    #[tokio::test]
    async fn test_non_numeric_id_reported_as_not_found() {
        let err = verifier().track("abc", "a@b.com").await.unwrap_err();
        assert_eq!(err, TrackingError::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_order_reported_before_email_shape() {
        // The order fetch decides first: an unknown id is not found even
        // when the supplied email would not parse.
        let err = verifier().track("9999", "not-an-email").await.unwrap_err();
        assert_eq!(err, TrackingError::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_email_on_existing_order_is_forbidden() {
        let err = verifier().track("1502", "not-an-email").await.unwrap_err();
        assert_eq!(err, TrackingError::Forbidden);
    }

    #[tokio::test]
    async fn test_blank_inputs_rejected() {
        assert_eq!(
            verifier().track("", "a@b.com").await.unwrap_err(),
            TrackingError::MissingInput
        );
        assert_eq!(
            verifier().track("1502", "   ").await.unwrap_err(),
            TrackingError::MissingInput
        );
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_as_service_error() {
        let verifier = TrackingVerifier::new(FailingOrders);
        let err = verifier.track("1502", "a@b.com").await.unwrap_err();
        assert!(matches!(err, TrackingError::Service(_)));
    }

    #[test]
    fn test_summary_serializes_without_billing_fields() {
        let summary = OrderSummary {
            id: OrderId::new(1502),
            status: OrderStatus::Completed,
            date: None,
            total: Decimal::from(1000),
            currency_symbol: "₹".to_string(),
            items: vec![],
        };

        let value = serde_json::to_value(&summary).unwrap();
        // serde_json objects iterate in sorted key order.
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["currency_symbol", "date", "id", "items", "status", "total"]
        );
        assert!(value.get("billing").is_none());
        assert!(value.get("payment_method").is_none());
    }
}
