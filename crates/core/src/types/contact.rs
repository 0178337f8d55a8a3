//! Shipping contact details.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::phone::Phone;
use crate::types::postcode::Postcode;

/// A validated shipping/billing contact.
///
/// Produced by checkout form validation; the raw form never reaches the
/// order management service. The serialized shape matches the backend's
/// billing-address wire format (`first_name`, `address_1`, ...), and the
/// same shape is persisted when the shopper opts into saving their details.
///
/// `city` and `state` become derived fields once a postcode resolves via
/// the address lookup: the adapter overwrites them with the authoritative
/// locality values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingContact {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Phone,
    #[serde(rename = "address_1")]
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postcode: Postcode,
    pub country: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn contact() -> ShippingContact {
        ShippingContact {
            first_name: "Asha".to_string(),
            last_name: "Wani".to_string(),
            email: Email::parse("asha@example.com").unwrap(),
            phone: Phone::parse("9876543210").unwrap(),
            address1: "14 Boulevard Road".to_string(),
            city: "Srinagar".to_string(),
            state: "Jammu and Kashmir".to_string(),
            postcode: Postcode::parse("190001").unwrap(),
            country: "IN".to_string(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(contact()).unwrap();
        // The backend expects address_1, not address1
        assert!(json.get("address_1").is_some());
        assert!(json.get("address1").is_none());
        assert_eq!(json["first_name"], "Asha");
        assert_eq!(json["postcode"], "190001");
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = contact();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ShippingContact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
