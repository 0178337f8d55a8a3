//! Optional "save my information" contact persistence.

use attar_core::ShippingContact;
use serde::{Deserialize, Serialize};

use super::storage::KeyedStore;

/// Storage key for the saved shipping contact.
pub const CONTACT_KEY: &str = "attar.contact";

/// The shopper's "save my information" preference.
///
/// Modeled as an explicit preference object rather than an ad hoc flag so
/// that withdrawing it has a defined effect: the stored contact is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SavePreference {
    pub save_contact: bool,
}

impl SavePreference {
    /// Preference that persists the contact after a successful order.
    #[must_use]
    pub const fn opted_in() -> Self {
        Self { save_contact: true }
    }
}

/// Persistence handle for the saved shipping contact.
///
/// Like the cart, this never fails the calling flow: read problems yield
/// `None` and write problems are logged.
#[derive(Debug)]
pub struct ContactStore<S: KeyedStore> {
    store: S,
}

impl<S: KeyedStore> ContactStore<S> {
    /// Create a contact store over the given durable store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the saved contact, if one exists and is readable.
    #[must_use]
    pub fn load(&self) -> Option<ShippingContact> {
        match self.store.get(CONTACT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(contact) => Some(contact),
                Err(e) => {
                    tracing::warn!("discarding unreadable saved contact: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read saved contact: {e}");
                None
            }
        }
    }

    /// Apply the preference after a successful order: persist the contact
    /// when opted in, remove any stored contact when opted out.
    pub fn apply(&self, preference: SavePreference, contact: &ShippingContact) {
        if preference.save_contact {
            self.save(contact);
        } else {
            self.clear();
        }
    }

    /// Persist the contact.
    pub fn save(&self, contact: &ShippingContact) {
        match serde_json::to_string(contact) {
            Ok(raw) => {
                if let Err(e) = self.store.put(CONTACT_KEY, &raw) {
                    tracing::error!("failed to persist saved contact: {e}");
                }
            }
            Err(e) => tracing::error!("failed to serialize saved contact: {e}"),
        }
    }

    /// Remove the stored contact, if any.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(CONTACT_KEY) {
            tracing::error!("failed to remove saved contact: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use attar_core::{Email, Phone, Postcode};

    use super::super::storage::MemoryStore;
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
    fn test_save_and_load() {
        let contacts = ContactStore::new(MemoryStore::new());
        assert!(contacts.load().is_none());

        contacts.apply(SavePreference::opted_in(), &contact());
        assert_eq!(contacts.load().unwrap(), contact());
    }

    #[test]
    fn test_withdrawing_preference_removes_contact() {
        let contacts = ContactStore::new(MemoryStore::new());
        contacts.save(&contact());
        assert!(contacts.load().is_some());

        contacts.apply(SavePreference::default(), &contact());
        assert!(contacts.load().is_none());
    }

    #[test]
    fn test_unreadable_saved_contact_is_none() {
        let contacts = ContactStore::new(MemoryStore::with_value(CONTACT_KEY, "{broken"));
        assert!(contacts.load().is_none());
    }
}
