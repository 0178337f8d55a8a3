//! Postal lookup service client.
//!
//! Resolves a six-digit PIN code to its district and state via the public
//! postal API (`GET {base}/pincode/{code}`). Postcode data is effectively
//! static, so positive results are cached with `moka`.

use std::time::Duration;

use attar_core::Postcode;
use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::address::{Locality, LookupError, PostcodeResolver};
use crate::config::CheckoutConfig;

/// Cache TTL for resolved localities.
const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// REST client for the postal lookup service.
#[derive(Debug, Clone)]
pub struct PincodeClient {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Locality>,
}

impl PincodeClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &CheckoutConfig) -> Self {
        Self::with_base_url(config.postal_lookup_url.clone())
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            cache,
        }
    }

    async fn fetch(&self, postcode: &Postcode) -> Result<Locality, LookupError> {
        let url = format!("{}/pincode/{postcode}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // The service answers with a one-element array wrapping the result.
        let envelopes: Vec<LookupEnvelope> = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        let envelope = envelopes.into_iter().next().ok_or(LookupError::NotFound)?;

        if envelope.status != "Success" {
            return Err(LookupError::NotFound);
        }

        envelope
            .post_office
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|office| Locality {
                city: office.district,
                state: office.state,
            })
            .ok_or(LookupError::NotFound)
    }
}

impl PostcodeResolver for PincodeClient {
    #[instrument(skip(self), fields(postcode = %postcode))]
    async fn lookup(&self, postcode: &Postcode) -> Result<Locality, LookupError> {
        if let Some(locality) = self.cache.get(postcode.as_str()).await {
            debug!("cache hit for postcode");
            return Ok(locality);
        }

        let locality = self.fetch(postcode).await?;

        self.cache
            .insert(postcode.as_str().to_owned(), locality.clone())
            .await;

        Ok(locality)
    }
}

/// Top-level element of the lookup response.
#[derive(Debug, Deserialize)]
struct LookupEnvelope {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice")]
    post_office: Option<Vec<PostOfficeRecord>>,
}

/// A post office entry in a positive lookup response.
#[derive(Debug, Deserialize)]
struct PostOfficeRecord {
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
}
