//! Postcode to locality resolution.
//!
//! The checkout form does not ask for city and state as free text: once the
//! postcode field holds a complete six-digit code, the lookup adapter
//! resolves it and overwrites both fields. The shopper can keep typing; a
//! lookup result that has been superseded by a newer postcode entry is
//! discarded, never applied.

use std::sync::atomic::{AtomicU64, Ordering};

use attar_core::Postcode;
use thiserror::Error;

/// City and state resolved from a postcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub city: String,
    pub state: String,
}

/// Errors from the postal lookup service.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service has no record for this postcode.
    #[error("no locality found for postcode")]
    NotFound,

    /// The service returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Seam over the postal lookup service.
pub trait PostcodeResolver {
    /// Resolve a postcode to its locality.
    fn lookup(
        &self,
        postcode: &Postcode,
    ) -> impl Future<Output = Result<Locality, LookupError>>;
}

/// A pending lookup, tied to the generation counter at the time it began.
#[derive(Debug)]
pub struct LookupTicket {
    postcode: Postcode,
    generation: u64,
}

impl LookupTicket {
    /// The postcode this lookup is for.
    #[must_use]
    pub const fn postcode(&self) -> &Postcode {
        &self.postcode
    }
}

/// Outcome of a completed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Positive match: apply the locality to the form's city/state fields.
    Resolved(Locality),
    /// A newer lookup started while this one was in flight; the result
    /// must not be applied.
    Superseded,
    /// The service has no record for this postcode. City/state are left
    /// unchanged; the form remains usable.
    NotFound,
    /// Transient failure. City/state are left unchanged.
    Failed(String),
}

/// Address lookup adapter with stale-result discarding.
///
/// Each call to [`AddressLookup::begin`] bumps a generation counter and
/// tags the returned ticket with it. When the resolver answers,
/// [`AddressLookup::run`] compares the ticket's generation against the
/// current one and reports [`LookupOutcome::Superseded`] for anything but
/// the most recent ticket. This is the only cancellation semantic the
/// subsystem needs.
#[derive(Debug)]
pub struct AddressLookup<R: PostcodeResolver> {
    resolver: R,
    generation: AtomicU64,
}

impl<R: PostcodeResolver> AddressLookup<R> {
    /// Create an adapter over the given resolver.
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
            generation: AtomicU64::new(0),
        }
    }

    /// Begin a lookup for the raw postcode input.
    ///
    /// Returns `None` unless the input is exactly six digits; partial
    /// entries never trigger a call, which debounces keystroke-by-keystroke
    /// invocation by construction.
    pub fn begin(&self, raw: &str) -> Option<LookupTicket> {
        let postcode = Postcode::parse(raw).ok()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Some(LookupTicket {
            postcode,
            generation,
        })
    }

    /// Run a lookup to completion.
    ///
    /// The staleness check happens after the resolver answers, so a result
    /// that raced with a newer entry is reported as superseded even though
    /// the network call completed.
    pub async fn run(&self, ticket: &LookupTicket) -> LookupOutcome {
        let result = self.resolver.lookup(&ticket.postcode).await;

        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            return LookupOutcome::Superseded;
        }

        match result {
            Ok(locality) => LookupOutcome::Resolved(locality),
            Err(LookupError::NotFound) => LookupOutcome::NotFound,
            Err(e) => {
                tracing::warn!("postal lookup failed: {e}");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }
}
