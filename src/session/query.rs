//! Debounced query control with stale-response suppression
//!
//! The controller owns the raw query text and decides when a search is
//! actually issued: every keystroke re-arms a quiet-period window, and only
//! when the window elapses untouched does `poll_due` hand out a request.
//! Requests carry a monotonically increasing sequence number; a response is
//! applied only if it answers the latest issued request, so out-of-order
//! network replies can never overwrite newer results.
//!
//! Time is passed in explicitly as `Instant` values, which keeps debounce
//! behavior testable without sleeping. The event loop calls `poll_due` on
//! every tick.

use crate::catalog::CatalogEntry;
use crate::remote;
use crate::search::matcher;
use std::time::{Duration, Instant};

/// Effect of a query edit, beyond updating the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEvent {
    /// Query became empty: results must be cleared now, nothing will fire
    Cleared,
    /// Debounce window armed; a search fires if the window elapses quietly
    Pending,
}

/// One search the controller decided to issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence number identifying this request round
    pub seq: u64,
    /// Query text captured when the window elapsed
    pub query: String,
}

/// What a completed search means for the result set
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Response superseded by a newer request or an intervening clear
    Stale,
    /// Fresh results, already narrowed to the subsequence contract
    Results(Vec<CatalogEntry>),
    /// The search failed; results must be emptied and the message surfaced
    Failed(String),
}

/// Owns the query text, the debounce window, and request sequencing
#[derive(Debug)]
pub struct QueryController {
    query: String,
    debounce: Duration,
    dirty_since: Option<Instant>,
    next_seq: u64,
    outstanding: Option<SearchRequest>,
}

impl QueryController {
    /// Create a controller with the given quiet-period window
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            debounce,
            dirty_since: None,
            next_seq: 1,
            outstanding: None,
        }
    }

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a request has been issued and not yet answered
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Whether a debounce window is armed and waiting to elapse
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Record a query edit at time `now`
    ///
    /// A trimmed-empty query short-circuits: no request will fire, any
    /// in-flight response is invalidated, and the caller must clear its
    /// results immediately. Otherwise the debounce window is (re)armed,
    /// implicitly cancelling a pending fire.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) -> QueryEvent {
        self.query = text.into();

        if self.query.trim().is_empty() {
            self.dirty_since = None;
            self.outstanding = None;
            return QueryEvent::Cleared;
        }

        self.dirty_since = Some(now);
        QueryEvent::Pending
    }

    /// Hand out the next search request if the quiet period has elapsed
    ///
    /// Returns at most one request per armed window; issuing supersedes any
    /// previously outstanding request.
    pub fn poll_due(&mut self, now: Instant) -> Option<SearchRequest> {
        let armed_at = self.dirty_since?;
        if now.duration_since(armed_at) < self.debounce {
            return None;
        }

        self.dirty_since = None;
        let request = SearchRequest {
            seq: self.next_seq,
            query: self.query.clone(),
        };
        self.next_seq += 1;
        self.outstanding = Some(request.clone());
        Some(request)
    }

    /// Reconcile a search response with the request sequencing
    ///
    /// Only the latest issued request is accepted; anything else is stale
    /// and must be dropped on the floor. Accepted results are narrowed to
    /// entries whose title contains the issued query as a subsequence, since
    /// the store's own title search is treated as a candidate generator.
    pub fn apply_response(
        &mut self,
        seq: u64,
        outcome: remote::Result<Vec<CatalogEntry>>,
    ) -> SearchOutcome {
        let latest = match &self.outstanding {
            Some(request) if request.seq == seq => self.outstanding.take(),
            _ => return SearchOutcome::Stale,
        };

        match outcome {
            Ok(mut entries) => {
                if let Some(request) = latest {
                    entries.retain(|e| matcher::matches(&e.title, &request.query));
                }
                SearchOutcome::Results(entries)
            }
            Err(e) => SearchOutcome::Failed(e.to_string()),
        }
    }
}
