//! # Air Search
//!
//! The search-and-results interaction core of a flight search frontend:
//! airport autocomplete, asynchronous search submission with a pre-search
//! delay, and an explicit state machine plus renderer for the returned
//! itineraries (direct flights and multi-leg routes with stopovers).
//!
//! The airport/flight API is an external collaborator reached over HTTP;
//! everything here degrades gracefully when it misbehaves.

pub mod autocomplete;
pub mod client;
pub mod directory;
pub mod model;
pub mod request;
pub mod session;
pub mod view;

use thiserror::Error;

// Re-export main types for convenience
pub use autocomplete::AutocompleteField;
pub use client::{ApiClient, DEFAULT_API_BASE};
pub use directory::AirportDirectory;
pub use model::{Airport, Flight, ItineraryResultSet, Route, SearchQuery};
pub use request::SearchRequestBuilder;
pub use session::{
    SearchBackend, SearchSession, SearchState, DEFAULT_SEARCH_DELAY, SEARCH_FAILED_MESSAGE,
};
pub use view::{ResultsView, NO_FLIGHTS_MESSAGE};

/// Error types for the search client
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("backend answered with status {0}")]
    BackendStatus(u16),

    #[error("a search is already in flight")]
    SearchInFlight,
}
