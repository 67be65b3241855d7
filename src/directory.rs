//! Airport directory: the initialize-once repository behind autocomplete
//!
//! The airport list is fetched a single time at startup and owned by this
//! object for the rest of the process; form components borrow it instead of
//! re-fetching on every keystroke.

use crate::model::Airport;
use crate::session::SearchBackend;
use tracing::{debug, warn};

/// Loaded airport list with lookup by display name or code
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: Vec<Airport>,
}

impl AirportDirectory {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    /// Fetches the airport list once from the backend.
    ///
    /// A fetch failure is logged and swallowed: the directory comes back
    /// empty and autocomplete degrades to "no suggestions ever". The rest of
    /// the form stays usable.
    pub async fn load<B: SearchBackend>(backend: &B) -> Self {
        match backend.fetch_airports().await {
            Ok(airports) => {
                debug!(count = airports.len(), "airport directory loaded");
                Self::new(airports)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch airports, autocomplete disabled");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Airports whose name or code contains `query` case-insensitively.
    ///
    /// An empty query yields an empty list, not the full directory: no
    /// dropdown is shown until the user types.
    pub fn filter(&self, query: &str) -> Vec<Airport> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.airports
            .iter()
            .filter(|airport| {
                airport.name.to_lowercase().contains(&needle)
                    || airport.code.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Exact, case-sensitive match on the display name
    pub fn resolve_code_by_name(&self, name: &str) -> Option<&str> {
        self.airports
            .iter()
            .find(|airport| airport.name == name)
            .map(|airport| airport.code.as_str())
    }
}
