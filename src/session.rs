//! Search session: one submission at a time through an explicit state machine
//!
//! `Idle -> Loading -> (Succeeded | Failed)`, re-entrant from either terminal
//! state. Observers are notified on every transition and redraw from the new
//! state; there is no hidden scheduler.

use crate::model::{Airport, ItineraryResultSet, SearchQuery};
use crate::SearchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Fixed user-facing message for any transport or server failure. The
/// underlying error goes to the log only.
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching for flights. Please try again.";

/// Default pre-search delay, long enough for the loading indicator to
/// register regardless of actual network latency
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_secs(2);

/// The seam between the search form and the network
#[async_trait]
pub trait SearchBackend {
    /// One-shot airport list for the directory
    async fn fetch_airports(&self) -> Result<Vec<Airport>, SearchError>;

    /// Itineraries for one validated query
    async fn search(&self, query: &SearchQuery) -> Result<ItineraryResultSet, SearchError>;
}

/// Where a session currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Succeeded(ItineraryResultSet),
    Failed(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

type StateListener = Box<dyn Fn(&SearchState) + Send>;

/// Orchestrates one search at a time against a [`SearchBackend`]
pub struct SearchSession<B> {
    backend: B,
    delay: Duration,
    state: SearchState,
    listeners: Vec<StateListener>,
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_delay(backend, DEFAULT_SEARCH_DELAY)
    }

    /// Session with a custom pre-search delay (a UX smoothing knob, not a
    /// technical necessity)
    pub fn with_delay(backend: B, delay: Duration) -> Self {
        Self {
            backend,
            delay,
            state: SearchState::Idle,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Registers an observer called after every state transition
    pub fn on_state_change(&mut self, listener: impl Fn(&SearchState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn transition(&mut self, next: SearchState) {
        self.state = next;
        for listener in &self.listeners {
            listener(&self.state);
        }
    }

    /// Runs one search to completion.
    ///
    /// Enters `Loading` synchronously, waits the configured delay, then
    /// issues the backend call. A backend failure is a terminal STATE
    /// (`Failed` with [`SEARCH_FAILED_MESSAGE`]), not an `Err`; the only
    /// error this returns is the rejection of a submit while one is already
    /// in flight.
    #[instrument(level = "info", skip(self, query), fields(date = %query.date))]
    pub async fn submit(&mut self, query: SearchQuery) -> Result<&SearchState, SearchError> {
        if self.state.is_loading() {
            debug!("submit rejected, a search is already in flight");
            return Err(SearchError::SearchInFlight);
        }

        self.transition(SearchState::Loading);

        // The delay strictly precedes the network call and is not
        // cancellable.
        tokio::time::sleep(self.delay).await;

        let start = std::time::Instant::now();
        match self.backend.search(&query).await {
            Ok(result) => {
                info!(
                    duration_ms = start.elapsed().as_millis(),
                    direct = result.direct_flights.len(),
                    with_stops = result.routes_with_stops.len(),
                    "search completed"
                );
                self.transition(SearchState::Succeeded(result));
            }
            Err(e) => {
                error!(
                    duration_ms = start.elapsed().as_millis(),
                    error = %e,
                    "search failed"
                );
                self.transition(SearchState::Failed(SEARCH_FAILED_MESSAGE.to_string()));
            }
        }

        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Airport, Flight};
    use std::sync::{Arc, Mutex};

    /// In-memory backend: a canned result or a canned failure
    struct FakeBackend {
        result: Result<ItineraryResultSet, ()>,
    }

    impl FakeBackend {
        fn succeeding(result: ItineraryResultSet) -> Self {
            Self { result: Ok(result) }
        }

        fn failing() -> Self {
            Self { result: Err(()) }
        }
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn fetch_airports(&self) -> Result<Vec<Airport>, SearchError> {
            Ok(Vec::new())
        }

        async fn search(&self, _query: &SearchQuery) -> Result<ItineraryResultSet, SearchError> {
            self.result
                .clone()
                .map_err(|_| SearchError::BackendStatus(500))
        }
    }

    fn query() -> SearchQuery {
        SearchQuery {
            origin_code: Some("JFK".to_string()),
            destination_code: Some("LAX".to_string()),
            date: "2024-11-01".to_string(),
        }
    }

    fn one_direct() -> ItineraryResultSet {
        ItineraryResultSet {
            direct_flights: vec![Flight {
                origin: Airport::new("JFK", "New York JFK"),
                destination: Airport::new("LAX", "Los Angeles"),
                departure_time: "2024-11-01 08:00:00".to_string(),
                arrival_time: "2024-11-01 11:00:00".to_string(),
                duration: "6 horas, 0 minutos".to_string(),
            }],
            routes_with_stops: vec![],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submit_reaches_succeeded() {
        let mut session = SearchSession::new(FakeBackend::succeeding(one_direct()));
        assert_eq!(session.state(), &SearchState::Idle);

        let state = session.submit(query()).await.unwrap();
        assert_eq!(state, &SearchState::Succeeded(one_direct()));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submit_carries_generic_message() {
        let mut session = SearchSession::new(FakeBackend::failing());

        let state = session.submit(query()).await.unwrap();
        assert_eq!(
            state,
            &SearchState::Failed(SEARCH_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn observers_see_loading_then_one_terminal_state() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut session = SearchSession::new(FakeBackend::succeeding(one_direct()));
        session.on_state_change(move |state| {
            let label = match state {
                SearchState::Idle => "idle",
                SearchState::Loading => "loading",
                SearchState::Succeeded(_) => "succeeded",
                SearchState::Failed(_) => "failed",
            };
            sink.lock().unwrap().push(label);
        });

        session.submit(query()).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["loading", "succeeded"]);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_while_loading_is_rejected() {
        let mut session = SearchSession::new(FakeBackend::succeeding(one_direct()));
        session.state = SearchState::Loading;

        let err = session.submit(query()).await.unwrap_err();
        assert!(matches!(err, SearchError::SearchInFlight));
        assert_eq!(session.state(), &SearchState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn session_is_reentrant_after_failure() {
        let mut session = SearchSession::new(FakeBackend::failing());
        session.submit(query()).await.unwrap();
        assert!(matches!(session.state(), SearchState::Failed(_)));

        // A terminal state accepts the next submit.
        let state = session.submit(query()).await.unwrap();
        assert!(matches!(state, SearchState::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_precedes_the_network_call() {
        let start = tokio::time::Instant::now();
        let mut session = SearchSession::with_delay(
            FakeBackend::succeeding(one_direct()),
            Duration::from_secs(2),
        );
        session.submit(query()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
