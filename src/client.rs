//! HTTP client for the flight search API

use crate::model::{Airport, ItineraryResultSet, SearchQuery};
use crate::session::SearchBackend;
use crate::SearchError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument};

/// Default base location of the API, matching the local development backend
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Client over the two search endpoints, built once and reused
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
        debug!("Creating new API client");
        let http_client = Client::builder().build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl SearchBackend for ApiClient {
    /// `GET /api/flights/airports/` — the full airport list, fetched once at
    /// startup
    #[instrument(level = "info", skip(self))]
    async fn fetch_airports(&self) -> Result<Vec<Airport>, SearchError> {
        let url = format!("{}/api/flights/airports/", self.base_url);
        info!(url = %url, "Fetching airport list");

        let start_time = std::time::Instant::now();
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        info!(
            status = %status,
            duration_ms = start_time.elapsed().as_millis(),
            "Airport list request completed"
        );

        if !status.is_success() {
            error!(status = %status, "Airport list request failed");
            return Err(SearchError::BackendStatus(status.as_u16()));
        }

        let airports: Vec<Airport> = response.json().await?;
        debug!(count = airports.len(), "Airport list parsed");
        Ok(airports)
    }

    /// `GET /api/flights/search/?origin=..&destination=..&date=..`
    ///
    /// An unresolved origin or destination code is omitted from the query
    /// string; the backend rejects such a request with a 400.
    #[instrument(level = "info", skip(self, query), fields(date = %query.date))]
    async fn search(&self, query: &SearchQuery) -> Result<ItineraryResultSet, SearchError> {
        let url = format!("{}/api/flights/search/", self.base_url);
        let params = search_params(query);

        info!(url = %url, "Making flight search request");

        let start_time = std::time::Instant::now();
        let response = self.http_client.get(&url).query(&params).send().await?;
        let status = response.status();
        info!(
            status = %status,
            duration_ms = start_time.elapsed().as_millis(),
            "Flight search request completed"
        );

        if !status.is_success() {
            error!(status = %status, "Flight search request failed");
            return Err(SearchError::BackendStatus(status.as_u16()));
        }

        let result: ItineraryResultSet = response.json().await?;
        debug!(
            direct = result.direct_flights.len(),
            with_stops = result.routes_with_stops.len(),
            "Flight search response parsed"
        );
        Ok(result)
    }
}

/// Query-string pairs for the search endpoint. A `None` code contributes no
/// pair at all, mirroring the frontend's omitted `undefined` params; the date
/// is always sent.
fn search_params(query: &SearchQuery) -> Vec<(&str, &str)> {
    let mut params: Vec<(&str, &str)> = Vec::with_capacity(3);
    if let Some(code) = query.origin_code.as_deref() {
        params.push(("origin", code));
    }
    if let Some(code) = query.destination_code.as_deref() {
        params.push(("destination", code));
    }
    params.push(("date", &query.date));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_client_creation() {
        let client = ApiClient::new(DEFAULT_API_BASE);
        assert!(client.is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = ApiClient::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn search_params_include_resolved_codes_and_date() {
        let query = SearchQuery {
            origin_code: Some("JFK".to_string()),
            destination_code: Some("LAX".to_string()),
            date: "2024-11-01".to_string(),
        };
        assert_eq!(
            search_params(&query),
            vec![
                ("origin", "JFK"),
                ("destination", "LAX"),
                ("date", "2024-11-01"),
            ]
        );
    }

    #[test]
    fn search_params_omit_unresolved_codes() {
        let query = SearchQuery {
            origin_code: None,
            destination_code: None,
            date: "2024-11-01".to_string(),
        };
        assert_eq!(search_params(&query), vec![("date", "2024-11-01")]);

        let query = SearchQuery {
            origin_code: None,
            destination_code: Some("LAX".to_string()),
            date: "2024-11-01".to_string(),
        };
        let params = search_params(&query);
        assert!(!params.iter().any(|(key, _)| *key == "origin"));
        assert_eq!(
            params,
            vec![("destination", "LAX"), ("date", "2024-11-01")]
        );
    }
}
