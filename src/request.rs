//! Builds a search query from the form's entered text

use crate::directory::AirportDirectory;
use crate::model::SearchQuery;
use std::sync::Arc;

/// Resolves display names to airport codes and assembles a `SearchQuery`.
///
/// Pure and synchronous. Required-field validation (non-empty origin,
/// destination, date) belongs to the caller; an entered name with no exact
/// directory match simply produces a `None` code, and the backend rejects
/// the request.
#[derive(Debug, Clone)]
pub struct SearchRequestBuilder {
    directory: Arc<AirportDirectory>,
}

impl SearchRequestBuilder {
    pub fn new(directory: Arc<AirportDirectory>) -> Self {
        Self { directory }
    }

    pub fn build(&self, origin_text: &str, destination_text: &str, date: &str) -> SearchQuery {
        SearchQuery {
            origin_code: self
                .directory
                .resolve_code_by_name(origin_text)
                .map(str::to_string),
            destination_code: self
                .directory
                .resolve_code_by_name(destination_text)
                .map(str::to_string),
            date: date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Airport;

    fn builder() -> SearchRequestBuilder {
        let directory = Arc::new(AirportDirectory::new(vec![
            Airport::new("JFK", "New York JFK"),
            Airport::new("LAX", "Los Angeles"),
        ]));
        SearchRequestBuilder::new(directory)
    }

    #[test]
    fn resolves_both_codes() {
        let query = builder().build("New York JFK", "Los Angeles", "2024-11-01");
        assert_eq!(query.origin_code.as_deref(), Some("JFK"));
        assert_eq!(query.destination_code.as_deref(), Some("LAX"));
        assert_eq!(query.date, "2024-11-01");
    }

    #[test]
    fn unmatched_name_leaves_code_unset() {
        let query = builder().build("Narnia", "Los Angeles", "2024-11-01");
        assert_eq!(query.origin_code, None);
        assert_eq!(query.destination_code.as_deref(), Some("LAX"));
    }

    #[test]
    fn resolution_is_case_sensitive() {
        let query = builder().build("new york jfk", "LOS ANGELES", "2024-11-01");
        assert_eq!(query.origin_code, None);
        assert_eq!(query.destination_code, None);
    }
}
