//! Wire data types shared with the flight search API

use serde::{Deserialize, Serialize};

/// A known airport, loaded once at startup and never mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA-style identifier, unique within the directory
    pub code: String,
    /// Display name shown in the autocomplete dropdown
    pub name: String,
}

impl Airport {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Dropdown row label, e.g. "Los Angeles - LAX"
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.name, self.code)
    }
}

/// A validated search request, ready for the search endpoint.
///
/// Codes are `None` when the entered text did not exactly match any known
/// airport name; the request is still sent and the backend rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
}

/// A single non-stop leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub origin: Airport,
    pub destination: Airport,
    /// Timestamp string, "YYYY-MM-DD HH:MM:SS"
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
}

impl Flight {
    /// Time-of-day component of the departure timestamp
    pub fn departure_clock(&self) -> &str {
        clock_time(&self.departure_time)
    }

    /// Time-of-day component of the arrival timestamp
    pub fn arrival_clock(&self) -> &str {
        clock_time(&self.arrival_time)
    }
}

/// A connecting itinerary of two or more legs.
///
/// Leg chaining (leg i's destination equals leg i+1's origin) is the
/// producing service's invariant and is not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub flights: Vec<Flight>,
    pub total_duration: String,
}

impl Route {
    /// Number of intermediate stops: legs minus one
    pub fn stop_count(&self) -> usize {
        self.flights.len().saturating_sub(1)
    }
}

/// The payload of one completed search, replacing the previous one wholly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResultSet {
    pub direct_flights: Vec<Flight>,
    pub routes_with_stops: Vec<Route>,
}

impl ItineraryResultSet {
    /// True when neither group has anything to show
    pub fn is_empty(&self) -> bool {
        self.direct_flights.is_empty() && self.routes_with_stops.is_empty()
    }
}

/// Extracts the time-of-day field from a "YYYY-MM-DD HH:MM:SS" timestamp.
/// Falls back to the whole string when there is no date prefix.
fn clock_time(timestamp: &str) -> &str {
    timestamp
        .split_whitespace()
        .nth(1)
        .unwrap_or(timestamp)
}
