//! Renders a completed search: direct flights first, then routes with stops
//!
//! Pure string rendering over the result set; the only mutable piece is
//! which route (if any) has its stop details expanded.

use crate::model::ItineraryResultSet;

/// Shown when both result groups are empty
pub const NO_FLIGHTS_MESSAGE: &str = "No hay vuelos disponibles";

/// Presentation state for one `Succeeded` result set.
///
/// Hovering the stop-count line of a route card expands a transient detail
/// panel for that route; leaving collapses it. At most one route is expanded
/// at a time, tracked by index.
#[derive(Debug, Clone)]
pub struct ResultsView {
    result: ItineraryResultSet,
    origin_text: String,
    destination_text: String,
    expanded: Option<usize>,
}

impl ResultsView {
    pub fn new(
        result: ItineraryResultSet,
        origin_text: impl Into<String>,
        destination_text: impl Into<String>,
    ) -> Self {
        Self {
            result,
            origin_text: origin_text.into(),
            destination_text: destination_text.into(),
            expanded: None,
        }
    }

    pub fn result(&self) -> &ItineraryResultSet {
        &self.result
    }

    pub fn expanded_route(&self) -> Option<usize> {
        self.expanded
    }

    /// Hover (or focus) over a route card's stop-count element. Indexes
    /// outside the route list are ignored.
    pub fn hover_route(&mut self, index: usize) {
        if index < self.result.routes_with_stops.len() {
            self.expanded = Some(index);
        }
    }

    /// Leaving the hover region hides the detail panel again
    pub fn leave_route(&mut self) {
        self.expanded = None;
    }

    /// Stop-count label for a route, pluralized past one stop
    pub fn stop_label(stops: usize) -> String {
        if stops > 1 {
            format!("{} Escalas", stops)
        } else {
            format!("{} Escala", stops)
        }
    }

    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }

    /// The rendered card groups, line by line, direct flights first
    pub fn render_lines(&self) -> Vec<String> {
        if self.result.is_empty() {
            return vec![NO_FLIGHTS_MESSAGE.to_string()];
        }

        let mut lines = vec![format!(
            "Vuelos desde {} hacia {}",
            self.origin_text, self.destination_text
        )];

        for flight in &self.result.direct_flights {
            lines.push(format!(
                "{} {}  ->  {} {}",
                flight.departure_clock(),
                flight.origin.code,
                flight.arrival_clock(),
                flight.destination.code,
            ));
            lines.push(format!("  Directo  {}", flight.duration));
        }

        for (index, route) in self.result.routes_with_stops.iter().enumerate() {
            // Leg chaining is the server's invariant; a route with fewer
            // than two legs is skipped rather than rendered half-empty.
            if route.flights.len() < 2 {
                continue;
            }
            let first = &route.flights[0];
            let last = &route.flights[route.flights.len() - 1];

            lines.push(format!(
                "{} {}  ->  {} {}",
                first.departure_clock(),
                first.origin.code,
                last.arrival_clock(),
                last.destination.code,
            ));
            lines.push(format!(
                "  {}  {}",
                Self::stop_label(route.stop_count()),
                route.total_duration
            ));

            if self.expanded == Some(index) {
                lines.push("  Detalles del vuelo".to_string());
                for leg in &route.flights {
                    lines.push(format!(
                        "    {} {}  ->  {} {}",
                        leg.departure_clock(),
                        leg.origin.code,
                        leg.arrival_clock(),
                        leg.destination.code,
                    ));
                }
                lines.push(format!("    {}", route.total_duration));
            }
        }

        lines
    }
}
