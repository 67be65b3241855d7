//! Autocomplete text field bound to the airport directory
//!
//! Two independent instances exist on the search form (origin and
//! destination); they share the directory but nothing else.

use crate::directory::AirportDirectory;
use crate::model::Airport;
use std::sync::Arc;

/// A text input with a live-filtered suggestion dropdown.
///
/// The dropdown has no open/closed flag of its own: it renders exactly when
/// `suggestions` is non-empty.
#[derive(Debug, Clone)]
pub struct AutocompleteField {
    directory: Arc<AirportDirectory>,
    text: String,
    suggestions: Vec<Airport>,
}

impl AutocompleteField {
    pub fn new(directory: Arc<AirportDirectory>) -> Self {
        Self {
            directory,
            text: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[Airport] {
        &self.suggestions
    }

    pub fn dropdown_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Updates the field text and recomputes the suggestion list
    pub fn on_text_changed(&mut self, new_text: &str) {
        self.text = new_text.to_string();
        self.suggestions = self.directory.filter(new_text);
    }

    /// Commits a suggestion: the field takes the airport's full name and the
    /// dropdown closes
    pub fn pick(&mut self, airport: &Airport) {
        self.text = airport.name.clone();
        self.suggestions.clear();
    }
}
