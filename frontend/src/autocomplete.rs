//! Per-field address suggestion state.
//!
//! Every keystroke issues a fresh [`SuggestionTicket`]; results carrying an
//! older ticket are ignored, so a slow response never overwrites a newer one.

use shared::LocationSuggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Autocomplete {
    ticket: u64,
    suggestions: Vec<LocationSuggestion>,
    found: Option<String>,
}

impl Autocomplete {
    /// Records an edit. Returns the query to look up once the debounce
    /// period passes, or `None` when it is shorter than `min_len` characters.
    pub fn input(&mut self, text: &str, min_len: usize) -> Option<(SuggestionTicket, String)> {
        self.ticket += 1;
        self.suggestions.clear();
        self.found = None;

        let query = text.trim();
        (query.chars().count() >= min_len)
            .then(|| (SuggestionTicket(self.ticket), query.to_string()))
    }

    pub fn is_current(&self, ticket: SuggestionTicket) -> bool {
        ticket.0 == self.ticket
    }

    /// Stores results for `ticket`; returns `false` when they are outdated.
    pub fn accept(&mut self, ticket: SuggestionTicket, suggestions: Vec<LocationSuggestion>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.suggestions = suggestions;
        true
    }

    /// Chooses a suggestion, closing the dropdown.
    pub fn pick(&mut self, index: usize) -> Option<String> {
        let chosen = self.suggestions.get(index)?.display_name.clone();
        self.suggestions.clear();
        self.ticket += 1;
        self.found = Some(chosen.clone());
        Some(chosen)
    }

    /// Closes the dropdown. A lookup still in flight is ignored when it lands.
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.ticket += 1;
    }

    pub fn suggestions(&self) -> &[LocationSuggestion] {
        &self.suggestions
    }

    pub fn set_found(&mut self, display_name: String) {
        self.found = Some(display_name);
    }

    /// Resolved name of the current text, from geocoding or a picked suggestion.
    pub fn found(&self) -> Option<&str> {
        self.found.as_deref()
    }
}
