use crate::search::Suggestion;
use std::time::{Duration, Instant};

/// Autocomplete box state: query editing, suggestion list, request tracking.
///
/// Every request gets a sequence number; only the answer to the newest one
/// is applied, so slow responses to older queries cannot replace fresh ones.
#[derive(Debug, Default)]
pub struct SearchBox {
    pub text: String,
    pub cursor: usize,
    pub suggestions: Vec<Suggestion>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    edited_at: Option<Instant>,
    request_seq: u64,
    pick_seq: u64,
    resolving: Option<u64>,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.touch();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
            self.touch();
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
            self.touch();
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Clear the query and everything derived from it, including a pending
    /// details lookup.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.resolving = None;
        self.dismiss();
    }

    /// Close the dropdown, keeping the query text.
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.selected = 0;
        self.loading = false;
        self.edited_at = None;
        // Invalidate anything in flight.
        self.request_seq += 1;
    }

    fn touch(&mut self) {
        self.edited_at = Some(Instant::now());
        self.error = None;
    }

    /// The query to send once the user stopped typing for `debounce`.
    ///
    /// Short queries close the dropdown without a request. Returns the
    /// request sequence number the response must echo back.
    pub fn take_due_query(
        &mut self,
        now: Instant,
        debounce: Duration,
        min_len: usize,
    ) -> Option<(u64, String)> {
        let edited_at = self.edited_at?;
        if now.duration_since(edited_at) < debounce {
            return None;
        }
        self.edited_at = None;

        let query = self.text.trim().to_string();
        if query.chars().count() < min_len {
            self.dismiss();
            return None;
        }

        self.request_seq += 1;
        self.loading = true;
        Some((self.request_seq, query))
    }

    /// Apply an autocomplete response. Returns false if it was stale.
    pub fn apply_suggestions(&mut self, seq: u64, result: Result<Vec<Suggestion>, String>) -> bool {
        if seq != self.request_seq {
            return false;
        }
        self.loading = false;
        self.selected = 0;
        match result {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                self.error = None;
            }
            Err(e) => {
                self.suggestions.clear();
                self.error = Some(e);
            }
        }
        true
    }

    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1) % self.suggestions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = if self.selected == 0 {
                self.suggestions.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.get(self.selected)
    }

    /// Pick the highlighted suggestion: the query becomes its description
    /// and the dropdown closes. The returned number tags the details lookup.
    pub fn pick(&mut self) -> Option<(u64, Suggestion)> {
        let suggestion = self.selected_suggestion()?.clone();
        self.text = suggestion.description.clone();
        self.cursor = self.text.len();
        self.dismiss();
        self.pick_seq += 1;
        self.resolving = Some(self.pick_seq);
        Some((self.pick_seq, suggestion))
    }

    /// Finish a details lookup. Returns false if a newer pick superseded it.
    pub fn finish_pick(&mut self, pick: u64) -> bool {
        if self.resolving != Some(pick) {
            return false;
        }
        self.resolving = None;
        true
    }

    /// Whether a picked suggestion is still waiting for its coordinates.
    pub fn is_resolving(&self) -> bool {
        self.resolving.is_some()
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn typed(text: &str) -> SearchBox {
        let mut b = SearchBox::new();
        for c in text.chars() {
            b.insert_char(c);
        }
        b
    }

    fn suggestion(id: &str) -> Suggestion {
        Suggestion {
            place_id: id.into(),
            description: format!("Place {}", id),
        }
    }

    #[test]
    fn test_editing_multibyte() {
        let mut b = typed("Zürich");
        b.move_left();
        b.move_left();
        b.move_left();
        b.move_left();
        b.delete_back();
        assert_eq!(b.text, "Zrich");
        b.move_home();
        b.delete_forward();
        assert_eq!(b.text, "rich");
        b.move_end();
        assert_eq!(b.cursor, 4);
    }

    #[test]
    fn test_query_waits_for_debounce() {
        let mut b = typed("cafe");
        let now = Instant::now();
        assert!(b.take_due_query(now, Duration::from_secs(60), 2).is_none());
        let (seq, query) = b.take_due_query(now + Duration::from_secs(61), Duration::from_secs(60), 2).unwrap();
        assert_eq!(seq, 1);
        assert_eq!(query, "cafe");
        assert!(b.loading);
        // Nothing new typed: no second request.
        assert!(b.take_due_query(now + Duration::from_secs(120), DEBOUNCE, 2).is_none());
    }

    #[test]
    fn test_short_query_closes_dropdown() {
        let mut b = typed("ca");
        let (seq, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();
        b.apply_suggestions(seq, Ok(vec![suggestion("a")]));
        assert!(b.is_open());

        b.delete_back();
        assert!(b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).is_none());
        assert!(!b.is_open());
        assert!(!b.loading);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut b = typed("caf");
        let (old, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();
        b.insert_char('e');
        let (new, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();

        assert!(!b.apply_suggestions(old, Ok(vec![suggestion("old")])));
        assert!(b.suggestions.is_empty());
        assert!(b.apply_suggestions(new, Ok(vec![suggestion("new")])));
        assert_eq!(b.suggestions[0].place_id, "new");
        assert!(!b.loading);
    }

    #[test]
    fn test_error_response_is_recorded() {
        let mut b = typed("cafe");
        let (seq, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();
        assert!(b.apply_suggestions(seq, Err("timeout".into())));
        assert_eq!(b.error.as_deref(), Some("timeout"));
        assert!(!b.is_open());
    }

    #[test]
    fn test_selection_wraps() {
        let mut b = typed("cafe");
        let (seq, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();
        b.apply_suggestions(seq, Ok(vec![suggestion("a"), suggestion("b"), suggestion("c")]));
        b.select_prev();
        assert_eq!(b.selected, 2);
        b.select_next();
        assert_eq!(b.selected, 0);
        b.select_next();
        assert_eq!(b.selected_suggestion().unwrap().place_id, "b");
    }

    #[test]
    fn test_pick_fills_query_and_tracks_lookup() {
        let mut b = typed("cafe");
        let (seq, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();
        b.apply_suggestions(seq, Ok(vec![suggestion("a"), suggestion("b")]));
        b.select_next();

        let (first, picked) = b.pick().unwrap();
        assert_eq!(picked.place_id, "b");
        assert_eq!(b.text, "Place b");
        assert!(!b.is_open());

        // A late answer to the pre-pick query must not reopen the dropdown.
        assert!(!b.apply_suggestions(seq, Ok(vec![suggestion("z")])));

        // Filling in the description is not an edit.
        assert!(b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).is_none());

        b.suggestions = vec![suggestion("c")];
        let (second, _) = b.pick().unwrap();
        assert!(!b.finish_pick(first));
        assert!(b.is_resolving());
        assert!(b.finish_pick(second));
        assert!(!b.is_resolving());
    }

    #[test]
    fn test_clear_drops_pending_lookup() {
        let mut b = typed("cafe");
        let (seq, _) = b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();
        b.apply_suggestions(seq, Ok(vec![suggestion("a")]));
        let (pick, _) = b.pick().unwrap();

        b.clear();
        assert!(!b.is_resolving());
        for c in "zur".chars() {
            b.insert_char(c);
        }
        b.take_due_query(Instant::now() + DEBOUNCE, DEBOUNCE, 2).unwrap();

        assert!(!b.finish_pick(pick));
        // The autocomplete request for "zur" is still in flight.
        assert!(b.loading);
    }

    #[test]
    fn test_pick_without_suggestions() {
        let mut b = typed("cafe");
        assert!(b.pick().is_none());
    }
}
