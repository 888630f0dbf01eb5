use crate::models::Professor;

/// What the caller should do after a debounced value settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDirective {
    /// Issue a directory search and report back with the same version.
    Issue { query: String, version: u64 },
    /// Search is gated on non-empty debounced text; nothing to do.
    Skip,
}

/// Where a pointer-down event landed, from the presentation layer's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the results region; selection handling owns this event.
    InsideResults,
    /// Anywhere else, including the triggering input.
    Outside,
    /// The results region has not mounted yet; a no-op, not a fault.
    NotMounted,
}

/// Autocomplete presentation state machine. Owns open/closed visibility,
/// the candidate list, and selection commitment.
///
/// Stale-response guard: every issued search carries a version; only the
/// response matching the latest issued version may touch `results`, so
/// superseded in-flight responses can never overwrite newer state no
/// matter what order the network delivers them in.
pub struct Autocomplete {
    raw_input: String,
    debounced_input: String,
    is_open: bool,
    is_loading: bool,
    results: Vec<Professor>,
    latest_version: u64,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self {
            raw_input: String::new(),
            debounced_input: String::new(),
            is_open: false,
            is_loading: false,
            results: Vec::new(),
            latest_version: 0,
        }
    }

    /// Record a raw keystroke. The debounced value arrives separately via
    /// `debounce_settled` once the input pauses.
    pub fn input_changed(&mut self, raw: &str) {
        self.raw_input = raw.to_string();
    }

    /// A debounced value settled. Returns whether a search should be
    /// issued; empty text never issues one (and forces no close either).
    pub fn debounce_settled(&mut self, value: &str) -> SearchDirective {
        self.debounced_input = value.to_string();
        if self.debounced_input.is_empty() {
            return SearchDirective::Skip;
        }

        self.latest_version += 1;
        self.is_loading = true;
        SearchDirective::Issue {
            query: self.debounced_input.clone(),
            version: self.latest_version,
        }
    }

    /// A search resolved. Ignored unless it answers the latest issued
    /// version (last-write-wins by input version, not arrival order).
    pub fn search_resolved(&mut self, version: u64, results: Vec<Professor>) {
        if version != self.latest_version {
            tracing::debug!(
                "Discarding stale search response (version {} < {})",
                version,
                self.latest_version
            );
            return;
        }
        self.is_loading = false;
        let has_results = !results.is_empty();
        self.results = results;
        if has_results {
            self.is_open = true;
        }
    }

    /// A search failed. Degrades to an empty candidate list, deliberately
    /// indistinguishable from "no matches" at this layer.
    pub fn search_failed(&mut self, version: u64) {
        if version != self.latest_version {
            return;
        }
        self.is_loading = false;
        self.results.clear();
    }

    /// Pointer-down anywhere on the page. Only a hit outside the results
    /// region closes the list.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside {
            self.is_open = false;
        }
    }

    /// Commit a selection: returns the chosen professor, clears the raw
    /// input, and closes the list.
    pub fn select(&mut self, index: usize) -> Option<Professor> {
        let professor = self.results.get(index).cloned()?;
        self.raw_input.clear();
        self.is_open = false;
        Some(professor)
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn results(&self) -> &[Professor] {
        &self.results
    }
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self::new()
    }
}
