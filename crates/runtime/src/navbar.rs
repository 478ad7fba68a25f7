use regions::search::{suggestions, Suggestion, MAX_SUGGESTIONS};
use regions::RegionCatalog;

/// Search box text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navbar {
    query: String,
}

impl Navbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// The submit button is live only for non-blank input.
    pub fn submit_enabled(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn suggestions(&self, catalog: &RegionCatalog) -> Vec<Suggestion> {
        suggestions(catalog, &self.query, MAX_SUGGESTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_needs_non_blank_text() {
        let mut nav = Navbar::new();
        assert!(!nav.submit_enabled());
        nav.set_query("   ");
        assert!(!nav.submit_enabled());
        nav.set_query(" Texas ");
        assert!(nav.submit_enabled());
        nav.clear();
        assert_eq!(nav.query(), "");
    }
}
