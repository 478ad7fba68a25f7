use foundation::FeatureId;

use crate::catalog::{Region, RegionCatalog, RegionKind};

pub const MAX_SUGGESTIONS: usize = 8;

/// Resolve a free-text query to a single region.
///
/// Matching is exact and case-sensitive after trimming surrounding
/// whitespace. A state name selects the state; `"<County>, <State>"` selects
/// a county.
pub fn resolve<'a>(catalog: &'a RegionCatalog, query: &str) -> Option<&'a Region> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }
    if let Some(state) = catalog.state_by_name(q) {
        return Some(state);
    }
    let (county, state) = q.rsplit_once(", ")?;
    catalog.county_by_name(county.trim(), state.trim())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub kind: RegionKind,
    pub id: FeatureId,
}

/// Autocomplete: case-insensitive prefix match, states before counties, each
/// in catalog order.
pub fn suggestions(catalog: &RegionCatalog, query: &str, limit: usize) -> Vec<Suggestion> {
    let q = query.trim().to_lowercase();
    if q.is_empty() || limit == 0 {
        return Vec::new();
    }

    catalog
        .states()
        .iter()
        .chain(catalog.counties())
        .map(|r| (r, r.display_label()))
        .filter(|(_, label)| label.to_lowercase().starts_with(&q))
        .take(limit)
        .map(|(r, label)| Suggestion {
            label,
            kind: r.kind,
            id: r.id,
        })
        .collect()
}
