//! Offline helpers behind the `atlas-map` binary: inspect the layer stack a
//! boundary dataset produces, classify states by incentive count, and try
//! search queries without a browser. `import` turns Census boundary files
//! into the GeoJSON the map loads.

pub mod import;

use std::fs;
use std::path::Path;

use formats::RegionCollection;
use futures_util::future::join_all;
use incentives::IncentiveSource;
use layers::{CountClassifier, CoverageClasses, IncentiveTier, LayerPlan, PlanInputs, ViewMode};
use regions::search::{MAX_SUGGESTIONS, resolve, suggestions};
use regions::{RegionCatalog, SelectedRegion};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub fn load_collection(path: &Path) -> Result<RegionCollection, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    RegionCollection::from_geojson_str(&text).map_err(|e| format!("parse {path:?}: {e}"))
}

pub fn load_catalog(states: &Path, counties: &Path) -> Result<RegionCatalog, String> {
    let catalog = RegionCatalog::new(load_collection(states)?, load_collection(counties)?);
    debug!(
        states = catalog.states().len(),
        counties = catalog.counties().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// MapLibre style JSON for every layer in the plan, in draw order.
pub fn layer_report(
    selection: Option<&SelectedRegion>,
    view_mode: ViewMode,
    zoom: f64,
    counts: &CountClassifier,
) -> Vec<Value> {
    let coverage = CoverageClasses::new();
    let plan = LayerPlan::build(&PlanInputs {
        selection,
        view_mode,
        zoom,
        coverage: &coverage,
        counts,
    });
    plan.layers
        .iter()
        .map(|l| l.id.spec().to_style(l.visible, l.filter.as_ref()))
        .collect()
}

/// Fetches every state concurrently and records the incentive counts.
pub async fn fetch_counts<S: IncentiveSource>(source: &S, states: &[&str]) -> CountClassifier {
    let mut counts = CountClassifier::new();
    let wanted = counts.request(states.iter().copied());

    let results = join_all(wanted.iter().map(|abbr| async move {
        (abbr.as_str(), source.incentives_for_state(abbr).await)
    }))
    .await;

    for (abbr, result) in results {
        match result {
            Ok(resp) => {
                counts.record_count(abbr, resp.count());
            }
            Err(err) => {
                warn!("count for {abbr} failed: {err}");
                counts.record_failure(abbr);
            }
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierRow {
    pub tier: &'static str,
    pub states: Vec<&'static str>,
}

fn tier_name(tier: IncentiveTier) -> &'static str {
    match tier {
        IncentiveTier::Low => "low (1-10)",
        IncentiveTier::Medium => "medium (11-20)",
        IncentiveTier::High => "high (21+)",
    }
}

pub fn tier_rows(counts: &CountClassifier) -> Vec<TierRow> {
    IncentiveTier::ALL
        .iter()
        .map(|&tier| TierRow {
            tier: tier_name(tier),
            states: counts.names_in_tier(tier),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub matched: Option<String>,
    pub suggestions: Vec<String>,
}

pub fn search_report(catalog: &RegionCatalog, query: &str) -> SearchReport {
    SearchReport {
        query: query.to_string(),
        matched: resolve(catalog, query).map(|r| r.display_label()),
        suggestions: suggestions(catalog, query, MAX_SUGGESTIONS)
            .into_iter()
            .map(|s| s.label)
            .collect(),
    }
}
