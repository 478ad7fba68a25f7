use formats::{RegionCollection, RegionFeature, property_str};
use foundation::math::{center_of_mass, multipolygon_area};
use foundation::{FeatureId, LngLat, LngLatBounds, Polygon};

use crate::states::{Coverage, coverage_of_name, state_abbreviation};

/// Property holding the state name on both states and counties.
pub const STATE_NAME_KEY: &str = "ste_name";
/// Property holding the county name on counties.
pub const COUNTY_NAME_KEY: &str = "coty_name";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RegionKind {
    State,
    County,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: FeatureId,
    pub kind: RegionKind,
    pub name: String,
    /// Own name for states, parent state for counties.
    pub state_name: String,
    pub abbreviation: Option<&'static str>,
    pub polygons: Vec<Polygon>,
    pub bounds: Option<LngLatBounds>,
    pub center: Option<LngLat>,
    pub area: f64,
}

impl Region {
    fn from_feature(kind: RegionKind, feature: &RegionFeature) -> Option<Self> {
        let state_name = property_str(&feature.properties, STATE_NAME_KEY)?.trim().to_string();
        let name = match kind {
            RegionKind::State => state_name.clone(),
            RegionKind::County => property_str(&feature.properties, COUNTY_NAME_KEY)?
                .trim()
                .to_string(),
        };
        if name.is_empty() {
            return None;
        }

        let bounds = LngLatBounds::from_points(feature.polygons.iter().flatten().flatten());
        Some(Self {
            id: feature.id,
            kind,
            abbreviation: state_abbreviation(&state_name),
            name,
            state_name,
            center: center_of_mass(&feature.polygons),
            area: multipolygon_area(&feature.polygons),
            bounds,
            polygons: feature.polygons.clone(),
        })
    }

    pub fn coverage(&self) -> Coverage {
        coverage_of_name(&self.state_name)
    }

    /// `"<County>, <State>"` for counties, the plain name for states.
    pub fn display_label(&self) -> String {
        match self.kind {
            RegionKind::State => self.name.clone(),
            RegionKind::County => format!("{}, {}", self.name, self.state_name),
        }
    }
}

/// Static states and counties, plus the normalized source collections handed
/// to the map library.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    states: Vec<Region>,
    counties: Vec<Region>,
    state_source: RegionCollection,
    county_source: RegionCollection,
}

impl RegionCatalog {
    pub fn new(mut states: RegionCollection, mut counties: RegionCollection) -> Self {
        states.normalize_property(STATE_NAME_KEY);
        counties.normalize_property(STATE_NAME_KEY);
        counties.normalize_property(COUNTY_NAME_KEY);

        let state_regions = states
            .features
            .iter()
            .filter_map(|f| Region::from_feature(RegionKind::State, f))
            .collect();
        let county_regions = counties
            .features
            .iter()
            .filter_map(|f| Region::from_feature(RegionKind::County, f))
            .collect();

        Self {
            states: state_regions,
            counties: county_regions,
            state_source: states,
            county_source: counties,
        }
    }

    pub fn states(&self) -> &[Region] {
        &self.states
    }

    pub fn counties(&self) -> &[Region] {
        &self.counties
    }

    pub fn regions(&self, kind: RegionKind) -> &[Region] {
        match kind {
            RegionKind::State => &self.states,
            RegionKind::County => &self.counties,
        }
    }

    pub fn state_source(&self) -> &RegionCollection {
        &self.state_source
    }

    pub fn county_source(&self) -> &RegionCollection {
        &self.county_source
    }

    pub fn region(&self, kind: RegionKind, id: FeatureId) -> Option<&Region> {
        // Regions are stored in feature order with gaps for unnamed features.
        let list = self.regions(kind);
        list.binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|idx| &list[idx])
    }

    /// Exact, case-sensitive state name lookup.
    pub fn state_by_name(&self, name: &str) -> Option<&Region> {
        self.states.iter().find(|r| r.name == name)
    }

    pub fn county_by_name(&self, county: &str, state: &str) -> Option<&Region> {
        self.counties
            .iter()
            .find(|r| r.name == county && r.state_name == state)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{RegionCatalog, RegionKind};
    use crate::states::Coverage;
    use formats::{RegionCollection, property_str};
    use foundation::FeatureId;

    pub(crate) fn bundled_catalog() -> RegionCatalog {
        let states = RegionCollection::from_geojson_str(include_str!(
            "../../../testdata/geojson/states.json"
        ))
        .expect("states");
        let counties = RegionCollection::from_geojson_str(include_str!(
            "../../../testdata/geojson/counties.json"
        ))
        .expect("counties");
        RegionCatalog::new(states, counties)
    }

    #[test]
    fn loads_states_and_counties_with_plain_names() {
        let catalog = bundled_catalog();
        assert_eq!(catalog.states().len(), catalog.state_source().len());
        assert_eq!(catalog.counties().len(), catalog.county_source().len());

        let ca = catalog.state_by_name("California").expect("california");
        assert_eq!(ca.abbreviation, Some("CA"));
        assert_eq!(ca.coverage(), Coverage::Beta);
        assert!(ca.center.is_some());
        assert!(ca.area > 0.0);

        // Sources handed to the map carry unwrapped names.
        for f in &catalog.state_source().features {
            assert!(f.properties["ste_name"].is_string());
        }
        for f in &catalog.county_source().features {
            assert!(f.properties["coty_name"].is_string());
            assert!(property_str(&f.properties, "ste_name").is_some());
        }
    }

    #[test]
    fn state_lookup_is_case_sensitive() {
        let catalog = bundled_catalog();
        assert!(catalog.state_by_name("Texas").is_some());
        assert!(catalog.state_by_name("texas").is_none());
    }

    #[test]
    fn counties_know_their_state() {
        let catalog = bundled_catalog();
        let la = catalog
            .county_by_name("Los Angeles", "California")
            .expect("los angeles");
        assert_eq!(la.kind, RegionKind::County);
        assert_eq!(la.abbreviation, Some("CA"));
        assert_eq!(la.display_label(), "Los Angeles, California");
        assert!(catalog.county_by_name("Los Angeles", "Texas").is_none());
    }

    #[test]
    fn region_by_id_matches_feature_index() {
        let catalog = bundled_catalog();
        for r in catalog.states() {
            let found = catalog.region(RegionKind::State, r.id).expect("by id");
            assert_eq!(found.name, r.name);
        }
        assert!(catalog.region(RegionKind::State, FeatureId::new(10_000)).is_none());
    }
}
