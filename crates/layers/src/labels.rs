use foundation::LngLat;
use formats::named_points_to_geojson;
use regions::{Region, RegionCatalog};
use serde_json::Value;

use crate::layer::{LayerId, LayerKind, LayerSpec, SourceId};
use crate::symbology::{LABEL_TEXT, TextStyle};
use crate::vector::COUNTY_ZOOM;

const STATE_TEXT: TextStyle = TextStyle {
    size: 10.0,
    color: LABEL_TEXT,
};
const COUNTY_TEXT: TextStyle = TextStyle {
    size: 9.0,
    color: LABEL_TEXT,
};

/// Hand-tuned nudges (lng, lat) for states whose center of mass reads badly.
const STATE_LABEL_OFFSETS: [(&str, f64, f64); 4] = [
    ("Alaska", 1.0, 1.0),
    ("Louisiana", 0.0, -0.5),
    ("Florida", 1.0, 0.0),
    ("Michigan", 1.0, -1.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPoint {
    pub text: String,
    pub position: LngLat,
}

pub fn state_label_offset(name: &str) -> (f64, f64) {
    STATE_LABEL_OFFSETS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, dx, dy)| (*dx, *dy))
        .unwrap_or((0.0, 0.0))
}

fn label_at(region: &Region, (dx, dy): (f64, f64)) -> Option<LabelPoint> {
    let center = region.center?;
    Some(LabelPoint {
        text: region.name.clone(),
        position: center.offset(dx, dy),
    })
}

/// One label per state with geometry, at its center of mass plus any offset.
pub fn state_labels(catalog: &RegionCatalog) -> Vec<LabelPoint> {
    catalog
        .states()
        .iter()
        .filter_map(|r| label_at(r, state_label_offset(&r.name)))
        .collect()
}

pub fn county_labels(catalog: &RegionCatalog) -> Vec<LabelPoint> {
    catalog
        .counties()
        .iter()
        .filter_map(|r| label_at(r, (0.0, 0.0)))
        .collect()
}

/// Point FeatureCollection for a label source.
pub fn labels_to_geojson(labels: &[LabelPoint]) -> Value {
    named_points_to_geojson(labels.iter().map(|l| (l.text.as_str(), l.position)))
}

pub(crate) fn label_layer(id: LayerId) -> LayerSpec {
    match id {
        LayerId::CountyLabels => {
            LayerSpec::new(id, LayerKind::Symbol, SourceId::CountyLabels, COUNTY_TEXT.paint())
                .with_layout(COUNTY_TEXT.layout())
                .with_minzoom(COUNTY_ZOOM)
        }
        _ => LayerSpec::new(id, LayerKind::Symbol, SourceId::StateLabels, STATE_TEXT.paint())
            .with_layout(STATE_TEXT.layout())
            .with_maxzoom(COUNTY_ZOOM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::RegionCollection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog() -> RegionCatalog {
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
    fn offsets_apply_to_named_states_only() {
        let catalog = catalog();
        let labels = state_labels(&catalog);
        assert_eq!(labels.len(), catalog.states().len());

        for label in &labels {
            let region = catalog.state_by_name(&label.text).expect("region");
            let center = region.center.expect("center");
            let (dx, dy) = state_label_offset(&label.text);
            assert!((label.position.lng - (center.lng + dx)).abs() < 1e-9);
            assert!((label.position.lat - (center.lat + dy)).abs() < 1e-9);
        }
        assert_eq!(state_label_offset("Louisiana"), (0.0, -0.5));
        assert_eq!(state_label_offset("Texas"), (0.0, 0.0));
    }

    #[test]
    fn county_labels_use_plain_names() {
        let catalog = catalog();
        let labels = county_labels(&catalog);
        let names: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert!(names.contains(&"Denver"));
        let geo = labels_to_geojson(&labels);
        assert_eq!(geo["features"].as_array().map(Vec::len), Some(labels.len()));
        assert_eq!(geo["features"][0]["geometry"]["type"], json!("Point"));
    }

    #[test]
    fn label_layers_split_at_county_zoom() {
        let states = LayerId::StateLabels.spec();
        assert_eq!(states.layout["text-size"], json!(10.0));
        assert_eq!(states.maxzoom, Some(COUNTY_ZOOM));
        let counties = LayerId::CountyLabels.spec();
        assert_eq!(counties.layout["text-size"], json!(9.0));
        assert_eq!(counties.minzoom, Some(COUNTY_ZOOM));
        assert_eq!(counties.source.as_str(), "county-labels-layer");
    }
}
