use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::filter::Filter;
use crate::{labels, vector};

/// Every layer the map ever carries, in draw order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    States,
    StatesCoverage,
    StatesBeta,
    IncentivesLow,
    IncentivesMedium,
    IncentivesHigh,
    StatesNoCoverage,
    Counties,
    SelectedState,
    SelectedCounty,
    StateLabels,
    CountyLabels,
}

impl LayerId {
    pub const DRAW_ORDER: [LayerId; 12] = [
        LayerId::States,
        LayerId::StatesCoverage,
        LayerId::StatesBeta,
        LayerId::IncentivesLow,
        LayerId::IncentivesMedium,
        LayerId::IncentivesHigh,
        LayerId::StatesNoCoverage,
        LayerId::Counties,
        LayerId::SelectedState,
        LayerId::SelectedCounty,
        LayerId::StateLabels,
        LayerId::CountyLabels,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayerId::States => "states-layer",
            LayerId::StatesCoverage => "states-coverage-layer",
            LayerId::StatesBeta => "states-beta-layer",
            LayerId::IncentivesLow => "states-incentives-low-layer",
            LayerId::IncentivesMedium => "states-incentives-medium-layer",
            LayerId::IncentivesHigh => "states-incentives-high-layer",
            LayerId::StatesNoCoverage => "states-no-coverage-layer",
            LayerId::Counties => "counties-layer",
            LayerId::SelectedState => "selected-state-highlight",
            LayerId::SelectedCounty => "selected-county-highlight",
            LayerId::StateLabels => "dynamic-labels-layer",
            LayerId::CountyLabels => "county-labels-layer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::DRAW_ORDER.into_iter().find(|id| id.as_str() == s)
    }

    pub fn spec(self) -> LayerSpec {
        match self {
            LayerId::StateLabels | LayerId::CountyLabels => labels::label_layer(self),
            _ => vector::region_layer(self),
        }
    }
}

impl Serialize for LayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// GeoJSON sources registered with the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    States,
    Counties,
    StateLabels,
    CountyLabels,
}

impl SourceId {
    pub const ALL: [SourceId; 4] = [
        SourceId::States,
        SourceId::Counties,
        SourceId::StateLabels,
        SourceId::CountyLabels,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceId::States => "statesData",
            SourceId::Counties => "countiesData",
            SourceId::StateLabels => "dynamic-labels-layer",
            SourceId::CountyLabels => "county-labels-layer",
        }
    }

    /// Region sources get ids from feature order so hover state can key on them.
    pub fn generate_id(self) -> bool {
        matches!(self, SourceId::States | SourceId::Counties)
    }
}

impl Serialize for SourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Fill,
    Line,
    Symbol,
}

impl LayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Fill => "fill",
            LayerKind::Line => "line",
            LayerKind::Symbol => "symbol",
        }
    }
}

/// Static part of a layer: everything except visibility and filter.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: LayerId,
    pub kind: LayerKind,
    pub source: SourceId,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub paint: Value,
    pub layout: Map<String, Value>,
}

impl LayerSpec {
    pub fn new(id: LayerId, kind: LayerKind, source: SourceId, paint: Value) -> Self {
        Self {
            id,
            kind,
            source,
            minzoom: None,
            maxzoom: None,
            paint,
            layout: Map::new(),
        }
    }

    pub fn with_minzoom(mut self, zoom: f64) -> Self {
        self.minzoom = Some(zoom);
        self
    }

    pub fn with_maxzoom(mut self, zoom: f64) -> Self {
        self.maxzoom = Some(zoom);
        self
    }

    pub fn with_layout(mut self, layout: Map<String, Value>) -> Self {
        self.layout = layout;
        self
    }

    /// Zoom gating as the map applies it: `minzoom <= zoom < maxzoom`.
    pub fn in_zoom_range(&self, zoom: f64) -> bool {
        self.minzoom.is_none_or(|min| zoom >= min) && self.maxzoom.is_none_or(|max| zoom < max)
    }

    /// Style-spec layer object for `map.addLayer`.
    pub fn to_style(&self, visible: bool, filter: Option<&Filter>) -> Value {
        let mut layout = self.layout.clone();
        layout.insert("visibility".to_string(), json!(visibility(visible)));

        let mut out = Map::new();
        out.insert("id".to_string(), json!(self.id.as_str()));
        out.insert("type".to_string(), json!(self.kind.as_str()));
        out.insert("source".to_string(), json!(self.source.as_str()));
        if let Some(min) = self.minzoom {
            out.insert("minzoom".to_string(), json!(min));
        }
        if let Some(max) = self.maxzoom {
            out.insert("maxzoom".to_string(), json!(max));
        }
        if let Some(filter) = filter {
            out.insert("filter".to_string(), filter.to_value());
        }
        out.insert("paint".to_string(), self.paint.clone());
        out.insert("layout".to_string(), Value::Object(layout));
        Value::Object(out)
    }
}

pub fn visibility(visible: bool) -> &'static str {
    if visible { "visible" } else { "none" }
}
