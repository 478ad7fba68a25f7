//! Fill and outline layers drawn from the state and county sources.

use crate::layer::{LayerId, LayerKind, LayerSpec, SourceId};
use crate::symbology::{
    BASE_FILL, FillStyle, GREY, HIGHLIGHT, LineStyle, PURPLE, TEAL, YELLOW,
};

/// Zoom where states hand over to counties.
pub const COUNTY_ZOOM: f64 = 6.0;

pub fn fill_style(id: LayerId) -> Option<FillStyle> {
    let style = match id {
        LayerId::States => FillStyle::hover(BASE_FILL, 1.0, 0.75),
        LayerId::StatesCoverage => FillStyle::hover(YELLOW, 1.0, 0.5),
        LayerId::StatesBeta => FillStyle::hover(TEAL, 1.0, 0.5),
        LayerId::IncentivesLow => FillStyle::hover(YELLOW, 1.0, 0.6),
        LayerId::IncentivesMedium => FillStyle::hover(TEAL, 1.0, 0.6),
        LayerId::IncentivesHigh => FillStyle::hover(PURPLE, 1.0, 0.6),
        LayerId::StatesNoCoverage => FillStyle::solid(GREY),
        LayerId::Counties => FillStyle::hover(YELLOW, 1.0, 0.5),
        _ => return None,
    };
    Some(style)
}

const SELECTION_LINE: LineStyle = LineStyle {
    color: HIGHLIGHT,
    width: 3.0,
};

/// Layer definition for a state or county layer. Label layers live in `labels`.
pub(crate) fn region_layer(id: LayerId) -> LayerSpec {
    match id {
        LayerId::SelectedState => {
            LayerSpec::new(id, LayerKind::Line, SourceId::States, SELECTION_LINE.paint())
        }
        LayerId::SelectedCounty => {
            LayerSpec::new(id, LayerKind::Line, SourceId::Counties, SELECTION_LINE.paint())
        }
        LayerId::Counties => {
            let paint = fill_style(id).map(|s| s.paint()).unwrap_or_default();
            LayerSpec::new(id, LayerKind::Fill, SourceId::Counties, paint).with_minzoom(COUNTY_ZOOM)
        }
        _ => {
            let paint = fill_style(id).map(|s| s.paint()).unwrap_or_default();
            LayerSpec::new(id, LayerKind::Fill, SourceId::States, paint).with_maxzoom(COUNTY_ZOOM)
        }
    }
}
