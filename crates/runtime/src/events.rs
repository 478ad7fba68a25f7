use foundation::LngLat;
use incentives::{ApiError, IncentivesResponse, Language};

use crate::viewport::ViewPreset;

/// Everything the controller reacts to: user input reported by the page and
/// results of effects it asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The map style finished loading.
    Loaded,
    /// Camera settled after a pan or zoom.
    ViewChanged { center: LngLat, zoom: f64 },
    PointerMoved { at: LngLat },
    PointerLeft,
    Clicked { at: LngLat },
    ToggleViewMode,
    PresetChosen(ViewPreset),
    ZoomOut,
    QueryChanged(String),
    SearchSubmitted(String),
    SidebarClosed,
    FilterToggled(String),
    FilterSelectAll,
    FilterClearAll,
    LanguageChanged(Language),
    IncentivesLoaded {
        request_id: u64,
        result: Result<IncentivesResponse, ApiError>,
    },
    IncentiveCountLoaded {
        state: String,
        result: Result<usize, ApiError>,
    },
}

impl MapEvent {
    /// Short name for traces.
    pub fn kind(&self) -> &'static str {
        match self {
            MapEvent::Loaded => "loaded",
            MapEvent::ViewChanged { .. } => "view_changed",
            MapEvent::PointerMoved { .. } => "pointer_moved",
            MapEvent::PointerLeft => "pointer_left",
            MapEvent::Clicked { .. } => "clicked",
            MapEvent::ToggleViewMode => "toggle_view_mode",
            MapEvent::PresetChosen(_) => "preset_chosen",
            MapEvent::ZoomOut => "zoom_out",
            MapEvent::QueryChanged(_) => "query_changed",
            MapEvent::SearchSubmitted(_) => "search_submitted",
            MapEvent::SidebarClosed => "sidebar_closed",
            MapEvent::FilterToggled(_) => "filter_toggled",
            MapEvent::FilterSelectAll => "filter_select_all",
            MapEvent::FilterClearAll => "filter_clear_all",
            MapEvent::LanguageChanged(_) => "language_changed",
            MapEvent::IncentivesLoaded { .. } => "incentives_loaded",
            MapEvent::IncentiveCountLoaded { .. } => "incentive_count_loaded",
        }
    }
}
