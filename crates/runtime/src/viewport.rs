use foundation::{LngLat, LngLatBounds};
use layers::vector::COUNTY_ZOOM;
use regions::Region;

use crate::commands::MapCommand;

pub const INITIAL_CENTER: LngLat = LngLat::new(-98.5795, 39.8283);
pub const INITIAL_ZOOM: f64 = 4.0;
pub const STATE_ZOOM: f64 = 6.0;
pub const COUNTY_PADDING: f64 = 40.0;
pub const COUNTY_MAX_ZOOM: f64 = 10.0;
pub const COUNTY_FIT_DURATION_MS: u32 = 1000;

/// Inset buttons that jump between the mainland, Alaska and Hawaii.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    Mainland,
    Alaska,
    Hawaii,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 3] = [ViewPreset::Mainland, ViewPreset::Alaska, ViewPreset::Hawaii];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mainland" => Some(ViewPreset::Mainland),
            "alaska" => Some(ViewPreset::Alaska),
            "hawaii" => Some(ViewPreset::Hawaii),
            _ => None,
        }
    }

    pub fn center(self) -> LngLat {
        match self {
            ViewPreset::Mainland => INITIAL_CENTER,
            ViewPreset::Alaska => LngLat::new(-152.4044, 64.2008),
            ViewPreset::Hawaii => LngLat::new(-157.8583, 21.3069),
        }
    }

    pub fn max_bounds(self) -> LngLatBounds {
        match self {
            ViewPreset::Mainland => LngLatBounds::from([[-130.0, 23.0], [-65.0, 50.0]]),
            ViewPreset::Alaska => LngLatBounds::from([[-180.0, 50.0], [-130.0, 72.0]]),
            ViewPreset::Hawaii => LngLatBounds::from([[-161.0, 18.0], [-154.0, 23.0]]),
        }
    }
}

/// Last known camera, as reported back by the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: LngLat,
    pub zoom: f64,
    pub max_bounds: Option<LngLatBounds>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            max_bounds: None,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counties take over from states at this zoom.
    pub fn shows_counties(&self) -> bool {
        self.zoom >= COUNTY_ZOOM
    }

    /// Returns `true` if the zoom crossed the state/county boundary.
    pub fn observe(&mut self, center: LngLat, zoom: f64) -> bool {
        let before = self.shows_counties();
        self.center = center;
        if zoom.is_finite() {
            self.zoom = zoom;
        }
        before != self.shows_counties()
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) -> MapCommand {
        let bounds = preset.max_bounds();
        self.center = preset.center();
        self.max_bounds = Some(bounds);
        MapCommand::SetView {
            center: self.center.to_array(),
            max_bounds: Some(bounds.to_array()),
        }
    }

    /// Back to the opening view, lifting any preset bounds first.
    pub fn zoom_out(&mut self) -> Vec<MapCommand> {
        let mut out = Vec::new();
        if self.max_bounds.take().is_some() {
            out.push(MapCommand::SetView {
                center: self.center.to_array(),
                max_bounds: None,
            });
        }
        out.push(fly_to(INITIAL_CENTER, INITIAL_ZOOM));
        self.center = INITIAL_CENTER;
        self.zoom = INITIAL_ZOOM;
        out
    }

    pub fn zoom_to_state(&mut self, state: &Region) -> Option<MapCommand> {
        let center = state.center?;
        self.center = center;
        self.zoom = STATE_ZOOM;
        Some(fly_to(center, STATE_ZOOM))
    }

    /// Fits the county's bounds; the final zoom is reported back by the map.
    pub fn zoom_to_county(&mut self, county: &Region) -> Option<MapCommand> {
        let bounds = county.bounds?;
        self.center = bounds.center();
        Some(MapCommand::FitBounds {
            bounds: bounds.to_array(),
            padding: COUNTY_PADDING,
            max_zoom: COUNTY_MAX_ZOOM,
            duration: COUNTY_FIT_DURATION_MS,
        })
    }
}

fn fly_to(center: LngLat, zoom: f64) -> MapCommand {
    MapCommand::FlyTo {
        center: center.to_array(),
        zoom,
    }
}
