use serde::Serialize;

use crate::sync::ViewMode;
use crate::symbology::{GREY, PURPLE, TEAL, YELLOW};
use crate::vector::COUNTY_ZOOM;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LegendKind {
    Coverage,
    IncentiveCount,
}

const COVERAGE_ENTRIES: [LegendEntry; 3] = [
    LegendEntry {
        label: "Launched",
        color: YELLOW,
    },
    LegendEntry {
        label: "Beta",
        color: TEAL,
    },
    LegendEntry {
        label: "Not yet covered",
        color: GREY,
    },
];

const COUNT_ENTRIES: [LegendEntry; 4] = [
    LegendEntry {
        label: "1-10 incentives",
        color: YELLOW,
    },
    LegendEntry {
        label: "11-20 incentives",
        color: TEAL,
    },
    LegendEntry {
        label: "20+ incentives",
        color: PURPLE,
    },
    LegendEntry {
        label: "No coverage",
        color: GREY,
    },
];

impl LegendKind {
    /// Counties always show counts; states follow the view toggle.
    pub fn for_view(view_mode: ViewMode, zoom: f64) -> Self {
        if zoom >= COUNTY_ZOOM {
            return LegendKind::IncentiveCount;
        }
        match view_mode {
            ViewMode::Coverage => LegendKind::Coverage,
            ViewMode::IncentiveDensity => LegendKind::IncentiveCount,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LegendKind::Coverage => "Coverage",
            LegendKind::IncentiveCount => "Incentives",
        }
    }

    pub fn entries(self) -> &'static [LegendEntry] {
        match self {
            LegendKind::Coverage => &COVERAGE_ENTRIES,
            LegendKind::IncentiveCount => &COUNT_ENTRIES,
        }
    }

    pub fn labels(self) -> Vec<&'static str> {
        self.entries().iter().map(|e| e.label).collect()
    }
}
