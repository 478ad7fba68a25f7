//! Keeps the map's layer stack in step with selection, view mode and counts.
//!
//! Each input change builds a fresh [`LayerPlan`]; [`LayerSynchronizer`]
//! diffs it against the last plan it handed out and returns only the
//! operations the map needs to get from one to the other.

use regions::states::Coverage;
use regions::{RegionKind, SelectedRegion};

use crate::classify::{CountClassifier, CoverageClasses, IncentiveTier};
use crate::filter::Filter;
use crate::layer::{LayerId, LayerSpec};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Coverage,
    IncentiveDensity,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Coverage => ViewMode::IncentiveDensity,
            ViewMode::IncentiveDensity => ViewMode::Coverage,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedLayer {
    pub id: LayerId,
    pub visible: bool,
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlan {
    pub zoom: f64,
    pub layers: Vec<PlannedLayer>,
}

pub struct PlanInputs<'a> {
    pub selection: Option<&'a SelectedRegion>,
    pub view_mode: ViewMode,
    pub zoom: f64,
    pub coverage: &'a CoverageClasses,
    pub counts: &'a CountClassifier,
}

impl LayerPlan {
    pub fn build(inputs: &PlanInputs<'_>) -> Self {
        let density = inputs.view_mode == ViewMode::IncentiveDensity;
        let mut layers = Vec::with_capacity(LayerId::DRAW_ORDER.len());

        let coverage = inputs.coverage;
        let counts = inputs.counts;
        let tint = |visible: bool, filter: Filter| Some((visible, Some(filter)));

        for id in LayerId::DRAW_ORDER {
            let planned = match id {
                LayerId::StatesCoverage => tint(!density, coverage.filter(Coverage::Launched)),
                LayerId::StatesBeta => tint(!density, coverage.filter(Coverage::Beta)),
                LayerId::StatesNoCoverage => tint(true, coverage.filter(Coverage::Uncovered)),
                LayerId::IncentivesLow => tint(density, counts.tier_filter(IncentiveTier::Low)),
                LayerId::IncentivesMedium => {
                    tint(density, counts.tier_filter(IncentiveTier::Medium))
                }
                LayerId::IncentivesHigh => tint(density, counts.tier_filter(IncentiveTier::High)),
                LayerId::SelectedState => inputs
                    .selection
                    .filter(|s| s.kind == RegionKind::State)
                    .and_then(|s| tint(true, Filter::state(&s.name))),
                LayerId::SelectedCounty => inputs
                    .selection
                    .filter(|s| s.kind == RegionKind::County)
                    .and_then(|s| tint(true, Filter::county(&s.name, &s.state_name))),
                LayerId::States
                | LayerId::Counties
                | LayerId::StateLabels
                | LayerId::CountyLabels => Some((true, None)),
            };
            if let Some((visible, filter)) = planned {
                layers.push(PlannedLayer {
                    id,
                    visible,
                    filter,
                });
            }
        }

        Self {
            zoom: inputs.zoom,
            layers,
        }
    }

    pub fn get(&self, id: LayerId) -> Option<&PlannedLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.get(id).is_some()
    }

    /// Layers the user actually sees at the plan's zoom.
    pub fn effective_visible(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|l| l.visible && l.id.spec().in_zoom_range(self.zoom))
            .map(|l| l.id)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerChange {
    /// Insert below `before`, or on top when `None`.
    Add {
        spec: LayerSpec,
        visible: bool,
        filter: Option<Filter>,
        before: Option<LayerId>,
    },
    Remove(LayerId),
    SetVisibility { id: LayerId, visible: bool },
    SetFilter { id: LayerId, filter: Option<Filter> },
}

#[derive(Debug, Clone, Default)]
pub struct LayerSynchronizer {
    applied: Option<LayerPlan>,
}

impl LayerSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Option<&LayerPlan> {
        self.applied.as_ref()
    }

    /// Forget what the map holds, e.g. after a style reload.
    pub fn reset(&mut self) {
        self.applied = None;
    }

    /// Changes that take the map from the last applied plan to `next`.
    pub fn sync(&mut self, next: LayerPlan) -> Vec<LayerChange> {
        let mut changes = Vec::new();
        let empty = LayerPlan {
            zoom: next.zoom,
            layers: Vec::new(),
        };
        let prev = self.applied.as_ref().unwrap_or(&empty);

        for old in &prev.layers {
            if !next.contains(old.id) {
                changes.push(LayerChange::Remove(old.id));
            }
        }

        for (idx, layer) in next.layers.iter().enumerate() {
            match prev.get(layer.id) {
                None => {
                    let before = next.layers[idx + 1..]
                        .iter()
                        .map(|l| l.id)
                        .find(|id| prev.contains(*id));
                    changes.push(LayerChange::Add {
                        spec: layer.id.spec(),
                        visible: layer.visible,
                        filter: layer.filter.clone(),
                        before,
                    });
                }
                Some(old) => {
                    if old.visible != layer.visible {
                        changes.push(LayerChange::SetVisibility {
                            id: layer.id,
                            visible: layer.visible,
                        });
                    }
                    if old.filter != layer.filter {
                        changes.push(LayerChange::SetFilter {
                            id: layer.id,
                            filter: layer.filter.clone(),
                        });
                    }
                }
            }
        }

        self.applied = Some(next);
        changes
    }
}
