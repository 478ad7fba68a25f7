use foundation::FeatureId;

use crate::catalog::{Region, RegionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRegion {
    pub id: FeatureId,
    pub kind: RegionKind,
    pub name: String,
    pub state_name: String,
    pub abbreviation: Option<&'static str>,
}

impl From<&Region> for SelectedRegion {
    fn from(r: &Region) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            name: r.name.clone(),
            state_name: r.state_name.clone(),
            abbreviation: r.abbreviation,
        }
    }
}

/// At most one selected region: a state XOR a county.
///
/// Selecting either kind replaces whatever was selected before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<SelectedRegion>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the selection changed.
    pub fn select(&mut self, region: &Region) -> bool {
        let next = SelectedRegion::from(region);
        if self.current.as_ref() == Some(&next) {
            return false;
        }
        self.current = Some(next);
        true
    }

    /// Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&SelectedRegion> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn state(&self) -> Option<&SelectedRegion> {
        self.current
            .as_ref()
            .filter(|r| r.kind == RegionKind::State)
    }

    pub fn county(&self) -> Option<&SelectedRegion> {
        self.current
            .as_ref()
            .filter(|r| r.kind == RegionKind::County)
    }
}
