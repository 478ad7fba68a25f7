use foundation::LngLat;
use layers::SourceId;
use regions::{Region, RegionKind};

use crate::commands::MapCommand;

const POINTER: &str = "pointer";
const DEFAULT_CURSOR: &str = "";

fn source_for(kind: RegionKind) -> SourceId {
    match kind {
        RegionKind::State => SourceId::States,
        RegionKind::County => SourceId::Counties,
    }
}

/// The one feature under the pointer, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hover {
    current: Option<(RegionKind, u32)>,
}

impl Hover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<(RegionKind, u32)> {
        self.current
    }

    /// Pointer over `region` (or over nothing). Counties also get a tooltip
    /// that follows the pointer.
    pub fn move_to(&mut self, region: Option<&Region>, at: LngLat) -> Vec<MapCommand> {
        let Some(region) = region else {
            return self.leave();
        };
        let next = (region.kind, region.id.index());
        let mut out = Vec::new();
        if self.current != Some(next) {
            match self.current.take() {
                Some((kind, id)) => out.push(MapCommand::hover(source_for(kind), id, false)),
                None => out.push(MapCommand::SetCursor { cursor: POINTER }),
            }
            out.push(MapCommand::hover(source_for(region.kind), next.1, true));
            self.current = Some(next);
        }
        if region.kind == RegionKind::County {
            out.push(MapCommand::ShowTooltip {
                at: at.to_array(),
                text: region.name.clone(),
            });
        }
        out
    }

    pub fn leave(&mut self) -> Vec<MapCommand> {
        let Some((kind, id)) = self.current.take() else {
            return Vec::new();
        };
        let mut out = vec![
            MapCommand::hover(source_for(kind), id, false),
            MapCommand::SetCursor {
                cursor: DEFAULT_CURSOR,
            },
        ];
        if kind == RegionKind::County {
            out.push(MapCommand::HideTooltip);
        }
        out
    }
}
