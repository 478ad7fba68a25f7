use layers::{visibility, Filter, LayerChange, LayerId, SourceId};
use serde::Serialize;
use serde_json::{json, Value};

/// One configuration call on the map instance, in the order it must be made.
///
/// Serialized with a `type` tag so the page glue can dispatch on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapCommand {
    AddSource {
        id: SourceId,
        data: Value,
        #[serde(rename = "generateId")]
        generate_id: bool,
    },
    AddLayer {
        layer: Value,
        #[serde(rename = "beforeId", skip_serializing_if = "Option::is_none")]
        before_id: Option<LayerId>,
    },
    RemoveLayer {
        id: LayerId,
    },
    SetLayoutProperty {
        id: LayerId,
        name: &'static str,
        value: Value,
    },
    SetFilter {
        id: LayerId,
        filter: Option<Filter>,
    },
    SetFeatureState {
        source: SourceId,
        feature: u32,
        state: Value,
    },
    SetCursor {
        cursor: &'static str,
    },
    FlyTo {
        center: [f64; 2],
        zoom: f64,
    },
    FitBounds {
        bounds: [[f64; 2]; 2],
        padding: f64,
        #[serde(rename = "maxZoom")]
        max_zoom: f64,
        duration: u32,
    },
    SetView {
        center: [f64; 2],
        #[serde(rename = "maxBounds")]
        max_bounds: Option<[[f64; 2]; 2]>,
    },
    ShowTooltip {
        at: [f64; 2],
        text: String,
    },
    HideTooltip,
}

impl MapCommand {
    pub fn hover(source: SourceId, feature: u32, hovered: bool) -> Self {
        MapCommand::SetFeatureState {
            source,
            feature,
            state: json!({ "hover": hovered }),
        }
    }
}

impl From<LayerChange> for MapCommand {
    fn from(change: LayerChange) -> Self {
        match change {
            LayerChange::Add {
                spec,
                visible,
                filter,
                before,
            } => MapCommand::AddLayer {
                layer: spec.to_style(visible, filter.as_ref()),
                before_id: before,
            },
            LayerChange::Remove(id) => MapCommand::RemoveLayer { id },
            LayerChange::SetVisibility { id, visible } => MapCommand::SetLayoutProperty {
                id,
                name: "visibility",
                value: json!(visibility(visible)),
            },
            LayerChange::SetFilter { id, filter } => MapCommand::SetFilter { id, filter },
        }
    }
}

/// Work the shell performs on the controller's behalf; results come back as
/// events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Sidebar list for the selected region.
    FetchIncentives {
        #[serde(rename = "requestId")]
        request_id: u64,
        state: String,
    },
    /// Count used for the density tint.
    FetchIncentiveCount { state: String },
}

/// Output of one handled event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub commands: Vec<MapCommand>,
    pub effects: Vec<Effect>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.effects.is_empty()
    }

    pub fn push(&mut self, command: MapCommand) {
        self.commands.push(command);
    }

    pub fn extend_changes(&mut self, changes: Vec<LayerChange>) {
        self.commands.extend(changes.into_iter().map(MapCommand::from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn commands_serialize_for_the_page() {
        let cmd = MapCommand::FitBounds {
            bounds: [[-105.0, 39.6], [-104.6, 39.9]],
            padding: 40.0,
            max_zoom: 10.0,
            duration: 1000,
        };
        assert_eq!(
            serde_json::to_value(&cmd).expect("encode"),
            json!({
                "type": "fitBounds",
                "bounds": [[-105.0, 39.6], [-104.6, 39.9]],
                "padding": 40.0,
                "maxZoom": 10.0,
                "duration": 1000
            })
        );
        assert_eq!(
            serde_json::to_value(MapCommand::hover(SourceId::States, 3, true)).expect("encode"),
            json!({"type": "setFeatureState", "source": "statesData", "feature": 3, "state": {"hover": true}})
        );
        assert_eq!(
            serde_json::to_value(MapCommand::HideTooltip).expect("encode"),
            json!({"type": "hideTooltip"})
        );
    }

    #[test]
    fn layer_changes_become_map_calls() {
        let cmd = MapCommand::from(LayerChange::SetVisibility {
            id: LayerId::StatesBeta,
            visible: false,
        });
        assert_eq!(
            serde_json::to_value(&cmd).expect("encode"),
            json!({
                "type": "setLayoutProperty",
                "id": "states-beta-layer",
                "name": "visibility",
                "value": "none"
            })
        );

        let add = MapCommand::from(LayerChange::Add {
            spec: LayerId::SelectedState.spec(),
            visible: true,
            filter: Some(Filter::state("Texas")),
            before: Some(LayerId::StateLabels),
        });
        let v = serde_json::to_value(&add).expect("encode");
        assert_eq!(v["beforeId"], json!("dynamic-labels-layer"));
        assert_eq!(v["layer"]["filter"], json!(["==", "ste_name", "Texas"]));
    }

    #[test]
    fn effects_carry_request_ids() {
        let e = Effect::FetchIncentives {
            request_id: 7,
            state: "CA".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&e).expect("encode"),
            json!({"type": "fetchIncentives", "requestId": 7, "state": "CA"})
        );
    }
}
