//! The map controller: a single-threaded state machine between the page and
//! the map library.
//!
//! Every input arrives as a [`MapEvent`]. The controller updates selection,
//! view mode, viewport, hover and sidebar state, then answers with an
//! [`Update`]: the map calls to make, in order, plus any fetches to start.
//! It never touches the map or the network itself.

use foundation::{FeatureId, LngLat};
use layers::labels::{county_labels, labels_to_geojson, state_labels};
use layers::{
    CountClassifier, CoverageClasses, LayerPlan, LayerSynchronizer, LegendKind, PlanInputs,
    SourceId, ViewMode,
};
use regions::picking::pick_region;
use regions::search::{resolve, Suggestion};
use regions::{RegionCatalog, RegionKind, SelectedRegion, Selection};
use tracing::{debug, error, info, trace, warn};

use crate::commands::{Effect, MapCommand, Update};
use crate::events::MapEvent;
use crate::hover::Hover;
use crate::navbar::Navbar;
use crate::sidebar::{Sidebar, SidebarView};
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Selected(SelectedRegion),
    NotFound(String),
    /// Blank input; nothing happens.
    Empty,
}

pub struct MapController {
    catalog: RegionCatalog,
    coverage: CoverageClasses,
    counts: CountClassifier,
    layers: LayerSynchronizer,
    selection: Selection,
    view_mode: ViewMode,
    viewport: Viewport,
    hover: Hover,
    sidebar: Sidebar,
    navbar: Navbar,
    loaded: bool,
    last_search: Option<SearchOutcome>,
}

impl MapController {
    pub fn new(catalog: RegionCatalog) -> Self {
        Self {
            catalog,
            coverage: CoverageClasses::new(),
            counts: CountClassifier::new(),
            layers: LayerSynchronizer::new(),
            selection: Selection::new(),
            view_mode: ViewMode::default(),
            viewport: Viewport::new(),
            hover: Hover::new(),
            sidebar: Sidebar::new(),
            navbar: Navbar::new(),
            loaded: false,
            last_search: None,
        }
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn counts(&self) -> &CountClassifier {
        &self.counts
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn last_search(&self) -> Option<&SearchOutcome> {
        self.last_search.as_ref()
    }

    pub fn legend(&self) -> LegendKind {
        LegendKind::for_view(self.view_mode, self.viewport.zoom)
    }

    pub fn sidebar_view(&self) -> Option<SidebarView> {
        self.sidebar.view()
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.navbar.suggestions(&self.catalog)
    }

    /// Layer plan for the current inputs.
    pub fn plan(&self) -> LayerPlan {
        LayerPlan::build(&PlanInputs {
            selection: self.selection.current(),
            view_mode: self.view_mode,
            zoom: self.viewport.zoom,
            coverage: &self.coverage,
            counts: &self.counts,
        })
    }

    pub fn handle(&mut self, event: MapEvent) -> Update {
        trace!(kind = event.kind(), "map event");
        let mut update = Update::default();
        match event {
            MapEvent::Loaded => self.on_load(&mut update),
            MapEvent::ViewChanged { center, zoom } => {
                if self.viewport.observe(center, zoom) {
                    update.commands.extend(self.hover.leave());
                }
            }
            MapEvent::PointerMoved { at } => {
                let kind = self.pointer_kind();
                let region = pick_region(&self.catalog, kind, at);
                update.commands.extend(self.hover.move_to(region, at));
            }
            MapEvent::PointerLeft => update.commands.extend(self.hover.leave()),
            MapEvent::Clicked { at } => self.on_click(at, &mut update),
            MapEvent::ToggleViewMode => {
                self.view_mode = self.view_mode.toggled();
                info!(view_mode = ?self.view_mode, "view mode changed");
                self.sync_layers(&mut update);
            }
            MapEvent::PresetChosen(preset) => update.push(self.viewport.apply_preset(preset)),
            MapEvent::ZoomOut => update.commands.extend(self.viewport.zoom_out()),
            MapEvent::QueryChanged(text) => self.navbar.set_query(text),
            MapEvent::SearchSubmitted(query) => {
                let (outcome, search_update) = self.search(&query);
                self.last_search = Some(outcome);
                update = search_update;
            }
            MapEvent::SidebarClosed => self.close_sidebar(&mut update),
            MapEvent::FilterToggled(category) => {
                self.sidebar.filter_mut().toggle(&category);
            }
            MapEvent::FilterSelectAll => self.sidebar.filter_mut().select_all(),
            MapEvent::FilterClearAll => self.sidebar.filter_mut().clear_all(),
            MapEvent::LanguageChanged(language) => self.sidebar.set_language(language),
            MapEvent::IncentivesLoaded { request_id, result } => {
                self.sidebar.receive(request_id, result);
            }
            MapEvent::IncentiveCountLoaded { state, result } => {
                let changed = match result {
                    Ok(count) => self.counts.record_count(&state, count),
                    Err(err) => {
                        error!(%state, %err, "error fetching incentive count");
                        self.counts.record_failure(&state)
                    }
                };
                if self.counts.is_complete() {
                    debug!("incentive counts complete");
                }
                if changed {
                    self.sync_layers(&mut update);
                }
            }
        }
        update
    }

    /// Exact, case-sensitive lookup; a hit takes the same path as a click.
    pub fn search(&mut self, query: &str) -> (SearchOutcome, Update) {
        let mut update = Update::default();
        let query = query.trim();
        if query.is_empty() {
            return (SearchOutcome::Empty, update);
        }
        let target = resolve(&self.catalog, query).map(|r| (r.kind, r.id));
        let Some((kind, id)) = target else {
            error!(query, "no state or county matches search");
            return (SearchOutcome::NotFound(query.to_string()), update);
        };
        match self.select(kind, id, &mut update) {
            Some(selected) => (SearchOutcome::Selected(selected), update),
            None => (SearchOutcome::NotFound(query.to_string()), update),
        }
    }

    fn pointer_kind(&self) -> RegionKind {
        if self.viewport.shows_counties() {
            RegionKind::County
        } else {
            RegionKind::State
        }
    }

    fn on_load(&mut self, update: &mut Update) {
        self.layers.reset();
        self.loaded = true;

        let sources = [
            (SourceId::States, self.catalog.state_source().to_geojson_value()),
            (SourceId::Counties, self.catalog.county_source().to_geojson_value()),
            (SourceId::StateLabels, labels_to_geojson(&state_labels(&self.catalog))),
            (SourceId::CountyLabels, labels_to_geojson(&county_labels(&self.catalog))),
        ];
        for (id, data) in sources {
            update.push(MapCommand::AddSource {
                id,
                data,
                generate_id: id.generate_id(),
            });
        }
        self.sync_layers(update);

        let abbreviations: Vec<&'static str> = self
            .catalog
            .states()
            .iter()
            .filter_map(|r| r.abbreviation)
            .collect();
        let fresh = self.counts.request(abbreviations);
        info!(states = fresh.len(), "requesting incentive counts");
        update.effects.extend(
            fresh
                .into_iter()
                .map(|state| Effect::FetchIncentiveCount { state }),
        );
    }

    /// States without coverage ignore clicks; counties always select.
    fn on_click(&mut self, at: LngLat, update: &mut Update) {
        let kind = self.pointer_kind();
        let Some(region) = pick_region(&self.catalog, kind, at) else {
            return;
        };
        if kind == RegionKind::State && !region.coverage().is_selectable() {
            debug!(name = %region.name, "state without coverage is not selectable");
            return;
        }
        let id = region.id;
        self.select(kind, id, update);
    }

    fn select(
        &mut self,
        kind: RegionKind,
        id: FeatureId,
        update: &mut Update,
    ) -> Option<SelectedRegion> {
        let region = self.catalog.region(kind, id)?;
        let changed = self.selection.select(region);
        let camera = match kind {
            RegionKind::State => self.viewport.zoom_to_state(region),
            RegionKind::County => self.viewport.zoom_to_county(region),
        };
        let selected = SelectedRegion::from(region);

        if changed {
            info!(name = %selected.name, kind = ?kind, "region selected");
            if let Some(effect) = self.sidebar.open(&selected) {
                update.effects.push(effect);
            }
        }
        self.sync_layers(update);
        if camera.is_none() {
            warn!(name = %selected.name, "region has no geometry to zoom to");
        }
        update.commands.extend(camera);
        Some(selected)
    }

    fn close_sidebar(&mut self, update: &mut Update) {
        if self.selection.clear() {
            info!("selection cleared");
        }
        self.sidebar.close();
        self.sync_layers(update);
    }

    fn sync_layers(&mut self, update: &mut Update) {
        if !self.loaded {
            return;
        }
        let plan = self.plan();
        update.extend_changes(self.layers.sync(plan));
    }
}
