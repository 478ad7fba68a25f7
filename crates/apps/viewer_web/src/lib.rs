use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use formats::RegionCollection;
use foundation::LngLat;
use incentives::endpoint::incentives_url;
use incentives::{ApiError, IncentivesResponse, Language, PublicConfig};
use layers::{LegendEntry, ViewMode};
use regions::RegionCatalog;
use runtime::sidebar::SidebarView;
use runtime::{
    Effect, INITIAL_CENTER, INITIAL_ZOOM, MapController, MapEvent, SearchOutcome, Update,
    ViewPreset,
};

mod bridge;
mod logging;

const STATES_URL: &str = "geojson/states.json";
const COUNTIES_URL: &str = "geojson/counties.json";

pub struct ViewerState {
    pub config: PublicConfig,
    pub controller: MapController,
}

thread_local! {
    static STATE: RefCell<Option<ViewerState>> = const { RefCell::new(None) };
}

#[derive(Serialize)]
struct MapOptions<'a> {
    container: &'a str,
    style: &'a str,
    center: [f64; 2],
    zoom: f64,
}

#[derive(Serialize)]
struct LegendPanel {
    title: &'static str,
    entries: &'static [LegendEntry],
}

#[derive(Serialize)]
struct NavbarPanel {
    query: String,
    submit_enabled: bool,
    suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_found: Option<String>,
}

#[derive(Serialize)]
struct Panels {
    view_mode: &'static str,
    legend: LegendPanel,
    navbar: NavbarPanel,
    sidebar: Option<SidebarView>,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    logging::init(tracing::Level::INFO);
    Ok(())
}

/// Loads config and boundaries, then asks the page to create the map.
#[wasm_bindgen]
pub fn boot(config_url: String, container: String) {
    spawn_local(async move {
        if let Err(err) = boot_inner(&config_url, &container).await {
            bridge::error(&format!("startup failed: {}", err.as_string().unwrap_or_default()));
        }
    });
}

#[wasm_bindgen]
pub fn on_map_load() {
    dispatch(MapEvent::Loaded);
}

#[wasm_bindgen]
pub fn on_view_changed(lng: f64, lat: f64, zoom: f64) {
    dispatch(MapEvent::ViewChanged {
        center: LngLat::new(lng, lat),
        zoom,
    });
}

#[wasm_bindgen]
pub fn on_pointer_move(lng: f64, lat: f64) {
    dispatch(MapEvent::PointerMoved {
        at: LngLat::new(lng, lat),
    });
}

#[wasm_bindgen]
pub fn on_pointer_leave() {
    dispatch(MapEvent::PointerLeft);
}

#[wasm_bindgen]
pub fn on_click(lng: f64, lat: f64) {
    dispatch(MapEvent::Clicked {
        at: LngLat::new(lng, lat),
    });
}

#[wasm_bindgen]
pub fn toggle_view_mode() {
    dispatch(MapEvent::ToggleViewMode);
}

#[wasm_bindgen]
pub fn choose_preset(name: &str) -> Result<(), JsValue> {
    let preset = ViewPreset::parse(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown view preset: {name}")))?;
    dispatch(MapEvent::PresetChosen(preset));
    Ok(())
}

#[wasm_bindgen]
pub fn zoom_out() {
    dispatch(MapEvent::ZoomOut);
}

#[wasm_bindgen]
pub fn set_query(text: String) {
    dispatch(MapEvent::QueryChanged(text));
}

#[wasm_bindgen]
pub fn submit_search(text: String) {
    dispatch(MapEvent::SearchSubmitted(text));
}

#[wasm_bindgen]
pub fn close_sidebar() {
    dispatch(MapEvent::SidebarClosed);
}

#[wasm_bindgen]
pub fn toggle_filter(category: String) {
    dispatch(MapEvent::FilterToggled(category));
}

#[wasm_bindgen]
pub fn select_all_filters() {
    dispatch(MapEvent::FilterSelectAll);
}

#[wasm_bindgen]
pub fn clear_all_filters() {
    dispatch(MapEvent::FilterClearAll);
}

#[wasm_bindgen]
pub fn set_language(code: &str) -> Result<(), JsValue> {
    let language = match code.to_ascii_lowercase().as_str() {
        "en" => Language::En,
        "es" => Language::Es,
        _ => return Err(JsValue::from_str(&format!("unsupported language: {code}"))),
    };
    dispatch(MapEvent::LanguageChanged(language));
    Ok(())
}

/// Feeds one event through the controller, then applies the result.
fn dispatch(event: MapEvent) {
    let handled = STATE.with(|state| {
        let mut state = state.borrow_mut();
        let s = state.as_mut()?;
        let update = s.controller.handle(event);
        Some((update, panels(&s.controller), s.config.api_url.clone()))
    });
    let Some((update, panels, api_url)) = handled else {
        bridge::warn("event before startup finished; ignored");
        return;
    };
    apply(update, &panels, &api_url);
}

fn apply(update: Update, panels: &Panels, api_url: &str) {
    if !update.commands.is_empty() {
        match serde_json::to_string(&update.commands) {
            Ok(json) => bridge::apply_map_commands(&json),
            Err(err) => bridge::error(&format!("encode map commands: {err}")),
        }
    }
    match serde_json::to_string(panels) {
        Ok(json) => bridge::render_panels(&json),
        Err(err) => bridge::error(&format!("encode panels: {err}")),
    }
    for effect in update.effects {
        run_effect(effect, api_url.to_string());
    }
}

fn panels(controller: &MapController) -> Panels {
    let legend = controller.legend();
    let not_found = match controller.last_search() {
        Some(SearchOutcome::NotFound(q)) => Some(format!("No state or county named \"{q}\"")),
        _ => None,
    };
    Panels {
        view_mode: match controller.view_mode() {
            ViewMode::Coverage => "coverage",
            ViewMode::IncentiveDensity => "density",
        },
        legend: LegendPanel {
            title: legend.title(),
            entries: legend.entries(),
        },
        navbar: NavbarPanel {
            query: controller.navbar().query().to_string(),
            submit_enabled: controller.navbar().submit_enabled(),
            suggestions: controller.suggestions().into_iter().map(|s| s.label).collect(),
            not_found,
        },
        sidebar: controller.sidebar_view(),
    }
}

fn run_effect(effect: Effect, api_url: String) {
    spawn_local(async move {
        match effect {
            Effect::FetchIncentives { request_id, state } => {
                let result = fetch_incentives(&api_url, &state).await;
                if let Err(err) = &result {
                    bridge::error(&format!("incentives for {state}: {err}"));
                }
                dispatch(MapEvent::IncentivesLoaded { request_id, result });
            }
            Effect::FetchIncentiveCount { state } => {
                let result = fetch_incentives(&api_url, &state)
                    .await
                    .map(|resp| resp.count());
                if let Err(err) = &result {
                    bridge::warn(&format!("incentive count for {state}: {err}"));
                }
                dispatch(MapEvent::IncentiveCountLoaded { state, result });
            }
        }
    });
}

async fn fetch_incentives(api_url: &str, state: &str) -> Result<IncentivesResponse, ApiError> {
    let url = incentives_url(api_url, state)?;
    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status {
            state: state.to_string(),
            status: resp.status(),
        });
    }
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn boot_inner(config_url: &str, container: &str) -> Result<(), JsValue> {
    let config: PublicConfig = serde_json::from_str(&fetch_text(config_url).await?)
        .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
    let states = RegionCollection::from_geojson_str(&fetch_text(STATES_URL).await?)
        .map_err(|e| JsValue::from_str(&format!("states: {e}")))?;
    let counties = RegionCollection::from_geojson_str(&fetch_text(COUNTIES_URL).await?)
        .map_err(|e| JsValue::from_str(&format!("counties: {e}")))?;

    let catalog = RegionCatalog::new(states, counties);
    bridge::log(&format!(
        "loaded {} states and {} counties",
        catalog.states().len(),
        catalog.counties().len()
    ));

    let options = MapOptions {
        container,
        style: &config.style_url,
        center: INITIAL_CENTER.to_array(),
        zoom: INITIAL_ZOOM,
    };
    let options_json =
        serde_json::to_string(&options).map_err(|e| JsValue::from_str(&e.to_string()))?;

    STATE.with(|state| {
        *state.borrow_mut() = Some(ViewerState {
            config,
            controller: MapController::new(catalog),
        });
    });

    bridge::create_map(&options_json);
    Ok(())
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("{url}: HTTP {}", resp.status())));
    }
    resp.text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
