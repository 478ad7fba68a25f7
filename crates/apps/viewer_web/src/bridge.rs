//! Calls into the page script, which owns the MapLibre instance and the DOM.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Creates the map; the page calls `on_map_load` once the style is ready.
    #[wasm_bindgen(js_name = createMap)]
    pub fn create_map(options_json: &str);

    /// Applies a JSON array of map commands in order.
    #[wasm_bindgen(js_name = applyMapCommands)]
    pub fn apply_map_commands(commands_json: &str);

    /// Redraws sidebar, legend and navbar from a JSON snapshot.
    #[wasm_bindgen(js_name = renderPanels)]
    pub fn render_panels(panels_json: &str);
}

pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

pub fn error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
