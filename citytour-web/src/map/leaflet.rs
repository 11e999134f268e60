//! Leaflet bindings: only what the tour calls.

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container_id: &str, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &Map, center: &JsValue, zoom: f64, options: &JsValue);

    #[wasm_bindgen(method, js_name = getBounds)]
    pub fn get_bounds(this: &Map) -> LatLngBounds;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &Map);

    #[wasm_bindgen(method, js_name = removeLayer)]
    pub fn remove_layer(this: &Map, layer: &Marker);

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &Map, event: &str, handler: &Function);

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(lat_lng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = setIcon)]
    pub fn set_icon(this: &Marker, icon: &DivIcon);

    #[wasm_bindgen(method)]
    pub fn on(this: &Marker, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker);

    #[wasm_bindgen(method, js_name = closePopup)]
    pub fn close_popup(this: &Marker);

    #[wasm_bindgen(method, js_name = getElement)]
    pub fn get_element(this: &Marker) -> Option<web_sys::HtmlElement>;

    pub type DivIcon;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> DivIcon;

    pub type LatLngBounds;

    #[wasm_bindgen(method, js_name = getSouth)]
    pub fn south(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getWest)]
    pub fn west(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getNorth)]
    pub fn north(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getEast)]
    pub fn east(this: &LatLngBounds) -> f64;
}

/// Whether the Leaflet global `L` has been loaded.
#[must_use]
pub fn is_loaded() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: [f64; 2],
    pub zoom: f64,
    pub zoom_control: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileOptions {
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub keep_buffer: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconOptions {
    pub class_name: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [u32; 2],
    pub popup_anchor: [i32; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyOptions {
    pub duration: f64,
    pub ease_linearity: f64,
    pub offset: [f64; 2],
}

/// Serialize an options struct into a plain JS object.
///
/// # Errors
/// Returns the serializer error as a `JsValue`.
pub fn to_js<T: Serialize>(options: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(options).map_err(JsValue::from)
}
