//! MapLibre GL backend for [`MapSurface`], bridged through `maplibre_map.js`.

use serde::Serialize;
use serde_wasm_bindgen::to_value;
use shared::{Bounds, Coordinate};
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};

use crate::config::MapView;
use crate::logging;
use crate::route_map::{MapSurface, MarkerSpec};

#[wasm_bindgen(module = "/maplibre_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(container_id: &str, view: JsValue);
    #[wasm_bindgen(js_name = disposeMap)]
    fn dispose_map();
    #[wasm_bindgen(js_name = clearRoute)]
    fn clear_route();
    #[wasm_bindgen(js_name = drawRoute)]
    fn draw_route(coords: JsValue);
    #[wasm_bindgen(js_name = addStopMarker)]
    fn add_stop_marker(marker: JsValue);
    #[wasm_bindgen(js_name = fitBounds)]
    fn fit_bounds_js(bounds: JsValue, padding: f64);
    #[wasm_bindgen(js_name = resizeMap)]
    fn resize_map();
}

#[derive(Serialize)]
struct ViewPayload {
    lat: f64,
    lng: f64,
    zoom: f64,
}

#[derive(Serialize)]
struct MarkerPayload<'a> {
    lat: f64,
    lng: f64,
    icon: &'a str,
    color: &'a str,
    popup_html: String,
}

/// Handle to the single map instance living in `container_id`.
pub struct MapLibreSurface {
    container_id: String,
}

impl MapLibreSurface {
    pub fn mount(container_id: &str, view: MapView) -> Self {
        let payload = ViewPayload {
            lat: view.lat,
            lng: view.lng,
            zoom: view.zoom,
        };
        init_map(container_id, to_value(&payload).unwrap_or(JsValue::NULL));
        logging::debug(&format!("map mounted in #{container_id}"));
        Self {
            container_id: container_id.to_string(),
        }
    }
}

impl MapSurface for MapLibreSurface {
    fn clear(&mut self) {
        clear_route();
    }

    fn draw_path(&mut self, path: &[Coordinate]) {
        match to_value(path) {
            Ok(coords) => draw_route(coords),
            Err(err) => logging::error(&format!("cannot pass route to map: {err}")),
        }
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        let payload = MarkerPayload {
            lat: marker.position.lat,
            lng: marker.position.lng,
            icon: marker.icon,
            color: marker.color,
            popup_html: marker.popup.to_html(),
        };
        match to_value(&payload) {
            Ok(value) => add_stop_marker(value),
            Err(err) => logging::error(&format!("cannot pass marker to map: {err}")),
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: f64) {
        if let Ok(value) = to_value(&bounds) {
            fit_bounds_js(value, padding);
        }
    }

    fn invalidate_size(&mut self) {
        resize_map();
    }

    fn dispose(&mut self) {
        logging::debug(&format!("map in #{} disposed", self.container_id));
        dispose_map();
    }
}
