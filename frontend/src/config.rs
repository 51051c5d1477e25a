use crate::grid::CanvasDims;

pub const DEFAULT_API_ROOT: &str = "http://localhost:8000/api";

pub fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    DEFAULT_API_ROOT.to_string()
}

/// Initial map view before any route is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub api_root: String,
    pub log_canvas: CanvasDims,
    pub suggestion_debounce_ms: u32,
    pub min_query_len: usize,
    pub fit_padding: f64,
    pub initial_view: MapView,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            api_root: api_root(),
            log_canvas: CanvasDims::LOG_SHEET,
            suggestion_debounce_ms: 300,
            min_query_len: 3,
            fit_padding: 50.0,
            initial_view: MapView {
                lat: 40.0,
                lng: -95.0,
                zoom: 4.0,
            },
        }
    }
}
