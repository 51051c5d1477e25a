//! Route map: decoded path, one marker per stop, viewport fitting.
//!
//! [`compose`] is pure and produces a [`MapScene`]. [`RouteMapPresenter`]
//! owns the map surface between `attach` and `dispose` and replaces the whole
//! scene on every `present`, so nothing accumulates across routes.

use shared::{Bounds, Coordinate, PolylineError, Stop, StopType, polyline};

use crate::format;
use crate::itinerary::StopStyle;
use crate::logging;

pub trait MapSurface {
    /// Removes every marker and path previously drawn.
    fn clear(&mut self);
    fn draw_path(&mut self, path: &[Coordinate]);
    fn add_marker(&mut self, marker: &MarkerSpec);
    fn fit_bounds(&mut self, bounds: Bounds, padding: f64);
    /// The container changed size or became visible.
    fn invalidate_size(&mut self);
    fn dispose(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub address: String,
    pub arrival: String,
    pub departure: String,
    pub duration: Option<String>,
}

impl Popup {
    fn for_stop(stop: &Stop) -> Self {
        Self {
            title: format!("{} Stop", format::capitalize(stop.stop_type.as_str())),
            address: stop.location.address.clone(),
            arrival: format::date_time(&stop.arrival_time),
            departure: format::date_time(&stop.departure_time),
            duration: (stop.duration > 0.0).then(|| format::duration(stop.duration)),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.title.clone(),
            self.address.clone(),
            format!("Arrival: {}", self.arrival),
            format!("Departure: {}", self.departure),
        ];
        if let Some(duration) = &self.duration {
            lines.push(format!("Duration: {duration}"));
        }
        lines
    }

    pub fn to_html(&self) -> String {
        let mut lines = self.lines().into_iter().map(|line| escape_html(&line));
        let mut html = String::from("<div class=\"text-sm\">");
        if let Some(title) = lines.next() {
            html.push_str(&format!("<p class=\"font-bold\">{title}</p>"));
        }
        for line in lines {
            html.push_str(&format!("<p>{line}</p>"));
        }
        html.push_str("</div>");
        html
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinate,
    pub kind: StopType,
    pub icon: &'static str,
    pub color: &'static str,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub path: Vec<Coordinate>,
    pub markers: Vec<MarkerSpec>,
    /// Set when the encoded path could not be decoded; the path is omitted.
    pub path_error: Option<PolylineError>,
}

impl MapScene {
    pub fn path_bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.path.iter().copied())
    }

    pub fn marker_bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.markers.iter().map(|marker| marker.position))
    }

    /// Clears the surface and draws the scene in one uninterrupted pass.
    pub fn apply<S: MapSurface + ?Sized>(&self, surface: &mut S, padding: f64) {
        surface.clear();
        if !self.path.is_empty() {
            surface.draw_path(&self.path);
            if let Some(bounds) = self.path_bounds() {
                surface.fit_bounds(bounds, padding);
            }
        }
        for marker in &self.markers {
            surface.add_marker(marker);
        }
        if let Some(bounds) = self.marker_bounds() {
            surface.fit_bounds(bounds, padding);
        }
    }

    /// Fits the viewport again without redrawing: marker bounds when there
    /// are markers, otherwise the path bounds.
    pub fn fit<S: MapSurface + ?Sized>(&self, surface: &mut S, padding: f64) {
        if let Some(bounds) = self.marker_bounds().or_else(|| self.path_bounds()) {
            surface.fit_bounds(bounds, padding);
        }
    }
}

pub fn compose(stops: &[Stop], encoded_path: &str) -> MapScene {
    let (path, path_error) = match polyline::decode(encoded_path) {
        Ok(path) => (path, None),
        Err(err) => {
            logging::error(&format!("could not decode route polyline: {err}"));
            (Vec::new(), Some(err))
        }
    };

    let markers = stops
        .iter()
        .filter(|stop| !stop.stop_type.is_intermediate())
        .map(|stop| {
            let style = StopStyle::for_kind(&stop.stop_type);
            MarkerSpec {
                position: stop.location.coordinate(),
                kind: stop.stop_type.clone(),
                icon: style.icon,
                color: style.color,
                popup: Popup::for_stop(stop),
            }
        })
        .collect();

    MapScene {
        path,
        markers,
        path_error,
    }
}

pub struct RouteMapPresenter<S: MapSurface> {
    surface: Option<S>,
    padding: f64,
    scene: Option<MapScene>,
}

impl<S: MapSurface> RouteMapPresenter<S> {
    pub fn new(padding: f64) -> Self {
        Self {
            surface: None,
            padding,
            scene: None,
        }
    }

    /// Takes ownership of `surface`, disposing any previous one, and draws
    /// the current scene on it.
    pub fn attach(&mut self, surface: S) {
        self.dispose();
        let surface = self.surface.insert(surface);
        if let Some(scene) = &self.scene {
            scene.apply(surface, self.padding);
        }
    }

    /// Releases the surface. The last scene is kept for the next `attach`.
    pub fn dispose(&mut self) -> Option<S> {
        let mut surface = self.surface.take()?;
        surface.dispose();
        Some(surface)
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn present(&mut self, stops: &[Stop], encoded_path: &str) -> &MapScene {
        let scene = compose(stops, encoded_path);
        if let Some(surface) = self.surface.as_mut() {
            scene.apply(surface, self.padding);
        }
        self.scene.insert(scene)
    }

    /// Drops the scene and clears the surface.
    pub fn clear(&mut self) {
        self.scene = None;
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    /// Call when the map container becomes visible again. A fit issued
    /// while the container was hidden is lost, so the scene is refitted.
    pub fn refresh(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.invalidate_size();
            if let Some(scene) = &self.scene {
                scene.fit(surface, self.padding);
            }
        }
    }

    pub fn scene(&self) -> Option<&MapScene> {
        self.scene.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
