use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod polyline;
pub mod time;

pub use polyline::PolylineError;
pub use time::Timestamp;

pub const MAX_CYCLE_HOURS: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        Some(points.fold(seed, |bounds, point| bounds.extend(point)))
    }

    pub fn extend(self, point: Coordinate) -> Self {
        Self {
            min_lat: self.min_lat.min(point.lat),
            max_lat: self.max_lat.max(point.lat),
            min_lng: self.min_lng.min(point.lng),
            max_lng: self.max_lng.max(point.lng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
}

impl Location {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Waypoint classification. Unknown kinds are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StopType {
    Start,
    Pickup,
    Dropoff,
    Rest,
    Break,
    Fuel,
    End,
    Intermediate,
    Other(String),
}

impl StopType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
            Self::Rest => "rest",
            Self::Break => "break",
            Self::Fuel => "fuel",
            Self::End => "end",
            Self::Intermediate => "intermediate",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_intermediate(&self) -> bool {
        matches!(self, Self::Intermediate)
    }
}

impl From<String> for StopType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "start" => Self::Start,
            "pickup" => Self::Pickup,
            "dropoff" => Self::Dropoff,
            "rest" => Self::Rest,
            "break" => Self::Break,
            "fuel" => Self::Fuel,
            "end" => Self::End,
            "intermediate" => Self::Intermediate,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for StopType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<StopType> for String {
    fn from(kind: StopType) -> Self {
        match kind {
            StopType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub location: Location,
    pub stop_type: StopType,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub arrival_time: Timestamp,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub departure_time: Timestamp,
    /// Hours spent at the stop, 0 when instantaneous.
    #[serde(default)]
    pub duration: f64,
}

/// `[start_hour, end_hour)` within one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period(pub f64, pub f64);

impl Period {
    pub fn start(self) -> f64 {
        self.0
    }

    pub fn end(self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(deserialize_with = "time::deserialize_calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub off_duty: Vec<Period>,
    #[serde(default)]
    pub sleeper_berth: Vec<Period>,
    #[serde(default)]
    pub driving: Vec<Period>,
    #[serde(default)]
    pub on_duty: Vec<Period>,
    #[serde(default)]
    pub total_miles: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub total_distance: f64,
    pub total_duration: f64,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub estimated_start_time: Timestamp,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub estimated_delivery_time: Timestamp,
    pub stops: Vec<Stop>,
    /// Passed through untouched.
    #[serde(default)]
    pub segments: Vec<serde_json::Value>,
    #[serde(default)]
    pub polyline: String,
    #[serde(default)]
    pub logs: Vec<DailyLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Error payload of a non-2xx API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            detail: None,
        }
    }

    pub fn detail(message: impl Into<String>) -> Self {
        Self {
            error: None,
            detail: Some(message.into()),
        }
    }
}
