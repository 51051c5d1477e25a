//! Trip timeline and stop summary for the details tab.

use shared::{RouteResult, Stop, StopType, Timestamp};

use crate::format;

/// Icon and color family for a stop kind; unknown kinds get a generic pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

impl StopStyle {
    pub const GENERIC: Self = Self {
        icon: "map-marker-alt",
        color: "gray",
    };

    pub fn for_kind(kind: &StopType) -> Self {
        let (icon, color) = match kind {
            StopType::Start => ("play-circle", "green"),
            StopType::Pickup => ("box", "blue"),
            StopType::Dropoff => ("box-open", "purple"),
            StopType::Rest => ("bed", "gray"),
            StopType::Break => ("coffee", "amber"),
            StopType::Fuel => ("gas-pump", "orange"),
            StopType::End => ("flag-checkered", "red"),
            StopType::Intermediate | StopType::Other(_) => return Self::GENERIC,
        };
        Self { icon, color }
    }
}

pub fn stop_label(kind: &StopType) -> String {
    let base = format::capitalize(kind.as_str());
    match kind {
        StopType::Rest => format!("{base} Period"),
        StopType::Break | StopType::Fuel => format!("{base} Stop"),
        _ => base,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub kind: StopType,
    pub label: String,
    pub icon_key: &'static str,
    pub color_key: &'static str,
    pub address: String,
    pub arrival_time: Timestamp,
    /// Hours at the stop, only when positive.
    pub duration: Option<f64>,
}

impl TimelineEntry {
    pub fn arrival_text(&self) -> String {
        format::date_time(&self.arrival_time)
    }

    pub fn duration_text(&self) -> Option<String> {
        self.duration.map(format::duration)
    }
}

/// Stop counts per kind, in the order kinds first appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopCounts(Vec<(StopType, usize)>);

impl StopCounts {
    fn record(&mut self, kind: &StopType) {
        match self.0.iter_mut().find(|(seen, _)| seen == kind) {
            Some((_, count)) => *count += 1,
            None => self.0.push((kind.clone(), 1)),
        }
    }

    pub fn get(&self, kind: &StopType) -> usize {
        self.0
            .iter()
            .find(|(seen, _)| seen == kind)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StopType, usize)> + '_ {
        self.0.iter().map(|(kind, count)| (kind, *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

pub fn summary_label(kind: &StopType) -> String {
    format!("{} Stops", format::capitalize(kind.as_str()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub summary_counts: StopCounts,
    pub timeline: Vec<TimelineEntry>,
}

/// Intermediate stops only shape the path and are left out of both views.
pub fn build(stops: &[Stop]) -> Itinerary {
    let mut summary_counts = StopCounts::default();
    let mut timeline = Vec::with_capacity(stops.len());

    for stop in stops.iter().filter(|s| !s.stop_type.is_intermediate()) {
        summary_counts.record(&stop.stop_type);
        let style = StopStyle::for_kind(&stop.stop_type);
        timeline.push(TimelineEntry {
            kind: stop.stop_type.clone(),
            label: stop_label(&stop.stop_type),
            icon_key: style.icon,
            color_key: style.color,
            address: stop.location.address.clone(),
            arrival_time: stop.arrival_time,
            duration: (stop.duration > 0.0).then_some(stop.duration),
        });
    }

    Itinerary {
        summary_counts,
        timeline,
    }
}

/// Headline figures shown above the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub distance: String,
    pub duration: String,
    pub estimated_start: String,
    pub estimated_delivery: String,
}

impl TripSummary {
    pub fn from_route(route: &RouteResult) -> Self {
        Self {
            distance: format!("{:.0} miles", route.total_distance.max(0.0).round()),
            duration: format::duration(route.total_duration),
            estimated_start: format::date_time(&route.estimated_start_time),
            estimated_delivery: format::date_time(&route.estimated_delivery_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Location, time::parse_timestamp};

    fn stop(kind: &str, address: &str, arrival: &str, duration: f64) -> Stop {
        let ts = parse_timestamp(arrival).unwrap();
        Stop {
            location: Location {
                lat: 41.0,
                lng: -87.0,
                address: address.into(),
            },
            stop_type: StopType::from(kind),
            arrival_time: ts,
            departure_time: ts,
            duration,
        }
    }

    fn trip() -> Vec<Stop> {
        vec![
            stop("start", "Chicago, IL", "2024-03-04T08:00:00Z", 0.0),
            stop("intermediate", "", "2024-03-04T08:40:00Z", 0.0),
            stop("pickup", "Chicago, IL", "2024-03-04T09:00:00Z", 1.0),
            stop("fuel", "Gary, IN", "2024-03-04T10:30:00Z", 0.5),
            stop("intermediate", "", "2024-03-04T11:00:00Z", 0.0),
            stop("break", "Lafayette, IN", "2024-03-04T12:00:00Z", 0.5),
            stop("dropoff", "Indianapolis, IN", "2024-03-04T13:30:00Z", 1.0),
            stop("end", "Indianapolis, IN", "2024-03-04T14:30:00Z", 0.0),
        ]
    }

    #[test]
    fn intermediate_stops_never_show_up() {
        let itinerary = build(&trip());
        assert_eq!(itinerary.timeline.len(), 6);
        assert_eq!(itinerary.summary_counts.total(), 6);
        assert_eq!(itinerary.summary_counts.get(&StopType::Intermediate), 0);
        assert!(itinerary
            .timeline
            .iter()
            .all(|entry| !entry.kind.is_intermediate()));
    }

    #[test]
    fn counts_keep_first_seen_order() {
        let mut stops = trip();
        stops.insert(6, stop("fuel", "Whitestown, IN", "2024-03-04T13:00:00Z", 0.25));
        let counts = build(&stops).summary_counts;
        let order: Vec<_> = counts.iter().map(|(kind, n)| (kind.as_str().to_string(), n)).collect();
        assert_eq!(
            order,
            vec![
                ("start".to_string(), 1),
                ("pickup".to_string(), 1),
                ("fuel".to_string(), 2),
                ("break".to_string(), 1),
                ("dropoff".to_string(), 1),
                ("end".to_string(), 1),
            ]
        );
        assert_eq!(summary_label(&StopType::Fuel), "Fuel Stops");
    }

    #[test]
    fn labels_follow_stop_kind() {
        assert_eq!(stop_label(&StopType::Start), "Start");
        assert_eq!(stop_label(&StopType::Rest), "Rest Period");
        assert_eq!(stop_label(&StopType::Break), "Break Stop");
        assert_eq!(stop_label(&StopType::Fuel), "Fuel Stop");
        assert_eq!(stop_label(&StopType::Dropoff), "Dropoff");
        assert_eq!(stop_label(&StopType::from("inspection")), "Inspection");
    }

    #[test]
    fn duration_only_when_positive() {
        let itinerary = build(&trip());
        let start = &itinerary.timeline[0];
        assert_eq!(start.duration, None);
        assert_eq!(start.duration_text(), None);
        let pickup = &itinerary.timeline[1];
        assert_eq!(pickup.duration, Some(1.0));
        assert_eq!(pickup.duration_text().as_deref(), Some("1h 0m"));
        assert_eq!(pickup.arrival_text(), "3/4/2024, 9:00:00 AM");
    }

    #[test]
    fn unknown_kinds_get_the_generic_style() {
        let mut stops = trip();
        stops.push(stop("weigh_station", "Remington, IN", "2024-03-04T15:00:00Z", 0.0));
        let itinerary = build(&stops);
        let last = itinerary.timeline.last().unwrap();
        assert_eq!(last.icon_key, "map-marker-alt");
        assert_eq!(last.color_key, "gray");
        assert_eq!(itinerary.summary_counts.get(&StopType::from("weigh_station")), 1);
    }

    #[test]
    fn timeline_mirrors_stop_order() {
        let labels: Vec<_> = build(&trip())
            .timeline
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(
            labels,
            ["Start", "Pickup", "Fuel Stop", "Break Stop", "Dropoff", "End"]
        );
    }

    #[test]
    fn summary_formats_headline_figures() {
        let start = parse_timestamp("2024-03-04T08:00:00Z").unwrap();
        let route = RouteResult {
            total_distance: 183.6,
            total_duration: 6.5,
            estimated_start_time: start,
            estimated_delivery_time: parse_timestamp("2024-03-04T14:30:00Z").unwrap(),
            stops: trip(),
            segments: vec![],
            polyline: String::new(),
            logs: vec![],
        };
        let summary = TripSummary::from_route(&route);
        assert_eq!(summary.distance, "184 miles");
        assert_eq!(summary.duration, "6h 30m");
        assert_eq!(summary.estimated_start, "3/4/2024, 8:00:00 AM");
        assert_eq!(summary.estimated_delivery, "3/4/2024, 2:30:00 PM");
    }
}
