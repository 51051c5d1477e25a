//! Text formatting shared by the itinerary, map popups and log sheets.

use chrono::NaiveDate;
use shared::Timestamp;

/// `Hh Mm`, minutes rounded; 60 rounded minutes carry into the hour.
pub fn duration(hours: f64) -> String {
    let hours = hours.max(0.0);
    let mut whole = hours.floor() as u64;
    let mut minutes = ((hours - hours.floor()) * 60.0).round() as u64;
    if minutes == 60 {
        whole += 1;
        minutes = 0;
    }
    format!("{whole}h {minutes}m")
}

/// `M/D/YYYY, h:mm:ss AM`, in the timestamp's own offset.
pub fn date_time(ts: &Timestamp) -> String {
    ts.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// `Mon, Mar 4, 2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// `3/4/2024`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
