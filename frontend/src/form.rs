//! Trip form state and the local validation that gates submission.

use std::collections::BTreeMap;

use shared::{MAX_CYCLE_HOURS, TripRequest};

pub const GEOCODE_FAILED_MESSAGE: &str =
    "Address could not be found. Please enter a valid location.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CurrentLocation,
    PickupLocation,
    DropoffLocation,
    CycleHours,
}

impl Field {
    pub const LOCATIONS: [Self; 3] = [
        Self::CurrentLocation,
        Self::PickupLocation,
        Self::DropoffLocation,
    ];

    pub fn is_location(self) -> bool {
        !matches!(self, Self::CycleHours)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CurrentLocation => "current_location",
            Self::PickupLocation => "pickup_location",
            Self::DropoffLocation => "dropoff_location",
            Self::CycleHours => "current_cycle_hours",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentLocation => "Current Location",
            Self::PickupLocation => "Pickup Location",
            Self::DropoffLocation => "Dropoff Location",
            Self::CycleHours => "Current Cycle Hours Used (0-70)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::CurrentLocation => "Enter current location",
            Self::PickupLocation => "Enter pickup location",
            Self::DropoffLocation => "Enter dropoff location",
            Self::CycleHours => "Enter hours used in current cycle",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Self::CurrentLocation => "Current location is required",
            Self::PickupLocation => "Pickup location is required",
            Self::DropoffLocation => "Dropoff location is required",
            Self::CycleHours => CYCLE_HOURS_MESSAGE,
        }
    }
}

const CYCLE_HOURS_MESSAGE: &str = "Cycle hours must be between 0 and 70";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripForm {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: String,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            current_location: String::new(),
            pickup_location: String::new(),
            dropoff_location: String::new(),
            current_cycle_hours: "0".into(),
        }
    }
}

impl TripForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::CurrentLocation => &self.current_location,
            Field::PickupLocation => &self.pickup_location,
            Field::DropoffLocation => &self.dropoff_location,
            Field::CycleHours => &self.current_cycle_hours,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::CurrentLocation => &mut self.current_location,
            Field::PickupLocation => &mut self.pickup_location,
            Field::DropoffLocation => &mut self.dropoff_location,
            Field::CycleHours => &mut self.current_cycle_hours,
        };
        *slot = value;
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<TripRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        for field in Field::LOCATIONS {
            if self.value(field).trim().is_empty() {
                errors.insert(field, field.required_message());
            }
        }

        let hours = parse_cycle_hours(&self.current_cycle_hours);
        if hours.is_none() {
            errors.insert(Field::CycleHours, CYCLE_HOURS_MESSAGE);
        }

        match hours {
            Some(current_cycle_hours) if errors.is_empty() => Ok(TripRequest {
                current_location: self.current_location.trim().to_string(),
                pickup_location: self.pickup_location.trim().to_string(),
                dropoff_location: self.dropoff_location.trim().to_string(),
                current_cycle_hours,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_cycle_hours(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| (0.0..=MAX_CYCLE_HOURS).contains(hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(hours: &str) -> TripForm {
        TripForm {
            current_location: "Chicago, IL".into(),
            pickup_location: "Chicago, IL".into(),
            dropoff_location: "Indianapolis, IN".into(),
            current_cycle_hours: hours.into(),
        }
    }

    #[test]
    fn accepts_the_cycle_limit() {
        let request = filled("70").validate().unwrap();
        assert_eq!(request.current_cycle_hours, 70.0);
        assert!(filled("0").validate().is_ok());
        assert!(filled(" 10.5 ").validate().is_ok());
    }

    #[test]
    fn rejects_hours_outside_the_cycle() {
        for raw in ["70.01", "-0.01", "", "ten", "NaN", "inf"] {
            let errors = filled(raw).validate().unwrap_err();
            assert_eq!(errors.len(), 1, "{raw}");
            assert_eq!(
                errors.get(Field::CycleHours),
                Some("Cycle hours must be between 0 and 70")
            );
        }
    }

    #[test]
    fn reports_each_missing_location() {
        let form = TripForm {
            current_location: "  ".into(),
            dropoff_location: String::new(),
            ..filled("12")
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::CurrentLocation),
            Some("Current location is required")
        );
        assert_eq!(
            errors.get(Field::DropoffLocation),
            Some("Dropoff location is required")
        );
        assert_eq!(errors.get(Field::PickupLocation), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn empty_form_fails_every_location() {
        let mut form = TripForm::default();
        assert_eq!(form.value(Field::CycleHours), "0");
        assert_eq!(form.validate().unwrap_err().len(), 3);
        form.set(Field::CycleHours, "71".into());
        assert_eq!(form.validate().unwrap_err().len(), 4);
    }

    #[test]
    fn trims_submitted_locations() {
        let mut form = filled("5");
        form.set(Field::PickupLocation, "  Gary, IN ".into());
        assert_eq!(form.validate().unwrap().pickup_location, "Gary, IN");
    }
}
