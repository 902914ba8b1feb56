use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Operational status of a flight, stored as upper-case text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Scheduled,
    Departed,
    Arrived,
    Cancelled,
    Delayed,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "SCHEDULED",
            FlightStatus::Departed => "DEPARTED",
            FlightStatus::Arrived => "ARRIVED",
            FlightStatus::Cancelled => "CANCELLED",
            FlightStatus::Delayed => "DELAYED",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => Ok(FlightStatus::Scheduled),
            "DEPARTED" => Ok(FlightStatus::Departed),
            "ARRIVED" => Ok(FlightStatus::Arrived),
            "CANCELLED" => Ok(FlightStatus::Cancelled),
            "DELAYED" => Ok(FlightStatus::Delayed),
            _ => Err(CoreError::UnknownFlightStatus(s.to_string())),
        }
    }
}

/// A scheduled journey between two airports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flight {
    pub id: i64,
    pub flight_no: String,
    pub departure_date: NaiveDateTime,
    pub departure_airport_code: String,
    pub arrival_date: NaiveDateTime,
    pub arrival_airport_code: String,
    pub aircraft_id: i64,
    pub status: FlightStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("arrived".parse::<FlightStatus>().unwrap(), FlightStatus::Arrived);
        assert_eq!(" Delayed ".parse::<FlightStatus>().unwrap(), FlightStatus::Delayed);
        assert_eq!("CANCELLED".parse::<FlightStatus>().unwrap(), FlightStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "BOARDING".parse::<FlightStatus>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownFlightStatus(ref s) if s == "BOARDING"));
    }

    #[test]
    fn test_status_display_round_trips() {
        for status in [
            FlightStatus::Scheduled,
            FlightStatus::Departed,
            FlightStatus::Arrived,
            FlightStatus::Cancelled,
            FlightStatus::Delayed,
        ] {
            assert_eq!(status.to_string().parse::<FlightStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&FlightStatus::Scheduled).unwrap();
        assert_eq!(json, "\"SCHEDULED\"");
    }
}
