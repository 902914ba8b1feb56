use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

use crate::flight::Flight;
use crate::{CoreError, CoreResult};

/// A passenger's booking on a single flight.
///
/// `id` stays `None` until the ticket has been saved; the store assigns it.
/// The flight is always carried fully resolved, its id is the foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: Option<i64>,
    pub passport_no: String,
    pub passenger_name: String,
    pub seat_no: String,
    pub cost: Decimal,
    pub flight: Flight,
}

impl Ticket {
    /// Builds an unsaved ticket. Cost must not be negative.
    pub fn new(
        passport_no: impl Into<String>,
        passenger_name: impl Into<String>,
        seat_no: impl Into<String>,
        cost: Decimal,
        flight: Flight,
    ) -> CoreResult<Self> {
        if cost < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "ticket cost must not be negative, got {}",
                cost
            )));
        }

        Ok(Self {
            id: None,
            passport_no: passport_no.into(),
            passenger_name: passenger_name.into(),
            seat_no: seat_no.into(),
            cost,
            flight,
        })
    }

    pub fn flight_id(&self) -> i64 {
        self.flight.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Optional equality constraints plus mandatory pagination for ticket listings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketFilter {
    pub passenger_name: Option<String>,
    pub seat_no: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl TicketFilter {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            passenger_name: None,
            seat_no: None,
            limit,
            offset,
        }
    }

    pub fn with_passenger_name(mut self, passenger_name: impl Into<String>) -> Self {
        self.passenger_name = Some(passenger_name.into());
        self
    }

    pub fn with_seat_no(mut self, seat_no: impl Into<String>) -> Self {
        self.seat_no = Some(seat_no.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::FlightStatus;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn flight() -> Flight {
        let day = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        Flight {
            id: 7,
            flight_no: "MN3002".to_string(),
            departure_date: day.and_hms_opt(8, 30, 0).unwrap(),
            departure_airport_code: "MNK".to_string(),
            arrival_date: day.and_hms_opt(11, 5, 0).unwrap(),
            arrival_airport_code: "LDN".to_string(),
            aircraft_id: 1,
            status: FlightStatus::Scheduled,
        }
    }

    #[test]
    fn test_new_ticket_is_unsaved() {
        let ticket = Ticket::new("112233", "Ivan Ivanov", "5A", Decimal::from(120), flight()).unwrap();
        assert_eq!(ticket.id, None);
        assert!(!ticket.is_persisted());
        assert_eq!(ticket.flight_id(), 7);
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let cost = Decimal::from_str("-0.01").unwrap();
        let err = Ticket::new("112233", "Ivan Ivanov", "5A", cost, flight()).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn test_zero_cost_is_accepted() {
        let ticket = Ticket::new("112233", "Ivan Ivanov", "5A", Decimal::ZERO, flight());
        assert!(ticket.is_ok());
    }

    #[test]
    fn test_filter_builders() {
        let filter = TicketFilter::new(5, 10).with_seat_no("5A");
        assert_eq!(filter.passenger_name, None);
        assert_eq!(filter.seat_no.as_deref(), Some("5A"));
        assert_eq!((filter.limit, filter.offset), (5, 10));
    }

    #[test]
    fn test_ticket_deserialization() {
        let json = r#"
            {
                "id": null,
                "passport_no": "AB1234",
                "passenger_name": "Anna Petrova",
                "seat_no": "12C",
                "cost": "199.90",
                "flight": {
                    "id": 7,
                    "flight_no": "MN3002",
                    "departure_date": "2024-12-25T08:30:00",
                    "departure_airport_code": "MNK",
                    "arrival_date": "2024-12-25T11:05:00",
                    "arrival_airport_code": "LDN",
                    "aircraft_id": 1,
                    "status": "SCHEDULED"
                }
            }
        "#;
        let ticket: Ticket = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(ticket.cost, Decimal::from_str("199.90").unwrap());
        assert_eq!(ticket.flight, flight());
    }
}
