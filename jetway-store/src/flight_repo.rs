use async_trait::async_trait;
use chrono::NaiveDateTime;
use jetway_core::repository::FlightRepository;
use jetway_core::{Flight, FlightStatus};
use std::sync::Arc;
use tracing::debug;

use crate::database::ConnectionProvider;
use crate::error::{StoreError, StoreResult};

const FIND_ALL_SQL: &str = r#"
    SELECT id AS flight_id, flight_no, departure_date, departure_airport_code,
           arrival_date, arrival_airport_code, aircraft_id, status
    FROM flight
"#;

const FIND_BY_ID_SQL: &str = r#"
    SELECT id AS flight_id, flight_no, departure_date, departure_airport_code,
           arrival_date, arrival_airport_code, aircraft_id, status
    FROM flight
    WHERE id = $1
"#;

// Flight columns as they appear in a ticket join, so both queries share this row.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct FlightRow {
    pub(crate) flight_id: i64,
    pub(crate) flight_no: String,
    pub(crate) departure_date: NaiveDateTime,
    pub(crate) departure_airport_code: String,
    pub(crate) arrival_date: NaiveDateTime,
    pub(crate) arrival_airport_code: String,
    pub(crate) aircraft_id: i64,
    pub(crate) status: String,
}

impl TryFrom<FlightRow> for Flight {
    type Error = sqlx::Error;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<FlightStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Flight {
            id: row.flight_id,
            flight_no: row.flight_no,
            departure_date: row.departure_date,
            departure_airport_code: row.departure_airport_code,
            arrival_date: row.arrival_date,
            arrival_airport_code: row.arrival_airport_code,
            aircraft_id: row.aircraft_id,
            status,
        })
    }
}

pub struct PostgresFlightRepository {
    provider: Arc<dyn ConnectionProvider>,
}

impl PostgresFlightRepository {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    type Error = StoreError;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Flight>> {
        let mut conn = self.provider.acquire().await?;

        let row = sqlx::query_as::<_, FlightRow>(FIND_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        debug!("Flight lookup {}: found={}", id, row.is_some());
        Ok(row.map(Flight::try_from).transpose()?)
    }

    async fn find_all(&self) -> StoreResult<Vec<Flight>> {
        let mut conn = self.provider.acquire().await?;

        let rows = sqlx::query_as::<_, FlightRow>(FIND_ALL_SQL)
            .fetch_all(&mut *conn)
            .await?;

        let flights = rows
            .into_iter()
            .map(Flight::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(flights)
    }
}
