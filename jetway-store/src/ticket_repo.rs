use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::stream::{BoxStream, Stream};
use futures_util::TryStreamExt;
use jetway_core::repository::TicketRepository;
use jetway_core::{FilterClause, FilterParam, Flight, Ticket, TicketFilter};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::database::ConnectionProvider;
use crate::error::{StoreError, StoreResult};
use crate::flight_repo::FlightRow;

// Every read joins the flight so the ticket comes back with its flight resolved.
const FIND_ALL_SQL: &str = r#"
    SELECT t.id, t.passport_no, t.passenger_name, t.flight_id, t.seat_no, t.cost,
           f.flight_no, f.departure_date, f.departure_airport_code, f.arrival_date,
           f.arrival_airport_code, f.aircraft_id, f.status
    FROM ticket t
    JOIN flight f ON f.id = t.flight_id
"#;

const FIND_BY_ID_SQL: &str = r#"
    SELECT t.id, t.passport_no, t.passenger_name, t.flight_id, t.seat_no, t.cost,
           f.flight_no, f.departure_date, f.departure_airport_code, f.arrival_date,
           f.arrival_airport_code, f.aircraft_id, f.status
    FROM ticket t
    JOIN flight f ON f.id = t.flight_id
    WHERE t.id = $1
"#;

const SAVE_SQL: &str = r#"
    INSERT INTO ticket (passport_no, passenger_name, flight_id, seat_no, cost)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, cost
"#;

const UPDATE_SQL: &str = r#"
    UPDATE ticket
    SET passport_no = $1,
        passenger_name = $2,
        flight_id = $3,
        seat_no = $4,
        cost = $5
    WHERE id = $6
"#;

const DELETE_SQL: &str = "DELETE FROM ticket WHERE id = $1";

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i64,
    passport_no: String,
    passenger_name: String,
    seat_no: String,
    cost: Decimal,
    #[sqlx(flatten)]
    flight: FlightRow,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = sqlx::Error;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: Some(row.id),
            passport_no: row.passport_no,
            passenger_name: row.passenger_name,
            seat_no: row.seat_no,
            cost: row.cost,
            flight: Flight::try_from(row.flight)?,
        })
    }
}

pub struct PostgresTicketRepository {
    provider: Arc<dyn ConnectionProvider>,
}

impl PostgresTicketRepository {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// Streams every ticket, one mapped row at a time.
    pub fn stream_all(&self) -> BoxStream<'static, StoreResult<Ticket>> {
        Box::pin(ticket_stream(
            Arc::clone(&self.provider),
            FIND_ALL_SQL.to_string(),
            Vec::new(),
        ))
    }

    /// Streams the tickets matching `filter`, one mapped row at a time.
    ///
    /// The stream owns its connection and cursor and releases both once it is
    /// exhausted or dropped, whichever comes first.
    pub fn stream_filtered(&self, filter: &TicketFilter) -> BoxStream<'static, StoreResult<Ticket>> {
        let clause = FilterClause::from_filter(filter);
        let sql = clause.apply(FIND_ALL_SQL);
        debug!("Ticket listing with filter: {}", clause.sql().trim());

        Box::pin(ticket_stream(
            Arc::clone(&self.provider),
            sql,
            clause.into_params(),
        ))
    }
}

fn ticket_stream(
    provider: Arc<dyn ConnectionProvider>,
    sql: String,
    params: Vec<FilterParam>,
) -> impl Stream<Item = StoreResult<Ticket>> + Send + 'static {
    try_stream! {
        let mut conn = provider.acquire().await?;

        let mut query = sqlx::query_as::<_, TicketRow>(&sql);
        for param in params {
            query = match param {
                FilterParam::Text(value) => query.bind(value),
                FilterParam::Integer(value) => query.bind(value),
            };
        }

        let mut rows = query.fetch(&mut *conn);
        while let Some(row) = rows.try_next().await? {
            yield Ticket::try_from(row)?;
        }
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    type Error = StoreError;

    async fn list_all(&self) -> StoreResult<Vec<Ticket>> {
        self.stream_all().try_collect().await
    }

    async fn list_filtered(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        self.stream_filtered(filter).try_collect().await
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Ticket>> {
        let mut conn = self.provider.acquire().await?;

        let row = sqlx::query_as::<_, TicketRow>(FIND_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        debug!("Ticket lookup {}: found={}", id, row.is_some());
        Ok(row.map(Ticket::try_from).transpose()?)
    }

    async fn save(&self, mut ticket: Ticket) -> StoreResult<Ticket> {
        let mut conn = self.provider.acquire().await?;

        // The stored cost is written back so the result matches a later read.
        let (id, cost) = sqlx::query_as::<_, (i64, Decimal)>(SAVE_SQL)
            .bind(&ticket.passport_no)
            .bind(&ticket.passenger_name)
            .bind(ticket.flight_id())
            .bind(&ticket.seat_no)
            .bind(ticket.cost)
            .fetch_one(&mut *conn)
            .await?;

        ticket.id = Some(id);
        ticket.cost = cost;
        info!("Ticket {} saved for flight {}", id, ticket.flight_id());
        Ok(ticket)
    }

    async fn update(&self, ticket: &Ticket) -> StoreResult<bool> {
        let Some(id) = ticket.id else {
            debug!("Skipping update of unsaved ticket");
            return Ok(false);
        };

        let mut conn = self.provider.acquire().await?;

        let result = sqlx::query(UPDATE_SQL)
            .bind(&ticket.passport_no)
            .bind(&ticket.passenger_name)
            .bind(ticket.flight_id())
            .bind(&ticket.seat_no)
            .bind(ticket.cost)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        debug!("Ticket {} update touched {} row(s)", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut conn = self.provider.acquire().await?;

        let result = sqlx::query(DELETE_SQL)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        debug!("Ticket {} delete touched {} row(s)", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}
