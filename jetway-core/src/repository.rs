use async_trait::async_trait;

use crate::flight::Flight;
use crate::ticket::{Ticket, TicketFilter};

/// Repository trait for ticket data access.
///
/// Missing rows are not errors: lookups return `None` and writes that touch
/// nothing return `false`.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_all(&self) -> Result<Vec<Ticket>, Self::Error>;

    async fn list_filtered(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, Self::Error>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Ticket>, Self::Error>;

    /// Inserts the ticket and returns it carrying the generated id.
    async fn save(&self, ticket: Ticket) -> Result<Ticket, Self::Error>;

    async fn update(&self, ticket: &Ticket) -> Result<bool, Self::Error>;

    async fn delete(&self, id: i64) -> Result<bool, Self::Error>;
}

/// Repository trait for flight lookups
#[async_trait]
pub trait FlightRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, Self::Error>;

    async fn find_all(&self) -> Result<Vec<Flight>, Self::Error>;
}
