pub mod filter;
pub mod flight;
pub mod repository;
pub mod ticket;

pub use filter::{FilterClause, FilterParam};
pub use flight::{Flight, FlightStatus};
pub use ticket::{Ticket, TicketFilter};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Unknown flight status: {0}")]
    UnknownFlightStatus(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
