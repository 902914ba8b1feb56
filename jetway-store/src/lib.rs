pub mod app_config;
pub mod database;
pub mod error;
pub mod flight_repo;
pub mod ticket_repo;

pub use database::{ConnectionProvider, DbClient};
pub use error::{StoreError, StoreResult};
pub use flight_repo::PostgresFlightRepository;
pub use ticket_repo::PostgresTicketRepository;
