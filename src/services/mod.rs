pub mod channel;
pub mod interactions_service;
pub mod statistics_service;

use thiserror::Error;

use crate::database::DatabaseError;

pub use channel::{Channel, ChannelCounts};
pub use interactions_service::{CustomerSummary, CustomerTypeProducts, InteractionsService, ProductCount};
pub use statistics_service::{StatisticsService, TableRowCount};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Customer with id {0} not found")]
    CustomerNotFound(i64),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
