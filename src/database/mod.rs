pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{EventCount, ProductInteractionRow, Table};
pub use repository::{PgStatsRepository, StatsRepository};
