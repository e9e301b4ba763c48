use serde::Serialize;
use std::sync::Arc;

use crate::database::{StatsRepository, Table};
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct TableRowCount {
    pub table: Table,
    pub rows: i64,
}

/// Row counts for the allow-listed tables
pub struct StatisticsService {
    repository: Arc<dyn StatsRepository>,
}

impl StatisticsService {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Unknown names fail with `UnknownTable` before storage is touched
    pub async fn row_count(&self, table_name: &str) -> Result<TableRowCount, ServiceError> {
        let table: Table = table_name.parse()?;
        let rows = self.repository.count_rows(table).await?;
        Ok(TableRowCount { table, rows })
    }
}
