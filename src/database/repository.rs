use async_trait::async_trait;
use sqlx::PgPool;
use std::time::{Duration, Instant};

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{EventCount, ProductInteractionRow, Table};

const CUSTOMER_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM customers WHERE customer_id = $1)";

const INTERACTIONS_BY_EVENT: &str = r#"
    SELECT event, COUNT(*) AS count
    FROM interactions
    WHERE customers = $1
    AND event IS NOT NULL
    GROUP BY event
"#;

// Products are matched to interactions by calendar month: the product's
// period key equals the interaction start formatted as MM-YYYY.
const INTERACTIONS_BY_PRODUCT: &str = r#"
    SELECT c.type AS customer_type, p.product AS product, COUNT(*) AS interaction_count
    FROM customers c
    JOIN interactions i ON c.customer_id = i.customers
    JOIN products p ON to_char(i.date_start, 'MM-YYYY') = p.date
    GROUP BY c.type, p.product
    ORDER BY c.type, p.product
"#;

/// Narrow read operations over the customers, interactions and products tables
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn customer_exists(&self, customer_id: i64) -> Result<bool, DatabaseError>;

    /// Per-event counts for one customer; events without rows are absent
    async fn count_interactions_by_event(&self, customer_id: i64) -> Result<Vec<EventCount>, DatabaseError>;

    /// Ordered by customer type, then product name
    async fn count_interactions_by_product_and_customer_type(
        &self,
    ) -> Result<Vec<ProductInteractionRow>, DatabaseError>;

    async fn count_rows(&self, table: Table) -> Result<i64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgStatsRepository {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        let slow_query_threshold = config
            .enable_slow_query_warning
            .then(|| Duration::from_millis(config.slow_query_threshold_ms));

        Self {
            pool,
            slow_query_threshold,
        }
    }

    fn observe(&self, label: &str, started: Instant) {
        let elapsed = started.elapsed();
        match self.slow_query_threshold {
            Some(threshold) if elapsed > threshold => {
                tracing::warn!("Slow query {}: {}ms (threshold {}ms)", label, elapsed.as_millis(), threshold.as_millis());
            }
            _ => tracing::trace!("Query {} took {}ms", label, elapsed.as_millis()),
        }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn customer_exists(&self, customer_id: i64) -> Result<bool, DatabaseError> {
        let started = Instant::now();
        // Connection goes back to the pool when `conn` drops, on every path
        let mut conn = self.pool.acquire().await?;

        let exists: bool = sqlx::query_scalar(CUSTOMER_EXISTS)
            .bind(customer_id)
            .fetch_one(&mut *conn)
            .await?;

        self.observe("customer_exists", started);
        Ok(exists)
    }

    async fn count_interactions_by_event(&self, customer_id: i64) -> Result<Vec<EventCount>, DatabaseError> {
        let started = Instant::now();
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, EventCount>(INTERACTIONS_BY_EVENT)
            .bind(customer_id)
            .fetch_all(&mut *conn)
            .await?;

        self.observe("count_interactions_by_event", started);
        Ok(rows)
    }

    async fn count_interactions_by_product_and_customer_type(
        &self,
    ) -> Result<Vec<ProductInteractionRow>, DatabaseError> {
        let started = Instant::now();
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, ProductInteractionRow>(INTERACTIONS_BY_PRODUCT)
            .fetch_all(&mut *conn)
            .await?;

        self.observe("count_interactions_by_product_and_customer_type", started);
        Ok(rows)
    }

    async fn count_rows(&self, table: Table) -> Result<i64, DatabaseError> {
        let started = Instant::now();
        let mut conn = self.pool.acquire().await?;

        // `Table` only ever renders one of the fixed allow-listed identifiers
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.as_str());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;

        self.observe("count_rows", started);
        Ok(count)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
