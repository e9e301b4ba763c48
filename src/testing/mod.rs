use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::database::{DatabaseError, EventCount, ProductInteractionRow, StatsRepository, Table};

/// In-memory repository that records how often each operation is called
#[derive(Default)]
pub struct SpyRepository {
    customers: HashSet<i64>,
    events: HashMap<i64, Vec<EventCount>>,
    product_rows: Vec<ProductInteractionRow>,
    row_counts: HashMap<Table, i64>,
    fail: bool,
    customer_exists_calls: AtomicUsize,
    event_count_calls: AtomicUsize,
    product_calls: AtomicUsize,
    count_rows_calls: AtomicUsize,
}

impl SpyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer_id: i64) -> Self {
        self.customers.insert(customer_id);
        self
    }

    pub fn with_events(mut self, customer_id: i64, events: Vec<EventCount>) -> Self {
        self.events.insert(customer_id, events);
        self
    }

    pub fn with_product_rows(mut self, rows: Vec<ProductInteractionRow>) -> Self {
        self.product_rows = rows;
        self
    }

    pub fn with_rows(mut self, table: Table, rows: i64) -> Self {
        self.row_counts.insert(table, rows);
        self
    }

    /// Every query after the existence check fails as if the database went away
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn event_count_calls(&self) -> usize {
        self.event_count_calls.load(Ordering::SeqCst)
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn count_rows_calls(&self) -> usize {
        self.count_rows_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.customer_exists_calls.load(Ordering::SeqCst)
            + self.event_count_calls()
            + self.product_calls()
            + self.count_rows_calls()
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.fail {
            return Err(DatabaseError::StorageUnavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for SpyRepository {
    async fn customer_exists(&self, customer_id: i64) -> Result<bool, DatabaseError> {
        self.customer_exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.customers.contains(&customer_id))
    }

    async fn count_interactions_by_event(&self, customer_id: i64) -> Result<Vec<EventCount>, DatabaseError> {
        self.event_count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.events.get(&customer_id).cloned().unwrap_or_default())
    }

    async fn count_interactions_by_product_and_customer_type(
        &self,
    ) -> Result<Vec<ProductInteractionRow>, DatabaseError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.product_rows.clone())
    }

    async fn count_rows(&self, table: Table) -> Result<i64, DatabaseError> {
        self.count_rows_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.row_counts.get(&table).copied().unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}
