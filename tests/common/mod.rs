#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::Router;

use business_stats_api::app::{routes, AppState};
use business_stats_api::auth::{Role, TokenIssuer, TokenValidator};
use business_stats_api::database::{DatabaseError, EventCount, ProductInteractionRow, StatsRepository, Table};

pub const SECRET: &str = "integration-test-secret";

/// In-memory stand-in for the three business tables
#[derive(Default)]
pub struct FixtureRepository {
    /// (customer_id, type)
    pub customers: Vec<(i64, &'static str)>,
    /// (customer_id, event, period "MM-YYYY")
    pub interactions: Vec<(i64, &'static str, &'static str)>,
    /// (product, period "MM-YYYY")
    pub products: Vec<(&'static str, &'static str)>,
    pub unavailable: bool,
    queries: AtomicUsize,
}

impl FixtureRepository {
    /// Small data set shaped like the production tables
    pub fn sample() -> Self {
        Self {
            customers: vec![(1, "Red"), (2, "Orange"), (3, "Blue"), (4, "Red")],
            interactions: vec![
                (2, "Email", "01-2024"),
                (2, "Email", "01-2024"),
                (2, "Call", "02-2024"),
                (2, "Fax", "02-2024"),
                (3, "Bird", "01-2024"),
                (4, "Call", "02-2024"),
                (4, "Email", "03-2024"),
            ],
            products: vec![("Sand", "01-2024"), ("Stone", "02-2024")],
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::sample()
        }
    }

    pub fn with_products(mut self, products: Vec<(&'static str, &'static str)>) -> Self {
        self.products = products;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn query(&self) -> Result<(), DatabaseError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(DatabaseError::StorageUnavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for FixtureRepository {
    async fn customer_exists(&self, customer_id: i64) -> Result<bool, DatabaseError> {
        self.query()?;
        Ok(self.customers.iter().any(|(id, _)| *id == customer_id))
    }

    async fn count_interactions_by_event(&self, customer_id: i64) -> Result<Vec<EventCount>, DatabaseError> {
        self.query()?;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for (_, event, _) in self.interactions.iter().filter(|(id, _, _)| *id == customer_id) {
            *counts.entry(*event).or_default() += 1;
        }
        Ok(counts.into_iter().map(|(event, count)| EventCount::new(event, count)).collect())
    }

    async fn count_interactions_by_product_and_customer_type(
        &self,
    ) -> Result<Vec<ProductInteractionRow>, DatabaseError> {
        self.query()?;
        // BTreeMap keys give the (customer type, product) ordering of the SQL query
        let mut counts: BTreeMap<(&str, &str), i64> = BTreeMap::new();
        for (customer_id, _, period) in &self.interactions {
            let Some((_, customer_type)) = self.customers.iter().find(|(id, _)| id == customer_id) else {
                continue;
            };
            for (product, _) in self.products.iter().filter(|(_, p)| p == period) {
                *counts.entry((*customer_type, *product)).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|((customer_type, product), count)| ProductInteractionRow::new(customer_type, product, count))
            .collect())
    }

    async fn count_rows(&self, table: Table) -> Result<i64, DatabaseError> {
        self.query()?;
        let rows = match table {
            Table::Customers => self.customers.len(),
            Table::Products => self.products.len(),
            Table::Interactions => self.interactions.len(),
        };
        Ok(rows as i64)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.query()
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serves any router on a free local port for the lifetime of the test runtime
pub async fn serve(router: Router) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    })
}

/// Serves the application routes over the given repository
pub async fn spawn_app(repository: Arc<FixtureRepository>) -> Result<TestServer> {
    let state = AppState::new(repository, TokenValidator::new(Some(SECRET)));
    serve(routes(state)).await
}

pub fn token(role: &str) -> String {
    TokenIssuer::new(Some(SECRET))
        .and_then(|issuer| issuer.issue(&Role::new(role), None))
        .expect("token issuance")
}
