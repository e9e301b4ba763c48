use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::database::{EventCount, ProductInteractionRow, StatsRepository};
use crate::services::channel::{Channel, ChannelCounts};
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummary {
    pub customer_id: i64,
    pub interactions: ChannelCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCount {
    pub product: Option<String>,
    pub interaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerTypeProducts {
    pub customer_type: Option<String>,
    pub products: Vec<ProductCount>,
}

/// Per-customer and per-product interaction statistics
pub struct InteractionsService {
    repository: Arc<dyn StatsRepository>,
}

impl InteractionsService {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Channel counts for one customer. An unknown customer is `NotFound`,
    /// a known customer without interactions gets all zeros.
    pub async fn customer_summary(&self, customer_id: i64) -> Result<CustomerSummary, ServiceError> {
        if !self.repository.customer_exists(customer_id).await? {
            return Err(ServiceError::CustomerNotFound(customer_id));
        }

        let counts = self.repository.count_interactions_by_event(customer_id).await?;

        Ok(CustomerSummary {
            customer_id,
            interactions: summarize_channels(&counts),
        })
    }

    pub async fn interactions_by_product(&self) -> Result<Vec<CustomerTypeProducts>, ServiceError> {
        let rows = self
            .repository
            .count_interactions_by_product_and_customer_type()
            .await?;

        Ok(group_by_customer_type(rows))
    }
}

/// Zero-filled channel counts, overwritten by recognised events
pub fn summarize_channels(counts: &[EventCount]) -> ChannelCounts {
    let mut summary = ChannelCounts::default();
    for EventCount { event, count } in counts {
        match Channel::from_event(event) {
            Some(channel) => summary.set(channel, *count),
            None => tracing::debug!("Ignoring interactions on unrecognised channel '{}'", event),
        }
    }
    summary
}

/// Folds ordered rows into one entry per customer type, keeping storage order
/// across groups and within each group's product list.
pub fn group_by_customer_type(rows: Vec<ProductInteractionRow>) -> Vec<CustomerTypeProducts> {
    let mut groups: Vec<CustomerTypeProducts> = Vec::new();
    let mut positions: HashMap<Option<String>, usize> = HashMap::new();

    for row in rows {
        let product = ProductCount {
            product: row.product,
            interaction_count: row.interaction_count,
        };

        // A type seen earlier rejoins its first group instead of opening a second one
        let index = match positions.get(&row.customer_type) {
            Some(&index) => index,
            None => {
                positions.insert(row.customer_type.clone(), groups.len());
                groups.push(CustomerTypeProducts {
                    customer_type: row.customer_type,
                    products: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].products.push(product);
    }

    groups
}
