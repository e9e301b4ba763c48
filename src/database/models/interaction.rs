use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of interactions a customer had on one event/channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventCount {
    pub event: String,
    pub count: i64,
}

impl EventCount {
    pub fn new(event: impl Into<String>, count: i64) -> Self {
        Self {
            event: event.into(),
            count,
        }
    }
}

/// One group of the customer-type x product aggregation. Either key may be
/// NULL in storage and is reported as such.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductInteractionRow {
    pub customer_type: Option<String>,
    pub product: Option<String>,
    pub interaction_count: i64,
}

impl ProductInteractionRow {
    pub fn new(customer_type: impl Into<String>, product: impl Into<String>, interaction_count: i64) -> Self {
        Self {
            customer_type: Some(customer_type.into()),
            product: Some(product.into()),
            interaction_count,
        }
    }
}
