use axum::extract::{Extension, Path, State};

use crate::app::AppState;
use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::{ApiResult, DataResponse};
use crate::services::{CustomerSummary, CustomerTypeProducts};

/// GET /api/v1/interactions/:customer_id - channel counts for one customer
pub async fn customer_interactions(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> ApiResult<CustomerSummary> {
    let customer_id = parse_customer_id(&customer_id).ok_or_else(|| ApiError::customer_not_found(&customer_id))?;

    let summary = state.interactions.customer_summary(customer_id).await?;
    Ok(DataResponse::new(summary))
}

/// GET /api/v1/interactions/products - interaction counts per product, grouped by customer type
pub async fn interactions_per_product(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
) -> ApiResult<Vec<CustomerTypeProducts>> {
    tracing::debug!("Product interaction report requested by role '{}'", role);
    let groups = state.interactions.interactions_by_product().await?;
    Ok(DataResponse::new(groups))
}

/// Only unsigned decimal ids name a customer; signs, spaces and anything
/// else are reported like an unknown id.
fn parse_customer_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
