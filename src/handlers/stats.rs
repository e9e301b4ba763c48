use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/stats/:table_name - number of rows in an allow-listed table
pub async fn table_count(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let count = state.statistics.row_count(&table_name).await?;

    Ok(Json(json!({
        "message": "Number of Rows",
        "rows": count.rows,
    })))
}
