use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use crate::auth::Role;

/// GET /api/v1/user-access - any valid credential
pub async fn user_access(Extension(role): Extension<Role>) -> Json<Value> {
    Json(json!({
        "message": format!("Hello {}, you have access to this route!", role)
    }))
}

/// GET /api/v1/admin-access - admin role only
pub async fn admin_access(Extension(_role): Extension<Role>) -> Json<Value> {
    Json(json!({
        "message": "Hello Admin, you have full access to this route!"
    }))
}
