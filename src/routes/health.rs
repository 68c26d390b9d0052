use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
/// - **Response**: `{"status":"pong"}`
///
/// Used by load balancers and container health checks; does not touch the database.
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong" }))
}
