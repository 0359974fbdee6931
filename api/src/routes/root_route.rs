use axum::Json;
use serde_json::{Value, json};

pub async fn root_route() -> Json<Value> {
    Json(json!({ "message": "Welcome to the storefront assistant API" }))
}
