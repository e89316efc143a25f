//! Route handlers.

pub mod admin;
pub mod daily_bread;
pub mod events;

use axum::Json;
use serde_json::{Value, json};

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
