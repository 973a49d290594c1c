use crate::models::{StatusCheck, StatusCheckCreate};
use crate::{db, AppState, Result};
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn create_status_check(
    State(state): State<Arc<AppState>>,
    Json(input): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>> {
    let check = StatusCheck::new(input.client_name);
    db::insert_status_check(&state.db, &check).await?;

    tracing::info!("Recorded status check {} for {}", check.id, check.client_name);
    Ok(Json(check))
}

pub async fn list_status_checks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatusCheck>>> {
    let checks = db::list_status_checks(&state.db).await?;
    Ok(Json(checks))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{get, send, test_app};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use std::collections::HashSet;

    async fn create(app: &Router, body: Value) -> (StatusCode, Value) {
        send(
            app,
            Request::post("/api/status")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = test_app("http://127.0.0.1:9").await;

        let before = Utc::now();
        let (status, created) = create(&app, json!({ "client_name": "alice" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["client_name"], "alice");
        assert!(!created["id"].as_str().unwrap().is_empty());

        let timestamp: DateTime<Utc> = created["timestamp"].as_str().unwrap().parse().unwrap();
        assert!((timestamp - before).num_seconds().abs() < 5);

        let (status, listed) = get(&app, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = test_app("http://127.0.0.1:9").await;
        let (status, listed) = get(&app, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_many_records_have_distinct_ids() {
        let app = test_app("http://127.0.0.1:9").await;
        for i in 0..25 {
            let (status, _) = create(&app, json!({ "client_name": format!("client-{}", i) })).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, listed) = get(&app, "/api/status").await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 25);

        let ids: HashSet<&str> = listed.iter().map(|c| c["id"].as_str().unwrap()).collect();
        assert_eq!(ids.len(), 25);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_body() {
        let app = test_app("http://127.0.0.1:9").await;

        let (status, _) = create(&app, json!({ "name": "alice" })).await;
        assert!(status.is_client_error());

        let (status, _) = create(&app, json!({ "client_name": 42 })).await;
        assert!(status.is_client_error());

        let (_, listed) = get(&app, "/api/status").await;
        assert_eq!(listed, json!([]));
    }
}
