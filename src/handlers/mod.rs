pub mod proxy;
pub mod status;

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "app": env!("CARGO_PKG_NAME"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::upstream::{self, SongCatalog};
    use crate::{build_router, AppState, Config};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Router over an in-memory database, proxying to `upstream_base_url`.
    pub async fn test_app(upstream_base_url: &str) -> Router {
        test_app_with(upstream_base_url, &[]).await
    }

    /// Same as [`test_app`], with extra environment settings applied.
    pub async fn test_app_with(upstream_base_url: &str, vars: &[(&str, &str)]) -> Router {
        let config: Config = envy::from_iter(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap();
        let http = upstream::http_client(&config).unwrap();
        let catalog = SongCatalog::new(http, upstream_base_url).unwrap();
        let state = Arc::new(AppState {
            db: crate::db::memory_pool().await,
            config,
            catalog,
        });
        build_router(state)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }
}
