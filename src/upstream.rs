//! Client for the third-party song catalog.
//!
//! The catalog does not send CORS headers, so the frontend reaches it through
//! the `/api/proxy` routes. Bodies are decoded as JSON and handed back as-is.

use reqwest::Url;
use serde_json::Value;

use crate::config::Config;
use crate::models::SongListQuery;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Pooled client shared by every proxied request. A stalled upstream is cut
/// off after `UPSTREAM_TIMEOUT_SECS` and answered with the failure envelope.
pub fn http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.upstream_timeout())
        .build()
}

#[derive(Clone, Debug)]
pub struct SongCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl SongCatalog {
    pub fn new(http: reqwest::Client, base_url: &str) -> anyhow::Result<Self> {
        // Reject garbage early instead of on the first proxied request.
        Url::parse(base_url)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_songs(&self, query: &SongListQuery) -> Result<Value, reqwest::Error> {
        let url = format!("{}/songs", self.base_url);
        self.get_json("songs", &url, &query.upstream_params()).await
    }

    pub async fn song_detail(&self, song_id: i64) -> Result<Value, reqwest::Error> {
        let url = format!("{}/songs/view/{}", self.base_url, song_id);
        self.get_json("song detail", &url, &[]).await
    }

    pub async fn song_types(&self) -> Result<Value, reqwest::Error> {
        let url = format!("{}/songs/types", self.base_url);
        self.get_json("song types", &url, &[]).await
    }

    pub async fn song_topics(&self) -> Result<Value, reqwest::Error> {
        let url = format!("{}/songs/topics", self.base_url);
        self.get_json("song topics", &url, &[]).await
    }

    pub async fn song_count(&self) -> Result<Value, reqwest::Error> {
        let url = format!("{}/songs/count", self.base_url);
        self.get_json("song count", &url, &[]).await
    }

    async fn get_json(
        &self,
        operation: &str,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, reqwest::Error> {
        tracing::debug!("Proxying {} request to {}", operation, url);

        let result = self.fetch(url, params).await;
        if let Err(e) = &result {
            tracing::error!("Error proxying {} API: {}", operation, e);
        }
        result
    }

    async fn fetch(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, reqwest::Error> {
        let response = self.http.get(url).query(params).send().await?;
        // The upstream status is not propagated; whatever JSON it sent is the answer.
        response.json().await
    }
}
