use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// Build a fresh record with a random id and the current UTC time.
    pub fn new(client_name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

fn default_sort_order() -> String {
    "asc".to_string()
}

/// Query string accepted by the song listing proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct SongListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
    pub sort_by_2: Option<String>,
    #[serde(default = "default_sort_order")]
    pub sort_order_2: String,
}

impl Default for SongListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            search: None,
            sort_by: None,
            sort_order: default_sort_order(),
            sort_by_2: None,
            sort_order_2: default_sort_order(),
        }
    }
}

impl SongListQuery {
    /// Parameters forwarded upstream. `page` and `per_page` are always sent;
    /// each sort key travels together with its order, and only when set.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];

        if let Some(search) = non_empty(&self.search) {
            params.push(("search", search.to_string()));
        }
        if let Some(sort_by) = non_empty(&self.sort_by) {
            params.push(("sort_by", sort_by.to_string()));
            params.push(("sort_order", self.sort_order.clone()));
        }
        if let Some(sort_by_2) = non_empty(&self.sort_by_2) {
            params.push(("sort_by_2", sort_by_2.to_string()));
            params.push(("sort_order_2", self.sort_order_2.clone()));
        }

        params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Body returned (with 200) when the song catalog cannot be reached or
/// answers with something that is not JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyFailure {
    pub success: bool,
    pub error: String,
}

impl ProxyFailure {
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
        }
    }
}
