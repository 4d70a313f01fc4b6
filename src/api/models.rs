use std::collections::HashMap;

use serde::Deserialize;

/// Standard response envelope of the Ani Updater backend.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: Option<String>,
    pub message: Option<String>,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

/// One tracked anime and its latest update.
#[derive(Debug, Clone, Deserialize)]
pub struct Ani {
    pub id: i64,
    pub title: String,
    pub update_count: String,
    pub detail_url: String,
    pub image_url: String,
    pub update_info: String,
    pub update_time: i64,
    pub update_time_str: String,
    pub platform: String,
}

/// An aggregated news digest: items grouped by category.
#[derive(Debug, Clone, Deserialize)]
pub struct News {
    pub id: i64,
    #[serde(rename = "newsFrom")]
    pub news_from: String,
    #[serde(rename = "newsDate")]
    pub news_date: String,
    pub data: HashMap<String, Vec<NewsItem>>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledTask {
    pub name: String,
    pub cron: String,
    pub params: serde_json::Value,
    pub is_enabled: bool,
    pub retry_times: u32,
    pub last_run: Option<String>,
    pub next_run: Option<String>,
    pub last_status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AniQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub title: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub news_from: Option<String>,
    pub news_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduledTaskQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub name: Option<String>,
}
