//! Typed endpoints of the Ani Updater backend. Thin consumers of the
//! authenticated pipeline: they see either decoded page data or a final
//! error, never the refresh machinery underneath.

pub mod models;

use crate::client::error::ApiError;
use crate::client::request::ApiRequest;
use crate::client::ApiClient;

pub use models::{
    Ani, AniQuery, ApiEnvelope, News, NewsItem, NewsQuery, PageData, ScheduledTask,
    ScheduledTaskQuery,
};

fn paged(mut req: ApiRequest, page: Option<u64>, page_size: Option<u64>) -> ApiRequest {
    if let Some(page) = page {
        req = req.query("page", page.to_string());
    }
    if let Some(page_size) = page_size {
        req = req.query("page_size", page_size.to_string());
    }
    req
}

impl ApiClient {
    pub async fn list_anis(&self, query: &AniQuery) -> Result<PageData<Ani>, ApiError> {
        let mut req = paged(ApiRequest::get("/api/anis"), query.page, query.page_size);
        if let Some(title) = &query.title {
            req = req.query("title", title);
        }
        if let Some(platform) = &query.platform {
            req = req.query("platform", platform);
        }
        let envelope: ApiEnvelope<PageData<Ani>> = self.request(req).await?.json()?;
        Ok(envelope.data)
    }

    pub async fn list_news(&self, query: &NewsQuery) -> Result<PageData<News>, ApiError> {
        let mut req = paged(ApiRequest::get("/api/news"), query.page, query.page_size);
        if let Some(news_from) = &query.news_from {
            req = req.query("newsFrom", news_from);
        }
        if let Some(news_date) = &query.news_date {
            req = req.query("newsDate", news_date);
        }
        let envelope: ApiEnvelope<PageData<News>> = self.request(req).await?.json()?;
        Ok(envelope.data)
    }

    pub async fn list_scheduled_tasks(
        &self,
        query: &ScheduledTaskQuery,
    ) -> Result<PageData<ScheduledTask>, ApiError> {
        let mut req = paged(
            ApiRequest::get("/api/scheduledTasks"),
            query.page,
            query.page_size,
        );
        if let Some(name) = &query.name {
            req = req.query("name", name);
        }
        let envelope: ApiEnvelope<PageData<ScheduledTask>> = self.request(req).await?.json()?;
        Ok(envelope.data)
    }
}
