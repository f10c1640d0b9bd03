//! Live phpBB thread client

use async_trait::async_trait;
use modtool_application::{Page, PageSource, PageSourceError};
use tracing::debug;

use crate::forum::extract::parse_page;

/// Fetches thread pages from a live phpBB board.
///
/// Pagination rides on the board's `ppp` (posts per page) and `start`
/// query parameters. Of the thread URL's own parameters only `t` and `f`
/// are kept; session tokens like `sid` are dropped.
#[derive(Debug)]
pub struct ForumClient {
    client: reqwest::Client,
    base_url: String,
    query: Vec<(String, String)>,
    page_size: u32,
}

impl ForumClient {
    /// Build a client from a full thread URL
    /// (`https://board.example/viewtopic.php?f=53&t=12345`).
    pub fn from_url(url: &str, page_size: u32, user_agent: &str) -> Result<Self, PageSourceError> {
        let (base_url, raw_query) = url.split_once('?').ok_or_else(|| {
            PageSourceError::Unreadable(format!("'{}' has no thread query string", url))
        })?;

        let query: Vec<(String, String)> = raw_query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(key, _)| *key == "t" || *key == "f")
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        if !query.iter().any(|(key, _)| key == "t") {
            return Err(PageSourceError::Unreadable(format!(
                "'{}' has no thread id (t=) parameter",
                url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| PageSourceError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            query,
            page_size,
        })
    }
}

#[async_trait]
impl PageSource for ForumClient {
    async fn fetch_page(&self, start: u32) -> Result<Page, PageSourceError> {
        let mut query = self.query.clone();
        query.push(("ppp".to_string(), self.page_size.to_string()));
        if start > 0 {
            query.push(("start".to_string(), start.to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| PageSourceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageSourceError::BadStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PageSourceError::RequestFailed(e.to_string()))?;

        let page = parse_page(&body);
        debug!(start, posts = page.posts.len(), "fetched thread page");
        Ok(page)
    }
}
