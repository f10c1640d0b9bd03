//! Saved-thread page source

use std::path::PathBuf;

use async_trait::async_trait;
use modtool_application::{Page, PageSource, PageSourceError};

use crate::forum::extract::parse_page;

/// Serves a thread saved to disk as a single page.
///
/// Offset 0 yields every post in the file; any later offset yields an
/// empty page so the scan stops there.
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn fetch_page(&self, start: u32) -> Result<Page, PageSourceError> {
        if start > 0 {
            return Ok(Page::default());
        }
        let html = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| {
                PageSourceError::Unreadable(format!("{}: {}", self.path.display(), e))
            })?;
        Ok(parse_page(&html))
    }
}
