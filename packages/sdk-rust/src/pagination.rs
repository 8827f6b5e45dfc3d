//! Cursor pagination
//!
//! List endpoints return at most `limit` records. When more are available the
//! response carries a `cb-after` header whose value is sent back as the
//! `after` query parameter to fetch the next (older) page.

use crate::client::ExchangeClient;
use crate::error::SdkResult;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Response header carrying the cursor of the next page
pub const CURSOR_HEADER: &str = "cb-after";

/// Lazy sequence of pages for one paginated call
///
/// Each call on [`ExchangeClient`] returns a fresh `Pages` starting at the
/// newest record; nothing is fetched until [`Pages::next_page`] is awaited.
pub struct Pages<T> {
    client: ExchangeClient,
    path: String,
    query: Vec<(String, String)>,
    cursor: Option<String>,
    finished: bool,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> Pages<T> {
    pub(crate) fn new(client: ExchangeClient, path: String, query: Vec<(String, String)>) -> Self {
        Self {
            client,
            path,
            query,
            cursor: None,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Fetch the next page, or `None` once the sequence is exhausted
    pub async fn next_page(&mut self) -> SdkResult<Option<Vec<T>>> {
        if self.finished {
            return Ok(None);
        }

        let mut query = self.query.clone();
        query.push(("limit".to_string(), self.client.page_limit().to_string()));
        if let Some(cursor) = &self.cursor {
            query.push(("after".to_string(), cursor.clone()));
        }

        let response = self
            .client
            .request::<()>(Method::GET, &self.path, &query, None)
            .await?;
        let next_cursor = response
            .headers()
            .get(CURSOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let page: Vec<T> = response.json().await?;

        match next_cursor {
            // A cursor that does not move would loop forever
            Some(cursor) if !page.is_empty() && self.cursor.as_deref() != Some(cursor.as_str()) => {
                self.cursor = Some(cursor);
            }
            _ => self.finished = true,
        }

        if page.is_empty() {
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// Drain every remaining page into one vector
    pub async fn collect_all(mut self) -> SdkResult<Vec<T>> {
        let mut records = Vec::new();
        while let Some(page) = self.next_page().await? {
            records.extend(page);
        }
        Ok(records)
    }
}
