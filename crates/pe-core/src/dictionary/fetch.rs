//! Fetch and parse the pronunciation page.

use scraper::Html;
use url::Url;

use super::Dictionary;
use crate::error::PeError;
use crate::http;
use crate::word::Word;

/// A parsed dictionary page.
pub struct Document {
    /// Final page URL (after redirects); relative audio links resolve against it.
    pub url: Url,
    pub html: Html,
}

impl Document {
    /// Parses `body` as an HTML document served from `url`.
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }
}

impl Dictionary {
    /// GETs the page for `word`. Fails with [`PeError::Fetch`] on transport
    /// errors and non-2xx answers. Not retried.
    pub fn fetch(&self, word: &Word) -> Result<Document, PeError> {
        let page_url = self.page_url(word);
        tracing::debug!(url = %page_url, "fetching dictionary page");

        let mut body = Vec::new();
        let resp = http::get(page_url.as_str(), &self.http, |chunk| {
            body.extend_from_slice(chunk);
            true
        })
        .map_err(|source| PeError::Fetch {
            url: page_url.to_string(),
            source,
        })?;

        let url = Url::parse(&resp.effective_url).unwrap_or(page_url);
        Ok(Document::parse(url, &String::from_utf8_lossy(&body)))
    }
}
