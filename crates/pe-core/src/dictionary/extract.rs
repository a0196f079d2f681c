//! Pull pronunciation audio links out of a parsed page.

use scraper::Selector;

use super::Document;
use crate::error::PeError;

/// Compiled form of the page markup contract.
#[derive(Debug, Clone)]
pub struct AudioSelector {
    item: Selector,
    source: Selector,
    attribute: String,
}

impl AudioSelector {
    /// Compiles the CSS selectors. Invalid selectors are a config error.
    pub fn new(item: &str, source: &str, attribute: &str) -> Result<Self, PeError> {
        let compile = |css: &str| {
            Selector::parse(css)
                .map_err(|e| PeError::Config(format!("selector {:?}: {}", css, e)))
        };
        if attribute.trim().is_empty() {
            return Err(PeError::Config("audio_attribute is empty".to_string()));
        }
        Ok(Self {
            item: compile(item)?,
            source: compile(source)?,
            attribute: attribute.trim().to_string(),
        })
    }

    /// Returns one URL per pronunciation item, in document order.
    ///
    /// Only the first element matching the source selector inside each item is
    /// consulted; items whose attribute is missing or empty are skipped.
    /// Relative links are resolved against the page URL.
    pub fn extract(&self, doc: &Document) -> Vec<String> {
        let mut urls = Vec::new();
        for item in doc.html.select(&self.item) {
            let raw = item
                .select(&self.source)
                .next()
                .and_then(|el| el.value().attr(&self.attribute))
                .map(str::trim)
                .unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            match doc.url.join(raw) {
                Ok(resolved) => urls.push(resolved.to_string()),
                Err(e) => {
                    tracing::debug!(raw, "keeping unresolvable audio link as-is: {}", e);
                    urls.push(raw.to_string());
                }
            }
        }
        urls
    }
}
