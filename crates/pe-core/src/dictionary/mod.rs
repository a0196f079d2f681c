//! Dictionary lookup: fetch the pronunciation page for a word and extract the
//! audio links from it.
//!
//! The page layout is owned by the remote site. The defaults below describe
//! the markup of the Cambridge pronunciation pages as this tool expects it:
//! each recording is a `.pronunciation-item` element whose first `span`
//! carries the MP3 location in `data-src-mp3`. All four values can be
//! overridden in the `[dictionary]` config section.

mod extract;
mod fetch;

pub use extract::AudioSelector;
pub use fetch::Document;

use url::Url;

use crate::config::DictionaryConfig;
use crate::error::PeError;
use crate::http::HttpOptions;
use crate::word::Word;

/// Page that lists the recordings for a word; the word is appended as one path segment.
pub const DEFAULT_BASE_URL: &str = "https://dictionary.cambridge.org/pronunciation/english/";
/// One element per recorded pronunciation.
pub const DEFAULT_ITEM_SELECTOR: &str = ".pronunciation-item";
/// Element inside an item that carries the audio attribute.
pub const DEFAULT_SOURCE_SELECTOR: &str = "span";
/// Attribute holding the MP3 URL.
pub const DEFAULT_AUDIO_ATTRIBUTE: &str = "data-src-mp3";

/// Online dictionary client: page URL template plus the markup contract.
#[derive(Debug, Clone)]
pub struct Dictionary {
    base_url: Url,
    selector: AudioSelector,
    http: HttpOptions,
}

impl Dictionary {
    pub fn new(cfg: &DictionaryConfig, http: HttpOptions) -> Result<Self, PeError> {
        let base_url = Url::parse(&cfg.base_url)
            .map_err(|e| PeError::Config(format!("base_url {:?}: {}", cfg.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PeError::Config(format!(
                "base_url {:?} cannot take a path segment",
                cfg.base_url
            )));
        }
        let selector = AudioSelector::new(
            &cfg.item_selector,
            &cfg.source_selector,
            &cfg.audio_attribute,
        )?;
        Ok(Self {
            base_url,
            selector,
            http,
        })
    }

    /// URL of the pronunciation page for `word`.
    pub fn page_url(&self, word: &Word) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word.as_str());
        }
        url
    }

    /// Fetches the page for `word` and returns its audio URLs in document order.
    /// An empty list means the dictionary has no recording for the word.
    pub fn lookup(&self, word: &Word) -> Result<Vec<String>, PeError> {
        let doc = self.fetch(word)?;
        let urls = self.selector.extract(&doc);
        tracing::info!(word = %word, found = urls.len(), "dictionary lookup");
        Ok(urls)
    }
}
