use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dictionary::{
    DEFAULT_AUDIO_ATTRIBUTE, DEFAULT_BASE_URL, DEFAULT_ITEM_SELECTOR, DEFAULT_SOURCE_SELECTOR,
};
use crate::http::HttpOptions;
use crate::player::DEFAULT_PLAYERS;

/// Where and how to look words up (`[dictionary]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Page URL prefix; the word is appended as a path segment.
    pub base_url: String,
    /// CSS selector for one pronunciation entry.
    pub item_selector: String,
    /// CSS selector, inside an entry, for the element carrying the audio link.
    pub source_selector: String,
    /// Attribute holding the MP3 URL.
    pub audio_attribute: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            source_selector: DEFAULT_SOURCE_SELECTOR.to_string(),
            audio_attribute: DEFAULT_AUDIO_ATTRIBUTE.to_string(),
        }
    }
}

/// HTTP transfer settings (`[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None or 0 = wait forever).
    pub timeout_secs: Option<u64>,
    /// User-Agent header; some dictionary sites refuse curl's default.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: Some(15),
            timeout_secs: Some(120),
            user_agent: Some(format!("Mozilla/5.0 (compatible; pe/{})", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl HttpConfig {
    pub fn options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Global configuration loaded from `~/.config/pe/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeConfig {
    /// Player commands, tried in order; the first found on PATH is used.
    #[serde(default = "default_players")]
    pub players: Vec<String>,
    /// Pause before each replay, in milliseconds.
    #[serde(default = "default_replay_interval_ms")]
    pub replay_interval_ms: u64,
    /// Directory for downloaded audio (None = system temp dir).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_players() -> Vec<String> {
    DEFAULT_PLAYERS.iter().map(|s| s.to_string()).collect()
}

fn default_replay_interval_ms() -> u64 {
    1000
}

impl Default for PeConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            replay_interval_ms: default_replay_interval_ms(),
            download_dir: None,
            dictionary: DictionaryConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl PeConfig {
    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms)
    }

    /// Download directory, falling back to the system temp dir.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<PeConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PeConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PeConfig::default();
        assert_eq!(cfg.players, vec!["mpg123", "afplay"]);
        assert_eq!(cfg.replay_interval(), Duration::from_secs(1));
        assert!(cfg.download_dir.is_none());
        assert_eq!(cfg.download_dir(), std::env::temp_dir());
        assert_eq!(cfg.dictionary.item_selector, ".pronunciation-item");
        assert_eq!(cfg.dictionary.audio_attribute, "data-src-mp3");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PeConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PeConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.players, cfg.players);
        assert_eq!(parsed.replay_interval_ms, cfg.replay_interval_ms);
        assert_eq!(parsed.dictionary.base_url, cfg.dictionary.base_url);
        assert_eq!(parsed.http.timeout_secs, cfg.http.timeout_secs);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: PeConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.players, vec!["mpg123", "afplay"]);
        assert_eq!(cfg.replay_interval_ms, 1000);
        assert_eq!(cfg.dictionary.source_selector, "span");
        assert_eq!(cfg.http.connect_timeout_secs, Some(15));
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            players = ["mpv", "ffplay"]
            replay_interval_ms = 250
            download_dir = "/var/tmp/pe"

            [dictionary]
            base_url = "http://127.0.0.1:9000/words/"

            [http]
            timeout_secs = 5
        "#;
        let cfg: PeConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.players, vec!["mpv", "ffplay"]);
        assert_eq!(cfg.replay_interval(), Duration::from_millis(250));
        assert_eq!(cfg.download_dir(), PathBuf::from("/var/tmp/pe"));
        assert_eq!(cfg.dictionary.base_url, "http://127.0.0.1:9000/words/");
        assert_eq!(cfg.dictionary.item_selector, ".pronunciation-item");
        assert_eq!(cfg.http.timeout_secs, Some(5));
        // Unset fields of a present section keep their defaults.
        assert_eq!(cfg.http.connect_timeout_secs, Some(15));
    }

    #[test]
    fn http_options_from_config() {
        let http = HttpConfig {
            connect_timeout_secs: None,
            timeout_secs: Some(3),
            user_agent: None,
        };
        let opts = http.options();
        assert!(opts.connect_timeout.is_none());
        assert_eq!(opts.timeout, Some(Duration::from_secs(3)));
        assert!(opts.user_agent.is_none());
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "players = 3").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
