//! Lookup pipeline: fetch the page, extract the audio links, download the
//! first one, then replay it until stopped.
//!
//! Blocking steps (curl, HTML parsing, file I/O) run on the blocking pool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::PeConfig;
use crate::control::StopToken;
use crate::dictionary::Dictionary;
use crate::download::download_audio;
use crate::error::PeError;
use crate::http::HttpOptions;
use crate::player::{Player, PlayerCandidates};
use crate::word::Word;

/// How long a failed play waits for a stop request that may still be in
/// flight (the player and pe receive the same Ctrl-C).
const STOP_GRACE: Duration = Duration::from_millis(100);

/// How a lookup ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The dictionary has no recording for the word. Nothing was downloaded.
    NotFound,
    /// Playback was running and a stop was requested.
    Stopped,
}

/// Milestones reported to the caller while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The first of `found` audio links is being downloaded.
    Downloading { url: String, found: usize },
    /// The file is saved and the replay loop starts with `player`.
    Playing { player: String, file: PathBuf },
}

/// Everything one lookup needs, resolved from config.
#[derive(Debug, Clone)]
pub struct Pipeline {
    dictionary: Dictionary,
    http: HttpOptions,
    download_dir: PathBuf,
    players: PlayerCandidates,
    replay_interval: Duration,
}

impl Pipeline {
    pub fn from_config(cfg: &PeConfig) -> Result<Self, PeError> {
        let http = cfg.http.options();
        Ok(Self {
            dictionary: Dictionary::new(&cfg.dictionary, http.clone())?,
            http,
            download_dir: cfg.download_dir(),
            players: PlayerCandidates::new(cfg.players.iter().cloned()),
            replay_interval: cfg.replay_interval(),
        })
    }

    /// Replaces the player candidate list.
    pub fn with_players(mut self, players: PlayerCandidates) -> Self {
        self.players = players;
        self
    }

    /// Runs the whole lookup for `word`. Returns once the word is not found,
    /// a stop is requested during playback, or any step fails.
    pub async fn run<F>(
        &self,
        word: &Word,
        stop: &StopToken,
        mut on_progress: F,
    ) -> Result<Outcome, PeError>
    where
        F: FnMut(Progress),
    {
        let urls = {
            let dictionary = self.dictionary.clone();
            let word = word.clone();
            tokio::task::spawn_blocking(move || dictionary.lookup(&word)).await??
        };
        let Some(first) = urls.first().cloned() else {
            return Ok(Outcome::NotFound);
        };

        on_progress(Progress::Downloading {
            url: first.clone(),
            found: urls.len(),
        });
        let file = {
            let word = word.clone();
            let dir = self.download_dir.clone();
            let http = self.http.clone();
            tokio::task::spawn_blocking(move || download_audio(&word, &first, &dir, &http))
                .await??
        };

        let player = self.players.locate()?;
        on_progress(Progress::Playing {
            player: player.name().to_string(),
            file: file.clone(),
        });
        replay(&player, &file, self.replay_interval, stop).await
    }
}

/// Plays `file` every `interval` until `stop` is set or playback fails.
///
/// The token is checked before each wait and again after each play. A player
/// that fails while a stop is pending, or one that arrives within
/// `STOP_GRACE` of the failure (typically the same Ctrl-C), ends the loop as
/// [`Outcome::Stopped`].
pub async fn replay(
    player: &Player,
    file: &Path,
    interval: Duration,
    stop: &StopToken,
) -> Result<Outcome, PeError> {
    let mut plays = 0u64;
    loop {
        tokio::select! {
            biased;
            _ = stop.stopped() => break,
            _ = tokio::time::sleep(interval) => {}
        }

        let result = player.play(file).await;
        plays += 1;
        if let Err(e) = result {
            if stop.is_stopped()
                || tokio::time::timeout(STOP_GRACE, stop.stopped()).await.is_ok()
            {
                tracing::debug!("player ended during stop: {}", e);
                break;
            }
            return Err(e);
        }
        if stop.is_stopped() {
            break;
        }
        tracing::debug!(plays, "replayed");
    }
    tracing::info!(plays, "replay stopped");
    Ok(Outcome::Stopped)
}
