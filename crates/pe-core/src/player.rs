//! External audio player discovery and invocation.
//!
//! Candidates are probed in order against `PATH`; the first executable found
//! wins. A candidate containing a path separator is checked as-is.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::error::PeError;

/// mpg123 (Linux/BSD package managers, Homebrew), then macOS's built-in afplay.
pub const DEFAULT_PLAYERS: &[&str] = &["mpg123", "afplay"];

/// Ordered list of player commands to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCandidates(Vec<String>);

impl Default for PlayerCandidates {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYERS.iter().map(|s| s.to_string()))
    }
}

impl PlayerCandidates {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self(
            names
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Finds the first candidate on the process `PATH`.
    pub fn locate(&self) -> Result<Player, PeError> {
        self.locate_in(std::env::var_os("PATH").as_deref())
    }

    /// Finds the first candidate on `search_path` (a `PATH`-style list).
    pub fn locate_in(&self, search_path: Option<&OsStr>) -> Result<Player, PeError> {
        for name in &self.0 {
            if let Some(program) = find_executable(name, search_path) {
                tracing::debug!(player = %name, path = %program.display(), "player found");
                return Ok(Player {
                    name: name.clone(),
                    program,
                });
            }
            tracing::debug!(player = %name, "player not on PATH");
        }
        Err(PeError::PlayerNotFound {
            candidates: self.0.clone(),
        })
    }
}

fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 {
        return is_executable(as_path).then(|| as_path.to_path_buf());
    }
    let dirs: OsString = search_path?.to_os_string();
    std::env::split_paths(&dirs)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// A located player executable.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    program: PathBuf,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Runs the player on `file` and waits for it to exit.
    ///
    /// The player's stdio is detached. A spawn failure or unsuccessful exit is
    /// a playback error.
    pub async fn play(&self, file: &Path) -> Result<(), PeError> {
        let status = tokio::process::Command::new(&self.program)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| PeError::PlaybackSpawn {
                player: self.name.clone(),
                source,
            })?;
        if !status.success() {
            return Err(PeError::PlaybackStatus {
                player: self.name.clone(),
                status,
            });
        }
        Ok(())
    }
}
