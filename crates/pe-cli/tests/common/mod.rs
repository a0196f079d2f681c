//! Test helpers: the dictionary test server shared with pe-core, and an
//! isolated `pe` invocation.

#[path = "../../../pe-core/tests/common/dict_server.rs"]
pub mod dict_server;

use std::path::Path;
use std::process::{Command, Output};

/// Writes `$home/config/pe/config.toml` pointing the dictionary at `base` and
/// downloads at `$home/audio`.
pub fn write_config(home: &Path, base: &str) {
    let dir = home.join("config").join("pe");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::create_dir_all(home.join("audio")).unwrap();
    let toml = format!(
        "replay_interval_ms = 10\ndownload_dir = {:?}\n\n[dictionary]\nbase_url = \"{}/pronunciation/english/\"\n",
        home.join("audio").display().to_string(),
        base
    );
    std::fs::write(dir.join("config.toml"), toml).unwrap();
}

/// `pe` with XDG dirs confined to `home`.
pub fn pe_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pe"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("RUST_LOG");
    cmd
}

/// Runs the `pe` binary to completion with XDG dirs confined to `home`.
pub fn run_pe(home: &Path, args: &[&str]) -> Output {
    pe_command(home).args(args).output().expect("run pe")
}
