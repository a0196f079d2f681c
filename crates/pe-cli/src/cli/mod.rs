//! CLI for the pe pronunciation lookup tool.

mod lookup;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use pe_core::config;
use pe_core::player::PlayerCandidates;
use pe_core::{Pipeline, Word};

/// Printed on stderr when no word is given.
pub const USAGE: &str = "usage: pe [word]";

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Top-level CLI: look up a word and replay its pronunciation until Ctrl-C.
#[derive(Debug, Parser)]
#[command(name = "pe", version)]
#[command(about = "pe: play the pronunciation of an English word", long_about = None)]
pub struct Cli {
    /// Word to pronounce (case-insensitive). Words after the first are ignored.
    #[arg(value_name = "WORD", num_args = 1.., allow_hyphen_values = true)]
    pub words: Vec<String>,

    /// Player command to try instead of the configured list. Repeat to give
    /// several; the first one found on PATH is used.
    #[arg(long = "player", value_name = "CMD")]
    pub players: Vec<String>,
}

impl Cli {
    /// The word to look up: the first positional argument, if any.
    pub fn word(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }
}

/// Parses the process arguments, runs the lookup and returns the exit code.
pub async fn run_from_args() -> i32 {
    match Cli::try_parse() {
        Ok(cli) => run(cli).await,
        Err(err) => parse_error(&err),
    }
}

/// Help and version exit 0; any other argument error is a usage failure.
fn parse_error(err: &clap::Error) -> i32 {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
        _ => {
            eprintln!("{}", USAGE);
            EXIT_FAILURE
        }
    }
}

async fn run(cli: Cli) -> i32 {
    let word = match cli.word().map(Word::parse) {
        Some(Ok(word)) => word,
        _ => {
            eprintln!("Empty word");
            eprintln!("{}", USAGE);
            return EXIT_FAILURE;
        }
    };

    match prepare(&cli.players) {
        Ok(pipeline) => lookup::run_lookup(&pipeline, &word).await,
        Err(err) => {
            report(&err);
            EXIT_FAILURE
        }
    }
}

/// Loads config and builds the pipeline, applying `--player` overrides.
fn prepare(players: &[String]) -> Result<Pipeline> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let pipeline = Pipeline::from_config(&cfg)?;
    if players.is_empty() {
        return Ok(pipeline);
    }
    Ok(pipeline.with_players(PlayerCandidates::new(players.iter().cloned())))
}

fn report(err: &anyhow::Error) {
    eprintln!("pe error: {:#}", err);
}
