//! Lookup command: search, download and replay until Ctrl-C.

use pe_core::control::StopToken;
use pe_core::{Outcome, PeError, Pipeline, Progress, Word};

use super::{report, EXIT_FAILURE, EXIT_OK};

pub async fn run_lookup(pipeline: &Pipeline, word: &Word) -> i32 {
    println!("Searching for {}", word);

    let stop = StopToken::new();
    let result = pipeline
        .run(word, &stop, |progress| match progress {
            Progress::Downloading { url, found } => {
                tracing::info!(%url, found, "downloading first pronunciation");
            }
            Progress::Playing { player, file } => {
                tracing::info!(%player, file = %file.display(), "starting replay loop");
                // Ctrl-C keeps its default (terminate) behavior until playback starts.
                if let Err(e) = stop.stop_on_ctrl_c() {
                    tracing::warn!("cannot listen for Ctrl-C: {}", e);
                }
                println!("Playing...  Press Ctrl-C to stop.");
            }
        })
        .await;

    exit_code(word, result)
}

/// Maps the pipeline result to the process exit code, printing the matching message.
pub(crate) fn exit_code(word: &Word, result: Result<Outcome, PeError>) -> i32 {
    match result {
        Ok(Outcome::NotFound) => {
            println!("{} is not found in dictionary", word);
            EXIT_OK
        }
        Ok(Outcome::Stopped) => EXIT_OK,
        Err(err) => {
            report(&err.into());
            EXIT_FAILURE
        }
    }
}
