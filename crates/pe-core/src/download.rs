//! Audio download into the local download directory.
//!
//! The body is streamed into `<word>.mp3.part` and renamed to `<word>.mp3`
//! once complete, so a failed transfer never leaves a truncated file under
//! the final name.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PeError;
use crate::http::{self, HttpOptions};
use crate::word::Word;

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `hello.mp3` → `hello.mp3.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Downloads `url` to `<dir>/<word>.mp3`, replacing any earlier file for the
/// same word, and returns that path.
///
/// Transport errors and non-2xx answers fail with [`PeError::Download`];
/// failures to create, write or rename the file fail with
/// [`PeError::DownloadFile`]. The partial file is removed on failure.
pub fn download_audio(
    word: &Word,
    url: &str,
    dir: &Path,
    opts: &HttpOptions,
) -> Result<PathBuf, PeError> {
    let final_path = dir.join(word.audio_file_name());
    let part_path = temp_path(&final_path);
    let file_err = |path: &Path, source| PeError::DownloadFile {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(&part_path).map_err(|e| file_err(&part_path, e))?;
    tracing::debug!(url, path = %part_path.display(), "downloading audio");

    let mut write_err = None;
    let result = http::get(url, opts, |chunk| match file.write_all(chunk) {
        Ok(()) => true,
        Err(e) => {
            write_err = Some(e);
            false
        }
    });

    let result = match (write_err, result) {
        (Some(e), _) => Err(file_err(&part_path, e)),
        (None, Err(source)) => Err(PeError::Download {
            url: url.to_string(),
            source,
        }),
        (None, Ok(resp)) => file
            .flush()
            .and_then(|()| file.sync_all())
            .map(|()| resp)
            .map_err(|e| file_err(&part_path, e)),
    };
    drop(file);

    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            let _ = std::fs::remove_file(&part_path);
            return Err(e);
        }
    };

    std::fs::rename(&part_path, &final_path).map_err(|e| {
        let _ = std::fs::remove_file(&part_path);
        file_err(&final_path, e)
    })?;

    tracing::info!(
        url,
        path = %final_path.display(),
        bytes = resp.bytes,
        "audio downloaded"
    );
    Ok(final_path)
}
