//! Blocking HTTP GET over libcurl, shared by the dictionary fetch and the
//! audio download.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use std::time::Duration;

use crate::error::HttpError;

/// Transfer settings applied to every GET.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Connect-phase timeout; `None` leaves libcurl's default.
    pub connect_timeout: Option<Duration>,
    /// Whole-transfer timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// Response metadata of a completed GET.
#[derive(Debug, Clone)]
pub struct Response {
    /// URL after following redirects.
    pub effective_url: String,
    pub bytes: u64,
}

/// Performs a GET, following redirects, and feeds each body chunk to `sink`.
///
/// `sink` returns `false` to abort the transfer; curl then reports a write
/// error, which the caller is expected to replace with its own cause.
/// Non-2xx responses fail with [`HttpError::Status`].
pub fn get<F>(url: &str, opts: &HttpOptions, mut sink: F) -> Result<Response, HttpError>
where
    F: FnMut(&[u8]) -> bool,
{
    let mut bytes = 0u64;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if sink(data) {
                bytes += data.len() as u64;
                Ok(data.len())
            } else {
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(HttpError::Status(code));
    }

    let effective_url = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string());
    tracing::debug!(url, %effective_url, bytes, "GET completed");

    Ok(Response {
        effective_url,
        bytes,
    })
}
