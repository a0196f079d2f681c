//! Stop control for the replay loop: a shared stop token and its Ctrl-C hookup.
//!
//! The replay loop checks the token each iteration; a Ctrl-C listener (or a
//! test) sets it. Setting the token never kills a running player.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
struct Inner {
    stopped: AtomicBool,
    notify: Notify,
}

/// Cloneable stop request flag. All clones observe the same state.
#[derive(Clone, Default)]
pub struct StopToken {
    inner: Arc<Inner>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to stop. Idempotent.
    pub fn request_stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Completes once a stop has been requested.
    pub async fn stopped(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_stopped() {
                return;
            }
            notified.await;
        }
    }

    /// Requests a stop on the first Ctrl-C (SIGINT). The signal handler is
    /// installed before this returns, so an interrupt arriving right after is
    /// never handled by the default action. Must be called from within a
    /// tokio runtime.
    #[cfg(unix)]
    pub fn stop_on_ctrl_c(&self) -> io::Result<tokio::task::JoinHandle<()>> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let token = self.clone();
        Ok(tokio::spawn(async move {
            if interrupt.recv().await.is_some() {
                tracing::info!("interrupt received, stopping");
                token.request_stop();
            }
        }))
    }

    #[cfg(not(unix))]
    pub fn stop_on_ctrl_c(&self) -> io::Result<tokio::task::JoinHandle<()>> {
        let token = self.clone();
        Ok(tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received, stopping");
                    token.request_stop();
                }
                Err(e) => tracing::warn!("cannot listen for Ctrl-C: {}", e),
            }
        }))
    }
}

impl std::fmt::Debug for StopToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopToken")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
