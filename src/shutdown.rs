use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;

/// Coordinates graceful shutdown of the HTTP server.
///
/// Shutdown is triggered by Ctrl-C, SIGTERM (unix) or [`signal_shutdown`](Self::signal_shutdown).
pub struct ShutdownManager {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Resolves once any shutdown trigger fires.
    pub async fn wait_for_shutdown(&self) -> Result<(), std::io::Error> {
        // Register before checking the flag so a concurrent signal_shutdown()
        // cannot slip between the check and the await.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_shutting_down() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
                _ = &mut notified => {},
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = &mut notified => {},
            }
        }

        self.shutdown.store(true, Ordering::SeqCst);
        tracing::info!("Shutting down gracefully...");
        Ok(())
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
