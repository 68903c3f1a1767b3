use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Shared stop flag between the HTTP server and the cleanup phase.
///
/// Cloning is cheap; every clone observes the same flag.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stop: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stop, _) = watch::channel(false);
        Self { stop }
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.stop.borrow()
    }

    /// Flip the flag. Only the first call logs and wakes waiters.
    pub fn shutdown(&self) {
        let already = self.stop.send_replace(true);
        if !already {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolves once [`shutdown`](Self::shutdown) has been called, including
    /// when that happened before this future was created.
    pub async fn stopped(&self) {
        let mut rx = self.stop.subscribe();
        // The sender lives in `self`, so this cannot fail while we wait.
        let _ = rx.wait_for(|stopping| *stopping).await;
    }

    /// Block until SIGINT or SIGTERM, then shut down.
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM. A signal whose handler fails to install
/// is logged and ignored.
pub async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                error!(error = %e, "Cannot listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    info!(signal = received, "Shutdown signal received");
}
