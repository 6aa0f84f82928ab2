//! Process shutdown signals

use crate::application::errors::BotError;

/// Listens for the signals that stop the bot: SIGINT and SIGTERM on Unix,
/// Ctrl-C elsewhere. Handlers are installed on construction, so a signal
/// that arrives before `wait` is polled is not lost.
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Must be called from within a Tokio runtime
    #[cfg(unix)]
    pub fn install() -> Result<Self, BotError> {
        use tokio::signal::unix::{signal, SignalKind};

        let install = |kind: SignalKind| {
            signal(kind).map_err(|e| BotError::Signal(e.to_string()))
        };

        Ok(Self {
            interrupt: install(SignalKind::interrupt())?,
            terminate: install(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> Result<Self, BotError> {
        Ok(Self {})
    }

    /// Resolve once a stop signal arrives
    #[cfg(unix)]
    pub async fn wait(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => tracing::info!("Received SIGINT"),
            _ = self.terminate.recv() => tracing::info!("Received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    pub async fn wait(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl-C"),
            Err(e) => {
                // Without a handler the bot can only be stopped externally
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}
