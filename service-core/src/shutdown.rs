use std::fmt;
use tokio::signal;

/// Termination signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolves when the process receives SIGINT (Ctrl+C) or SIGTERM.
///
/// Fails only if the signal handlers cannot be installed.
#[cfg(unix)]
pub async fn shutdown_signal() -> std::io::Result<ShutdownSignal> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            Ok(ShutdownSignal::Interrupt)
        }
        _ = terminate.recv() => Ok(ShutdownSignal::Terminate),
    }
}

#[cfg(not(unix))]
pub async fn shutdown_signal() -> std::io::Result<ShutdownSignal> {
    signal::ctrl_c().await?;
    Ok(ShutdownSignal::Interrupt)
}
