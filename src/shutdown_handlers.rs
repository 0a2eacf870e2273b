use crate::shutdown::ShutdownSender;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Forwards the first Ctrl+C or SIGTERM to `shutdown_tx`.
///
/// The task exits after forwarding one signal or when a shutdown is sent
/// by someone else. Tokio keeps its Ctrl+C listener installed afterwards,
/// so further Ctrl+C presses no longer terminate the process while
/// workers are being joined.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();

        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        tracing::warn!("Failed to listen for Ctrl+C: {}", err);
                        return;
                    }
                    tracing::info!("Interrupt received, finishing in-flight requests");
                    drop(shutdown_tx.send(()));
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    tracing::info!("SIGTERM received, finishing in-flight requests");
                    drop(shutdown_tx.send(()));
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        tracing::warn!("Failed to listen for Ctrl+C: {}", err);
                        return;
                    }
                    tracing::info!("Interrupt received, finishing in-flight requests");
                    drop(shutdown_tx.send(()));
                }
            }
        }
    })
}
