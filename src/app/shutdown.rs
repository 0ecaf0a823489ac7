//! Interrupt and graceful shutdown handling.

use log::warn;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` when the process receives Ctrl-C.
///
/// The scan keeps running until its current batch completes; the returned
/// handle should be passed to [`shutdown_gracefully`] once the scan is over.
pub fn install_interrupt_handler(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => {
                        warn!("SCAN INTERRUPTED: finishing the current batch and saving results");
                        cancel.cancel();
                    }
                    Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
                }
            }
            _ = cancel.cancelled() => {}
        }
    })
}

/// Stops the interrupt listener.
///
/// The listener exits on its own once the token is cancelled, so the handle
/// is aborted only if it is still waiting for a signal.
pub async fn shutdown_gracefully(cancel: CancellationToken, interrupt_task: Option<JoinHandle<()>>) {
    if let Some(task) = interrupt_task {
        if cancel.is_cancelled() {
            let _ = task.await;
        } else {
            task.abort();
        }
    }
}
