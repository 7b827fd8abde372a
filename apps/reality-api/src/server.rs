//! Serving loop with the background database connection.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::db::slot::StoreSlot;
use crate::db::store::ShowStore;

/// Why the server stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The stop signal fired (Ctrl-C), whether or not the database was reached.
    Stopped,
    /// The database connection failed, so there is nothing to serve.
    ConnectionFailed,
}

/// Serve `app` on `listener` while `connect` runs in the background.
///
/// A successful connection installs the store into `slot`. A failed one is
/// logged and shuts the server down with [`ServeOutcome::ConnectionFailed`].
/// `stop` shuts it down with [`ServeOutcome::Stopped`].
pub async fn run<C, E, S>(
    listener: TcpListener,
    app: Router,
    slot: StoreSlot,
    connect: C,
    stop: S,
) -> std::io::Result<ServeOutcome>
where
    C: Future<Output = Result<Arc<dyn ShowStore>, E>> + Send + 'static,
    E: Display + Send + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    let (failed_tx, failed_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        match connect.await {
            Ok(store) => {
                slot.install(store);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to connect to MongoDB");
                let _ = failed_tx.send(());
            }
        }
    });

    let (outcome_tx, outcome_rx) = oneshot::channel();
    let shutdown = async move {
        // A dropped sender means the connection succeeded; that branch is
        // then disabled and only `stop` can end the select.
        let outcome = tokio::select! {
            _ = stop => ServeOutcome::Stopped,
            Ok(()) = failed_rx => ServeOutcome::ConnectionFailed,
        };
        match outcome {
            ServeOutcome::Stopped => tracing::info!("shutdown requested"),
            ServeOutcome::ConnectionFailed => tracing::error!("shutting down, no database handle"),
        }
        let _ = outcome_tx.send(outcome);
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(outcome_rx.await.unwrap_or(ServeOutcome::Stopped))
}
