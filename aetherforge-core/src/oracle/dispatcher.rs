//! Runs Oracle requests off the UI thread.
//!
//! The terminal loop is synchronous, so backend calls are spawned onto a small
//! tokio runtime owned by the [`Dispatcher`]. Each call hands back an
//! [`InFlight`] handle the loop polls once per tick; nothing ever blocks on it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::error::{Error, Result};

use super::{OracleBackend, OracleReply, OracleRequest};

/// Spawns backend calls and returns pollable handles.
pub struct Dispatcher {
    backend: Arc<dyn OracleBackend>,
    runtime: tokio::runtime::Runtime,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn OracleBackend>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("oracle-dispatch")
            .enable_all()
            .build()
            .map_err(|e| Error::Service(format!("failed to build tokio runtime: {}", e)))?;

        Ok(Self { backend, runtime })
    }

    /// Start `request` in the background.
    ///
    /// The call always runs to completion; there is no cancellation.
    pub fn spawn(&self, request: OracleRequest) -> InFlight {
        let (tx, rx) = oneshot::channel();
        let backend = Arc::clone(&self.backend);
        let task_request = request.clone();

        tracing::info!(mode = %request.mode(), "Dispatching oracle request");

        self.runtime.spawn(async move {
            let outcome = task_request.send(backend.as_ref()).await;
            // Receiver only goes away when the app is shutting down
            let _ = tx.send(outcome);
        });

        InFlight {
            request,
            rx,
            started_at: Instant::now(),
        }
    }
}

/// A dispatched request awaiting its outcome.
pub struct InFlight {
    request: OracleRequest,
    rx: oneshot::Receiver<Result<OracleReply>>,
    started_at: Instant,
}

impl InFlight {
    /// The request as it was dispatched.
    pub fn request(&self) -> &OracleRequest {
        &self.request
    }

    /// Time since dispatch.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Take the outcome if the call has settled; `None` while still running.
    ///
    /// A task that dies without reporting counts as a service failure.
    pub fn poll(&mut self) -> Option<Result<OracleReply>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(Error::Service(
                "oracle request ended without a reply".to_string(),
            ))),
        }
    }
}
