//! Session driver: one analysis request at a time

use super::backend::AnalysisBackend;
use super::events::event_stream;
use super::http::HttpBackend;
use crate::analysis::SessionState;
use crate::config::ClientConfig;
use crate::error::{TickerError, TickerResult};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

struct InFlight {
    generation: u64,
    token: CancellationToken,
}

/// Runs analysis queries and publishes [`SessionState`] to subscribers.
///
/// Submitting a query cancels whatever stream is still open, resets the
/// state and only then opens the new request, so events of two sessions
/// never interleave. State changes are applied in arrival order.
pub struct AnalysisSession {
    backend: Arc<dyn AnalysisBackend>,
    inactivity: Option<Duration>,
    state_tx: watch::Sender<SessionState>,
    in_flight: Mutex<InFlight>,
}

impl AnalysisSession {
    pub fn new(backend: Arc<dyn AnalysisBackend>, inactivity: Option<Duration>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::default());
        Self {
            backend,
            inactivity,
            state_tx,
            in_flight: Mutex::new(InFlight {
                generation: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    /// Session talking HTTP to the configured backend
    pub fn from_config(config: &ClientConfig) -> TickerResult<Self> {
        let backend = HttpBackend::new(config.clone())?;
        Ok(Self::new(Arc::new(backend), config.inactivity_timeout()))
    }

    pub fn backend(&self) -> &Arc<dyn AnalysisBackend> {
        &self.backend
    }

    /// Receive every state transition
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state_tx.borrow().is_analyzing
    }

    /// Cancel the in-flight stream, if any.
    ///
    /// The running [`submit`](Self::submit) returns
    /// [`TickerError::Cancelled`] and the state records the cancellation.
    pub fn cancel(&self) {
        self.in_flight.lock().token.cancel();
    }

    /// Run one query to completion.
    ///
    /// Returns the final state. Transport failures stop the session with
    /// [`SessionState::failure`] set and are also returned as the error.
    pub async fn submit(&self, query: &str) -> TickerResult<SessionState> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TickerError::invalid_field("Query cannot be empty", "query"));
        }

        let (generation, token) = self.start(query);
        info!(generation, %query, "Submitting analysis query");

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(TickerError::Cancelled),
            result = self.drive(query, generation) => result,
        };

        match outcome {
            Ok(()) => Ok(self.state()),
            Err(err) => {
                let current = self.update(generation, |state| state.fail(err.to_string()));
                match &err {
                    TickerError::Cancelled if current => info!(generation, "Analysis cancelled"),
                    TickerError::Cancelled => {
                        info!(generation, "Analysis superseded by a newer query")
                    }
                    _ => error!(
                        generation,
                        category = err.category(),
                        error = %err,
                        "Analysis failed"
                    ),
                }
                Err(err)
            }
        }
    }

    /// Cancel the previous request and reset state for `query`
    fn start(&self, query: &str) -> (u64, CancellationToken) {
        let mut in_flight = self.in_flight.lock();
        in_flight.token.cancel();
        in_flight.generation += 1;
        in_flight.token = CancellationToken::new();
        self.state_tx.send_replace(SessionState::begin(query));
        (in_flight.generation, in_flight.token.clone())
    }

    async fn drive(&self, query: &str, generation: u64) -> TickerResult<()> {
        // The wait for response headers counts against the inactivity limit too
        let opening = self.backend.open_analysis(query);
        let body = match self.inactivity {
            Some(limit) => tokio::time::timeout(limit, opening).await.map_err(|_| {
                error!(
                    generation,
                    seconds = limit.as_secs(),
                    "Backend did not answer the analysis request"
                );
                TickerError::timeout(limit.as_secs())
            })??,
            None => opening.await?,
        };
        let mut events = event_stream(body, self.inactivity);

        while let Some(event) = events.next().await {
            let event = event?;
            if !self.update(generation, |state| state.apply(event)) {
                return Err(TickerError::Cancelled);
            }
        }

        let (still_analyzing, has_report) = {
            let state = self.state_tx.borrow();
            (state.is_analyzing, state.report.is_some())
        };
        if !still_analyzing {
            return Ok(());
        }
        if has_report {
            warn!(
                generation,
                "Stream ended without analysis_complete, keeping the delivered report"
            );
            self.update(generation, |state| state.is_analyzing = false);
            return Ok(());
        }
        warn!(generation, "Stream ended without analysis_complete");
        Err(TickerError::transport("stream ended before analysis_complete"))
    }

    /// Apply `f` if `generation` is still the current session
    fn update<F>(&self, generation: u64, f: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let in_flight = self.in_flight.lock();
        if in_flight.generation != generation {
            return false;
        }
        self.state_tx.send_modify(f);
        true
    }
}
