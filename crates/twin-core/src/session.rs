//! Simulation lifecycle
//!
//! `Idle -> Syncing -> Ready | Failed`, with `reset` back to `Idle`.
//! Every run takes a generation ticket; a result whose ticket is no longer
//! current (reset or superseded by a newer run) is dropped.

use crate::orchestrator::{Simulation, SimulationOrchestrator};
use parking_lot::Mutex;
use std::sync::Arc;

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Waiting for input
    #[default]
    Idle,
    /// A simulation is in flight
    Syncing,
    /// Last simulation succeeded
    Ready(Arc<Simulation>),
    /// Last simulation failed, with a human-readable reason
    Failed(String),
}

impl SessionState {
    #[inline]
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        matches!(self, Self::Syncing)
    }
}

/// What happened to a run's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The result became the session state
    Applied,
    /// The session moved on before the result arrived
    Discarded,
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    generation: u64,
}

/// Holds the state of the current simulation for one presentation surface
#[derive(Debug)]
pub struct SimulationSession {
    orchestrator: Arc<SimulationOrchestrator>,
    inner: Mutex<Inner>,
}

impl SimulationSession {
    #[must_use]
    pub fn new(orchestrator: Arc<SimulationOrchestrator>) -> Self {
        Self {
            orchestrator,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    /// Discard the current result and any in-flight run
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = SessionState::Idle;
        tracing::debug!(generation = inner.generation, "session reset");
    }

    /// Run a simulation and publish its result if still current
    ///
    /// Starting a run supersedes any run already in flight.
    pub async fn run(&self, company_name: &str, context: &str, options: &str) -> RunOutcome {
        let ticket = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.state = SessionState::Syncing;
            inner.generation
        };

        let result = self
            .orchestrator
            .simulate(company_name, context, options)
            .await;

        let mut inner = self.inner.lock();
        if inner.generation != ticket {
            tracing::debug!(ticket, current = inner.generation, "discarding stale result");
            return RunOutcome::Discarded;
        }
        inner.state = match result {
            Ok(simulation) => SessionState::Ready(Arc::new(simulation)),
            Err(e) => SessionState::Failed(e.reason()),
        };
        RunOutcome::Applied
    }
}
