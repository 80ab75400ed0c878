//! # twin-core
//!
//! Strategic twin orchestration:
//! - Builds the prompt for a company, context and options
//! - Calls the external model through the [`ModelClient`] seam
//! - Validates the untrusted response into a `StrategicArtifact`
//! - Lays out the artifact's flow graph
//! - Tracks the current simulation for a presentation surface
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use twin_core::{SimulationOrchestrator, TwinConfig};
//!
//! # async fn example(model: Arc<dyn twin_core::ModelClient>) -> Result<(), twin_core::SimulationError> {
//! let orchestrator = SimulationOrchestrator::with_config(model, &TwinConfig::default())?;
//! let simulation = orchestrator.simulate("Acme", "flat growth", "cut prices").await?;
//!
//! println!("{} nodes placed", simulation.positioned.nodes.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod session;

pub use config::{ConfigError, ModelConfig, TwinConfig};
pub use error::SimulationError;
pub use model::{ModelClient, ModelError};
pub use orchestrator::{Simulation, SimulationId, SimulationOrchestrator};
pub use session::{RunOutcome, SessionState, SimulationSession};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running simulations
    pub use crate::{
        ModelClient, ModelError, Simulation, SimulationError, SimulationOrchestrator,
        SimulationSession, TwinConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
