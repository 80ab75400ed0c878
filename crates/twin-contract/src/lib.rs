//! Strategic Twin contract
//!
//! The structured-output contract between the core and the external
//! generative model:
//! - [`SchemaContract`] builds the prompt and declares the response shape
//! - [`ResponseValidator`] turns raw model text into a [`StrategicArtifact`]
//!   or a classified [`ValidationError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use twin_contract::{SchemaContract, ResponseValidator};
//!
//! let prompt = SchemaContract::build_prompt("Acme", "flat growth", "cut prices");
//! let raw = model.generate(&prompt).await?;
//! let artifact = ResponseValidator::new().validate(&raw)?;
//! ```
//!
//! [`StrategicArtifact`]: twin_model::StrategicArtifact

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod prompt;
pub mod validator;

pub use error::ValidationError;
pub use prompt::{build_prompt, SchemaContract, SCENARIO_COUNT};
pub use validator::{validate, ResponseValidator, ValidationLimits};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
