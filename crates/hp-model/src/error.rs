//! Error types for the topology builder.

use hp_core::HpError;
use hp_graph::GraphError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building a heat pump topology.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The configuration was rejected before any component was created.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A wiring step violated a structural rule; the partial build is discarded.
    #[error("Structural error: {0}")]
    Graph(#[from] GraphError),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for HpError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Config(e) => HpError::Config(e.to_string()),
            ModelError::Graph(e) => e.into(),
        }
    }
}
