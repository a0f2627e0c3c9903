use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::error::{ErrorKind, ModelError};
use crate::core::models::nmer::KMer;

/// Error returned by an external property evaluator.
pub type EvaluationError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Model error: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Resource limit exceeded: {what} exceeded the configured maximum of {limit}")]
    ResourceExhausted { what: &'static str, limit: usize },

    #[error("Cannot make {order}-mers with only {nfrags} fragments")]
    InvalidTruncationOrder { order: usize, nfrags: usize },

    #[error("Property evaluation failed for term {index} {kmer}: {source}")]
    Evaluation {
        index: usize,
        kmer: KMer,
        #[source]
        source: EvaluationError,
    },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Model { source } => source.kind(),
            Self::Config { .. } | Self::InvalidTruncationOrder { .. } => ErrorKind::InvalidInput,
            Self::ResourceExhausted { .. } => ErrorKind::ResourceExhaustion,
            Self::Evaluation { .. } => ErrorKind::Evaluation,
        }
    }
}
