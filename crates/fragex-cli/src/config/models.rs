use fragex::core::models::basis::AoSubset;
use fragex::engine::config::{ExpansionConfig, ExpansionLimits, ZeroCoefficientPolicy};
use fragex::engine::error::EvaluationError;
use fragex::workflows::evaluate::{PropertyEvaluator, Subsystem};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Additive properties the CLI can evaluate without an external quantum-chemistry backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    /// Number of electrons in the subsystem.
    Electrons,
    /// Number of AO basis functions spanned by the subsystem.
    BasisFunctions,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electrons => write!(f, "electrons"),
            Self::BasisFunctions => write!(f, "basis-functions"),
        }
    }
}

impl PropertyEvaluator<AoSubset> for PropertyKind {
    fn evaluate(&self, subsystem: &Subsystem<'_, AoSubset>) -> Result<f64, EvaluationError> {
        let value = match self {
            Self::Electrons => subsystem.n_electrons,
            Self::BasisFunctions => subsystem.basis.len(),
        };
        Ok(value as f64)
    }
}

pub struct AppConfig {
    pub input_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub property: PropertyKind,
    pub core_config: ExpansionConfig,
}

/// Settings for the commands that only search for intersections.
pub struct SearchConfig {
    pub input_path: PathBuf,
    pub limits: ExpansionLimits,
    pub zero_policy: ZeroCoefficientPolicy,
}
