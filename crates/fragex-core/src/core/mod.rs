//! # Core Module
//!
//! The data model shared by every algorithm in fragex.
//!
//! ## Architecture
//!
//! - **Molecular Partitioning** ([`models`]) - Index sets, supersystems, fragments,
//!   fragment families, basis subsets, and the fragmented / n-mer systems
//! - **Collaborator Interfaces** ([`assignment`]) - How per-atom basis subsets and
//!   electron counts are injected into a fragmented system
//! - **Expansion Output** ([`expression`]) - The `Term` and `Expression` containers
//!   handed to an external property evaluator
//! - **Utilities** ([`utils`]) - Structural fingerprints for cache keys
//!
//! Every type in this module is an immutable value once constructed. Derived values are
//! always produced fresh and never hold references back to their inputs.

pub mod assignment;
pub mod expression;
pub mod models;
pub mod utils;
