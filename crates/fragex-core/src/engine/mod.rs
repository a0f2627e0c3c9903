//! # Engine Module
//!
//! The combinatorial algorithms that turn a fragmented system into a weighted expansion.
//!
//! ## Overview
//!
//! Given a family of possibly overlapping fragments, the engine decides *which* subsystems
//! have to be evaluated and with what weight so that every shared atom is counted exactly
//! once. It never evaluates a property itself; that is left to the caller or to the driver
//! in [`crate::workflows`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Truncation order, resource ceilings and zero-term policy
//! - **Error Handling** ([`error`]) - Engine-level errors wrapping model and config failures
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Intersection Finder** ([`intersections`]) - Closes a fragment family under intersection
//! - **N-mer Generation** ([`nmers`]) - Builds all n-mers up to a truncation order
//! - **Term Builder** ([`mbe`]) - Inclusion-exclusion coefficients over n-mer offset sets
//! - **Fragment Weights** ([`weights`]) - Generalized many-body weights over a closed family
//!
//! ## Resource Limits
//!
//! The number of distinct intersections can grow combinatorially with the number of
//! overlapping subsystems. Every algorithm here accepts [`config::ExpansionLimits`] and
//! fails fast with [`error::EngineError::ResourceExhausted`] instead of running unbounded.

pub mod config;
pub mod error;
pub mod intersections;
pub mod mbe;
pub mod nmers;
pub mod progress;
pub mod weights;
