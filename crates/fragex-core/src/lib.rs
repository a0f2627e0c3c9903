//! # fragex Core Library
//!
//! Fragment intersection analysis and generalized many-body expansion (GMBE) term
//! generation for fragment-based quantum-chemistry methods.
//!
//! A large molecular system is split into possibly-overlapping fragments, fragments are
//! combined into n-mers, and a molecular property is approximated as a weighted sum of
//! the same property evaluated on every n-mer and on the correction terms derived from
//! their overlaps. This crate decides *which* subsystems must be evaluated and with *what*
//! weight; the property evaluation itself is supplied by the caller.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable value types: index sets, fragments and
//!   fragment families, the fragmented and n-mer systems with their basis/electron
//!   queries, and the `Term`/`Expression` containers.
//!
//! - **[`engine`]: The Logic Core.** The combinatorial algorithms: the intersection
//!   finder, the inclusion-exclusion term builder, fragment-level GMBE weights and
//!   n-mer generation, together with configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end drivers that tie the layers together
//!   and sum `Σ cᵢ·Eᵢ` over a user-supplied property evaluator.

pub mod core;
pub mod engine;
pub mod workflows;
