//! # Workflows Module
//!
//! End-to-end drivers built on top of [`crate::engine`].
//!
//! The [`evaluate`] workflow generates the n-mers of a fragmented system, builds its
//! many-body expansion, evaluates every term through a caller-supplied
//! [`evaluate::PropertyEvaluator`] and sums the weighted results. Terms are independent, so
//! evaluation runs in parallel when the `parallel` feature is enabled; the final sum is
//! always accumulated in term order.

pub mod evaluate;
