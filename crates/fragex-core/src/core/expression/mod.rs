//! # Expression Module
//!
//! The output of a many-body expansion: an ordered list of weighted subsystems.
//!
//! Each [`Term`] names a k-mer (a set of fragment offsets), the basis subset and electron
//! count of the subsystem it spans, and the coefficient its property value is multiplied by.
//! An [`Expression`] is the plain, append-only sequence of such terms that an external
//! property evaluator consumes; the approximated property is `Σ cᵢ · Pᵢ`.

mod container;
mod term;

pub use container::Expression;
pub use term::Term;
