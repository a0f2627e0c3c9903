use super::config::{ExpansionConfig, ExpansionLimits, ZeroCoefficientPolicy};
use super::error::EngineError;
use super::intersections::discover_intersections;
use super::weights::superset_weights;
use crate::core::expression::{Expression, Term};
use crate::core::models::basis::BasisSubset;
use crate::core::models::index_set::IndexSet;
use crate::core::models::nmer::{KMer, NMerSystem};
use tracing::{debug, info, instrument};

/// Builds many-body-expansion expressions from n-mer systems.
///
/// Every n-mer starts with a coefficient of `+1`. Every distinct non-empty fragment-offset
/// intersection of two or more n-mers becomes a k-mer whose coefficient is the alternating
/// inclusion-exclusion sum over all groups of n-mers that intersect to it. Those sums are
/// accumulated from the largest k-mers down: a k-mer's coefficient is one minus the
/// coefficients of all k-mers strictly containing it. This yields the same signed totals as
/// walking every chain of n-mers, without enumerating the chains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermBuilder {
    limits: ExpansionLimits,
    zero_policy: ZeroCoefficientPolicy,
}

impl TermBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExpansionConfig) -> Self {
        Self {
            limits: config.limits,
            zero_policy: config.zero_policy,
        }
    }

    pub fn with_limits(mut self, limits: ExpansionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_zero_policy(mut self, policy: ZeroCoefficientPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Inclusion-exclusion coefficient of every k-mer, in discovery order.
    ///
    /// The n-mers come first, in their system order, followed by the intersections in the
    /// order the search found them. Cancelled k-mers are included with a coefficient of zero.
    pub fn coefficients<B: BasisSubset>(
        &self,
        nmers: &NMerSystem<B>,
    ) -> Result<Vec<(KMer, i64)>, EngineError> {
        let members: Vec<&IndexSet> = nmers.nmers()?.iter().collect();
        let intersections = discover_intersections(&members, &self.limits, "k-mers")?;
        debug!(
            nmers = members.len(),
            intersections = intersections.len(),
            "Collected k-mers"
        );

        let kmers: Vec<&IndexSet> = members.iter().copied().chain(&intersections).collect();
        let coefficients = superset_weights(&kmers);
        Ok(kmers
            .into_iter()
            .cloned()
            .zip(coefficients)
            .collect())
    }

    /// Materializes the expression for `nmers`.
    ///
    /// # Errors
    ///
    /// Fails with a model error if `nmers` holds no state, and with
    /// [`EngineError::ResourceExhausted`] if the k-mer search exceeds the configured limits.
    #[instrument(skip_all, name = "term_builder")]
    pub fn build<B: BasisSubset>(&self, nmers: &NMerSystem<B>) -> Result<Expression<B>, EngineError> {
        let coefficients = self.coefficients(nmers)?;
        let total = coefficients.len();

        let mut expression = Expression::new();
        for (kmer, coefficient) in coefficients {
            if coefficient == 0 && self.zero_policy == ZeroCoefficientPolicy::Drop {
                continue;
            }
            let basis = nmers.basis_of_kmer(&kmer)?;
            let n_electrons = nmers.electrons_of_kmer(&kmer)?;
            expression.add_term(Term::new(kmer, basis, n_electrons, coefficient as f64));
        }

        info!(
            kmers = total,
            terms = expression.size(),
            "Many-body expansion built."
        );
        Ok(expression)
    }
}

/// Builds the expression for `nmers` with unbounded limits, dropping cancelled k-mers.
///
/// Every fragment covered by an n-mer nets a weight of one, and so does every atom when the
/// fragments are disjoint. For overlapping fragments, per-atom weights of one come from
/// [`weighted_expression`](super::weights::weighted_expression), not from this function.
pub fn build_expression<B: BasisSubset>(nmers: &NMerSystem<B>) -> Result<Expression<B>, EngineError> {
    TermBuilder::new().build(nmers)
}
