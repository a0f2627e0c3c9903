use super::config::{ExpansionLimits, ZeroCoefficientPolicy};
use super::error::EngineError;
use crate::core::expression::{Expression, Term};
use crate::core::models::basis::BasisSubset;
use crate::core::models::fragment::{Fragment, FragmentFamily};
use crate::core::models::fragmented::FragmentedSystem;
use crate::core::models::index_set::IndexSet;
use crate::core::models::nmer::KMer;
use std::cmp::Reverse;
use tracing::{info, instrument};

/// Weights `cᵢ = 1 - Σ cⱼ` over the proper supersets `j` of each set `i`.
///
/// Sets are processed from the largest down, so every superset is weighted before its
/// subsets. For a collection closed under intersection, the weights of the sets containing
/// any given element sum to exactly one. Entries are expected to be distinct.
pub(crate) fn superset_weights(sets: &[&IndexSet]) -> Vec<i64> {
    let mut order: Vec<usize> = (0..sets.len()).collect();
    order.sort_by_key(|&i| Reverse(sets[i].len()));

    let mut weights = vec![0i64; sets.len()];
    for (position, &i) in order.iter().enumerate() {
        let covered: i64 = order[..position]
            .iter()
            .filter(|&&j| sets[i].is_proper_subset(sets[j]))
            .map(|&j| weights[j])
            .sum();
        weights[i] = 1 - covered;
    }
    weights
}

/// Generalized many-body weights of the members of `family`, by offset.
///
/// The family should already be closed under intersection (see
/// [`find_intersections`](super::intersections::find_intersections)); only then does every
/// atom end up with a net weight of one.
pub fn gmbe_weights(family: &FragmentFamily) -> Vec<i64> {
    let sets: Vec<&IndexSet> = family.iter().map(Fragment::atoms).collect();
    superset_weights(&sets)
}

/// A fragment-level expansion together with the system its terms refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedExpansion<B> {
    /// The input system closed under intersection; term k-mers are offsets into it.
    pub system: FragmentedSystem<B>,
    pub expression: Expression<B>,
}

/// Closes `system` under intersection and weights every resulting subsystem.
///
/// Each term's k-mer is the single offset `{i}` of a fragment in the closed system.
///
/// # Errors
///
/// Fails with [`EngineError::ResourceExhausted`] if the intersection search exceeds
/// `limits`, and with a model error if `system` holds no state.
#[instrument(skip_all, name = "gmbe_weights")]
pub fn weighted_expression<B: BasisSubset>(
    system: &FragmentedSystem<B>,
    limits: &ExpansionLimits,
    policy: ZeroCoefficientPolicy,
) -> Result<WeightedExpansion<B>, EngineError> {
    let closed = system.with_intersections(limits)?;
    let weights = gmbe_weights(closed.family()?);

    let mut expression = Expression::new();
    for (offset, &weight) in weights.iter().enumerate() {
        if weight == 0 && policy == ZeroCoefficientPolicy::Drop {
            continue;
        }
        expression.add_term(Term::new(
            KMer::from([offset]),
            closed.basis_of_offset(offset)?.clone(),
            closed.electrons_of_offset(offset)?,
            weight as f64,
        ));
    }

    info!(
        subsystems = weights.len(),
        terms = expression.size(),
        "Fragment weights computed."
    );
    Ok(WeightedExpansion {
        system: closed,
        expression,
    })
}
