use super::config::ExpansionConfig;
use super::error::EngineError;
use crate::core::models::basis::BasisSubset;
use crate::core::models::fragmented::FragmentedSystem;
use crate::core::models::nmer::{NMer, NMerSystem};
use itertools::Itertools;
use tracing::{info, instrument};

/// Builds every n-mer of `fragments` up to the configured truncation order.
///
/// With `include_lower_orders` unset, the result holds every combination of exactly
/// `truncation_order` fragment offsets; otherwise every combination of size `1..=order`.
/// N-mers are grouped by size and listed in lexicographic order within a size.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTruncationOrder`] if the order is zero or exceeds the
/// number of fragments, and [`EngineError::ResourceExhausted`] if the number of n-mers would
/// exceed `limits.max_subsets`.
#[instrument(skip_all, name = "make_nmers", fields(order = config.truncation_order))]
pub fn make_nmers<B: BasisSubset>(
    fragments: FragmentedSystem<B>,
    config: &ExpansionConfig,
) -> Result<NMerSystem<B>, EngineError> {
    let nfrags = fragments.nfrags()?;
    let order = config.truncation_order;
    if order == 0 || order > nfrags {
        return Err(EngineError::InvalidTruncationOrder { order, nfrags });
    }

    let sizes = if config.include_lower_orders {
        1..=order
    } else {
        order..=order
    };
    let mut combinations = sizes.flat_map(|size| (0..nfrags).combinations(size).map(NMer::from));

    let nmers: Vec<NMer> = match config.limits.max_subsets {
        Some(limit) => {
            let nmers: Vec<NMer> = combinations.by_ref().take(limit).collect();
            if combinations.next().is_some() {
                return Err(EngineError::ResourceExhausted {
                    what: "n-mers",
                    limit,
                });
            }
            nmers
        }
        None => combinations.collect(),
    };

    info!(
        fragments = nfrags,
        nmers = nmers.len(),
        "N-mers generated."
    );
    Ok(NMerSystem::new(fragments, nmers)?)
}
