use super::config::ExpansionLimits;
use super::error::EngineError;
use crate::core::models::basis::BasisSubset;
use crate::core::models::fragment::{Fragment, FragmentFamily};
use crate::core::models::fragmented::FragmentedSystem;
use crate::core::models::index_set::IndexSet;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, instrument, trace};

/// Breadth-first search for every distinct non-empty intersection of two or more members.
///
/// Each newly found set is intersected against every original member until no unseen,
/// non-empty set remains. Any intersection of member subsets `S` and `T` is reachable this
/// way, because intersecting `∩S` with the members of `T` one at a time only passes through
/// non-empty supersets of `∩(S ∪ T)`.
struct IntersectionSearch<'a> {
    members: &'a [&'a IndexSet],
    limits: &'a ExpansionLimits,
    subject: &'static str,
    seen: HashSet<IndexSet>,
    discovered: Vec<IndexSet>,
    frontier: VecDeque<(usize, usize)>,
}

impl<'a> IntersectionSearch<'a> {
    fn new(members: &'a [&'a IndexSet], limits: &'a ExpansionLimits, subject: &'static str) -> Self {
        Self {
            members,
            limits,
            subject,
            seen: members.iter().map(|&member| member.clone()).collect(),
            discovered: Vec::new(),
            frontier: VecDeque::new(),
        }
    }

    fn offer(&mut self, candidate: IndexSet, depth: usize) -> Result<(), EngineError> {
        if candidate.is_empty() || self.seen.contains(&candidate) {
            return Ok(());
        }
        if let Some(max_depth) = self.limits.max_depth {
            if depth > max_depth {
                return Err(EngineError::ResourceExhausted {
                    what: "intersection depth",
                    limit: max_depth,
                });
            }
        }
        if let Some(max_subsets) = self.limits.max_subsets {
            if self.discovered.len() >= max_subsets {
                return Err(EngineError::ResourceExhausted {
                    what: self.subject,
                    limit: max_subsets,
                });
            }
        }

        trace!(subset = %candidate, depth, "Discovered intersection");
        self.seen.insert(candidate.clone());
        self.frontier.push_back((self.discovered.len(), depth));
        self.discovered.push(candidate);
        Ok(())
    }

    fn run(mut self) -> Result<Vec<IndexSet>, EngineError> {
        let members = self.members;
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                self.offer(a.intersection(b), 2)?;
            }
        }

        while let Some((index, depth)) = self.frontier.pop_front() {
            for member in members {
                let candidate = self.discovered[index].intersection(member);
                self.offer(candidate, depth + 1)?;
            }
        }

        Ok(self.discovered)
    }
}

/// Every distinct non-empty intersection of two or more `members` that is not itself a
/// member, in discovery order.
pub(crate) fn discover_intersections(
    members: &[&IndexSet],
    limits: &ExpansionLimits,
    subject: &'static str,
) -> Result<Vec<IndexSet>, EngineError> {
    IntersectionSearch::new(members, limits, subject).run()
}

/// Closes `family` under intersection without resource limits.
///
/// See [`find_intersections_with`].
pub fn find_intersections(family: &FragmentFamily) -> Result<FragmentFamily, EngineError> {
    find_intersections_with(family, &ExpansionLimits::unbounded())
}

/// Returns a new family holding every fragment of `family`, in order, followed by every
/// distinct non-empty intersection of two or more of its fragments.
///
/// Intersections are appended in canonical (sorted) order so that the result does not depend
/// on the search order. A family that is already closed under intersection, and in particular
/// a pairwise-disjoint one, comes back unchanged.
///
/// # Errors
///
/// Returns [`EngineError::ResourceExhausted`] if the search exceeds `limits`.
#[instrument(skip_all, name = "intersection_search", fields(fragments = family.len()))]
pub fn find_intersections_with(
    family: &FragmentFamily,
    limits: &ExpansionLimits,
) -> Result<FragmentFamily, EngineError> {
    let members: Vec<&IndexSet> = family.iter().map(Fragment::atoms).collect();
    let mut intersections = discover_intersections(&members, limits, "intersections")?;
    intersections.sort();

    let supersystem = family.supersystem();
    let mut closed = family.clone();
    for atoms in intersections {
        debug!(fragment = %atoms, "Adding intersection to family");
        closed.push(Fragment::from_atoms(supersystem, atoms)?)?;
    }

    info!(
        fragments = family.len(),
        intersections = closed.len() - family.len(),
        "Intersection search finished."
    );
    Ok(closed)
}

impl<B: BasisSubset> FragmentedSystem<B> {
    /// Returns a system over this system's family closed under intersection.
    ///
    /// The per-atom basis and electron tables are reused, so no collaborator is called.
    pub fn with_intersections(&self, limits: &ExpansionLimits) -> Result<Self, EngineError> {
        let closed = find_intersections_with(self.family()?, limits)?;
        Ok(self.with_family(closed)?)
    }
}
