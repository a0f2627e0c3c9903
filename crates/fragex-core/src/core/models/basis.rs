use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Range};

/// The part of a global atomic-orbital basis induced by a set of atoms.
///
/// The library never constructs a basis itself; it only unions the per-atom subsets a
/// collaborator hands it. `Default` must yield the empty subset, which is the identity
/// of [`BasisSubset::union`].
pub trait BasisSubset: Clone + PartialEq + Eq + Hash + Debug + Default + Send + Sync {
    fn union(&self, other: &Self) -> Self;

    /// Unions an arbitrary number of subsets, starting from the empty subset.
    fn union_all<'a, I>(subsets: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        subsets
            .into_iter()
            .fold(Self::default(), |acc, next| acc.union(next))
    }
}

/// A set of atomic-orbital function offsets into a global basis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AoSubset(BTreeSet<usize>);

impl AoSubset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subset covering the contiguous AO block `range`.
    pub fn from_range(range: Range<usize>) -> Self {
        Self(range.collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ao: usize) -> bool {
        self.0.contains(&ao)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl BasisSubset for AoSubset {
    fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).copied().collect())
    }

    /// Extends one set in place instead of rebuilding it for every operand.
    fn union_all<'a, I>(subsets: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let mut all = BTreeSet::new();
        for subset in subsets {
            all.extend(subset.0.iter().copied());
        }
        Self(all)
    }
}

impl Add for AoSubset {
    type Output = AoSubset;

    fn add(mut self, rhs: AoSubset) -> AoSubset {
        self.0.extend(rhs.0);
        self
    }
}

impl Add<&AoSubset> for &AoSubset {
    type Output = AoSubset;

    fn add(self, rhs: &AoSubset) -> AoSubset {
        BasisSubset::union(self, rhs)
    }
}

impl FromIterator<usize> for AoSubset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
