use std::collections::BTreeSet;
use std::fmt;

/// A set of unique non-negative indices kept in canonical (ascending) order.
///
/// `IndexSet` is used both for the atoms of a fragment and for the fragment offsets of
/// an n-mer. Because the storage is always sorted, two sets built from the same indices
/// in a different order compare, hash and order identically, which makes `IndexSet`
/// suitable as a map key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexSet(BTreeSet<usize>);

impl IndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Iterates the indices in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        self.0.iter().copied()
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn intersection(&self, other: &IndexSet) -> IndexSet {
        Self(self.0.intersection(&other.0).copied().collect())
    }

    pub fn union(&self, other: &IndexSet) -> IndexSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn is_subset(&self, other: &IndexSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// True if `self` is a subset of `other` and the two differ.
    pub fn is_proper_subset(&self, other: &IndexSet) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    pub fn is_disjoint(&self, other: &IndexSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub(crate) fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    pub(crate) fn extend_from(&mut self, other: &IndexSet) {
        self.0.extend(other.0.iter().copied());
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for IndexSet {
    fn from(indices: [usize; N]) -> Self {
        indices.into_iter().collect()
    }
}

impl From<Vec<usize>> for IndexSet {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

impl From<&[usize]> for IndexSet {
    fn from(indices: &[usize]) -> Self {
        indices.iter().copied().collect()
    }
}

impl IntoIterator for IndexSet {
    type Item = usize;
    type IntoIter = std::collections::btree_set::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn construction_order_does_not_affect_equality_or_hashing() {
        let a = IndexSet::from([3, 1, 2]);
        let b = IndexSet::from(vec![2, 3, 1, 1]);
        assert_eq!(a, b);

        let mut seen = HashSet::new();
        seen.insert(a);
        assert!(seen.contains(&b));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let set = IndexSet::from([4, 4, 4]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(4));
    }

    #[test]
    fn iteration_is_ascending() {
        let set = IndexSet::from([9, 0, 5]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 5, 9]);
        assert_eq!(set.first(), Some(0));
        assert_eq!(set.last(), Some(9));
    }

    #[test]
    fn intersection_and_union_follow_set_semantics() {
        let a = IndexSet::from([0, 1, 2]);
        let b = IndexSet::from([1, 2, 3]);
        assert_eq!(a.intersection(&b), IndexSet::from([1, 2]));
        assert_eq!(a.union(&b), IndexSet::from([0, 1, 2, 3]));
        assert!(a.intersection(&IndexSet::from([7])).is_empty());
    }

    #[test]
    fn subset_relations() {
        let small = IndexSet::from([1]);
        let big = IndexSet::from([0, 1]);
        assert!(small.is_subset(&big));
        assert!(small.is_proper_subset(&big));
        assert!(big.is_subset(&big));
        assert!(!big.is_proper_subset(&big));
        assert!(IndexSet::from([2]).is_disjoint(&big));
    }

    #[test]
    fn ordering_is_lexicographic_over_sorted_contents() {
        let mut sets = vec![
            IndexSet::from([2]),
            IndexSet::from([0, 3]),
            IndexSet::from([0, 1]),
        ];
        sets.sort();
        assert_eq!(
            sets,
            vec![
                IndexSet::from([0, 1]),
                IndexSet::from([0, 3]),
                IndexSet::from([2])
            ]
        );
    }

    #[test]
    fn display_uses_braces() {
        assert_eq!(IndexSet::from([2, 0]).to_string(), "{0, 2}");
        assert_eq!(IndexSet::new().to_string(), "{}");
    }
}
