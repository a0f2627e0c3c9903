use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Structural fingerprint of `value`, suitable as a memoization key.
///
/// Values that compare equal produce the same fingerprint. Model types hash their structure
/// only (atom counts, fragments, basis subsets, electron counts and coefficients), never the
/// process-local supersystem identity, so identical inputs fingerprint alike in every run of
/// the same build.
pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assignment::AtomTable;
    use crate::core::models::fragment::FragmentFamily;
    use crate::core::models::fragmented::FragmentedSystem;
    use crate::core::models::ids::Supersystem;
    use crate::core::models::index_set::IndexSet;
    use crate::core::models::nmer::{NMer, NMerSystem};

    fn chain_of_three() -> FragmentedSystem {
        let sys = Supersystem::new(4);
        let family = FragmentFamily::new(sys, [vec![0, 1], vec![1, 2], vec![2, 3]]).unwrap();
        let table = AtomTable::from_basis_sizes(&[3, 1, 1, 3], vec![6, 1, 1, 6]).unwrap();
        FragmentedSystem::new(family, &table, &table).unwrap()
    }

    fn dimers(system: FragmentedSystem) -> NMerSystem {
        NMerSystem::new(system, [NMer::from([0, 1]), NMer::from([1, 2])]).unwrap()
    }

    #[test]
    fn equal_values_share_a_fingerprint() {
        assert_eq!(
            fingerprint(&IndexSet::from([2, 1])),
            fingerprint(&IndexSet::from([1, 2]))
        );
    }

    #[test]
    fn fingerprint_is_deterministic_across_calls() {
        let value = vec![IndexSet::from([0]), IndexSet::from([1, 3])];
        assert_eq!(fingerprint(&value), fingerprint(&value.clone()));
    }

    #[test]
    fn rebuilt_fragmented_systems_share_a_fingerprint() {
        let first = chain_of_three();
        let _unrelated = Supersystem::new(7);
        let second = chain_of_three();

        assert_ne!(first, second);
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }

    #[test]
    fn rebuilt_nmer_systems_share_a_fingerprint() {
        let first = dimers(chain_of_three());
        let _unrelated = Supersystem::new(7);
        let second = dimers(chain_of_three());

        assert_eq!(fingerprint(&first), fingerprint(&second));
        assert_ne!(
            fingerprint(&first),
            fingerprint(&NMerSystem::new(chain_of_three(), [NMer::from([0, 1])]).unwrap())
        );
    }

    #[test]
    fn fingerprint_accepts_unsized_values() {
        let slice: &[usize] = &[1, 2, 3];
        assert_eq!(fingerprint(slice), fingerprint(&vec![1usize, 2, 3]));
    }
}
