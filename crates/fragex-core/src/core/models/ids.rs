use super::error::ModelError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Offset of an atom inside its supersystem.
pub type AtomIndex = usize;

static NEXT_SUPERSYSTEM_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupersystemId(u64);

impl fmt::Display for SupersystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of the molecular system that fragments are carved out of.
///
/// Two supersystems with the same number of atoms are still different supersystems:
/// every call to [`Supersystem::new`] mints a fresh identifier, and copies of the
/// returned value share it. Fragments, families and n-mer systems only interoperate
/// when their supersystems compare equal.
///
/// Hashing covers the atom count only. The identifier depends on how many supersystems
/// the process created before, so it must not leak into structural fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Supersystem {
    id: SupersystemId,
    natoms: usize,
}

impl Hash for Supersystem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.natoms.hash(state);
    }
}

impl Supersystem {
    /// Creates a new supersystem with `natoms` atoms, indexed `0..natoms`.
    pub fn new(natoms: usize) -> Self {
        let id = SupersystemId(NEXT_SUPERSYSTEM_ID.fetch_add(1, Ordering::Relaxed));
        Self { id, natoms }
    }

    pub fn id(&self) -> SupersystemId {
        self.id
    }

    pub fn natoms(&self) -> usize {
        self.natoms
    }

    #[inline]
    pub fn contains_atom(&self, atom: AtomIndex) -> bool {
        atom < self.natoms
    }

    pub(crate) fn check_atom(&self, atom: AtomIndex) -> Result<(), ModelError> {
        if self.contains_atom(atom) {
            Ok(())
        } else {
            Err(ModelError::AtomOutOfRange {
                atom,
                natoms: self.natoms,
            })
        }
    }

    pub(crate) fn check_same(&self, other: &Supersystem) -> Result<(), ModelError> {
        if self == other {
            Ok(())
        } else {
            Err(ModelError::SupersystemMismatch {
                expected: self.id,
                found: other.id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::hashing::fingerprint;

    #[test]
    fn new_supersystems_have_distinct_identities_even_with_equal_size() {
        let a = Supersystem::new(4);
        let b = Supersystem::new(4);
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.natoms(), b.natoms());
    }

    #[test]
    fn copies_share_identity() {
        let a = Supersystem::new(3);
        let b = a;
        assert_eq!(a, b);
        assert!(a.check_same(&b).is_ok());
    }

    #[test]
    fn hash_ignores_the_minted_identity() {
        let a = Supersystem::new(5);
        let _unrelated = Supersystem::new(7);
        let b = Supersystem::new(5);
        assert_ne!(a, b);
        assert_eq!(
            fingerprint(&a),
            fingerprint(&b)
        );
        assert_ne!(
            fingerprint(&a),
            fingerprint(&Supersystem::new(6))
        );
    }

    #[test]
    fn check_atom_rejects_indices_past_the_end() {
        let sys = Supersystem::new(2);
        assert!(sys.check_atom(1).is_ok());
        assert_eq!(
            sys.check_atom(2),
            Err(ModelError::AtomOutOfRange { atom: 2, natoms: 2 })
        );
    }

    #[test]
    fn check_same_reports_both_identities() {
        let a = Supersystem::new(1);
        let b = Supersystem::new(1);
        match a.check_same(&b) {
            Err(ModelError::SupersystemMismatch { expected, found }) => {
                assert_eq!(expected, a.id());
                assert_eq!(found, b.id());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
