use super::error::ModelError;
use super::ids::{AtomIndex, Supersystem};
use super::index_set::IndexSet;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A non-empty set of atoms carved out of a supersystem.
///
/// Fragments are immutable once constructed. Their atoms are stored in canonical order,
/// so equality and hashing ignore the order in which atoms were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    supersystem: Supersystem,
    atoms: IndexSet,
}

impl Fragment {
    /// Creates a fragment from atom indices of `supersystem`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyFragment`] if no atoms are supplied and
    /// [`ModelError::AtomOutOfRange`] if an atom index is not part of the supersystem.
    pub fn new<I>(supersystem: Supersystem, atoms: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = AtomIndex>,
    {
        Self::from_atoms(supersystem, atoms.into_iter().collect())
    }

    pub(crate) fn from_atoms(supersystem: Supersystem, atoms: IndexSet) -> Result<Self, ModelError> {
        let Some(largest) = atoms.last() else {
            return Err(ModelError::EmptyFragment);
        };
        supersystem.check_atom(largest)?;
        Ok(Self { supersystem, atoms })
    }

    pub fn supersystem(&self) -> Supersystem {
        self.supersystem
    }

    pub fn atoms(&self) -> &IndexSet {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains(&self, atom: AtomIndex) -> bool {
        self.atoms.contains(atom)
    }

    /// Atoms shared by `self` and `other`; both must come from the same supersystem.
    pub fn intersection(&self, other: &Fragment) -> Result<IndexSet, ModelError> {
        self.supersystem.check_same(&other.supersystem)?;
        Ok(self.atoms.intersection(&other.atoms))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.atoms.fmt(f)
    }
}

/// An insertion-ordered, duplicate-free sequence of fragments over one supersystem.
///
/// The position of a fragment in the family is its *offset*; n-mers refer to fragments
/// exclusively through these offsets, so insertion order is part of the family's value.
#[derive(Debug, Clone)]
pub struct FragmentFamily {
    supersystem: Supersystem,
    fragments: Vec<Fragment>,
    offsets: HashMap<IndexSet, usize>,
}

impl FragmentFamily {
    /// Creates a family with no fragments.
    pub fn empty(supersystem: Supersystem) -> Self {
        Self {
            supersystem,
            fragments: Vec::new(),
            offsets: HashMap::new(),
        }
    }

    /// Creates a family from atom-index collections, one per fragment, in order.
    ///
    /// # Errors
    ///
    /// Fails if any fragment is empty, references an atom outside `supersystem`, or is
    /// structurally identical to an earlier fragment.
    pub fn new<I, F>(supersystem: Supersystem, fragments: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = AtomIndex>,
    {
        let mut family = Self::empty(supersystem);
        for atoms in fragments {
            family.push(Fragment::new(supersystem, atoms)?)?;
        }
        Ok(family)
    }

    /// Creates a family from already-constructed fragments.
    pub fn from_fragments<I>(supersystem: Supersystem, fragments: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut family = Self::empty(supersystem);
        for fragment in fragments {
            family.push(fragment)?;
        }
        Ok(family)
    }

    pub(crate) fn push(&mut self, fragment: Fragment) -> Result<usize, ModelError> {
        self.supersystem.check_same(&fragment.supersystem)?;
        if self.offsets.contains_key(fragment.atoms()) {
            return Err(ModelError::DuplicateFragment(fragment.atoms.clone()));
        }
        let offset = self.fragments.len();
        self.offsets.insert(fragment.atoms.clone(), offset);
        self.fragments.push(fragment);
        Ok(offset)
    }

    pub fn supersystem(&self) -> Supersystem {
        self.supersystem
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the fragment at `offset`.
    pub fn get(&self, offset: usize) -> Result<&Fragment, ModelError> {
        self.fragments
            .get(offset)
            .ok_or(ModelError::IndexOutOfRange {
                index: offset,
                len: self.fragments.len(),
            })
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    /// Offset of the fragment whose atoms equal `atoms`, if any.
    pub fn position(&self, atoms: &IndexSet) -> Option<usize> {
        self.offsets.get(atoms).copied()
    }

    /// Offset of `fragment` inside this family.
    ///
    /// # Errors
    ///
    /// [`ModelError::SupersystemMismatch`] if `fragment` comes from another supersystem and
    /// [`ModelError::UnknownFragment`] if it is not a member.
    pub fn offset_of(&self, fragment: &Fragment) -> Result<usize, ModelError> {
        self.supersystem.check_same(&fragment.supersystem)?;
        self.position(fragment.atoms())
            .ok_or_else(|| ModelError::UnknownFragment {
                fragment: fragment.atoms.clone(),
            })
    }

    pub fn contains(&self, fragment: &Fragment) -> bool {
        self.offset_of(fragment).is_ok()
    }

    /// Union of the atoms of the fragments at `offsets`.
    ///
    /// Overlapping fragments contribute each shared atom once.
    pub fn flatten(&self, offsets: &IndexSet) -> Result<IndexSet, ModelError> {
        let mut atoms = IndexSet::new();
        for offset in offsets {
            atoms.extend_from(self.get(offset)?.atoms());
        }
        Ok(atoms)
    }

    pub fn is_pairwise_disjoint(&self) -> bool {
        self.fragments.iter().enumerate().all(|(i, a)| {
            self.fragments[i + 1..]
                .iter()
                .all(|b| a.atoms.is_disjoint(&b.atoms))
        })
    }
}

impl PartialEq for FragmentFamily {
    fn eq(&self, other: &Self) -> bool {
        self.supersystem == other.supersystem && self.fragments == other.fragments
    }
}

impl Eq for FragmentFamily {}

impl Hash for FragmentFamily {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.supersystem.hash(state);
        self.fragments.hash(state);
    }
}

impl<'a> IntoIterator for &'a FragmentFamily {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
