//! Per-atom collaborators that feed basis subsets and electron counts into the core.
//!
//! The fragment models never construct a basis or count electrons on their own. Instead a
//! [`FragmentedSystem`](crate::core::models::fragmented::FragmentedSystem) asks a
//! [`BasisAssignment`] and an [`ElectronAssignment`] once per atom and aggregates from there.
//! Plain closures implement both traits, and [`AtomTable`] provides a table-driven
//! implementation for callers that already know every atom's data up front.

use crate::core::models::basis::{AoSubset, BasisSubset};
use crate::core::models::error::ModelError;
use crate::core::models::ids::AtomIndex;

/// Supplies the basis subset induced by a single atom.
pub trait BasisAssignment<B: BasisSubset> {
    /// Returns the basis subset induced by `atom`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AtomOutOfRange`] if the collaborator has no data for `atom`.
    fn basis_of_atom(&self, atom: AtomIndex) -> Result<B, ModelError>;
}

/// Supplies the number of electrons contributed by a single atom.
pub trait ElectronAssignment {
    /// Returns the electron count contributed by `atom`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AtomOutOfRange`] if the collaborator has no data for `atom`.
    fn electrons_of_atom(&self, atom: AtomIndex) -> Result<usize, ModelError>;
}

impl<B, F> BasisAssignment<B> for F
where
    B: BasisSubset,
    F: Fn(AtomIndex) -> B,
{
    fn basis_of_atom(&self, atom: AtomIndex) -> Result<B, ModelError> {
        Ok(self(atom))
    }
}

impl<F> ElectronAssignment for F
where
    F: Fn(AtomIndex) -> usize,
{
    fn electrons_of_atom(&self, atom: AtomIndex) -> Result<usize, ModelError> {
        Ok(self(atom))
    }
}

/// One basis subset and one electron count per atom, indexed by [`AtomIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomTable<B = AoSubset> {
    basis: Vec<B>,
    electrons: Vec<usize>,
}

impl<B: BasisSubset> AtomTable<B> {
    /// Creates a table from parallel per-atom vectors.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LengthMismatch`] if the two vectors disagree on the number of atoms.
    pub fn new(basis: Vec<B>, electrons: Vec<usize>) -> Result<Self, ModelError> {
        if basis.len() != electrons.len() {
            return Err(ModelError::LengthMismatch {
                what: "electron counts",
                expected: basis.len(),
                found: electrons.len(),
            });
        }
        Ok(Self { basis, electrons })
    }

    pub fn natoms(&self) -> usize {
        self.basis.len()
    }

    pub fn basis(&self, atom: AtomIndex) -> Option<&B> {
        self.basis.get(atom)
    }

    pub fn electrons(&self, atom: AtomIndex) -> Option<usize> {
        self.electrons.get(atom).copied()
    }

    fn out_of_range(&self, atom: AtomIndex) -> ModelError {
        ModelError::AtomOutOfRange {
            atom,
            natoms: self.natoms(),
        }
    }
}

impl AtomTable<AoSubset> {
    /// Builds a table where atom `i` owns the next `basis_sizes[i]` AO functions.
    ///
    /// Offsets are assigned contiguously in atom order, so the first atom owns
    /// `0..basis_sizes[0]`, the second the block right after it, and so on.
    ///
    /// # Arguments
    ///
    /// * `basis_sizes` - Number of AO functions centered on each atom.
    /// * `electrons` - Electron count of each atom.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LengthMismatch`] if the slices describe different numbers of atoms.
    pub fn from_basis_sizes(basis_sizes: &[usize], electrons: Vec<usize>) -> Result<Self, ModelError> {
        let mut start = 0;
        let basis = basis_sizes
            .iter()
            .map(|&size| {
                let block = AoSubset::from_range(start..start + size);
                start += size;
                block
            })
            .collect();
        Self::new(basis, electrons)
    }

    /// Total number of AO functions across all atoms.
    pub fn nbasis(&self) -> usize {
        self.basis.iter().map(AoSubset::len).sum()
    }
}

impl<B: BasisSubset> BasisAssignment<B> for AtomTable<B> {
    fn basis_of_atom(&self, atom: AtomIndex) -> Result<B, ModelError> {
        self.basis(atom)
            .cloned()
            .ok_or_else(|| self.out_of_range(atom))
    }
}

impl<B: BasisSubset> ElectronAssignment for AtomTable<B> {
    fn electrons_of_atom(&self, atom: AtomIndex) -> Result<usize, ModelError> {
        self.electrons(atom).ok_or_else(|| self.out_of_range(atom))
    }
}
