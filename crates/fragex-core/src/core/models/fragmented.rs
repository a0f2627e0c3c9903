use super::basis::{AoSubset, BasisSubset};
use super::error::ModelError;
use super::fragment::{Fragment, FragmentFamily};
use super::ids::{AtomIndex, Supersystem};
use super::index_set::IndexSet;
use crate::core::assignment::{BasisAssignment, ElectronAssignment};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct State<B> {
    family: FragmentFamily,
    atom_basis: Vec<B>,
    atom_electrons: Vec<usize>,
    fragment_basis: Vec<B>,
    fragment_electrons: Vec<usize>,
}

/// A fragment family together with the basis subset and electron count of every member.
///
/// The per-atom data is requested from the collaborators exactly once, at construction,
/// and every per-fragment value is derived from it eagerly. Queries are therefore pure
/// lookups or aggregations and never call back into a collaborator.
///
/// A default-constructed (or [`std::mem::take`]n) system holds no state; every query on it
/// fails with [`ModelError::NoState`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentedSystem<B = AoSubset> {
    state: Option<State<B>>,
}

impl<B> Default for FragmentedSystem<B> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<B: BasisSubset> FragmentedSystem<B> {
    /// Creates a fragmented system over `family`.
    ///
    /// # Arguments
    ///
    /// * `family` - The fragments, in the order that defines their offsets.
    /// * `basis` - Collaborator returning the basis subset induced by one atom.
    /// * `electrons` - Collaborator returning the electron count of one atom.
    ///
    /// # Return
    ///
    /// A system whose fragment maps cover every member of `family`.
    ///
    /// # Errors
    ///
    /// Propagates the first collaborator failure; no partially built system is returned.
    pub fn new<A, E>(family: FragmentFamily, basis: &A, electrons: &E) -> Result<Self, ModelError>
    where
        A: BasisAssignment<B> + ?Sized,
        E: ElectronAssignment + ?Sized,
    {
        let natoms = family.supersystem().natoms();
        let atom_basis = (0..natoms)
            .map(|atom| basis.basis_of_atom(atom))
            .collect::<Result<Vec<_>, _>>()?;
        let atom_electrons = (0..natoms)
            .map(|atom| electrons.electrons_of_atom(atom))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_tables(family, atom_basis, atom_electrons))
    }

    fn from_tables(family: FragmentFamily, atom_basis: Vec<B>, atom_electrons: Vec<usize>) -> Self {
        let fragment_basis = family
            .iter()
            .map(|fragment| B::union_all(fragment.atoms().iter().map(|atom| &atom_basis[atom])))
            .collect();
        let fragment_electrons = family
            .iter()
            .map(|fragment| fragment.atoms().iter().map(|atom| atom_electrons[atom]).sum::<usize>())
            .collect();

        debug!(
            supersystem = %family.supersystem().id(),
            fragments = family.len(),
            "Built fragmented system"
        );

        Self {
            state: Some(State {
                family,
                atom_basis,
                atom_electrons,
                fragment_basis,
                fragment_electrons,
            }),
        }
    }

    /// Rebuilds the system over another family of the same supersystem, reusing the
    /// per-atom tables instead of calling the collaborators again.
    pub(crate) fn with_family(&self, family: FragmentFamily) -> Result<Self, ModelError> {
        let state = self.state()?;
        state.family.supersystem().check_same(&family.supersystem())?;
        Ok(Self::from_tables(
            family,
            state.atom_basis.clone(),
            state.atom_electrons.clone(),
        ))
    }

    fn state(&self) -> Result<&State<B>, ModelError> {
        self.state.as_ref().ok_or(ModelError::NoState)
    }

    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    /// Number of fragments in the underlying family.
    pub fn nfrags(&self) -> Result<usize, ModelError> {
        Ok(self.state()?.family.len())
    }

    pub fn family(&self) -> Result<&FragmentFamily, ModelError> {
        Ok(&self.state()?.family)
    }

    pub fn supersystem(&self) -> Result<Supersystem, ModelError> {
        Ok(self.state()?.family.supersystem())
    }

    /// Returns the fragment at `offset`.
    pub fn fragment(&self, offset: usize) -> Result<&Fragment, ModelError> {
        self.state()?.family.get(offset)
    }

    /// Basis subset of a member fragment.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::NoState`] on an empty instance, and with an out-of-range
    /// error if `fragment` is not a member or comes from another supersystem.
    pub fn basis_of_fragment(&self, fragment: &Fragment) -> Result<&B, ModelError> {
        let state = self.state()?;
        let offset = state.family.offset_of(fragment)?;
        Ok(&state.fragment_basis[offset])
    }

    /// Electron count of a member fragment; fails like [`Self::basis_of_fragment`].
    pub fn electrons_of_fragment(&self, fragment: &Fragment) -> Result<usize, ModelError> {
        let state = self.state()?;
        let offset = state.family.offset_of(fragment)?;
        Ok(state.fragment_electrons[offset])
    }

    pub fn basis_of_offset(&self, offset: usize) -> Result<&B, ModelError> {
        let state = self.state()?;
        state.family.get(offset)?;
        Ok(&state.fragment_basis[offset])
    }

    pub fn electrons_of_offset(&self, offset: usize) -> Result<usize, ModelError> {
        let state = self.state()?;
        state.family.get(offset)?;
        Ok(state.fragment_electrons[offset])
    }

    pub fn basis_of_atom(&self, atom: AtomIndex) -> Result<&B, ModelError> {
        let state = self.state()?;
        state.family.supersystem().check_atom(atom)?;
        Ok(&state.atom_basis[atom])
    }

    pub fn electrons_of_atom(&self, atom: AtomIndex) -> Result<usize, ModelError> {
        let state = self.state()?;
        state.family.supersystem().check_atom(atom)?;
        Ok(state.atom_electrons[atom])
    }

    /// Union of the per-atom basis subsets over an arbitrary atom set.
    ///
    /// # Arguments
    ///
    /// * `atoms` - Atom indices of this system's supersystem.
    ///
    /// # Return
    ///
    /// The unioned basis subset; the empty subset for an empty `atoms`.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::AtomOutOfRange`] if any atom lies outside the supersystem.
    pub fn basis_of_atoms(&self, atoms: &IndexSet) -> Result<B, ModelError> {
        let state = self.state()?;
        Self::check_atoms(state, atoms)?;
        Ok(B::union_all(atoms.iter().map(|atom| &state.atom_basis[atom])))
    }

    /// Sum of the per-atom electron counts over an arbitrary atom set.
    pub fn electrons_of_atoms(&self, atoms: &IndexSet) -> Result<usize, ModelError> {
        let state = self.state()?;
        Self::check_atoms(state, atoms)?;
        Ok(atoms.iter().map(|atom| state.atom_electrons[atom]).sum())
    }

    fn check_atoms(state: &State<B>, atoms: &IndexSet) -> Result<(), ModelError> {
        match atoms.last() {
            Some(largest) => state.family.supersystem().check_atom(largest),
            None => Ok(()),
        }
    }
}
