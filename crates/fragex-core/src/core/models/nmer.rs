use super::basis::{AoSubset, BasisSubset};
use super::error::ModelError;
use super::fragmented::FragmentedSystem;
use super::ids::Supersystem;
use super::index_set::IndexSet;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A set of fragment offsets; the n-mer is the union of those fragments.
pub type NMer = IndexSet;

/// A set of fragment offsets produced by intersecting n-mers; not necessarily an n-mer itself.
pub type KMer = IndexSet;

/// Opaque capping information attached to an n-mer.
///
/// Capping atoms are generated by an external collaborator when bonds are broken; the core
/// only stores and returns them.
pub type CapSet = IndexSet;

#[derive(Debug, Clone)]
struct State<B> {
    fragments: FragmentedSystem<B>,
    nmers: Vec<NMer>,
    caps: Vec<CapSet>,
    atoms: Vec<IndexSet>,
    offsets: HashMap<NMer, usize>,
}

/// A fragmented system plus an insertion-ordered, duplicate-free list of n-mers.
///
/// Every n-mer is flattened to its atom set once, at construction, so n-mer queries never
/// re-walk the constituent fragments.
#[derive(Debug, Clone)]
pub struct NMerSystem<B = AoSubset> {
    state: Option<State<B>>,
}

impl<B> Default for NMerSystem<B> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<B: BasisSubset> NMerSystem<B> {
    /// Creates an n-mer system with no capping information.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::NoState`] if `fragments` holds no state, and with
    /// [`ModelError::EmptyNMer`], [`ModelError::IndexOutOfRange`] or
    /// [`ModelError::DuplicateNMer`] if an n-mer is malformed.
    pub fn new<I>(fragments: FragmentedSystem<B>, nmers: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = NMer>,
    {
        let nmers: Vec<NMer> = nmers.into_iter().collect();
        let caps = vec![CapSet::new(); nmers.len()];
        Self::with_caps(fragments, nmers, caps)
    }

    /// Creates an n-mer system with one cap set per n-mer, in the same order.
    pub fn with_caps(
        fragments: FragmentedSystem<B>,
        nmers: Vec<NMer>,
        caps: Vec<CapSet>,
    ) -> Result<Self, ModelError> {
        if caps.len() != nmers.len() {
            return Err(ModelError::LengthMismatch {
                what: "cap sets",
                expected: nmers.len(),
                found: caps.len(),
            });
        }

        let family = fragments.family()?;
        let mut offsets = HashMap::with_capacity(nmers.len());
        let mut atoms = Vec::with_capacity(nmers.len());
        for (offset, nmer) in nmers.iter().enumerate() {
            if nmer.is_empty() {
                return Err(ModelError::EmptyNMer);
            }
            atoms.push(family.flatten(nmer)?);
            if offsets.insert(nmer.clone(), offset).is_some() {
                return Err(ModelError::DuplicateNMer(nmer.clone()));
            }
        }

        debug!(
            supersystem = %family.supersystem().id(),
            nmers = nmers.len(),
            "Built n-mer system"
        );

        Ok(Self {
            state: Some(State {
                fragments,
                nmers,
                caps,
                atoms,
                offsets,
            }),
        })
    }

    fn state(&self) -> Result<&State<B>, ModelError> {
        self.state.as_ref().ok_or(ModelError::NoState)
    }

    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    /// Number of n-mers.
    pub fn size(&self) -> Result<usize, ModelError> {
        Ok(self.state()?.nmers.len())
    }

    pub fn nmers(&self) -> Result<&[NMer], ModelError> {
        Ok(&self.state()?.nmers)
    }

    /// Returns the n-mer at `offset`.
    pub fn nmer(&self, offset: usize) -> Result<&NMer, ModelError> {
        let state = self.state()?;
        state.nmers.get(offset).ok_or(ModelError::IndexOutOfRange {
            index: offset,
            len: state.nmers.len(),
        })
    }

    /// Capping information of a member n-mer.
    pub fn caps_of(&self, nmer: &NMer) -> Result<&CapSet, ModelError> {
        let state = self.state()?;
        Ok(&state.caps[Self::lookup(state, nmer)?])
    }

    /// The fragmented system the n-mers index into.
    pub fn fragments(&self) -> Result<&FragmentedSystem<B>, ModelError> {
        Ok(&self.state()?.fragments)
    }

    pub fn supersystem(&self) -> Result<Supersystem, ModelError> {
        self.state()?.fragments.supersystem()
    }

    /// Offset of a member n-mer.
    pub fn offset_of(&self, nmer: &NMer) -> Result<usize, ModelError> {
        Self::lookup(self.state()?, nmer)
    }

    pub fn contains(&self, nmer: &NMer) -> bool {
        self.offset_of(nmer).is_ok()
    }

    fn lookup(state: &State<B>, nmer: &NMer) -> Result<usize, ModelError> {
        state
            .offsets
            .get(nmer)
            .copied()
            .ok_or_else(|| ModelError::UnknownNMer { nmer: nmer.clone() })
    }

    /// Union of the atoms of the fragments at `offsets`.
    ///
    /// Accepts any set of fragment offsets, so it works for k-mers that are not members.
    pub fn flatten(&self, offsets: &KMer) -> Result<IndexSet, ModelError> {
        self.state()?.fragments.family()?.flatten(offsets)
    }

    /// Atoms of a member n-mer.
    pub fn atoms_of_nmer(&self, nmer: &NMer) -> Result<&IndexSet, ModelError> {
        let state = self.state()?;
        Ok(&state.atoms[Self::lookup(state, nmer)?])
    }

    /// Basis subset of a member n-mer, computed over its flattened atoms.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::UnknownNMer`] if `nmer` is not a member.
    pub fn basis_of_nmer(&self, nmer: &NMer) -> Result<B, ModelError> {
        let atoms = self.atoms_of_nmer(nmer)?;
        self.state()?.fragments.basis_of_atoms(atoms)
    }

    /// Electron count of a member n-mer; shared atoms are counted once.
    pub fn electrons_of_nmer(&self, nmer: &NMer) -> Result<usize, ModelError> {
        let atoms = self.atoms_of_nmer(nmer)?;
        self.state()?.fragments.electrons_of_atoms(atoms)
    }

    /// Basis subset of an arbitrary k-mer over this system's fragments.
    pub fn basis_of_kmer(&self, kmer: &KMer) -> Result<B, ModelError> {
        let atoms = self.flatten(kmer)?;
        self.basis_of_atoms(&atoms)
    }

    /// Electron count of an arbitrary k-mer over this system's fragments.
    pub fn electrons_of_kmer(&self, kmer: &KMer) -> Result<usize, ModelError> {
        let atoms = self.flatten(kmer)?;
        self.electrons_of_atoms(&atoms)
    }

    pub fn basis_of_atoms(&self, atoms: &IndexSet) -> Result<B, ModelError> {
        self.state()?.fragments.basis_of_atoms(atoms)
    }

    pub fn electrons_of_atoms(&self, atoms: &IndexSet) -> Result<usize, ModelError> {
        self.state()?.fragments.electrons_of_atoms(atoms)
    }
}

impl<B: BasisSubset> PartialEq for NMerSystem<B> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.fragments == b.fragments && a.nmers == b.nmers && a.caps == b.caps
            }
            _ => false,
        }
    }
}

impl<B: BasisSubset> Eq for NMerSystem<B> {}

impl<B: BasisSubset> Hash for NMerSystem<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.state {
            None => 0u8.hash(state),
            Some(inner) => {
                1u8.hash(state);
                inner.fragments.hash(state);
                inner.nmers.hash(state);
                inner.caps.hash(state);
            }
        }
    }
}
