use super::ids::{AtomIndex, SupersystemId};
use super::index_set::IndexSet;
use thiserror::Error;

/// Coarse classification of every failure the library can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The receiver was default constructed and holds no state.
    NoState,
    /// An index, fragment or n-mer is not recognized by the receiver.
    OutOfRange,
    /// The input violates a structural invariant (duplicates, empty sets, bad options).
    InvalidInput,
    /// A configured combinatorial ceiling was exceeded.
    ResourceExhaustion,
    /// The external property evaluator failed.
    Evaluation,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Instance has no state. Was it default constructed?")]
    NoState,

    #[error("Offset {index} is not in the range [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Atom {atom} is not part of a supersystem with {natoms} atoms")]
    AtomOutOfRange { atom: AtomIndex, natoms: usize },

    #[error("Fragment {fragment} is not a member of this system")]
    UnknownFragment { fragment: IndexSet },

    #[error("N-mer {nmer} is not a member of this system")]
    UnknownNMer { nmer: IndexSet },

    #[error("Supersystem mismatch: expected {expected}, found {found}")]
    SupersystemMismatch {
        expected: SupersystemId,
        found: SupersystemId,
    },

    #[error("Fragment {0} appears more than once")]
    DuplicateFragment(IndexSet),

    #[error("N-mer {0} appears more than once")]
    DuplicateNMer(IndexSet),

    #[error("Fragments must contain at least one atom")]
    EmptyFragment,

    #[error("N-mers must contain at least one fragment")]
    EmptyNMer,

    #[error("Expected {expected} {what}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoState => ErrorKind::NoState,
            Self::IndexOutOfRange { .. }
            | Self::AtomOutOfRange { .. }
            | Self::UnknownFragment { .. }
            | Self::UnknownNMer { .. }
            | Self::SupersystemMismatch { .. } => ErrorKind::OutOfRange,
            Self::DuplicateFragment(_)
            | Self::DuplicateNMer(_)
            | Self::EmptyFragment
            | Self::EmptyNMer
            | Self::LengthMismatch { .. } => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_are_classified_as_out_of_range() {
        let errors = [
            ModelError::IndexOutOfRange { index: 3, len: 3 },
            ModelError::AtomOutOfRange { atom: 9, natoms: 4 },
            ModelError::UnknownFragment {
                fragment: IndexSet::from([0, 1]),
            },
            ModelError::UnknownNMer {
                nmer: IndexSet::from([2]),
            },
        ];
        for error in errors {
            assert_eq!(error.kind(), ErrorKind::OutOfRange, "{error}");
        }
    }

    #[test]
    fn no_state_has_its_own_kind() {
        assert_eq!(ModelError::NoState.kind(), ErrorKind::NoState);
    }

    #[test]
    fn messages_include_the_offending_values() {
        let msg = ModelError::IndexOutOfRange { index: 5, len: 2 }.to_string();
        assert_eq!(msg, "Offset 5 is not in the range [0, 2)");

        let msg = ModelError::DuplicateFragment(IndexSet::from([1, 0])).to_string();
        assert_eq!(msg, "Fragment {0, 1} appears more than once");
    }
}
