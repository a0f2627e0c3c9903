use crate::core::models::basis::AoSubset;
use crate::core::models::nmer::KMer;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One weighted subsystem of an [`Expression`](super::Expression).
#[derive(Debug, Clone, PartialEq)]
pub struct Term<B = AoSubset> {
    kmer: KMer,
    basis: B,
    n_electrons: usize,
    coefficient: f64,
}

impl<B> Term<B> {
    pub fn new(kmer: KMer, basis: B, n_electrons: usize, coefficient: f64) -> Self {
        Self {
            kmer,
            basis,
            n_electrons,
            coefficient,
        }
    }

    /// Fragment offsets spanned by this term.
    pub fn kmer(&self) -> &KMer {
        &self.kmer
    }

    pub fn basis(&self) -> &B {
        &self.basis
    }

    pub fn n_electrons(&self) -> usize {
        self.n_electrons
    }

    #[inline]
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

// Hashing goes through the bit pattern, with -0.0 folded onto 0.0 so that equal terms hash equal.
impl<B: Hash> Hash for Term<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kmer.hash(state);
        self.basis.hash(state);
        self.n_electrons.hash(state);
        let coefficient = if self.coefficient == 0.0 {
            0.0f64
        } else {
            self.coefficient
        };
        coefficient.to_bits().hash(state);
    }
}

impl<B> fmt::Display for Term<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:+} × {} ({} electrons)",
            self.coefficient, self.kmer, self.n_electrons
        )
    }
}
