use super::term::Term;
use crate::core::models::basis::AoSubset;
use crate::core::models::error::ModelError;
use std::hash::{Hash, Hasher};

/// An ordered, possibly empty sequence of [`Term`]s.
///
/// Equality is positional: two expressions are equal only if they hold equal terms in the
/// same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<B = AoSubset> {
    terms: Vec<Term<B>>,
}

impl<B> Default for Expression<B> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<B> Expression<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the term at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] if `index >= self.size()`.
    pub fn at(&self, index: usize) -> Result<&Term<B>, ModelError> {
        self.terms.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.terms.len(),
        })
    }

    pub fn add_term(&mut self, term: Term<B>) {
        self.terms.push(term);
    }

    /// Builder-style [`Self::add_term`].
    pub fn with_term(mut self, term: Term<B>) -> Self {
        self.add_term(term);
        self
    }

    pub fn terms(&self) -> &[Term<B>] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term<B>> {
        self.terms.iter()
    }

    /// Sum of all coefficients.
    pub fn coefficient_sum(&self) -> f64 {
        self.terms.iter().map(Term::coefficient).sum()
    }
}

impl<B: Hash> Hash for Expression<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.terms.hash(state);
    }
}

impl<B> FromIterator<Term<B>> for Expression<B> {
    fn from_iter<I: IntoIterator<Item = Term<B>>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<B> Extend<Term<B>> for Expression<B> {
    fn extend<I: IntoIterator<Item = Term<B>>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl<B> IntoIterator for Expression<B> {
    type Item = Term<B>;
    type IntoIter = std::vec::IntoIter<Term<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a, B> IntoIterator for &'a Expression<B> {
    type Item = &'a Term<B>;
    type IntoIter = std::slice::Iter<'a, Term<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::nmer::KMer;
    use crate::core::utils::hashing::fingerprint;

    fn term(offset: usize, coefficient: f64) -> Term {
        Term::new(KMer::from([offset]), AoSubset::new(), 2, coefficient)
    }

    #[test]
    fn new_expression_is_empty() {
        let expression = Expression::<AoSubset>::new();
        assert_eq!(expression.size(), 0);
        assert!(expression.is_empty());
    }

    #[test]
    fn at_is_bounds_checked() {
        let expression = Expression::new().with_term(term(0, 1.0));
        assert_eq!(expression.at(0).unwrap(), &term(0, 1.0));
        assert_eq!(
            expression.at(expression.size()).unwrap_err(),
            ModelError::IndexOutOfRange { index: 1, len: 1 }
        );
    }

    #[test]
    fn at_size_on_an_empty_expression_is_out_of_range() {
        let expression = Expression::<AoSubset>::default();
        assert_eq!(
            expression.at(0).unwrap_err(),
            ModelError::IndexOutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn add_term_appends_in_order() {
        let mut expression = Expression::new();
        expression.add_term(term(2, 1.0));
        expression.add_term(term(0, -1.0));
        let offsets: Vec<_> = expression
            .iter()
            .map(|t| t.kmer().first().unwrap())
            .collect();
        assert_eq!(offsets, vec![2, 0]);
        assert_eq!(expression.coefficient_sum(), 0.0);
    }

    #[test]
    fn equality_and_fingerprint_are_order_sensitive() {
        let forward: Expression = [term(0, 1.0), term(1, 1.0)].into_iter().collect();
        let backward: Expression = [term(1, 1.0), term(0, 1.0)].into_iter().collect();
        let again: Expression = [term(0, 1.0), term(1, 1.0)].into_iter().collect();

        assert_ne!(forward, backward);
        assert_eq!(forward, again);
        assert_eq!(fingerprint(&forward), fingerprint(&again));
        assert_ne!(fingerprint(&forward), fingerprint(&backward));
    }

    #[test]
    fn expressions_of_different_length_are_not_equal() {
        let short = Expression::new().with_term(term(0, 1.0));
        let long = short.clone().with_term(term(1, 1.0));
        assert_ne!(short, long);
    }
}
