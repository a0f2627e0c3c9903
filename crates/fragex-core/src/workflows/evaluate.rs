use crate::core::expression::{Expression, Term};
use crate::core::models::basis::{AoSubset, BasisSubset};
use crate::core::models::fragmented::FragmentedSystem;
use crate::core::models::index_set::IndexSet;
use crate::core::models::nmer::{KMer, NMerSystem};
use crate::engine::config::ExpansionConfig;
use crate::engine::error::{EngineError, EvaluationError};
use crate::engine::mbe::TermBuilder;
use crate::engine::nmers::make_nmers;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The subsystem behind one term, materialized for a property evaluator.
#[derive(Debug, Clone)]
pub struct Subsystem<'a, B = AoSubset> {
    /// Fragment offsets spanned by the term.
    pub kmer: &'a KMer,
    /// Flattened atom indices of the k-mer.
    pub atoms: IndexSet,
    pub basis: &'a B,
    pub n_electrons: usize,
}

/// Computes a scalar property (an energy, typically) of one subsystem.
///
/// Evaluators must be `Sync`; with the `parallel` feature, terms are evaluated concurrently.
pub trait PropertyEvaluator<B>: Sync {
    fn evaluate(&self, subsystem: &Subsystem<'_, B>) -> Result<f64, EvaluationError>;
}

impl<B, F> PropertyEvaluator<B> for F
where
    F: Fn(&Subsystem<'_, B>) -> Result<f64, EvaluationError> + Sync,
{
    fn evaluate(&self, subsystem: &Subsystem<'_, B>) -> Result<f64, EvaluationError> {
        self(subsystem)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionResult<B = AoSubset> {
    pub expression: Expression<B>,
    /// Property value of each term, in expression order.
    pub term_values: Vec<f64>,
    /// `Σ cᵢ · Pᵢ` over all terms.
    pub total: f64,
}

impl<B> ExpansionResult<B> {
    /// Each term with its raw and coefficient-weighted property value.
    pub fn contributions(&self) -> impl Iterator<Item = (&Term<B>, f64, f64)> + '_ {
        self.expression
            .iter()
            .zip(&self.term_values)
            .map(|(term, &value)| (term, value, term.coefficient() * value))
    }
}

/// Runs the full expansion: n-mer generation, term construction and property evaluation.
///
/// # Arguments
///
/// * `fragments` - The fragmented supersystem.
/// * `config` - Truncation order, resource limits and zero-coefficient policy.
/// * `evaluator` - Computes the property of each term's subsystem.
/// * `reporter` - Receives phase and per-term progress events.
///
/// # Return
///
/// The expression, the property value of every term and their weighted sum.
///
/// # Errors
///
/// Propagates configuration, model and resource-limit errors, and wraps the first evaluator
/// failure (in term order) in [`EngineError::Evaluation`].
#[instrument(skip_all, name = "evaluate_workflow")]
pub fn run<B, E>(
    fragments: FragmentedSystem<B>,
    config: &ExpansionConfig,
    evaluator: &E,
    reporter: &ProgressReporter,
) -> Result<ExpansionResult<B>, EngineError>
where
    B: BasisSubset,
    E: PropertyEvaluator<B> + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "N-mer Generation",
    });
    let nmers = make_nmers(fragments, config)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Term Construction",
    });
    let expression = TermBuilder::from_config(config).build(&nmers)?;
    reporter.report(Progress::PhaseFinish);

    evaluate_expression(&nmers, expression, evaluator, reporter)
}

/// Evaluates every term of `expression`, whose k-mers index into the fragments of `nmers`.
#[instrument(skip_all, name = "property_evaluation", fields(terms = expression.size()))]
pub fn evaluate_expression<B, E>(
    nmers: &NMerSystem<B>,
    expression: Expression<B>,
    evaluator: &E,
    reporter: &ProgressReporter,
) -> Result<ExpansionResult<B>, EngineError>
where
    B: BasisSubset,
    E: PropertyEvaluator<B> + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "Property Evaluation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: expression.size() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = expression.terms().iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = expression.terms().par_iter().enumerate();

    let results: Vec<Result<f64, EngineError>> = iterator
        .map(|(index, term)| {
            let value = evaluate_term(nmers, index, term, evaluator);
            reporter.report(Progress::TaskIncrement);
            value
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let term_values = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let total: f64 = expression
        .iter()
        .zip(&term_values)
        .map(|(term, value)| term.coefficient() * value)
        .sum();

    info!(terms = term_values.len(), total, "Property evaluation finished.");
    reporter.report(Progress::PhaseFinish);

    Ok(ExpansionResult {
        expression,
        term_values,
        total,
    })
}

fn evaluate_term<B, E>(
    nmers: &NMerSystem<B>,
    index: usize,
    term: &Term<B>,
    evaluator: &E,
) -> Result<f64, EngineError>
where
    B: BasisSubset,
    E: PropertyEvaluator<B> + ?Sized,
{
    let subsystem = Subsystem {
        kmer: term.kmer(),
        atoms: nmers.flatten(term.kmer())?,
        basis: term.basis(),
        n_electrons: term.n_electrons(),
    };
    debug!(index, kmer = %term.kmer(), "Evaluating term");
    evaluator
        .evaluate(&subsystem)
        .map_err(|source| EngineError::Evaluation {
            index,
            kmer: term.kmer().clone(),
            source,
        })
}
