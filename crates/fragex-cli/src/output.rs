use crate::error::Result;
use fragex::core::expression::Expression;
use fragex::core::models::fragment::FragmentFamily;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

/// One printed or exported row of an expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermRecord {
    pub index: usize,
    pub kmer: String,
    pub atoms: String,
    pub coefficient: f64,
    pub electrons: usize,
    pub basis_functions: usize,
    pub value: Option<f64>,
    pub weighted: Option<f64>,
}

/// Flattens every term of `expression` against `family` and pairs it with its property value.
///
/// `values`, when given, must hold one entry per term in expression order.
pub fn term_records(
    expression: &Expression,
    family: &FragmentFamily,
    values: Option<&[f64]>,
) -> Result<Vec<TermRecord>> {
    expression
        .iter()
        .enumerate()
        .map(|(index, term)| -> Result<TermRecord> {
            let value = values.and_then(|values| values.get(index).copied());
            Ok(TermRecord {
                index,
                kmer: term.kmer().to_string(),
                atoms: family.flatten(term.kmer())?.to_string(),
                coefficient: term.coefficient(),
                electrons: term.n_electrons(),
                basis_functions: term.basis().len(),
                value,
                weighted: value.map(|value| term.coefficient() * value),
            })
        })
        .collect()
}

pub fn render_terms(records: &[TermRecord]) -> String {
    let kmer_width = column_width("k-mer", records.iter().map(|r| r.kmer.as_str()));
    let atoms_width = column_width("atoms", records.iter().map(|r| r.atoms.as_str()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<kmer_width$}  {:<atoms_width$}  {:>6}  {:>9}  {:>5}  {:>12}  {:>12}",
        "#", "k-mer", "atoms", "coeff", "electrons", "nbf", "value", "weighted"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:>5}  {:<kmer_width$}  {:<atoms_width$}  {:>+6}  {:>9}  {:>5}  {:>12}  {:>12}",
            record.index,
            record.kmer,
            record.atoms,
            record.coefficient,
            record.electrons,
            record.basis_functions,
            format_optional(record.value),
            format_optional(record.weighted),
        );
    }
    out
}

/// Lists a family whose first `original` members are the input fragments and whose remaining
/// members were found by the intersection search.
pub fn render_fragments(family: &FragmentFamily, original: usize) -> String {
    let mut out = String::new();
    for (offset, fragment) in family.iter().enumerate() {
        let origin = if offset < original {
            "fragment"
        } else {
            "intersection"
        };
        let _ = writeln!(
            out,
            "{:>5}  {:<12}  {}",
            offset,
            origin,
            fragment.atoms()
        );
    }
    out
}

pub fn write_csv(path: &Path, records: &[TermRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(rows = records.len(), "Wrote term table to {:?}", path);
    Ok(())
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{:.4}", value))
}
