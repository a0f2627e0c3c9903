//! Loading fragmented systems from TOML descriptions.
//!
//! ```toml
//! fragments = [[0, 1, 2], [2, 3]]
//!
//! [[atoms]]
//! element = "O"
//! basis-functions = 5
//!
//! [[atoms]]
//! element = "Na"
//! charge = 1
//! basis-functions = 9
//! ```
//!
//! Atoms are indexed in file order. Each atom contributes a contiguous block of AO offsets
//! and `Z - charge` electrons.

use crate::elements;
use crate::error::{CliError, Result};
use fragex::core::assignment::AtomTable;
use fragex::core::models::fragment::FragmentFamily;
use fragex::core::models::fragmented::FragmentedSystem;
use fragex::core::models::ids::Supersystem;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FileAtom {
    element: String,
    #[serde(default)]
    charge: i64,
    basis_functions: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct SystemFile {
    atoms: Vec<FileAtom>,
    fragments: Vec<Vec<usize>>,
}

/// A parsed system description: per-atom tables plus the fragment family over them.
#[derive(Debug, Clone)]
pub struct LoadedSystem {
    pub elements: Vec<String>,
    pub table: AtomTable,
    pub family: FragmentFamily,
}

impl LoadedSystem {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading system description from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let file: SystemFile = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::from_description(file)
    }

    fn from_description(file: SystemFile) -> Result<Self> {
        if file.atoms.is_empty() {
            return Err(CliError::System("at least one atom is required".to_string()));
        }
        if file.fragments.is_empty() {
            return Err(CliError::System(
                "at least one fragment is required".to_string(),
            ));
        }

        let mut elements = Vec::with_capacity(file.atoms.len());
        let mut basis_sizes = Vec::with_capacity(file.atoms.len());
        let mut electrons = Vec::with_capacity(file.atoms.len());
        for (index, atom) in file.atoms.iter().enumerate() {
            let z = elements::atomic_number(&atom.element).ok_or_else(|| {
                CliError::System(format!(
                    "atom {} has unknown element '{}'",
                    index, atom.element
                ))
            })?;
            let count = i64::from(z)
                .checked_sub(atom.charge)
                .and_then(|count| usize::try_from(count).ok())
                .ok_or_else(|| {
                    CliError::System(format!(
                        "atom {} ({}) with charge {} has no valid electron count",
                        index, atom.element, atom.charge
                    ))
                })?;
            elements.push(atom.element.trim().to_string());
            basis_sizes.push(atom.basis_functions);
            electrons.push(count);
        }

        let table = AtomTable::from_basis_sizes(&basis_sizes, electrons)?;
        let supersystem = Supersystem::new(file.atoms.len());
        let family = FragmentFamily::new(supersystem, file.fragments)?;

        info!(
            atoms = table.natoms(),
            basis_functions = table.nbasis(),
            fragments = family.len(),
            "System description loaded."
        );

        Ok(Self {
            elements,
            table,
            family,
        })
    }

    pub fn natoms(&self) -> usize {
        self.table.natoms()
    }

    /// Hill-order formula: carbon, then hydrogen, then the remaining elements alphabetically.
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for symbol in &self.elements {
            if let Some(z) = elements::atomic_number(symbol) {
                let canonical = elements::symbol(z).unwrap_or(symbol.as_str());
                *counts.entry(canonical.to_string()).or_default() += 1;
            }
        }

        let mut formula = String::new();
        let mut push = |symbol: &str, count: usize| {
            formula.push_str(symbol);
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        };
        let has_carbon = counts.contains_key("C");
        if has_carbon {
            for symbol in ["C", "H"] {
                if let Some(count) = counts.remove(symbol) {
                    push(symbol, count);
                }
            }
        }
        for (symbol, count) in counts {
            push(&symbol, count);
        }
        formula
    }

    /// Queries the atom table for every fragment.
    pub fn fragmented(&self) -> Result<FragmentedSystem> {
        Ok(FragmentedSystem::new(
            self.family.clone(),
            &self.table,
            &self.table,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragex::core::models::error::ModelError;
    use fragex::core::models::index_set::IndexSet;
    use std::fs;
    use tempfile::tempdir;

    const WATER_DIMER: &str = r#"
        fragments = [[0, 1, 2], [3, 4, 5]]

        [[atoms]]
        element = "O"
        basis-functions = 5
        [[atoms]]
        element = "H"
        basis-functions = 1
        [[atoms]]
        element = "H"
        basis-functions = 1
        [[atoms]]
        element = "O"
        basis-functions = 5
        [[atoms]]
        element = "H"
        basis-functions = 1
        [[atoms]]
        element = "h"
        basis-functions = 1
    "#;

    fn load(content: &str) -> Result<LoadedSystem> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(&path, content).unwrap();
        LoadedSystem::from_file(&path)
    }

    #[test]
    fn water_dimer_loads_with_element_electron_counts() {
        let system = load(WATER_DIMER).unwrap();
        assert_eq!(system.natoms(), 6);
        assert_eq!(system.table.nbasis(), 14);
        assert_eq!(system.family.len(), 2);

        let fragmented = system.fragmented().unwrap();
        assert_eq!(fragmented.electrons_of_offset(0), Ok(10));
        assert_eq!(fragmented.electrons_of_offset(1), Ok(10));
        assert_eq!(fragmented.basis_of_offset(1).unwrap().len(), 7);
        assert_eq!(
            fragmented.fragment(1).unwrap().atoms(),
            &IndexSet::from([3, 4, 5])
        );
    }

    #[test]
    fn formula_uses_hill_order() {
        let system = load(WATER_DIMER).unwrap();
        assert_eq!(system.formula(), "H4O2");

        let methanol = load(
            r#"
            fragments = [[0, 1, 2, 3, 4, 5]]
            [[atoms]]
            element = "O"
            basis-functions = 1
            [[atoms]]
            element = "C"
            basis-functions = 1
            [[atoms]]
            element = "H"
            basis-functions = 1
            [[atoms]]
            element = "H"
            basis-functions = 1
            [[atoms]]
            element = "H"
            basis-functions = 1
            [[atoms]]
            element = "h"
            basis-functions = 1
            "#,
        )
        .unwrap();
        assert_eq!(methanol.formula(), "CH4O");
    }

    #[test]
    fn charge_is_subtracted_from_the_atomic_number() {
        let system = load(
            r#"
            fragments = [[0], [1]]
            [[atoms]]
            element = "Na"
            charge = 1
            basis-functions = 9
            [[atoms]]
            element = "Cl"
            charge = -1
            basis-functions = 13
            "#,
        )
        .unwrap();
        assert_eq!(system.table.electrons(0), Some(10));
        assert_eq!(system.table.electrons(1), Some(18));
    }

    #[test]
    fn unknown_elements_are_rejected() {
        let result = load(
            r#"
            fragments = [[0]]
            [[atoms]]
            element = "Qq"
            basis-functions = 1
            "#,
        );
        assert!(matches!(result, Err(CliError::System(msg)) if msg.contains("Qq")));
    }

    #[test]
    fn negative_electron_counts_are_rejected() {
        let result = load(
            r#"
            fragments = [[0]]
            [[atoms]]
            element = "H"
            charge = 2
            basis-functions = 1
            "#,
        );
        assert!(matches!(result, Err(CliError::System(_))));
    }

    #[test]
    fn extreme_charges_are_rejected_without_overflow() {
        for charge in [i64::MIN, i64::MAX] {
            let result = load(&format!(
                r#"
                fragments = [[0]]
                [[atoms]]
                element = "H"
                charge = {charge}
                basis-functions = 1
                "#
            ));
            assert!(
                matches!(&result, Err(CliError::System(msg)) if msg.contains("charge")),
                "charge {charge}"
            );
        }
    }

    #[test]
    fn fragments_must_reference_existing_atoms() {
        let result = load(
            r#"
            fragments = [[0, 7]]
            [[atoms]]
            element = "H"
            basis-functions = 1
            "#,
        );
        assert!(matches!(
            result,
            Err(CliError::Model(ModelError::AtomOutOfRange { atom: 7, natoms: 1 }))
        ));
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        let result = load(
            r#"
            fragments = [[0]]
            [[atoms]]
            element = "H"
            "#,
        );
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn empty_fragment_lists_are_rejected() {
        let result = load(
            r#"
            fragments = []
            [[atoms]]
            element = "H"
            basis-functions = 1
            "#,
        );
        assert!(matches!(result, Err(CliError::System(_))));
    }
}
