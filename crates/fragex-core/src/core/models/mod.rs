//! # Core Models Module
//!
//! Data structures describing how a molecular supersystem is partitioned.
//!
//! ## Key Components
//!
//! - [`ids`] - Atom indices and supersystem identity
//! - [`index_set`] - Canonical (sorted) sets of atom indices or fragment offsets
//! - [`fragment`] - Fragments and insertion-ordered fragment families
//! - [`basis`] - The `BasisSubset` abstraction and the default `AoSubset`
//! - [`fragmented`] - A fragment family together with its basis and electron maps
//! - [`nmer`] - Sets of n-mers built on top of a fragmented system
//! - [`error`] - Error types shared by every model
//!
//! ## Usage
//!
//! ```ignore
//! use fragex::core::assignment::AtomTable;
//! use fragex::core::models::{basis::AoSubset, fragment::FragmentFamily, ids::Supersystem};
//! use fragex::core::models::fragmented::FragmentedSystem;
//!
//! let water_dimer = Supersystem::new(6);
//! let family = FragmentFamily::new(water_dimer, [vec![0, 1, 2], vec![3, 4, 5]])?;
//! let table = AtomTable::from_basis_sizes(&[5, 1, 1, 5, 1, 1], vec![8, 1, 1, 8, 1, 1])?;
//! let system = FragmentedSystem::new(family, &table, &table)?;
//! ```

pub mod basis;
pub mod error;
pub mod fragment;
pub mod fragmented;
pub mod ids;
pub mod index_set;
pub mod nmer;
