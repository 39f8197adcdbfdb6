//! Input/Output operations
//!
//! This module handles logging setup, curve output and basis file loading.

mod basis_loader;
mod output;

pub use basis_loader::load_nwchem_basis;
pub use output::{setup_output, write_curve, BOHR_TO_ANGSTROM};
