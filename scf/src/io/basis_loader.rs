//! Basis set loading utilities

use basis::cgto::AtomicBasis;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads an S-shell-only basis in NWChem format from disk.
pub fn load_nwchem_basis(path: &Path) -> Result<AtomicBasis> {
    info!("Loading basis set from {}", path.display());
    let basis_str = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read basis set file: {}", path.display()))?;
    AtomicBasis::parse_nwchem(&basis_str)
        .wrap_err_with(|| format!("Invalid basis set file: {}", path.display()))
}
