//! Restricted closed-shell SCF.
//!
//! `SimpleSCF` iterates Fock build, diagonalization in the orthogonalized
//! basis and density rebuild until the electronic energy stops changing.
//! Running out of cycles is not an error: the last energy is returned with a
//! `ConvergenceWarning` attached.

mod simple;


pub use simple::{build_density_matrix, build_g_matrix, electronic_energy, ScfInput, SimpleSCF};

use nalgebra::{DMatrix, DVector};
use std::fmt;

/// The SCF loop stopped after `iterations` cycles without meeting the
/// energy threshold; `last_change` is the final `|E_n - E_{n-1}|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub last_change: f64,
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SCF not converged after {} cycles (last energy change {:.3e} au)",
            self.iterations, self.last_change
        )
    }
}

/// Outcome of one SCF run.
#[derive(Debug, Clone)]
pub struct ScfResult {
    /// Electronic energy in Hartree (nuclear repulsion not included).
    pub energy: f64,
    pub iterations: usize,
    pub warning: Option<ConvergenceWarning>,
    /// Ascending orbital energies.
    pub orbital_energies: DVector<f64>,
    /// MO coefficients, one column per orbital, same order as `orbital_energies`.
    pub coefficients: DMatrix<f64>,
    pub density: DMatrix<f64>,
}

impl ScfResult {
    pub fn converged(&self) -> bool {
        self.warning.is_none()
    }
}

/// Given a matrix where each column is an eigenvector,
/// flips each column so that its entry with the largest absolute value is positive.
pub fn align_eigenvectors(mut eigvecs: DMatrix<f64>) -> DMatrix<f64> {
    for j in 0..eigvecs.ncols() {
        let max_val = eigvecs
            .column(j)
            .iter()
            .copied()
            .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
        if max_val < 0.0 {
            eigvecs.column_mut(j).neg_mut();
        }
    }
    eigvecs
}
