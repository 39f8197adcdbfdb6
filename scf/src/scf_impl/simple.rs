extern crate nalgebra as na;

use super::{align_eigenvectors, ConvergenceWarning, ScfResult};
use basis::error::{HfError, Result};
use basis::integrals::{ERITensor, Integrals};
use na::{DMatrix, DVector};
use std::cmp::Ordering;
use tracing::{info, warn};

/// Everything one SCF run consumes. Nothing is captured implicitly: the
/// matrices belong to a single geometry and are only borrowed.
#[derive(Debug, Clone, Copy)]
pub struct ScfInput<'a> {
    pub kinetic: &'a DMatrix<f64>,
    pub nuclear: &'a DMatrix<f64>,
    pub eri: &'a ERITensor,
    /// `S^{-1/2}`
    pub orthogonalizer: &'a DMatrix<f64>,
    /// Number of doubly occupied orbitals.
    pub n_occ: usize,
}

impl<'a> ScfInput<'a> {
    pub fn from_integrals(
        integrals: &'a Integrals,
        orthogonalizer: &'a DMatrix<f64>,
        n_occ: usize,
    ) -> Self {
        Self {
            kinetic: &integrals.kinetic,
            nuclear: &integrals.nuclear,
            eri: &integrals.eri,
            orthogonalizer,
            n_occ,
        }
    }

    fn num_basis(&self) -> usize {
        self.kinetic.nrows()
    }
}

/// Plain restricted Hartree-Fock: no damping, no extrapolation, and the
/// density starts from zero so the first Fock matrix is the core Hamiltonian.
#[derive(Debug, Clone)]
pub struct SimpleSCF {
    pub max_cycle: usize,
    /// Threshold on `|E_n - E_{n-1}|` in Hartree.
    pub convergence_threshold: f64,
}

impl Default for SimpleSCF {
    fn default() -> Self {
        SimpleSCF {
            max_cycle: 20,
            convergence_threshold: 1e-5,
        }
    }
}

impl SimpleSCF {
    pub fn new(max_cycle: usize, convergence_threshold: f64) -> SimpleSCF {
        SimpleSCF {
            max_cycle,
            convergence_threshold,
        }
    }

    fn validate(&self, input: &ScfInput) -> Result<()> {
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold > 0.0) {
            return Err(HfError::precondition(format!(
                "convergence threshold must be positive and finite, got {}",
                self.convergence_threshold
            )));
        }
        if self.max_cycle == 0 {
            return Err(HfError::precondition("max_cycle must be at least 1"));
        }

        let n = input.num_basis();
        let square = |m: &DMatrix<f64>| m.nrows() == n && m.ncols() == n;
        if n == 0 || !square(input.kinetic) || !square(input.nuclear) || !square(input.orthogonalizer) {
            return Err(HfError::precondition(format!(
                "inconsistent matrix shapes: T {:?}, V {:?}, X {:?}",
                input.kinetic.shape(),
                input.nuclear.shape(),
                input.orthogonalizer.shape()
            )));
        }
        if input.eri.dim() != n {
            return Err(HfError::precondition(format!(
                "electron repulsion tensor has dimension {} for {} basis functions",
                input.eri.dim(),
                n
            )));
        }
        if input.n_occ == 0 || input.n_occ > n {
            return Err(HfError::precondition(format!(
                "{} occupied orbitals requested with {} basis functions",
                input.n_occ, n
            )));
        }
        Ok(())
    }

    pub fn run(&self, input: &ScfInput) -> Result<ScfResult> {
        self.validate(input)?;

        let n = input.num_basis();
        let h_core = input.kinetic + input.nuclear;
        let x = input.orthogonalizer;

        let mut density = DMatrix::zeros(n, n);
        let mut coefficients = DMatrix::zeros(n, n);
        let mut orbital_energies = DVector::zeros(n);
        let mut energy = 0.0;
        let mut energy_change = f64::INFINITY;

        for cycle in 0..self.max_cycle {
            let g = build_g_matrix(&density, input.eri);
            let fock = &h_core + &g;

            let (levels, coeffs) = diagonalize(&fock, x);
            density = build_density_matrix(&coeffs, input.n_occ);
            orbital_energies = levels;
            coefficients = coeffs;

            // G stays the one built from the previous density
            let new_energy = electronic_energy(&density, &h_core, &g);
            energy_change = (new_energy - energy).abs();
            energy = new_energy;

            info!(
                "Cycle {}: E = {:.12} au, dE = {:.12} au",
                cycle, energy, energy_change
            );

            if energy_change < self.convergence_threshold {
                info!("SCF converged in {} cycles.", cycle + 1);
                return Ok(ScfResult {
                    energy,
                    iterations: cycle + 1,
                    warning: None,
                    orbital_energies,
                    coefficients,
                    density,
                });
            }
        }

        let warning = ConvergenceWarning {
            iterations: self.max_cycle,
            last_change: energy_change,
        };
        warn!("{}", warning);

        Ok(ScfResult {
            energy,
            iterations: self.max_cycle,
            warning: Some(warning),
            orbital_energies,
            coefficients,
            density,
        })
    }
}

/// Two-electron part of the Fock matrix,
/// `G_ij = sum_kl P_kl [(ij|kl) - 1/2 (il|kj)]`.
pub fn build_g_matrix(density: &DMatrix<f64>, eri: &ERITensor) -> DMatrix<f64> {
    let n = eri.dim();
    DMatrix::from_fn(n, n, |i, j| {
        let mut g_ij = 0.0;
        for k in 0..n {
            for l in 0..n {
                g_ij += density[(k, l)] * (eri[(i, j, k, l)] - 0.5 * eri[(i, l, k, j)]);
            }
        }
        g_ij
    })
}

/// Closed-shell density `P = 2 C_occ C_occ^T` from the first `n_occ` columns.
pub fn build_density_matrix(coefficients: &DMatrix<f64>, n_occ: usize) -> DMatrix<f64> {
    let occupied = coefficients.columns(0, n_occ);
    2.0 * &occupied * occupied.transpose()
}

/// `E = sum_ij P_ij (H_ij + 1/2 G_ij)`
pub fn electronic_energy(density: &DMatrix<f64>, h_core: &DMatrix<f64>, g: &DMatrix<f64>) -> f64 {
    density.component_mul(&(h_core + 0.5 * g)).sum()
}

// Solves F C = S C e through F' = X F X, returning ascending levels and C = X C'.
fn diagonalize(fock: &DMatrix<f64>, x: &DMatrix<f64>) -> (DVector<f64>, DMatrix<f64>) {
    let f_prime = x * fock * x;
    let eig = f_prime.symmetric_eigen();

    let mut indices: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    indices.sort_by(|&a, &b| {
        eig.eigenvalues[a]
            .partial_cmp(&eig.eigenvalues[b])
            .unwrap_or(Ordering::Equal)
    });
    let sorted_eigenvalues =
        DVector::from_fn(eig.eigenvalues.len(), |i, _| eig.eigenvalues[indices[i]]);
    let sorted_eigenvectors = eig.eigenvectors.select_columns(&indices);

    let eigvecs = x * sorted_eigenvectors;
    (sorted_eigenvalues, align_eigenvectors(eigvecs))
}
