//! Integral engine: overlap, kinetic, nuclear-attraction matrices and the
//! full electron-repulsion tensor over contracted s functions.
//!
//! Every entry is evaluated independently (no screening, no permutational
//! reuse), so the builders are pure functions of their inputs. Entries are
//! computed on rayon's pool and written back by index.

use crate::basis::Basis;
use crate::cgto::ContractedGTO;
use crate::error::{HfError, Result};
use crate::molecule::Molecule;
use itertools::iproduct;
use nalgebra::{DMatrix, Vector3};
use rayon::prelude::*;
use std::ops::Index;
use tracing::debug;

/// Dense four-index electron-repulsion tensor `(ij|kl)`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ERITensor {
    n: usize,
    data: Vec<f64>,
}

impl ERITensor {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n * n * n],
        }
    }

    /// Number of basis functions along each index.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn offset(&self, i: usize, j: usize, k: usize, l: usize) -> usize {
        ((i * self.n + j) * self.n + k) * self.n + l
    }
}

impl Index<(usize, usize, usize, usize)> for ERITensor {
    type Output = f64;

    fn index(&self, (i, j, k, l): (usize, usize, usize, usize)) -> &f64 {
        &self.data[self.offset(i, j, k, l)]
    }
}

fn one_electron_matrix<F>(basis: &[ContractedGTO], element: F) -> DMatrix<f64>
where
    F: Fn(&ContractedGTO, &ContractedGTO) -> f64 + Sync,
{
    let n = basis.len();
    let ij_pairs: Vec<(usize, usize)> = iproduct!(0..n, 0..n).collect();

    let values: Vec<f64> = ij_pairs
        .par_iter()
        .map(|&(i, j)| element(&basis[i], &basis[j]))
        .collect();

    let mut matrix = DMatrix::zeros(n, n);
    for (&(i, j), value) in ij_pairs.iter().zip(values) {
        matrix[(i, j)] = value;
    }
    matrix
}

pub fn overlap_matrix(basis: &[ContractedGTO]) -> DMatrix<f64> {
    one_electron_matrix(basis, ContractedGTO::Sab)
}

pub fn kinetic_matrix(basis: &[ContractedGTO]) -> DMatrix<f64> {
    one_electron_matrix(basis, ContractedGTO::Tab)
}

/// Attraction of every basis pair to all nuclei, `sum_A <i| -Z_A / |r - R_A| |j>`.
pub fn nuclear_attraction_matrix(
    basis: &[ContractedGTO],
    coords: &[Vector3<f64>],
    charges: &[f64],
) -> Result<DMatrix<f64>> {
    if coords.len() != charges.len() {
        return Err(HfError::precondition(format!(
            "{} nuclear charges supplied for {} atoms",
            charges.len(),
            coords.len()
        )));
    }

    Ok(one_electron_matrix(basis, |a, b| {
        coords
            .iter()
            .zip(charges)
            .map(|(&r, &z)| ContractedGTO::Vab(a, b, r, z))
            .sum()
    }))
}

pub fn electron_repulsion_tensor(basis: &[ContractedGTO]) -> ERITensor {
    let n = basis.len();
    let quadruples: Vec<(usize, usize, usize, usize)> = iproduct!(0..n, 0..n, 0..n, 0..n).collect();

    // iproduct! runs l fastest, which is exactly the row-major layout
    let data: Vec<f64> = quadruples
        .par_iter()
        .map(|&(i, j, k, l)| ContractedGTO::JKabcd(&basis[i], &basis[j], &basis[k], &basis[l]))
        .collect();

    ERITensor { n, data }
}

/// All integrals needed by a closed-shell SCF run for one geometry.
#[derive(Debug, Clone)]
pub struct Integrals {
    pub overlap: DMatrix<f64>,
    pub kinetic: DMatrix<f64>,
    pub nuclear: DMatrix<f64>,
    pub eri: ERITensor,
}

impl Integrals {
    pub fn compute(molecule: &Molecule) -> Result<Self> {
        let basis = molecule.basis();
        debug!(
            "Computing integrals for {} basis functions on {} atoms",
            basis.len(),
            molecule.num_atoms()
        );

        let overlap = overlap_matrix(basis);
        let kinetic = kinetic_matrix(basis);
        let nuclear = nuclear_attraction_matrix(basis, molecule.coords(), molecule.charges())?;
        let eri = electron_repulsion_tensor(basis);
        debug!("Electron repulsion tensor holds {} entries", eri.as_slice().len());

        Ok(Self {
            overlap,
            kinetic,
            nuclear,
            eri,
        })
    }

    /// `T + V_ne`
    pub fn core_hamiltonian(&self) -> DMatrix<f64> {
        &self.kinetic + &self.nuclear
    }
}
