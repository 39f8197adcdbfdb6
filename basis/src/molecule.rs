//! Validated input bundle for the integral engine: basis functions plus the
//! point nuclei they sit on.

use crate::cgto::ContractedGTO;
use crate::error::{HfError, Result};
use nalgebra::Vector3;

/// Two positions closer than this are treated as the same center; two
/// nuclei closer than this are rejected as coincident.
pub const CENTER_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct Molecule {
    basis: Vec<ContractedGTO>,
    coords: Vec<Vector3<f64>>,
    charges: Vec<f64>,
}

impl Molecule {
    /// Checks that charges and coordinates are parallel lists, that no two
    /// nuclei coincide and that the distinct basis-function centers are
    /// exactly the atom positions.
    pub fn new(
        basis: Vec<ContractedGTO>,
        coords: Vec<Vector3<f64>>,
        charges: Vec<f64>,
    ) -> Result<Self> {
        if coords.len() != charges.len() {
            return Err(HfError::precondition(format!(
                "{} nuclear charges supplied for {} atoms",
                charges.len(),
                coords.len()
            )));
        }
        if coords.is_empty() {
            return Err(HfError::precondition("a molecule needs at least one atom"));
        }
        if basis.is_empty() {
            return Err(HfError::precondition("a molecule needs at least one basis function"));
        }
        if charges.iter().any(|z| !z.is_finite()) || coords.iter().flatten().any(|x| !x.is_finite()) {
            return Err(HfError::precondition("nuclear charges and coordinates must be finite"));
        }

        for i in 0..coords.len() {
            for j in (i + 1)..coords.len() {
                if same_point(&coords[i], &coords[j]) {
                    return Err(HfError::precondition(format!(
                        "atoms {} and {} coincide",
                        i, j
                    )));
                }
            }
        }

        let molecule = Self {
            basis,
            coords,
            charges,
        };

        let centers = molecule.unique_centers();
        let unique_atoms = dedup_points(molecule.coords.iter().copied());
        let atoms_covered = unique_atoms
            .iter()
            .all(|r| centers.iter().any(|c| same_point(c, r)));
        if centers.len() != unique_atoms.len() || !atoms_covered {
            return Err(HfError::precondition(format!(
                "basis functions sit on {} distinct centers which do not match the {} atom positions",
                centers.len(),
                unique_atoms.len()
            )));
        }

        Ok(molecule)
    }

    pub fn basis(&self) -> &[ContractedGTO] {
        &self.basis
    }

    pub fn coords(&self) -> &[Vector3<f64>] {
        &self.coords
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn num_basis(&self) -> usize {
        self.basis.len()
    }

    pub fn num_atoms(&self) -> usize {
        self.coords.len()
    }

    /// Distinct basis-function centers in order of first appearance.
    pub fn unique_centers(&self) -> Vec<Vector3<f64>> {
        dedup_points(self.basis.iter().map(|b| b.center()))
    }
}

fn same_point(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    (a - b).norm() < CENTER_TOLERANCE
}

fn dedup_points(points: impl Iterator<Item = Vector3<f64>>) -> Vec<Vector3<f64>> {
    let mut unique: Vec<Vector3<f64>> = Vec::new();
    for p in points {
        if !unique.iter().any(|u| same_point(u, &p)) {
            unique.push(p);
        }
    }
    unique
}
