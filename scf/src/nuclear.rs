use basis::error::{HfError, Result};
use basis::molecule::CENTER_TOLERANCE;
use nalgebra::Vector3;

/// Classical Coulomb repulsion between point nuclei, `sum_{i<j} Z_i Z_j / R_ij`.
pub fn nuclear_repulsion(coords: &[Vector3<f64>], charges: &[f64]) -> Result<f64> {
    if coords.len() != charges.len() {
        return Err(HfError::precondition(format!(
            "{} nuclear charges supplied for {} atoms",
            charges.len(),
            coords.len()
        )));
    }

    let mut energy = 0.0;
    for i in 0..coords.len() {
        for j in (i + 1)..coords.len() {
            let r_ij = (coords[i] - coords[j]).norm();
            if r_ij < CENTER_TOLERANCE {
                return Err(HfError::precondition(format!(
                    "atoms {} and {} coincide",
                    i, j
                )));
            }
            energy += charges[i] * charges[j] / r_ij;
        }
    }
    Ok(energy)
}
