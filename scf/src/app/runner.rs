use crate::app::report::report_point;
use crate::app::workspace::CalculationWorkspace;
use crate::nuclear::nuclear_repulsion;
use crate::orthogonalizer::symmetric_orthogonalizer;
use crate::ScfInput;
use ::basis::integrals::Integrals;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::info;

/// Energies of one geometry on the dissociation curve, in Hartree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    /// bohr
    pub distance: f64,
    pub electronic: f64,
    pub nuclear: f64,
    pub total: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Integrals, orthogonalizer and SCF for a single bond length.
pub fn run_point(workspace: &CalculationWorkspace, distance: f64) -> Result<CurvePoint> {
    let molecule = workspace.molecule_at(distance)?;
    let nuclear = nuclear_repulsion(molecule.coords(), molecule.charges())?;
    let integrals = Integrals::compute(&molecule)?;
    let x = symmetric_orthogonalizer(&integrals.overlap)?;

    let input = ScfInput::from_integrals(&integrals, &x, workspace.n_occ);
    let result = workspace.solver.run(&input)?;

    Ok(CurvePoint {
        distance,
        electronic: result.energy,
        nuclear,
        total: result.energy + nuclear,
        converged: result.converged(),
        iterations: result.iterations,
    })
}

/// Runs every distance in order. A fatal error stops the sweep; a point
/// that did not converge is kept and flagged.
pub fn run_sweep(workspace: &CalculationWorkspace, distances: &[f64]) -> Result<Vec<CurvePoint>> {
    info!("Starting sweep over {} geometries", distances.len());
    distances
        .iter()
        .map(|&distance| {
            info!("--- R = {:.3} bohr ---", distance);
            let point = run_point(workspace, distance)
                .wrap_err_with(|| format!("Calculation failed at R = {:.3} bohr", distance))?;
            report_point(&point);
            Ok(point)
        })
        .collect()
}
