use crate::app::runner::CurvePoint;
use crate::io::BOHR_TO_ANGSTROM;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    /// Lowest total energy on the curve, the approximate equilibrium geometry.
    pub minimum: CurvePoint,
    pub non_converged: usize,
}

pub fn summarize(points: &[CurvePoint]) -> Option<CurveSummary> {
    let minimum = points
        .iter()
        .min_by(|a, b| a.total.total_cmp(&b.total))?
        .clone();
    let non_converged = points.iter().filter(|p| !p.converged).count();
    Some(CurveSummary {
        minimum,
        non_converged,
    })
}

pub fn report_point(point: &CurvePoint) {
    info!(
        "R = {:.3} bohr: E_elec = {:.10}, E_nuc = {:.10}, E_total = {:.10} au ({} cycles)",
        point.distance, point.electronic, point.nuclear, point.total, point.iterations
    );
    if !point.converged {
        warn!("R = {:.3} bohr did not converge; keeping the last energy", point.distance);
    }
}

pub fn report_curve_summary(points: &[CurvePoint]) {
    let Some(summary) = summarize(points) else {
        return;
    };

    info!("Dissociation curve finished: {} points", points.len());
    info!(
        "Lowest total energy {:.10} au at R = {:.3} bohr ({:.4} angstrom)",
        summary.minimum.total,
        summary.minimum.distance,
        summary.minimum.distance * BOHR_TO_ANGSTROM
    );
    if summary.non_converged > 0 {
        warn!("{} point(s) did not converge", summary.non_converged);
    }
}
