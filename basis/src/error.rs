//! Error type shared by the integral engine and the SCF driver.

use std::fmt;

/// Fatal failures of a Hartree-Fock calculation.
///
/// Non-convergence of the SCF loop is deliberately not represented here: it is
/// reported alongside the result so that a sweep over many geometries can keep
/// going.
#[derive(Debug, Clone, PartialEq)]
pub enum HfError {
    /// Inputs are inconsistent or out of range. Raised before any numeric work.
    PreconditionViolation(String),
    /// The overlap matrix is not positive-definite (near-linear dependence).
    SingularBasis { smallest_eigenvalue: f64 },
}

impl HfError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        HfError::PreconditionViolation(msg.into())
    }
}

impl fmt::Display for HfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HfError::PreconditionViolation(msg) => write!(f, "precondition violated: {}", msg),
            HfError::SingularBasis {
                smallest_eigenvalue,
            } => write!(
                f,
                "overlap matrix is singular (smallest eigenvalue {:.3e}); basis is linearly dependent",
                smallest_eigenvalue
            ),
        }
    }
}

impl std::error::Error for HfError {}

pub type Result<T> = std::result::Result<T, HfError>;
