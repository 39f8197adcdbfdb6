//! Symmetric (Löwdin) orthogonalization.

use basis::error::{HfError, Result};
use nalgebra::DMatrix;

/// Overlap eigenvalues at or below this are treated as a linear dependence.
pub const EIGENVALUE_THRESHOLD: f64 = 1e-10;

/// Returns `X = S^{-1/2} = U diag(lambda^{-1/2}) U^T`, so that `X S X = 1`.
///
/// Unlike canonical orthogonalization no eigenvectors are dropped: a
/// (near-)singular overlap matrix is reported as `SingularBasis`.
pub fn symmetric_orthogonalizer(overlap: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if overlap.nrows() != overlap.ncols() || overlap.is_empty() {
        return Err(HfError::precondition(format!(
            "overlap matrix must be square and non-empty, got {}x{}",
            overlap.nrows(),
            overlap.ncols()
        )));
    }

    let eig = overlap.clone().symmetric_eigen();
    let smallest = eig.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);
    // also rejects NaN
    if !(smallest > EIGENVALUE_THRESHOLD) {
        return Err(HfError::SingularBasis {
            smallest_eigenvalue: smallest,
        });
    }

    let inv_sqrt_d = DMatrix::from_diagonal(&eig.eigenvalues.map(|v| 1.0 / v.sqrt()));
    Ok(&eig.eigenvectors * inv_sqrt_d * eig.eigenvectors.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis::cgto::ContractedGTO;
    use basis::integrals::overlap_matrix;
    use nalgebra::Vector3;

    fn h_1s(z: f64) -> ContractedGTO {
        ContractedGTO::new(
            Vector3::new(0.0, 0.0, z),
            &[
                (3.425250914, 0.1543289673),
                (0.6239137298, 0.5353281423),
                (0.1688554040, 0.4446345422),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_identity_overlap() {
        let x = symmetric_orthogonalizer(&DMatrix::identity(3, 3)).unwrap();
        assert!((x - DMatrix::<f64>::identity(3, 3)).norm() < 1e-14);
    }

    #[test]
    fn test_orthogonalizer_whitens_overlap() {
        let s = overlap_matrix(&[h_1s(0.0), h_1s(1.4)]);
        let x = symmetric_orthogonalizer(&s).unwrap();

        let should_be_identity = &x * &s * &x;
        assert!(
            (should_be_identity - DMatrix::<f64>::identity(2, 2)).norm() < 1e-12,
            "X S X must be the identity"
        );
        assert!((&x - x.transpose()).norm() < 1e-14, "S^-1/2 is symmetric");
    }

    #[test]
    fn test_duplicate_function_is_singular() {
        let s = overlap_matrix(&[h_1s(0.0), h_1s(0.0)]);
        match symmetric_orthogonalizer(&s) {
            Err(HfError::SingularBasis {
                smallest_eigenvalue,
            }) => assert!(smallest_eigenvalue < EIGENVALUE_THRESHOLD),
            other => panic!("expected SingularBasis, got {:?}", other),
        }
    }

    #[test]
    fn test_indefinite_overlap_is_singular() {
        let s = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert!(matches!(
            symmetric_orthogonalizer(&s),
            Err(HfError::SingularBasis { .. })
        ));
    }

    #[test]
    fn test_non_square_rejected() {
        let s = DMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            symmetric_orthogonalizer(&s),
            Err(HfError::PreconditionViolation(_))
        ));
    }
}
