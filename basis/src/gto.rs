#![allow(non_snake_case)]
extern crate nalgebra as na;

use crate::basis::Basis;
use crate::error::{HfError, Result};
use crate::helper::boys_function;
use na::Vector3;
use serde::Serialize;
use std::f64::consts::PI;

/// Normalized s-type Gaussian primitive `A c exp(-alpha |r - center|^2)`.
///
/// Fields are read-only once constructed: the normalization constant is fixed
/// by the exponent and never recomputed. The contraction coefficient travels
/// with the primitive but is not part of the primitive integrals below; the
/// contraction applies it.
#[derive(Debug, Serialize, Copy, Clone, PartialEq)]
pub struct GTO {
    alpha: f64,
    coefficient: f64,
    center: Vector3<f64>,
    l_xyz: Vector3<i32>,
    norm: f64,
}

/// Gaussian Product Theorem: the product of two s-type Gaussians centered at
/// `A` and `B` is `prefactor * exp(-p |r - center|^2)`.
#[derive(Debug, Copy, Clone)]
pub(crate) struct GaussianProduct {
    /// combined exponent `p = a + b`
    pub p: f64,
    /// weighted center `(a A + b B) / p`
    pub center: Vector3<f64>,
    /// `exp(-a b / p |A - B|^2)`
    pub prefactor: f64,
}

impl GTO {
    pub fn new(alpha: f64, coefficient: f64, center: Vector3<f64>) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(HfError::precondition(format!(
                "Gaussian exponent must be positive and finite, got {}",
                alpha
            )));
        }
        if !coefficient.is_finite() || !center.iter().all(|x| x.is_finite()) {
            return Err(HfError::precondition(
                "contraction coefficient and center must be finite",
            ));
        }

        Ok(Self {
            alpha,
            coefficient,
            center,
            l_xyz: Vector3::zeros(),
            norm: GTO::compute_norm(alpha),
        })
    }

    // (2 alpha / pi)^(3/4) normalizes an s-type primitive
    fn compute_norm(alpha: f64) -> f64 {
        (2.0 * alpha / PI).powf(0.75)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    /// Always `(0, 0, 0)`: only s-type primitives are supported.
    pub fn l_xyz(&self) -> Vector3<i32> {
        self.l_xyz
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub(crate) fn merge(a: &GTO, b: &GTO) -> GaussianProduct {
        let p = a.alpha + b.alpha;
        let q = a.alpha * b.alpha / p;
        let dab = a.center - b.center;

        GaussianProduct {
            p,
            center: (a.alpha * a.center + b.alpha * b.center) / p,
            prefactor: (-q * dab.norm_squared()).exp(),
        }
    }
}

impl Basis for GTO {
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        self.norm * (-self.alpha * (r - self.center).norm_squared()).exp()
    }

    fn Sab(a: &GTO, b: &GTO) -> f64 {
        let c = GTO::merge(a, b);
        a.norm * b.norm * c.prefactor * (PI / c.p).powf(1.5)
    }

    // second derivative of the product Gaussian, taken on b
    fn Tab(a: &GTO, b: &GTO) -> f64 {
        let c = GTO::merge(a, b);
        let s = GTO::Sab(a, b);
        let pg = c.center - b.center;

        3.0 * b.alpha * s
            - 2.0 * b.alpha * b.alpha * s * (pg.x * pg.x + 0.5 / c.p)
            - 2.0 * b.alpha * b.alpha * s * (pg.y * pg.y + 0.5 / c.p)
            - 2.0 * b.alpha * b.alpha * s * (pg.z * pg.z + 0.5 / c.p)
    }

    fn Vab(a: &GTO, b: &GTO, R: Vector3<f64>, Z: f64) -> f64 {
        let c = GTO::merge(a, b);
        let pc2 = (c.center - R).norm_squared();

        // add minus sign to the result, since it is a nuclear attraction term
        -Z * a.norm * b.norm * (2.0 * PI / c.p) * c.prefactor * boys_function(0, c.p * pc2)
    }

    fn JKabcd(a: &GTO, b: &GTO, c: &GTO, d: &GTO) -> f64 {
        let e = GTO::merge(a, b);
        let f = GTO::merge(c, d);
        let pq2 = (e.center - f.center).norm_squared();
        let denom = 1.0 / e.p + 1.0 / f.p;

        let norm = a.norm * b.norm * c.norm * d.norm;
        let term1 = 2.0 * PI * PI / (e.p * f.p);
        let term2 = (PI / (e.p + f.p)).sqrt();

        norm * term1 * term2 * e.prefactor * f.prefactor * boys_function(0, pq2 / denom)
    }
}
