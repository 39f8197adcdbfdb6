#![allow(non_snake_case)]
use libm::lgamma;

const BOYS_EPS: f64 = 1.0e-15;
const BOYS_MAX_TERMS: usize = 500;
const FPMIN: f64 = 1.0e-300;

/// Boys function `F_n(x) = int_0^1 t^(2n) exp(-x t^2) dt` for any order `n`.
///
/// `F_n(0) = 1/(2n+1)` is returned exactly. Elsewhere this is the lower
/// incomplete gamma function `gamma(n+1/2, x) / (2 x^(n+1/2))`, evaluated with
/// its power series below `x = n + 3/2` and with the continued fraction of the
/// upper incomplete gamma above it. The continued-fraction branch subtracts
/// `e^-x h` from `Gamma(a) x^-a`; switching branches at `x = a + 1` keeps the
/// cancellation there bounded.
pub fn boys_function(n: u32, x: f64) -> f64 {
    debug_assert!(x >= 0.0, "x must be nonnegative, got {}", x);

    if x == 0.0 {
        return 1.0 / (2 * n + 1) as f64;
    }

    let a = n as f64 + 0.5;
    if x < a + 1.0 {
        0.5 * (-x).exp() * lower_gamma_series(a, x)
    } else {
        let complete = (lgamma(a) - a * x.ln()).exp();
        0.5 * (complete - (-x).exp() * upper_gamma_fraction(a, x))
    }
}

// sum_k x^k / (a (a+1) ... (a+k))
fn lower_gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..BOYS_MAX_TERMS {
        ap += 1.0;
        term *= x / ap;
        sum += term;
        if term.abs() < sum.abs() * BOYS_EPS {
            break;
        }
    }
    sum
}

// Gamma(a, x) = exp(-x) x^a * h, modified Lentz evaluation of h
fn upper_gamma_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=BOYS_MAX_TERMS {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() < BOYS_EPS {
            break;
        }
    }
    h
}

// Simpson's rule integration
#[cfg(test)]
pub(crate) fn simpson_integration<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let x = a + i as f64 * h;
        sum += if i % 2 == 0 { 2.0 * f(x) } else { 4.0 * f(x) };
    }
    sum * h / 3.0
}

#[cfg(test)]
fn simpson_weight(i: usize, n: usize) -> f64 {
    if i == 0 || i == n {
        1.0
    } else if i % 2 == 1 {
        4.0
    } else {
        2.0
    }
}

/// Parallel Simpson's rule over the box `[a, b]` with `n` (even) subdivisions
/// per axis. Only used to check the closed-form integrals.
#[cfg(test)]
pub(crate) fn simpson_integration_3d<F>(
    f: F,
    a: nalgebra::Vector3<f64>,
    b: nalgebra::Vector3<f64>,
    n: usize,
) -> f64
where
    F: Fn(f64, f64, f64) -> f64 + Sync,
{
    use rayon::prelude::*;

    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let sum: f64 = (0..=n)
        .into_par_iter()
        .map(|i| {
            let x = a.x + i as f64 * h.x;
            let wx = simpson_weight(i, n);
            let mut acc = 0.0;
            for j in 0..=n {
                let y = a.y + j as f64 * h.y;
                let wy = simpson_weight(j, n);
                for k in 0..=n {
                    let z = a.z + k as f64 * h.z;
                    acc += wx * wy * simpson_weight(k, n) * f(x, y, z);
                }
            }
            acc
        })
        .sum();

    sum * (h.x * h.y * h.z) / 27.0
}
