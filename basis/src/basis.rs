#![allow(non_snake_case)]
use nalgebra::Vector3;

/// One-center function with closed-form one- and two-electron integrals.
///
/// Implemented for single primitives and for contractions of them. The
/// two-electron integral uses chemists' ordering, `(ab|cd)`.
pub trait Basis {
    fn evaluate(&self, r: &Vector3<f64>) -> f64;

    /// overlap `<a|b>`
    fn Sab(a: &Self, b: &Self) -> f64;

    /// kinetic energy `<a|-1/2 ∇²|b>`
    fn Tab(a: &Self, b: &Self) -> f64;

    /// attraction of `a*b` to a point nucleus of charge `Z` at `R`
    fn Vab(a: &Self, b: &Self, R: Vector3<f64>, Z: f64) -> f64;

    /// electron repulsion `(ab|cd)`
    fn JKabcd(a: &Self, b: &Self, c: &Self, d: &Self) -> f64;
}
