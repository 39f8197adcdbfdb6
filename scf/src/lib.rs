//! Restricted closed-shell Hartree-Fock for two-center s-type molecules and
//! the bond-dissociation sweep built on top of it.

pub mod app;
pub mod config;
pub mod io;
pub mod nuclear;
pub mod orthogonalizer;
pub mod scf_impl;

pub use nuclear::nuclear_repulsion;
pub use orthogonalizer::symmetric_orthogonalizer;
pub use scf_impl::{ConvergenceWarning, ScfInput, ScfResult, SimpleSCF};
