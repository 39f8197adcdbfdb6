use crate::app::basis::{BasisLoader, BasisRegistry};
use crate::app::geometry::{build_dimer, Dimer};
use crate::config::{Args, Config};
use crate::SimpleSCF;
use ::basis::cgto::AtomicBasis;
use ::basis::molecule::Molecule;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

/// Everything that stays fixed along the distance sweep.
#[derive(Debug, Clone)]
pub struct CalculationWorkspace {
    pub dimer: Dimer,
    /// One basis per atom, in atom order.
    pub bases: Vec<AtomicBasis>,
    pub n_occ: usize,
    pub solver: SimpleSCF,
}

impl CalculationWorkspace {
    pub fn new(dimer: Dimer, bases: Vec<AtomicBasis>, n_occ: usize, solver: SimpleSCF) -> Self {
        Self {
            dimer,
            bases,
            n_occ,
            solver,
        }
    }

    /// Resolves geometry, basis sets, occupation and solver settings;
    /// command-line values override the configuration.
    pub fn from_config<L: BasisLoader>(
        config: &Config,
        args: &Args,
        registry: &mut BasisRegistry<L>,
    ) -> Result<Self> {
        let dimer = build_dimer(config)?;
        let bases = dimer
            .elements
            .iter()
            .zip(&config.atoms)
            .map(|(element, atom)| registry.basis_for_atom(element, atom))
            .collect::<Result<Vec<_>>>()?;
        let n_occ = dimer.occupied_orbitals(config)?;

        let defaults = SimpleSCF::default();
        let solver = SimpleSCF::new(
            args.max_cycle
                .or(config.scf_params.max_cycle)
                .unwrap_or(defaults.max_cycle),
            args.convergence_threshold
                .or(config.scf_params.convergence_threshold)
                .unwrap_or(defaults.convergence_threshold),
        );
        info!(
            "{}: {} doubly occupied orbital(s), max_cycle = {}, threshold = {:e}",
            dimer.label(),
            n_occ,
            solver.max_cycle,
            solver.convergence_threshold
        );

        Ok(Self::new(dimer, bases, n_occ, solver))
    }

    /// Fresh molecule with the basis functions placed on the nuclei.
    pub fn molecule_at(&self, distance: f64) -> Result<Molecule> {
        let coords = self.dimer.coords(distance)?;
        let mut functions = Vec::new();
        for (basis, center) in self.bases.iter().zip(&coords) {
            functions.extend(basis.place(*center)?);
        }
        Molecule::new(functions, coords, self.dimer.charges())
            .wrap_err_with(|| format!("Invalid molecule at R = {:.3} bohr", distance))
    }
}
