use crate::config::{Args, Config, SweepParams};
use color_eyre::eyre::{eyre, Result};
use nalgebra::Vector3;
use periodic_table_on_an_enum::Element;
use tracing::info;

/// The two nuclei of the molecule, without a bond length yet.
#[derive(Debug, Clone)]
pub struct Dimer {
    pub elements: Vec<Element>,
}

impl Dimer {
    pub fn charges(&self) -> Vec<f64> {
        self.elements
            .iter()
            .map(|e| e.get_atomic_number() as f64)
            .collect()
    }

    /// Atom 0 at the origin, atom 1 on the +z axis.
    pub fn coords(&self, distance: f64) -> Result<Vec<Vector3<f64>>> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(eyre!("Internuclear distance must be positive, got {}", distance));
        }
        Ok(vec![Vector3::zeros(), Vector3::new(0.0, 0.0, distance)])
    }

    pub fn label(&self) -> String {
        self.elements.iter().map(|e| e.get_symbol()).collect()
    }

    /// Doubly occupied orbitals for the given molecular charge, unless the
    /// configuration fixes the number.
    pub fn occupied_orbitals(&self, config: &Config) -> Result<usize> {
        let nuclear_charge: i64 = self
            .elements
            .iter()
            .map(|e| e.get_atomic_number() as i64)
            .sum();
        let electrons = nuclear_charge - config.charge() as i64;
        if electrons <= 0 || electrons % 2 != 0 {
            return Err(eyre!(
                "{} with charge {} has {} electrons; a closed-shell calculation needs a positive even count",
                self.label(),
                config.charge(),
                electrons
            ));
        }

        match config.occupied_orbitals {
            Some(0) => Err(eyre!("occupied_orbitals must be at least 1")),
            Some(n) => Ok(n),
            None => Ok((electrons / 2) as usize),
        }
    }
}

/// Build the dimer defined in the YAML configuration.
pub fn build_dimer(config: &Config) -> Result<Dimer> {
    info!("Preparing geometry...");

    if config.atoms.len() != 2 {
        return Err(eyre!(
            "Exactly two atoms are required, found {}",
            config.atoms.len()
        ));
    }

    let elements = config
        .atoms
        .iter()
        .map(|atom| {
            Element::from_symbol(&atom.element)
                .ok_or_else(|| eyre!("Invalid element symbol: {}", atom.element))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dimer { elements })
}

/// Distances to evaluate, in bohr: a single `--distance`, the explicit list,
/// or the inclusive `start..=stop` grid rounded to 3 decimals.
pub fn sweep_distances(args: &Args, sweep: &SweepParams) -> Result<Vec<f64>> {
    let distances = if let Some(d) = args.distance {
        vec![d]
    } else if let Some(list) = &sweep.distances {
        list.clone()
    } else {
        let start = sweep.start.unwrap_or(0.4);
        let stop = sweep.stop.unwrap_or(6.0);
        let step = sweep.step.unwrap_or(0.1);
        if !(step.is_finite() && step > 0.0) {
            return Err(eyre!("Sweep step must be positive, got {}", step));
        }
        if stop < start {
            return Err(eyre!("Sweep stop {} lies before start {}", stop, start));
        }

        let n_steps = ((stop - start) / step + 1e-9).floor() as usize;
        (0..=n_steps)
            .map(|i| round_to_millibohr(start + i as f64 * step))
            .collect()
    };

    if distances.is_empty() {
        return Err(eyre!("No distances to evaluate"));
    }
    if let Some(bad) = distances.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
        return Err(eyre!("Internuclear distance must be positive, got {}", bad));
    }
    Ok(distances)
}

fn round_to_millibohr(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
