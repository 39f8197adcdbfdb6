//! Configuration management for dissociation-curve calculations
//!
//! YAML is deserialized into `Config`; missing values are filled in by the
//! `with_defaults` methods and may be overridden from the command line.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub atoms: Vec<AtomConfig>,
    pub charge: Option<i32>,
    pub occupied_orbitals: Option<usize>,
    #[serde(default)]
    pub scf_params: ScfParams,
    #[serde(default)]
    pub sweep: SweepParams,
}

/// One nucleus of the dimer and the basis placed on it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AtomConfig {
    pub element: String,
    /// Built-in basis name (`sto-3g`) or path to an NWChem basis file
    pub basis: Option<String>,
    /// Explicit `[exponent, coefficient]` contraction; takes precedence over `basis`
    pub primitives: Option<Vec<[f64; 2]>>,
}

/// SCF-specific parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScfParams {
    pub max_cycle: Option<usize>,
    pub convergence_threshold: Option<f64>,
}

impl Default for ScfParams {
    fn default() -> Self {
        ScfParams {
            max_cycle: Some(20),
            convergence_threshold: Some(1e-5),
        }
    }
}

impl ScfParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.max_cycle.is_none() {
            self.max_cycle = defaults.max_cycle;
        }
        if self.convergence_threshold.is_none() {
            self.convergence_threshold = defaults.convergence_threshold;
        }
        self
    }
}

/// Internuclear distances to scan, in bohr
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SweepParams {
    pub start: Option<f64>,
    pub stop: Option<f64>,
    pub step: Option<f64>,
    /// Explicit list; replaces the `start..=stop` grid when present
    pub distances: Option<Vec<f64>>,
}

impl Default for SweepParams {
    fn default() -> Self {
        SweepParams {
            start: Some(0.4),
            stop: Some(6.0),
            step: Some(0.1),
            distances: None,
        }
    }
}

impl SweepParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.start.is_none() {
            self.start = defaults.start;
        }
        if self.stop.is_none() {
            self.stop = defaults.stop;
        }
        if self.step.is_none() {
            self.step = defaults.step;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.scf_params = self.scf_params.with_defaults();
        self.sweep = self.sweep.with_defaults();
        self
    }

    pub fn charge(&self) -> i32 {
        self.charge.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let yaml = "
atoms:
  - element: H
  - element: H
";
        let config = serde_yml::from_str::<Config>(yaml).unwrap().with_defaults();
        assert_eq!(config.atoms.len(), 2);
        assert_eq!(config.charge(), 0);
        assert_eq!(config.scf_params.max_cycle, Some(20));
        assert_eq!(config.scf_params.convergence_threshold, Some(1e-5));
        assert_eq!(config.sweep.start, Some(0.4));
        assert_eq!(config.sweep.stop, Some(6.0));
        assert_eq!(config.sweep.step, Some(0.1));
        assert!(config.sweep.distances.is_none());
    }

    #[test]
    fn test_partial_sections_keep_given_values() {
        let yaml = "
atoms:
  - element: He
    basis: sto-3g
  - element: H
    primitives:
      - [3.425250914, 0.1543289673]
      - [0.6239137298, 0.5353281423]
charge: 1
scf_params:
  max_cycle: 50
sweep:
  step: 0.5
  distances: [1.0, 1.4632]
";
        let config = serde_yml::from_str::<Config>(yaml).unwrap().with_defaults();
        assert_eq!(config.charge(), 1);
        assert_eq!(config.atoms[0].basis.as_deref(), Some("sto-3g"));
        assert_eq!(config.atoms[1].primitives.as_ref().map(|p| p.len()), Some(2));
        assert_eq!(config.scf_params.max_cycle, Some(50));
        assert_eq!(config.scf_params.convergence_threshold, Some(1e-5));
        assert_eq!(config.sweep.step, Some(0.5));
        assert_eq!(config.sweep.start, Some(0.4));
        assert_eq!(config.sweep.distances, Some(vec![1.0, 1.4632]));
    }
}
