//! Command-line argument parsing

use clap::Parser;

/// Restricted Hartree-Fock dissociation curve of a two-atom molecule
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override maximum SCF cycles
    #[arg(long)]
    pub max_cycle: Option<usize>,

    /// Override convergence threshold on the energy change (Hartree)
    #[arg(long)]
    pub convergence_threshold: Option<f64>,

    /// Single internuclear distance in bohr instead of the configured sweep
    #[arg(long)]
    pub distance: Option<f64>,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the energy curve table to this file instead of the log
    #[arg(long)]
    pub curve_file: Option<String>,
}
