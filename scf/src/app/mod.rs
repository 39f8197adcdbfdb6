mod basis;
mod geometry;
mod report;
mod runner;
mod workspace;

pub use self::basis::{BasisLoader, BasisRegistry, DefaultBasisLoader};
pub use self::geometry::{build_dimer, sweep_distances, Dimer};
pub use self::report::{report_curve_summary, summarize, CurveSummary};
pub use self::runner::{run_point, run_sweep, CurvePoint};
pub use self::workspace::CalculationWorkspace;

use crate::config::{Args, Config};
use crate::io::{setup_output, write_curve};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

pub struct ScfApplication {
    args: Args,
    config: Config,
}

impl ScfApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(Path::new(&args.config_file))?;
        Ok(Self { args, config })
    }

    pub fn new(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Configuration loaded:\n{:?}", self.config);

        let points = self.compute_curve()?;
        self.write_curve(&points)?;
        report_curve_summary(&points);
        Ok(())
    }

    /// Resolves the workspace and evaluates every requested distance.
    pub fn compute_curve(&self) -> Result<Vec<CurvePoint>> {
        let mut registry = BasisRegistry::new(DefaultBasisLoader);
        let workspace = CalculationWorkspace::from_config(&self.config, &self.args, &mut registry)?;
        let distances = sweep_distances(&self.args, &self.config.sweep)?;
        run_sweep(&workspace, &distances)
    }

    fn write_curve(&self, points: &[CurvePoint]) -> Result<()> {
        match &self.args.curve_file {
            Some(path) => {
                let file = File::create(path)
                    .wrap_err_with(|| format!("Unable to create curve file: {}", path))?;
                write_curve(&mut BufWriter::new(file), points)?;
                info!("Curve written to {}", path);
            }
            None => {
                let mut buffer = Vec::new();
                write_curve(&mut buffer, points)?;
                info!("Dissociation curve:\n{}", String::from_utf8_lossy(&buffer));
            }
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
