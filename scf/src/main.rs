//! Bond-dissociation curve from a YAML configuration.

use color_eyre::eyre::Result;
use scf::app::ScfApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    ScfApplication::from_cli()?.run()
}
