use crate::config::AtomConfig;
use crate::io::load_nwchem_basis;
use ::basis::cgto::AtomicBasis;
use color_eyre::eyre::{eyre, Result};
use periodic_table_on_an_enum::Element;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Loader trait that can be implemented for any source of s-shell basis data.
pub trait BasisLoader {
    fn load(&self, element: &Element, requested: Option<&str>) -> Result<AtomicBasis>;
}

/// Built-in STO-3G data, or an NWChem file when the request names an existing path.
pub struct DefaultBasisLoader;

impl BasisLoader for DefaultBasisLoader {
    fn load(&self, element: &Element, requested: Option<&str>) -> Result<AtomicBasis> {
        let name = requested.unwrap_or("sto-3g");
        if name.eq_ignore_ascii_case("sto-3g") {
            return AtomicBasis::sto3g(element.get_atomic_number() as u32).ok_or_else(|| {
                eyre!(
                    "No built-in STO-3G data for {}. Supply an NWChem basis file.",
                    element.get_symbol()
                )
            });
        }

        let path = Path::new(name);
        if !path.exists() {
            return Err(eyre!(
                "Unsupported basis '{}' for element {}: not a built-in name or an existing file",
                name,
                element.get_symbol()
            ));
        }
        let basis = load_nwchem_basis(path)?;
        if !basis.element.eq_ignore_ascii_case(element.get_symbol()) {
            return Err(eyre!(
                "Basis file {} describes {}, expected {}",
                name,
                basis.element,
                element.get_symbol()
            ));
        }
        Ok(basis)
    }
}

/// Caches loaded basis sets per (element, request) so both atoms of a
/// homonuclear dimer share one load.
pub struct BasisRegistry<L: BasisLoader> {
    loader: L,
    cache: HashMap<(String, String), AtomicBasis>,
}

impl<L: BasisLoader> BasisRegistry<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            cache: HashMap::new(),
        }
    }

    /// Basis for one configured atom. Explicit primitives win over a named basis.
    pub fn basis_for_atom(&mut self, element: &Element, atom: &AtomConfig) -> Result<AtomicBasis> {
        let symbol = element.get_symbol();
        if let Some(primitives) = &atom.primitives {
            if primitives.is_empty() {
                return Err(eyre!("Empty primitive list for {}", symbol));
            }
            info!("Using {} explicit primitives for {}", primitives.len(), symbol);
            let contraction: Vec<(f64, f64)> = primitives.iter().map(|p| (p[0], p[1])).collect();
            return Ok(AtomicBasis::from_contraction(symbol, &contraction));
        }

        let requested = atom.basis.as_deref();
        let key = (symbol.to_string(), requested.unwrap_or("").to_string());
        if let Some(basis) = self.cache.get(&key) {
            return Ok(basis.clone());
        }

        match requested {
            Some(name) => info!("Loading {} basis for {}", name, symbol),
            None => info!("Loading default basis for {}", symbol),
        }
        let basis = self.loader.load(element, requested)?;
        self.cache.insert(key, basis.clone());
        Ok(basis)
    }
}
