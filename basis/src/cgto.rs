/* Contracted gaussian type orbital (CGTO) built on the s-type primitives in
   gto.rs, plus the per-element contraction data used to place them on atoms.
*/
#![allow(non_snake_case)]

use crate::basis::Basis;
use crate::error::{HfError, Result};
use crate::gto::GTO;
use itertools::iproduct;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// STO-3G 1s contraction coefficients, shared by H and He
const STO3G_1S_COEFFS: [f64; 3] = [0.1543289673E+00, 0.5353281423E+00, 0.4446345422E+00];
const STO3G_H_EXPONENTS: [f64; 3] = [0.3425250914E+01, 0.6239137298E+00, 0.1688554040E+00];
const STO3G_HE_EXPONENTS: [f64; 3] = [0.6362421394E+01, 0.1158922999E+01, 0.3136497915E+00];

/// One atomic orbital: an ordered contraction of primitives on a common center.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ContractedGTO {
    primitives: Vec<GTO>,
    // shell_type: 1s, 2s, ...
    shell_type: String,
}

impl ContractedGTO {
    /// Contract `(exponent, coefficient)` pairs on `center`.
    pub fn new(center: Vector3<f64>, contraction: &[(f64, f64)]) -> Result<Self> {
        let primitives = contraction
            .iter()
            .map(|&(alpha, coeff)| GTO::new(alpha, coeff, center))
            .collect::<Result<Vec<_>>>()?;
        ContractedGTO::from_primitives(primitives, "1s")
    }

    pub fn from_primitives(primitives: Vec<GTO>, shell_type: &str) -> Result<Self> {
        let first = primitives
            .first()
            .ok_or_else(|| HfError::precondition("a contracted function needs at least one primitive"))?;
        if primitives.iter().any(|g| g.center() != first.center()) {
            return Err(HfError::precondition(
                "all primitives of a contracted function must share one center",
            ));
        }

        Ok(Self {
            primitives,
            shell_type: shell_type.to_string(),
        })
    }

    pub fn primitives(&self) -> &[GTO] {
        &self.primitives
    }

    pub fn center(&self) -> Vector3<f64> {
        self.primitives[0].center()
    }

    pub fn shell_type(&self) -> &str {
        &self.shell_type
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Always false: empty contractions are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Basis for ContractedGTO {
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        self.primitives
            .iter()
            .map(|g| g.coefficient() * g.evaluate(r))
            .sum()
    }

    fn Sab(a: &Self, b: &Self) -> f64 {
        iproduct!(a.primitives.iter(), b.primitives.iter())
            .map(|(ga, gb)| ga.coefficient() * gb.coefficient() * GTO::Sab(ga, gb))
            .sum()
    }

    fn Tab(a: &Self, b: &Self) -> f64 {
        iproduct!(a.primitives.iter(), b.primitives.iter())
            .map(|(ga, gb)| ga.coefficient() * gb.coefficient() * GTO::Tab(ga, gb))
            .sum()
    }

    fn Vab(a: &Self, b: &Self, R: Vector3<f64>, Z: f64) -> f64 {
        iproduct!(a.primitives.iter(), b.primitives.iter())
            .map(|(ga, gb)| ga.coefficient() * gb.coefficient() * GTO::Vab(ga, gb, R, Z))
            .sum()
    }

    fn JKabcd(a: &Self, b: &Self, c: &Self, d: &Self) -> f64 {
        iproduct!(
            a.primitives.iter(),
            b.primitives.iter(),
            c.primitives.iter(),
            d.primitives.iter()
        )
        .map(|(ga, gb, gc, gd)| {
            ga.coefficient()
                * gb.coefficient()
                * gc.coefficient()
                * gd.coefficient()
                * GTO::JKabcd(ga, gb, gc, gd)
        })
        .sum()
    }
}

/// Center-free contraction pattern of one s shell.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShellTemplate {
    pub shell_type: String,
    pub exponents: Vec<f64>,
    pub coefficients: Vec<f64>,
}

impl ShellTemplate {
    pub fn place(&self, center: Vector3<f64>) -> Result<ContractedGTO> {
        if self.exponents.len() != self.coefficients.len() {
            return Err(HfError::precondition(format!(
                "shell {} has {} exponents but {} coefficients",
                self.shell_type,
                self.exponents.len(),
                self.coefficients.len()
            )));
        }
        let primitives = self
            .exponents
            .iter()
            .zip(&self.coefficients)
            .map(|(&alpha, &coeff)| GTO::new(alpha, coeff, center))
            .collect::<Result<Vec<_>>>()?;
        ContractedGTO::from_primitives(primitives, &self.shell_type)
    }
}

/// Basis set data for one element.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AtomicBasis {
    // define of the basis set
    pub name: String,
    pub element: String,
    pub shells: Vec<ShellTemplate>,
}

impl AtomicBasis {
    /// Built-in STO-3G minimal basis; `None` for elements without s-only data.
    pub fn sto3g(atomic_number: u32) -> Option<Self> {
        let (element, exponents) = match atomic_number {
            1 => ("H", STO3G_H_EXPONENTS),
            2 => ("He", STO3G_HE_EXPONENTS),
            _ => return None,
        };

        Some(AtomicBasis {
            name: "sto-3g".to_string(),
            element: element.to_string(),
            shells: vec![ShellTemplate {
                shell_type: "1s".to_string(),
                exponents: exponents.to_vec(),
                coefficients: STO3G_1S_COEFFS.to_vec(),
            }],
        })
    }

    /// Single custom contraction, e.g. from a configuration file.
    pub fn from_contraction(element: &str, contraction: &[(f64, f64)]) -> Self {
        AtomicBasis {
            name: "custom".to_string(),
            element: element.to_string(),
            shells: vec![ShellTemplate {
                shell_type: "1s".to_string(),
                exponents: contraction.iter().map(|c| c.0).collect(),
                coefficients: contraction.iter().map(|c| c.1).collect(),
            }],
        }
    }

    // Example of nwchem format (only S shells are accepted):
    // #----------------------------------------------------------------------
    // #   Basis set: STO-3G
    // #----------------------------------------------------------------------
    // BASIS "ao basis" SPHERICAL PRINT
    // #BASIS SET: (3s) -> [1s]
    // H    S
    //       0.3425250914E+01       0.1543289673E+00
    //       0.6239137298E+00       0.5353281423E+00
    //       0.1688554040E+00       0.4446345422E+00
    // END

    /// Parses a string in NWChem format. Every shell must be of type S.
    pub fn parse_nwchem(bstr: &str) -> Result<Self> {
        let mut element: Option<String> = None;
        let mut shells: Vec<ShellTemplate> = Vec::new();

        for line in bstr.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.to_uppercase().starts_with("BASIS") {
                continue;
            }
            if line.eq_ignore_ascii_case("END") {
                break;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens[0].chars().all(char::is_alphabetic) {
                if tokens.len() < 2 {
                    return Err(HfError::precondition(format!("malformed shell header: {}", line)));
                }
                match &element {
                    None => element = Some(tokens[0].to_string()),
                    Some(e) if e != tokens[0] => {
                        return Err(HfError::precondition(format!(
                            "basis file mixes elements {} and {}",
                            e, tokens[0]
                        )))
                    }
                    _ => {}
                }
                if !tokens[1].eq_ignore_ascii_case("S") {
                    return Err(HfError::precondition(format!(
                        "unsupported shell type {}: only s functions are available",
                        tokens[1]
                    )));
                }
                shells.push(ShellTemplate {
                    shell_type: format!("{}s", shells.len() + 1),
                    exponents: Vec::new(),
                    coefficients: Vec::new(),
                });
                continue;
            }

            let shell = shells
                .last_mut()
                .ok_or_else(|| HfError::precondition("primitive line before any shell header"))?;
            if tokens.len() != 2 {
                return Err(HfError::precondition(format!(
                    "expected exponent and coefficient, got: {}",
                    line
                )));
            }
            shell.exponents.push(parse_nwchem_float(tokens[0])?);
            shell.coefficients.push(parse_nwchem_float(tokens[1])?);
        }

        let element = element.ok_or_else(|| HfError::precondition("no shells found in basis file"))?;
        if let Some(empty) = shells.iter().find(|s| s.exponents.is_empty()) {
            return Err(HfError::precondition(format!(
                "shell {} of {} has no primitives",
                empty.shell_type, element
            )));
        }

        Ok(AtomicBasis {
            name: "nwchem".to_string(),
            element,
            shells,
        })
    }

    /// Contracted functions of this basis placed on `center`, in shell order.
    pub fn place(&self, center: Vector3<f64>) -> Result<Vec<ContractedGTO>> {
        self.shells.iter().map(|s| s.place(center)).collect()
    }
}

// Fortran-style exponents (1.0D+00) show up in older basis files
fn parse_nwchem_float(token: &str) -> Result<f64> {
    token
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|_| HfError::precondition(format!("invalid number in basis file: {}", token)))
}
