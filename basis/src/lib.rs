//! Contracted s-type Gaussian basis functions and the closed-form molecular
//! integrals over them.

pub mod basis;
pub mod cgto;
pub mod error;
pub mod gto;
pub mod helper;
pub mod integrals;
pub mod molecule;


pub use error::HfError;
