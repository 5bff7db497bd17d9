//! omunits Core - Fundamental types
//!
//! This crate provides the types shared by every omunits crate:
//! - `DimensionVector`: SI base-dimension exponents of a unit
//! - `UnitError`: typed errors with stable codes
//! - `vocab`: the unit ontology's namespace and well-known IRIs

mod dimension;
mod error;
pub mod vocab;

pub use dimension::DimensionVector;
pub use error::{UnitError, GraphError, CacheError, codes};

/// Default relative tolerance for comparing conversion results
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Relative float comparison: `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)`
pub fn float_equal(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    (a - b).abs() <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}
