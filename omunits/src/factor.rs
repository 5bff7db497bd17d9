//! SI conversion factors

use omunits_cache::keys;
use omunits_core::UnitError;
use tracing::debug;

use crate::engine::Engine;
use crate::unit::{Unit, UnitExpression};

impl Engine {
    /// Factor converting a quantity in `unit` to SI base units.
    ///
    /// `Ok(None)` means the unit has no path to the SI base units. Every
    /// level of the expression is read through the cache.
    pub fn si_factor_of(&self, unit: &Unit) -> Result<Option<f64>, UnitError> {
        self.cached(&keys::factor_si(&unit.uri), || self.compute_si_factor(unit))
    }

    fn compute_si_factor(&self, unit: &Unit) -> Result<Option<f64>, UnitError> {
        let factor = match &unit.expr {
            UnitExpression::Division { numerator, denominator } => {
                match (self.si_factor_of(numerator)?, self.si_factor_of(denominator)?) {
                    (Some(n), Some(d)) => Some(n / d),
                    _ => None,
                }
            }
            UnitExpression::Multiplication { term1, term2 } => {
                match (self.si_factor_of(term1)?, self.si_factor_of(term2)?) {
                    (Some(a), Some(b)) => Some(a * b),
                    _ => None,
                }
            }
            UnitExpression::Exponentiation { base, exponent } => {
                self.si_factor_of(base)?.map(|f| f.powf(*exponent))
            }
            UnitExpression::Quantity => Some(1.0),
            UnitExpression::Singular { .. } | UnitExpression::Prefixed { .. } => {
                if self.is_si_base(&unit.uri)? {
                    Some(1.0)
                } else if let Some(reference) = unit.reference() {
                    self.si_factor_of(reference)?.map(|f| unit.reference_factor() * f)
                } else {
                    None
                }
            }
        };

        match factor {
            Some(f) => debug!(unit = %unit.label, factor = f, "computed SI factor"),
            None => debug!(unit = %unit.label, "no SI factor"),
        }
        Ok(factor)
    }
}
