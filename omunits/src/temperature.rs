//! Affine temperature conversion, pivoting on kelvin

use omunits_cache::keys;
use omunits_core::{vocab, UnitError};

use crate::engine::Engine;
use crate::unit::{Unit, UnitExpression};

impl Engine {
    /// Offset in kelvin of the scale measured in `unit`
    pub(crate) fn scale_offset(&self, unit: &str) -> Result<f64, UnitError> {
        let offset = self.cached(&keys::scale(unit), || {
            Ok(self.graph.temperature_scale(unit)?.and_then(|scale| scale.offset))
        })?;
        offset.ok_or_else(|| {
            UnitError::generic(format!(
                "Unit \"{}\" is not on a temperature scale with a known offset.",
                vocab::local_name(unit)
            ))
        })
    }

    /// Convert a temperature in `unit` to kelvin
    pub fn to_kelvin(&self, unit: &Unit, quantity: f64) -> Result<f64, UnitError> {
        let offset = self.scale_offset(unit.scale_anchor())?;
        Ok((quantity * unit.prefix_factor() - offset) * unit.own_factor())
    }

    /// Convert a temperature in kelvin to `unit`
    pub fn from_kelvin(&self, unit: &Unit, kelvin: f64) -> Result<f64, UnitError> {
        let offset = self.scale_offset(unit.scale_anchor())?;
        let shifted = kelvin * unit.own_factor().recip() + offset;
        match &unit.expr {
            UnitExpression::Exponentiation { exponent, .. } => Ok(shifted.powf(*exponent)),
            _ => Ok(shifted * unit.prefix_factor()),
        }
    }
}
