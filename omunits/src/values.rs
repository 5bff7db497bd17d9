//! Quantities and conversion between units

use std::fmt;

use omunits_core::UnitError;
use serde_json::Value;
use tracing::debug;

use crate::engine::Engine;
use crate::unit::Unit;

/// `percentage` percent of `quantity` in `unit`
#[derive(Debug, Clone, PartialEq)]
pub struct Values {
    pub quantity: f64,
    pub unit: Unit,
    pub percentage: f64,
}

impl Values {
    pub fn new(quantity: f64, unit: Unit) -> Self {
        Self::with_percentage(quantity, unit, 100.0)
    }

    pub fn with_percentage(quantity: f64, unit: Unit, percentage: f64) -> Self {
        Self { quantity, unit, percentage }
    }

    fn share(&self) -> f64 {
        self.percentage / 100.0
    }

    /// Convert to `target`.
    ///
    /// Converting to percent expresses the value as a share of `whole`,
    /// which is then required.
    pub fn to_unit(&self, engine: &Engine, target: &Unit, whole: Option<&Values>) -> Result<f64, UnitError> {
        if target.uri == engine.config().percent_unit {
            let whole = whole.ok_or_else(|| {
                UnitError::PercentConversion("Converting to percent (%) requires a whole value".to_string())
            })?;
            if whole.quantity == 0.0 {
                return Err(UnitError::PercentConversion(
                    "Converting to percent (%) requires a non-zero whole value".to_string(),
                ));
            }
            let in_whole_unit = self.to_unit(engine, &whole.unit, None)?;
            return Ok(in_whole_unit * 100.0 / whole.quantity);
        }

        self.unit.can_convert_to(target)?;

        let result = if self.unit.temperature || target.temperature {
            let kelvin = engine.to_kelvin(&self.unit, self.quantity)?;
            engine.from_kelvin(target, kelvin)? * self.share()
        } else {
            let from = engine
                .si_factor_of(&self.unit)?
                .ok_or_else(|| UnitError::unrepresentable(&self.unit.label))?;
            let to = engine
                .si_factor_of(target)?
                .ok_or_else(|| UnitError::unrepresentable(&target.label))?;
            self.quantity * from / to * self.share()
        };

        debug!(from = %self.unit.label, to = %target.label, quantity = self.quantity, result, "converted");
        Ok(result)
    }

    /// Convert to a target given as JSON; see [`Engine::unit_from_json`]
    pub fn to_unit_json(&self, engine: &Engine, target: &Value, whole: Option<&Values>) -> Result<f64, UnitError> {
        let target = engine.unit_from_json(target)?;
        self.to_unit(engine, &target, whole)
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.percentage == 100.0 {
            write!(f, "{} {}", self.quantity, self.unit)
        } else {
            write!(f, "{}% of {} {}", self.percentage, self.quantity, self.unit)
        }
    }
}
