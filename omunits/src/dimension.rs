//! Dimension vectors of unit expressions

use omunits_core::DimensionVector;

use crate::unit::{Unit, UnitExpression};

/// Dimension vector of a unit.
///
/// A stored dimension always wins. Otherwise the vector is composed from
/// the expression: quotients subtract, products add, powers keep the base's
/// vector unscaled, and anything without structure is dimensionless.
pub fn dimension_of(unit: &Unit) -> DimensionVector {
    if let Some(dimension) = &unit.dimension {
        return dimension.vector;
    }
    match &unit.expr {
        UnitExpression::Division { numerator, denominator } => {
            dimension_of(numerator) - dimension_of(denominator)
        }
        UnitExpression::Multiplication { term1, term2 } => dimension_of(term1) + dimension_of(term2),
        UnitExpression::Exponentiation { base, .. } => dimension_of(base),
        UnitExpression::Prefixed { reference: Some(base), .. } => dimension_of(base),
        UnitExpression::Prefixed { reference: None, .. }
        | UnitExpression::Singular { .. }
        | UnitExpression::Quantity => DimensionVector::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::tests::singular;

    #[test]
    fn test_stored_dimension_wins() {
        let metre = singular("metre", Some(("length-Dimension", DimensionVector::LENGTH)));
        assert_eq!(dimension_of(&metre), DimensionVector::LENGTH);
    }

    #[test]
    fn test_composed_dimension() {
        let kilogram = singular("kilogram", Some(("mass-Dimension", DimensionVector::MASS)));
        let metre = singular("metre", Some(("length-Dimension", DimensionVector::LENGTH)));
        let second = singular("second", Some(("time-Dimension", DimensionVector::TIME)));

        let mut kilogram_metre = singular("kilogramMetre", None);
        kilogram_metre.expr = UnitExpression::Multiplication {
            term1: Box::new(kilogram),
            term2: Box::new(metre),
        };
        let mut per_second = singular("kilogramMetrePerSecond", None);
        per_second.expr = UnitExpression::Division {
            numerator: Box::new(kilogram_metre),
            denominator: Box::new(second),
        };

        assert_eq!(dimension_of(&per_second), DimensionVector::new([-1, 1, 1, 0, 0, 0, 0]));
    }

    #[test]
    fn test_undefined_is_dimensionless() {
        assert!(dimension_of(&singular("one", None)).is_dimensionless());
        let mut bit = singular("bit", None);
        bit.expr = UnitExpression::Quantity;
        assert!(dimension_of(&bit).is_dimensionless());
    }
}
