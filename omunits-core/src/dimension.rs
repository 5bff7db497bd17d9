//! Dimensional analysis types
//!
//! Each unit has dimensions represented as a 7-element vector of SI
//! base-dimension exponents, in the order used by the ontology:
//! [time, length, mass, temperature, current, amount, luminous intensity]

use std::fmt;
use std::ops::{Add, Sub};
use serde::{Serialize, Deserialize};

/// Exponents of a unit's dimension with respect to the SI base dimensions.
///
/// Two units are convertible iff their vectors are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimensionVector {
    /// [time, length, mass, temperature, current, amount, luminous intensity]
    pub exponents: [i32; 7],
}

impl DimensionVector {
    /// Dimensionless (all exponents zero)
    pub const ZERO: DimensionVector = DimensionVector { exponents: [0; 7] };

    pub const TIME: DimensionVector = DimensionVector { exponents: [1, 0, 0, 0, 0, 0, 0] };
    pub const LENGTH: DimensionVector = DimensionVector { exponents: [0, 1, 0, 0, 0, 0, 0] };
    pub const MASS: DimensionVector = DimensionVector { exponents: [0, 0, 1, 0, 0, 0, 0] };
    pub const TEMPERATURE: DimensionVector = DimensionVector { exponents: [0, 0, 0, 1, 0, 0, 0] };

    pub fn new(exponents: [i32; 7]) -> Self {
        DimensionVector { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Component-wise sum (dimension of a product)
    pub fn sum(&self, other: &DimensionVector) -> DimensionVector {
        let mut result = [0i32; 7];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i] + other.exponents[i];
        }
        DimensionVector { exponents: result }
    }

    /// Component-wise difference (dimension of a quotient)
    pub fn difference(&self, other: &DimensionVector) -> DimensionVector {
        let mut result = [0i32; 7];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i] - other.exponents[i];
        }
        DimensionVector { exponents: result }
    }
}

impl Add for DimensionVector {
    type Output = DimensionVector;

    fn add(self, rhs: DimensionVector) -> DimensionVector {
        self.sum(&rhs)
    }
}

impl Sub for DimensionVector {
    type Output = DimensionVector;

    fn sub(self, rhs: DimensionVector) -> DimensionVector {
        self.difference(&rhs)
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["T", "L", "M", "Θ", "I", "N", "J"];
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(names[i].to_string());
                } else {
                    parts.push(format!("{}^{}", names[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}
