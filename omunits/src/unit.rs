//! Resolved units and their expression trees

use std::fmt;

use omunits_core::{vocab, DimensionVector, UnitError};

use crate::dimension::dimension_of;

/// A dimension reference together with its exponents
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub uri: String,
    pub vector: DimensionVector,
}

impl Dimension {
    /// Name used in error messages
    pub fn name(&self) -> &str {
        vocab::local_name(&self.uri)
    }
}

/// How a unit is built out of other units
#[derive(Debug, Clone, PartialEq)]
pub enum UnitExpression {
    /// A named unit, defined as `factor` times the referenced unit
    Singular {
        reference: Option<Box<Unit>>,
        factor: Option<f64>,
    },
    /// A named unit scaled by a metric prefix
    Prefixed {
        reference: Option<Box<Unit>>,
        prefix: String,
        prefix_factor: f64,
        factor: Option<f64>,
    },
    Division {
        numerator: Box<Unit>,
        denominator: Box<Unit>,
    },
    Multiplication {
        term1: Box<Unit>,
        term2: Box<Unit>,
    },
    Exponentiation {
        base: Box<Unit>,
        exponent: f64,
    },
    /// Information capacity (bit and friends), factor 1
    Quantity,
}

/// A unit resolved from the knowledge base
#[derive(Debug, Clone)]
pub struct Unit {
    pub uri: String,
    /// Local name of the IRI, used in messages
    pub label: String,
    /// Labels in the dictionary language
    pub labels: Vec<String>,
    pub symbol: Option<String>,
    /// Stored dimension; `None` when the graph does not state one
    pub dimension: Option<Dimension>,
    /// Measured on an affine temperature scale
    pub temperature: bool,
    pub expr: UnitExpression,
}

impl Unit {
    /// The unit this one is defined in terms of
    pub fn reference(&self) -> Option<&Unit> {
        match &self.expr {
            UnitExpression::Singular { reference, .. }
            | UnitExpression::Prefixed { reference, .. } => reference.as_deref(),
            _ => None,
        }
    }

    /// Multiplier applied to the referenced unit: own factor, else the
    /// prefix factor, else 1
    pub fn reference_factor(&self) -> f64 {
        match &self.expr {
            UnitExpression::Singular { factor, .. } => factor.unwrap_or(1.0),
            UnitExpression::Prefixed { factor, prefix_factor, .. } => factor.unwrap_or(*prefix_factor),
            _ => 1.0,
        }
    }

    /// The unit's own factor, ignoring any prefix
    pub fn own_factor(&self) -> f64 {
        match &self.expr {
            UnitExpression::Singular { factor: Some(f), .. }
            | UnitExpression::Prefixed { factor: Some(f), .. } => *f,
            _ => 1.0,
        }
    }

    pub fn prefix_factor(&self) -> f64 {
        match &self.expr {
            UnitExpression::Prefixed { prefix_factor, .. } => *prefix_factor,
            _ => 1.0,
        }
    }

    /// Unit whose temperature scale gives this unit's offset
    pub fn scale_anchor(&self) -> &str {
        match &self.expr {
            UnitExpression::Prefixed { reference: Some(unit), .. } => &unit.uri,
            UnitExpression::Exponentiation { base, .. } => &base.uri,
            _ => &self.uri,
        }
    }

    pub fn dimension_name(&self) -> &str {
        self.dimension.as_ref().map_or("undefined", Dimension::name)
    }

    /// Whether quantities in this unit can be converted to `other`.
    ///
    /// Stored dimensions are compared by reference. When either side has
    /// none, the computed dimension vectors decide.
    pub fn can_convert_to(&self, other: &Unit) -> Result<bool, UnitError> {
        let comparable = match (&self.dimension, &other.dimension) {
            (Some(a), Some(b)) => a.uri == b.uri,
            _ => dimension_of(self) == dimension_of(other),
        };
        if comparable {
            Ok(true)
        } else {
            Err(UnitError::UnitsNotComparable {
                label_a: self.label.clone(),
                dim_a: self.dimension_name().to_string(),
                label_b: other.label.clone(),
                dim_b: other.dimension_name().to_string(),
            })
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.label == other.label
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{} ({})", self.label, symbol),
            None => write!(f, "{}", self.label),
        }
    }
}
