//! Structured errors for unit resolution and conversion
//!
//! Every engine error carries a stable numeric code so that callers can
//! react to a failure without matching on message text. Failures of the
//! external collaborators (knowledge base, cache) are wrapped unchanged.

use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const GENERIC: u16 = 100;
    pub const UNIT_NOT_FOUND: u16 = 101;
    pub const UNITS_NOT_COMPARABLE: u16 = 102;
    pub const PARAMETER_MISMATCH: u16 = 103;
    pub const PERCENT_CONVERSION: u16 = 104;
}

/// Failure reported by a knowledge base backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("knowledge base unavailable: {0}")]
    Unavailable(String),

    #[error("malformed knowledge base data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Malformed(err.to_string())
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Unavailable(err.to_string())
    }
}

/// Failure reported by a cache backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    #[error("no cache configured")]
    Unavailable,

    #[error("cache backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Backend(err.to_string())
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Backend(err.to_string())
    }
}

/// Errors raised while resolving units or converting quantities
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error(
        "Error {code}: The input unit \"{0}\" could not be found in the knowledge base. \
         Please make sure to enter a valid unit of measure.",
        code = codes::UNIT_NOT_FOUND
    )]
    UnitNotFound(String),

    #[error(
        "Error {code}: The units are not comparable, because unit \"{label_a}\" measures {dim_a} \
         while unit \"{label_b}\" measures {dim_b}",
        code = codes::UNITS_NOT_COMPARABLE
    )]
    UnitsNotComparable {
        label_a: String,
        dim_a: String,
        label_b: String,
        dim_b: String,
    },

    #[error(
        "Error {code}: The requested target unit of measure \"{0}\" does not match the expected \
         input format. Please specify the unit of measure as a string",
        code = codes::PARAMETER_MISMATCH
    )]
    ParameterMismatch(String),

    #[error("Error {code}: {0}", code = codes::PERCENT_CONVERSION)]
    PercentConversion(String),

    #[error("Error {code}: {message}")]
    Generic { message: String, code: u16 },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl UnitError {
    /// Generic conversion failure with the default code
    pub fn generic(message: impl Into<String>) -> Self {
        UnitError::Generic {
            message: message.into(),
            code: codes::GENERIC,
        }
    }

    /// The unit has no path to SI base units
    pub fn unrepresentable(label: &str) -> Self {
        Self::generic(format!("Unit \"{}\" cannot be expressed in SI units.", label))
    }

    /// Machine-readable code of this error
    pub fn code(&self) -> u16 {
        match self {
            UnitError::UnitNotFound(_) => codes::UNIT_NOT_FOUND,
            UnitError::UnitsNotComparable { .. } => codes::UNITS_NOT_COMPARABLE,
            UnitError::ParameterMismatch(_) => codes::PARAMETER_MISMATCH,
            UnitError::PercentConversion(_) => codes::PERCENT_CONVERSION,
            UnitError::Generic { code, .. } => *code,
            UnitError::Graph(_) | UnitError::Cache(_) => codes::GENERIC,
        }
    }
}
