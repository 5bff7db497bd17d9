//! Knowledge base traits and records

use omunits_core::{DimensionVector, GraphError, vocab};
use serde::{Deserialize, Serialize};

/// A label in a given language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub value: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Label {
    pub fn new(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self { value: value.into(), lang: lang.into() }
    }
}

/// Every fact the knowledge base holds about one unit.
///
/// Reference fields hold IRIs. Absent fields mean the graph has no such
/// statement about the unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitAttributes {
    pub uri: String,
    /// Local names of the unit's types (e.g. "SingularUnit", "UnitDivision")
    pub types: Vec<String>,
    pub labels: Vec<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// The unit this one is defined in terms of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl UnitAttributes {
    fn has_type(&self, needle: &str) -> bool {
        self.types.iter().any(|t| t.contains(needle))
    }

    pub fn is_division(&self) -> bool {
        self.has_type("UnitDivision") || self.numerator.is_some() || self.denominator.is_some()
    }

    pub fn is_multiplication(&self) -> bool {
        self.has_type("UnitMultiplication") || self.term1.is_some()
    }

    pub fn is_exponentiation(&self) -> bool {
        self.has_type("UnitExponentiation") || self.base.is_some()
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix.is_some()
    }

    /// Labels in `lang`, in declaration order
    pub fn labels_in<'a>(&'a self, lang: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.labels
            .iter()
            .filter(move |l| l.lang == lang)
            .map(|l| l.value.as_str())
    }

    /// Expand every bare reference against `base`
    pub fn expand(&mut self, base: &str) {
        self.uri = vocab::expand(base, &self.uri);
        for field in [
            &mut self.dimension,
            &mut self.prefix,
            &mut self.unit,
            &mut self.base,
            &mut self.numerator,
            &mut self.denominator,
            &mut self.term1,
            &mut self.term2,
            &mut self.quantity,
        ] {
            if let Some(name) = field.as_mut() {
                *name = vocab::expand(base, name);
            }
        }
    }
}

/// Temperature scale: the affine family a temperature unit belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureScale {
    pub uri: String,
    /// The unit measured on this scale
    pub unit: String,
    /// Offset in kelvin
    #[serde(default)]
    pub offset: Option<f64>,
}

/// Typed, read-only query interface over a unit knowledge graph.
///
/// Label and symbol lookups may return candidate IRIs in any order; callers
/// pick among them deterministically.
pub trait KnowledgeBase: Send + Sync {
    /// Units carrying `label` in language `lang` (exact, case-sensitive)
    fn units_by_label(&self, label: &str, lang: &str) -> Result<Vec<String>, GraphError>;

    /// Units whose symbol equals `symbol`
    fn units_by_symbol(&self, symbol: &str) -> Result<Vec<String>, GraphError>;

    fn attributes(&self, uri: &str) -> Result<Option<UnitAttributes>, GraphError>;

    fn prefix_factor(&self, prefix: &str) -> Result<Option<f64>, GraphError>;

    /// Exponents of a dimension; unknown dimensions are dimensionless
    fn dimension_exponents(&self, dimension: &str) -> Result<DimensionVector, GraphError>;

    /// The scale measured in `unit`, if any
    fn temperature_scale(&self, unit: &str) -> Result<Option<TemperatureScale>, GraphError>;

    /// The base units of the International System of Units
    fn si_base_units(&self) -> Result<Vec<String>, GraphError>;

    /// Every unit and prefixed unit in the graph
    fn list_all_units(&self) -> Result<Vec<String>, GraphError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_flags() {
        let attrs = UnitAttributes {
            uri: "x".into(),
            numerator: Some("a".into()),
            ..Default::default()
        };
        assert!(attrs.is_division());
        assert!(!attrs.is_multiplication());

        let attrs = UnitAttributes {
            uri: "y".into(),
            types: vec!["UnitExponentiation".into()],
            ..Default::default()
        };
        assert!(attrs.is_exponentiation());
        assert!(!attrs.is_prefixed());
    }

    #[test]
    fn test_expand() {
        let mut attrs = UnitAttributes {
            uri: "gram".into(),
            unit: Some("kilogram".into()),
            dimension: Some("http://example.org/mass".into()),
            ..Default::default()
        };
        attrs.expand(vocab::OM2);
        assert_eq!(attrs.uri, format!("{}gram", vocab::OM2));
        assert_eq!(attrs.unit.as_deref(), Some(format!("{}kilogram", vocab::OM2).as_str()));
        assert_eq!(attrs.dimension.as_deref(), Some("http://example.org/mass"));
    }

    #[test]
    fn test_labels_in() {
        let attrs = UnitAttributes {
            uri: "tonne".into(),
            labels: vec![Label::new("tonne", "en"), Label::new("ton", "nl")],
            ..Default::default()
        };
        assert_eq!(attrs.labels_in("nl").collect::<Vec<_>>(), vec!["ton"]);
    }
}
