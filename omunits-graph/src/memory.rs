//! In-memory knowledge base loaded from a JSON document

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use omunits_core::{DimensionVector, GraphError, vocab};
use serde::Deserialize;
use tracing::debug;

use crate::{KnowledgeBase, TemperatureScale, UnitAttributes};

fn default_base() -> String {
    vocab::OM2.to_string()
}

/// Serialized form of a unit graph
#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default = "default_base")]
    base: String,
    #[serde(default)]
    si_base_units: Vec<String>,
    #[serde(default)]
    units: Vec<UnitAttributes>,
    #[serde(default)]
    prefixes: Vec<PrefixRecord>,
    #[serde(default)]
    dimensions: Vec<DimensionRecord>,
    #[serde(default)]
    scales: Vec<TemperatureScale>,
}

#[derive(Debug, Deserialize)]
struct PrefixRecord {
    uri: String,
    #[serde(default)]
    factor: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DimensionRecord {
    uri: String,
    #[serde(alias = "hasSITimeDimensionExponent")]
    time: i32,
    #[serde(alias = "hasSILengthDimensionExponent")]
    length: i32,
    #[serde(alias = "hasSIMassDimensionExponent")]
    mass: i32,
    #[serde(alias = "hasSIThermodynamicTemperatureDimensionExponent")]
    temperature: i32,
    #[serde(alias = "hasSIElectricCurrentDimensionExponent")]
    current: i32,
    #[serde(alias = "hasSIAmountOfSubstanceDimensionExponent")]
    amount: i32,
    #[serde(alias = "hasSILuminousIntensityDimensionExponent")]
    luminous_intensity: i32,
}

impl DimensionRecord {
    fn vector(&self) -> DimensionVector {
        DimensionVector::new([
            self.time,
            self.length,
            self.mass,
            self.temperature,
            self.current,
            self.amount,
            self.luminous_intensity,
        ])
    }
}

/// Unit graph held entirely in memory, with label and symbol indexes
#[derive(Debug, Default)]
pub struct MemoryGraph {
    units: BTreeMap<String, UnitAttributes>,
    by_label: HashMap<(String, String), BTreeSet<String>>,
    by_symbol: HashMap<String, BTreeSet<String>>,
    prefixes: HashMap<String, Option<f64>>,
    dimensions: HashMap<String, DimensionVector>,
    scales: HashMap<String, TemperatureScale>,
    si_base_units: Vec<String>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a graph document
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Read and parse a graph document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    fn from_document(doc: GraphDocument) -> Result<Self, GraphError> {
        let base = doc.base;
        let mut graph = MemoryGraph::new();

        graph.si_base_units = doc
            .si_base_units
            .iter()
            .map(|u| vocab::expand(&base, u))
            .collect();

        for mut unit in doc.units {
            unit.expand(&base);
            graph.insert_unit(unit)?;
        }

        for prefix in doc.prefixes {
            graph.prefixes.insert(vocab::expand(&base, &prefix.uri), prefix.factor);
        }

        for dim in doc.dimensions {
            graph.dimensions.insert(vocab::expand(&base, &dim.uri), dim.vector());
        }

        for mut scale in doc.scales {
            scale.uri = vocab::expand(&base, &scale.uri);
            scale.unit = vocab::expand(&base, &scale.unit);
            graph.scales.insert(scale.unit.clone(), scale);
        }

        debug!(
            units = graph.units.len(),
            prefixes = graph.prefixes.len(),
            dimensions = graph.dimensions.len(),
            "loaded unit graph"
        );
        Ok(graph)
    }

    /// Add a unit (reference fields must already be full IRIs)
    pub fn insert_unit(&mut self, unit: UnitAttributes) -> Result<(), GraphError> {
        if self.units.contains_key(&unit.uri) {
            return Err(GraphError::Malformed(format!("duplicate unit {}", unit.uri)));
        }
        for label in &unit.labels {
            self.by_label
                .entry((label.lang.clone(), label.value.clone()))
                .or_default()
                .insert(unit.uri.clone());
        }
        if let Some(symbol) = &unit.symbol {
            self.by_symbol
                .entry(symbol.clone())
                .or_default()
                .insert(unit.uri.clone());
        }
        self.units.insert(unit.uri.clone(), unit);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl KnowledgeBase for MemoryGraph {
    fn units_by_label(&self, label: &str, lang: &str) -> Result<Vec<String>, GraphError> {
        Ok(self
            .by_label
            .get(&(lang.to_string(), label.to_string()))
            .map(|uris| uris.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn units_by_symbol(&self, symbol: &str) -> Result<Vec<String>, GraphError> {
        Ok(self
            .by_symbol
            .get(symbol)
            .map(|uris| uris.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn attributes(&self, uri: &str) -> Result<Option<UnitAttributes>, GraphError> {
        Ok(self.units.get(uri).cloned())
    }

    fn prefix_factor(&self, prefix: &str) -> Result<Option<f64>, GraphError> {
        Ok(self.prefixes.get(prefix).copied().flatten())
    }

    fn dimension_exponents(&self, dimension: &str) -> Result<DimensionVector, GraphError> {
        Ok(self.dimensions.get(dimension).copied().unwrap_or(DimensionVector::ZERO))
    }

    fn temperature_scale(&self, unit: &str) -> Result<Option<TemperatureScale>, GraphError> {
        Ok(self.scales.get(unit).cloned())
    }

    fn si_base_units(&self) -> Result<Vec<String>, GraphError> {
        Ok(self.si_base_units.clone())
    }

    fn list_all_units(&self) -> Result<Vec<String>, GraphError> {
        Ok(self.units.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "si_base_units": ["metre"],
        "units": [
            { "uri": "metre", "types": ["SingularUnit"], "symbol": "m",
              "labels": [{ "value": "metre", "lang": "en" }, { "value": "meter", "lang": "nl" }],
              "dimension": "length-Dimension" },
            { "uri": "minute-HourAngle", "types": ["SingularUnit"], "symbol": "m",
              "labels": [{ "value": "minute (hour angle)" }] },
            { "uri": "decimetre", "types": ["PrefixedUnit"], "symbol": "dm",
              "labels": [{ "value": "decimetre" }],
              "prefix": "deci", "unit": "metre", "dimension": "length-Dimension" }
        ],
        "prefixes": [{ "uri": "deci", "factor": 0.1 }],
        "dimensions": [{ "uri": "length-Dimension", "hasSILengthDimensionExponent": 1 }],
        "scales": []
    }"#;

    fn om(name: &str) -> String {
        format!("{}{}", vocab::OM2, name)
    }

    #[test]
    fn test_load_and_lookup() {
        let graph = MemoryGraph::from_json_str(DOC).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.units_by_label("meter", "nl").unwrap(), vec![om("metre")]);
        assert!(graph.units_by_label("meter", "en").unwrap().is_empty());

        let attrs = graph.attributes(&om("decimetre")).unwrap().unwrap();
        assert!(attrs.is_prefixed());
        assert_eq!(attrs.unit, Some(om("metre")));
        assert_eq!(graph.prefix_factor(&om("deci")).unwrap(), Some(0.1));
    }

    #[test]
    fn test_symbol_candidates_are_sorted() {
        let graph = MemoryGraph::from_json_str(DOC).unwrap();
        assert_eq!(
            graph.units_by_symbol("m").unwrap(),
            vec![om("metre"), om("minute-HourAngle")]
        );
    }

    #[test]
    fn test_dimensions() {
        let graph = MemoryGraph::from_json_str(DOC).unwrap();
        assert_eq!(
            graph.dimension_exponents(&om("length-Dimension")).unwrap(),
            DimensionVector::LENGTH
        );
        assert_eq!(
            graph.dimension_exponents(&om("nothing-Dimension")).unwrap(),
            DimensionVector::ZERO
        );
    }

    #[test]
    fn test_duplicate_unit_rejected() {
        let doc = r#"{ "units": [{ "uri": "metre" }, { "uri": "metre" }] }"#;
        assert!(matches!(
            MemoryGraph::from_json_str(doc),
            Err(GraphError::Malformed(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(MemoryGraph::from_json_str("{ not json").is_err());
    }
}
