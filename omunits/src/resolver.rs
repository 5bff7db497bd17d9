//! Turning user input into units

use omunits_core::{vocab, UnitError};
use omunits_graph::UnitAttributes;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::engine::Engine;
use crate::unit::{Dimension, Unit, UnitExpression};

/// How an identifier passed to [`Engine::resolve`] is interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Look the identifier up as a symbol first
    pub as_symbol: bool,
    /// Label language; the configured default when `None`
    pub lang: Option<String>,
    /// The identifier is a unit IRI; no label search happens
    pub internal: bool,
}

impl ResolveOptions {
    pub fn symbol() -> Self {
        Self { as_symbol: true, ..Default::default() }
    }

    pub fn internal() -> Self {
        Self { internal: true, ..Default::default() }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Object form of a unit in JSON input
#[derive(Debug, Deserialize)]
struct UnitRequest {
    unit: String,
    #[serde(default)]
    symbol: bool,
    #[serde(default)]
    lang: Option<String>,
}

impl Engine {
    /// Resolve a label, symbol or misspelled label in the default language
    pub fn unit(&self, identifier: &str) -> Result<Unit, UnitError> {
        self.resolve(identifier, ResolveOptions::default())
    }

    /// Resolve an identifier to a unit.
    ///
    /// Tries an exact label match, then a symbol match, then the spelling
    /// correction of the identifier as a label. Several matches resolve to
    /// the smallest IRI.
    pub fn resolve(&self, identifier: &str, options: ResolveOptions) -> Result<Unit, UnitError> {
        if options.internal {
            return self.build_unit(identifier, 0);
        }

        let lang = options.lang.as_deref().unwrap_or(&self.config.default_lang);
        let uri = self.find_unit(identifier, lang, options.as_symbol)?;
        self.build_unit(&uri, 0)
    }

    /// Resolve a unit given as JSON: a string, or
    /// `{ "unit": ..., "symbol"?: bool, "lang"?: str }`
    pub fn unit_from_json(&self, value: &Value) -> Result<Unit, UnitError> {
        match value {
            Value::String(identifier) => self.unit(identifier),
            Value::Object(_) => {
                let request = UnitRequest::deserialize(value)
                    .map_err(|_| UnitError::ParameterMismatch(value.to_string()))?;
                let options = ResolveOptions {
                    as_symbol: request.symbol,
                    lang: request.lang,
                    internal: false,
                };
                self.resolve(&request.unit, options)
            }
            other => Err(UnitError::ParameterMismatch(other.to_string())),
        }
    }

    fn find_unit(&self, identifier: &str, lang: &str, as_symbol: bool) -> Result<String, UnitError> {
        let mut candidates = if as_symbol {
            Vec::new()
        } else {
            self.graph.units_by_label(identifier, lang)?
        };

        if candidates.is_empty() {
            candidates = self.graph.units_by_symbol(identifier)?;
        }

        if candidates.is_empty() {
            if let Some(corrected) = self.speller()?.correction(identifier) {
                if corrected != identifier {
                    warn!(input = identifier, corrected = %corrected, "unit label corrected");
                }
                candidates = self.graph.units_by_label(&corrected, &self.config.dictionary_lang)?;
            }
        }

        // backends are not required to return candidates in any order
        candidates.sort();
        candidates.dedup();
        let mut candidates = candidates.into_iter();
        let chosen = candidates
            .next()
            .ok_or_else(|| UnitError::UnitNotFound(identifier.to_string()))?;
        let others = candidates.len();
        if others > 0 {
            warn!(input = identifier, chosen = %chosen, candidates = others + 1, "ambiguous unit, using first match");
        }
        debug!(input = identifier, uri = %chosen, "resolved unit");
        Ok(chosen)
    }

    /// Build the expression tree of the unit at `uri`.
    ///
    /// IRIs the graph knows nothing about become bare singular units,
    /// which have no SI factor.
    pub(crate) fn build_unit(&self, uri: &str, depth: usize) -> Result<Unit, UnitError> {
        if depth > self.config.max_depth {
            return Err(UnitError::generic(format!(
                "Unit \"{}\" is nested deeper than {} levels.",
                vocab::local_name(uri),
                self.config.max_depth
            )));
        }

        let attrs = match self.graph.attributes(uri)? {
            Some(attrs) => attrs,
            None => {
                debug!(uri, "no attributes in graph");
                UnitAttributes { uri: uri.to_string(), ..Default::default() }
            }
        };

        let dimension = match &attrs.dimension {
            Some(dim) => Some(Dimension { uri: dim.clone(), vector: self.dimension_vector(dim)? }),
            None => None,
        };
        let temperature = attrs.dimension.as_deref() == Some(self.config.temperature_dimension.as_str());
        let expr = self.build_expression(&attrs, depth)?;

        Ok(Unit {
            uri: uri.to_string(),
            label: vocab::local_name(uri).to_string(),
            labels: attrs.labels_in(&self.config.dictionary_lang).map(str::to_string).collect(),
            symbol: attrs.symbol.clone(),
            dimension,
            temperature,
            expr,
        })
    }

    fn build_expression(&self, attrs: &UnitAttributes, depth: usize) -> Result<UnitExpression, UnitError> {
        let operand = |reference: &Option<String>, role: &str| -> Result<Box<Unit>, UnitError> {
            match reference {
                Some(uri) => Ok(Box::new(self.build_unit(uri, depth + 1)?)),
                None => Err(UnitError::generic(format!(
                    "Unit \"{}\" has no {}.",
                    vocab::local_name(&attrs.uri),
                    role
                ))),
            }
        };
        // SI base units and self references have nothing to defer to.
        // Stopping at SI base units also breaks the kilogram/gram cycle.
        let reference = || -> Result<Option<Box<Unit>>, UnitError> {
            let Some(uri) = attrs.unit.as_deref() else {
                return Ok(None);
            };
            if uri == attrs.uri || self.is_si_base(&attrs.uri)? {
                return Ok(None);
            }
            Ok(Some(Box::new(self.build_unit(uri, depth + 1)?)))
        };

        let expr = if attrs.is_division() {
            UnitExpression::Division {
                numerator: operand(&attrs.numerator, "numerator")?,
                denominator: operand(&attrs.denominator, "denominator")?,
            }
        } else if attrs.is_multiplication() {
            UnitExpression::Multiplication {
                term1: operand(&attrs.term1, "first term")?,
                term2: operand(&attrs.term2, "second term")?,
            }
        } else if attrs.is_exponentiation() {
            let exponent = attrs.exponent.ok_or_else(|| {
                UnitError::generic(format!("Unit \"{}\" has no exponent.", vocab::local_name(&attrs.uri)))
            })?;
            UnitExpression::Exponentiation { base: operand(&attrs.base, "base")?, exponent }
        } else if attrs.quantity.as_deref() == Some(self.config.information_quantity.as_str()) {
            UnitExpression::Quantity
        } else if let Some(prefix) = &attrs.prefix {
            UnitExpression::Prefixed {
                reference: reference()?,
                prefix: prefix.clone(),
                prefix_factor: self.prefix_factor(prefix)?,
                factor: attrs.factor,
            }
        } else {
            UnitExpression::Singular { reference: reference()?, factor: attrs.factor }
        };
        Ok(expr)
    }
}
