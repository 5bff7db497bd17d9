//! The conversion engine: knowledge base, optional cache and lazily built
//! lookup state, owned by the caller and passed to every operation.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use omunits_cache::{keys, Cache};
use omunits_core::{CacheError, DimensionVector, UnitError};
use omunits_graph::KnowledgeBase;
use tracing::debug;

use crate::config::EngineConfig;
use crate::speller::SpellingCorrector;

/// Values the engine stores in the cache
pub(crate) trait CacheValue: Sized {
    fn encode(&self) -> Result<String, UnitError>;
    fn decode(raw: &str) -> Option<Self>;
}

impl CacheValue for f64 {
    fn encode(&self) -> Result<String, UnitError> {
        // Display of f64 is the shortest string that parses back to the same value
        Ok(self.to_string())
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl CacheValue for DimensionVector {
    fn encode(&self) -> Result<String, UnitError> {
        serde_json::to_string(self).map_err(|e| CacheError::from(e).into())
    }

    fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl CacheValue for Vec<String> {
    fn encode(&self) -> Result<String, UnitError> {
        serde_json::to_string(self).map_err(|e| CacheError::from(e).into())
    }

    fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Unit conversion engine
pub struct Engine {
    pub(crate) graph: Arc<dyn KnowledgeBase>,
    pub(crate) cache: Option<Arc<dyn Cache>>,
    pub(crate) config: EngineConfig,
    /// Replaced whenever a newer dictionary is built
    pub(crate) speller: RwLock<Option<Arc<SpellingCorrector>>>,
    si_base_units: OnceLock<BTreeSet<String>>,
}

impl Engine {
    pub fn new(graph: Arc<dyn KnowledgeBase>, config: EngineConfig) -> Self {
        Self {
            graph,
            cache: None,
            config,
            speller: RwLock::default(),
            si_base_units: OnceLock::new(),
        }
    }

    /// Attach a cache for factors, dimensions and the spelling dictionary
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use a fixed spelling dictionary instead of deriving one from the graph.
    ///
    /// A later call replaces the dictionary, and so does [`Engine::warm_cache`].
    pub fn with_dictionary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let speller = SpellingCorrector::new(words, self.config.edit_distance());
        self.speller = RwLock::new(Some(Arc::new(speller)));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &dyn KnowledgeBase {
        self.graph.as_ref()
    }

    pub fn cache(&self) -> Option<&dyn Cache> {
        self.cache.as_deref()
    }

    /// Read-through cache lookup.
    ///
    /// `None` results are never stored, so an unrepresentable value is
    /// recomputed on every call. Entries that fail to decode count as misses.
    pub(crate) fn cached<T, F>(&self, key: &str, compute: F) -> Result<Option<T>, UnitError>
    where
        T: CacheValue,
        F: FnOnce() -> Result<Option<T>, UnitError>,
    {
        let Some(cache) = self.cache.as_deref() else {
            return compute();
        };

        if let Some(raw) = cache.get(key)? {
            if let Some(value) = T::decode(&raw) {
                debug!(key, "cache hit");
                return Ok(Some(value));
            }
            debug!(key, "undecodable cache entry, recomputing");
        }

        let value = compute()?;
        if let Some(value) = &value {
            cache.set(key, &value.encode()?)?;
        }
        Ok(value)
    }

    pub(crate) fn is_si_base(&self, uri: &str) -> Result<bool, UnitError> {
        if let Some(units) = self.si_base_units.get() {
            return Ok(units.contains(uri));
        }
        let units: BTreeSet<String> = self.graph.si_base_units()?.into_iter().collect();
        Ok(self.si_base_units.get_or_init(|| units).contains(uri))
    }

    /// Exponents of a dimension IRI
    pub(crate) fn dimension_vector(&self, dimension: &str) -> Result<DimensionVector, UnitError> {
        let vector = self.cached(&keys::dimension(dimension), || {
            Ok(Some(self.graph.dimension_exponents(dimension)?))
        })?;
        Ok(vector.unwrap_or(DimensionVector::ZERO))
    }

    /// Factor of a metric prefix; prefixes without one scale by 1
    pub(crate) fn prefix_factor(&self, prefix: &str) -> Result<f64, UnitError> {
        let factor = self.cached(&keys::prefix(prefix), || {
            Ok(Some(self.graph.prefix_factor(prefix)?.unwrap_or(1.0)))
        })?;
        Ok(factor.unwrap_or(1.0))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dictionary = self
            .speller
            .read()
            .ok()
            .and_then(|speller| speller.as_ref().map(|s| s.len()));
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("cached", &self.cache.is_some())
            .field("dictionary", &dictionary)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omunits_cache::MemoryCache;
    use omunits_graph::MemoryGraph;

    const DOC: &str = r#"{
        "si_base_units": ["metre"],
        "units": [{ "uri": "metre", "dimension": "length-Dimension" }],
        "prefixes": [{ "uri": "milli", "factor": 0.001 }, { "uri": "odd" }],
        "dimensions": [{ "uri": "length-Dimension", "length": 1 }]
    }"#;

    fn om(name: &str) -> String {
        format!("{}{}", omunits_core::vocab::OM2, name)
    }

    fn engine(cache: Arc<MemoryCache>) -> Engine {
        let graph = MemoryGraph::from_json_str(DOC).unwrap();
        Engine::new(Arc::new(graph), EngineConfig::default()).with_cache(cache)
    }

    #[test]
    fn test_f64_cache_value_is_exact() {
        for value in [0.1589873, 3.1709791983764586e-08, 1e300, -459.67] {
            assert_eq!(f64::decode(&value.encode().unwrap()), Some(value));
        }
        assert_eq!(f64::decode("garbage"), None);
    }

    #[test]
    fn test_prefix_factor_is_cached() {
        let cache = Arc::new(MemoryCache::new());
        let engine = engine(Arc::clone(&cache));
        assert_eq!(engine.prefix_factor(&om("milli")).unwrap(), 0.001);
        assert_eq!(engine.prefix_factor(&om("odd")).unwrap(), 1.0);
        assert_eq!(cache.get(&keys::prefix(&om("milli"))).unwrap().as_deref(), Some("0.001"));
    }

    #[test]
    fn test_undecodable_entry_is_overwritten() {
        let cache = Arc::new(MemoryCache::new());
        let key = keys::dimension(&om("length-Dimension"));
        cache.set(&key, "{broken").unwrap();
        let engine = engine(Arc::clone(&cache));
        assert_eq!(
            engine.dimension_vector(&om("length-Dimension")).unwrap(),
            DimensionVector::LENGTH
        );
        assert!(DimensionVector::decode(&cache.get(&key).unwrap().unwrap()).is_some());
    }

    #[test]
    fn test_later_dictionary_wins() {
        let engine = engine(Arc::new(MemoryCache::new()))
            .with_dictionary(["metre"])
            .with_dictionary(["litre", "gram"]);
        let speller = engine.speller().unwrap();
        assert_eq!(speller.len(), 2);
        assert_eq!(speller.correction("metr"), None);
        assert_eq!(speller.correction("litr").as_deref(), Some("litre"));
    }

    #[test]
    fn test_si_base_lookup() {
        let engine = engine(Arc::new(MemoryCache::new()));
        assert!(engine.is_si_base(&om("metre")).unwrap());
        assert!(!engine.is_si_base(&om("foot")).unwrap());
    }
}
