#![allow(dead_code)]

use std::sync::Arc;

use omunits::{float_equal, Engine, EngineConfig, Values, DEFAULT_REL_TOL};
use omunits_cache::MemoryCache;
use omunits_graph::MemoryGraph;

pub const OM2_SUBSET: &str = include_str!("../fixtures/om2_subset.json");

pub fn graph() -> Arc<MemoryGraph> {
    Arc::new(MemoryGraph::from_json_str(OM2_SUBSET).unwrap())
}

pub fn engine() -> Engine {
    Engine::new(graph(), EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> Engine {
    Engine::new(graph(), config)
}

pub fn cached_engine(cache: Arc<MemoryCache>) -> Engine {
    Engine::new(graph(), EngineConfig::default()).with_cache(cache)
}

/// Convert `quantity` in `from` to `to`, both given as labels
pub fn convert(engine: &Engine, quantity: f64, from: &str, to: &str) -> f64 {
    let from = engine.unit(from).unwrap();
    let to = engine.unit(to).unwrap();
    Values::new(quantity, from).to_unit(engine, &to, None).unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        float_equal(actual, expected, DEFAULT_REL_TOL, 0.0),
        "expected {}, got {}",
        expected,
        actual
    );
}
