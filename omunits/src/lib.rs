//! omunits - Dimensional-analysis unit conversion
//!
//! Units are not hardcoded: they are resolved on demand from a unit
//! knowledge graph (see `omunits-graph`) and composed into expression trees
//! of products, quotients, powers and prefixes. Conversions check dimensions
//! first, then either scale through SI factors or, for temperatures, pivot
//! through kelvin.
//!
//! ```ignore
//! let engine = Engine::new(Arc::new(graph), EngineConfig::default());
//! let celsius = engine.unit("degree Celsius")?;
//! let fahrenheit = engine.unit("degree Fahrenheit")?;
//! let value = Values::new(10.0, celsius).to_unit(&engine, &fahrenheit, None)?;
//! ```

mod config;
mod dimension;
mod engine;
mod factor;
mod resolver;
mod speller;
mod temperature;
mod unit;
mod values;
mod warm;

pub use config::{ConfigError, EngineConfig, MAX_EDIT_DISTANCE_CAP};
pub use dimension::dimension_of;
pub use engine::Engine;
pub use resolver::ResolveOptions;
pub use speller::{levenshtein_distance, SpellingCorrector};
pub use unit::{Dimension, Unit, UnitExpression};
pub use values::Values;
pub use warm::WarmReport;

pub use omunits_core::{codes, float_equal, CacheError, DimensionVector, GraphError, UnitError, DEFAULT_REL_TOL};
