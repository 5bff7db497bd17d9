//! omunits Graph - Unit knowledge base
//!
//! Unit definitions are never hardcoded: the engine reads them on demand
//! through the `KnowledgeBase` trait. `MemoryGraph` is the bundled
//! implementation, loaded from a JSON document.

mod traits;
mod memory;

pub use traits::{KnowledgeBase, UnitAttributes, Label, TemperatureScale};
pub use memory::MemoryGraph;
