//! omunits cache warm-up
//!
//! Loads a unit graph, computes the SI factor of every unit into a cache
//! file and stores the spelling dictionary next to them. Prints the
//! warm-up report as JSON on stdout.
//!
//! Environment:
//! - OMUNITS_GRAPH: unit graph JSON (required)
//! - OMUNITS_CACHE: cache file, created if missing (default: omunits-cache.json)
//! - OMUNITS_CONFIG: engine config JSON (optional)
//! - RUST_LOG: log filter (default: info)

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use omunits::{ConfigError, Engine, EngineConfig, GraphError, UnitError};
use omunits_cache::{Cache, FileCache};
use omunits_graph::MemoryGraph;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CACHE_PATH: &str = "omunits-cache.json";

#[derive(Debug, Error)]
enum WarmError {
    #[error("OMUNITS_GRAPH is not set")]
    MissingGraph,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("cannot encode report: {0}")]
    Report(#[from] serde_json::Error),
}

fn cache_path() -> PathBuf {
    env::var("OMUNITS_CACHE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH))
}

fn config() -> Result<EngineConfig, ConfigError> {
    match env::var("OMUNITS_CONFIG") {
        Ok(path) => EngineConfig::from_file(path),
        Err(_) => Ok(EngineConfig::default()),
    }
}

fn run() -> Result<(), WarmError> {
    let graph_path = env::var("OMUNITS_GRAPH").map_err(|_| WarmError::MissingGraph)?;
    let graph = MemoryGraph::from_file(&graph_path)?;
    info!(path = %graph_path, units = graph.len(), "loaded unit graph");

    let cache_path = cache_path();
    let cache = Arc::new(FileCache::open(&cache_path).map_err(UnitError::from)?);
    let engine = Engine::new(Arc::new(graph), config()?).with_cache(Arc::clone(&cache) as Arc<dyn Cache>);

    let report = engine.warm_cache()?;
    cache.flush().map_err(UnitError::from)?;
    info!(path = %cache_path.display(), "wrote cache file");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
