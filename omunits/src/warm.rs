//! Batch cache warm-up and the spelling dictionary

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use omunits_cache::keys;
use omunits_core::{CacheError, UnitError};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::{CacheValue, Engine};
use crate::speller::SpellingCorrector;

/// Outcome of [`Engine::warm_cache`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarmReport {
    /// Units whose SI factor is now cached
    pub cached_count: usize,
    /// Labels of units that have no SI factor
    pub skipped_with_warning: Vec<String>,
    pub dictionary_size: usize,
}

#[derive(Debug, Default)]
struct Survey {
    cached: usize,
    skipped: Vec<String>,
    words: BTreeSet<String>,
}

impl Survey {
    fn merge(&mut self, other: Survey) {
        self.cached += other.cached;
        self.skipped.extend(other.skipped);
        self.words.extend(other.words);
    }
}

fn speller_poisoned() -> UnitError {
    UnitError::generic("spelling dictionary lock poisoned")
}

impl Engine {
    /// Compute and cache the SI factor of every unit in the graph, then
    /// store the spelling dictionary and switch the engine over to it.
    ///
    /// Units without an SI factor are skipped with a warning instead of
    /// failing the batch.
    pub fn warm_cache(&self) -> Result<WarmReport, UnitError> {
        let cache = self.cache.as_deref().ok_or(CacheError::Unavailable)?;

        let survey = self.survey(true)?;
        let words: Vec<String> = survey.words.into_iter().collect();
        cache.set(keys::DICTIONARY, &words.encode()?)?;

        let report = WarmReport {
            cached_count: survey.cached,
            skipped_with_warning: survey.skipped,
            dictionary_size: words.len(),
        };
        self.install_speller(words)?;

        info!(
            cached = report.cached_count,
            skipped = report.skipped_with_warning.len(),
            dictionary = report.dictionary_size,
            "cache warmed"
        );
        Ok(report)
    }

    /// The spelling corrector, built on first use from the cached
    /// dictionary or, failing that, from the graph.
    ///
    /// A dictionary built from the graph is written back to the cache.
    pub(crate) fn speller(&self) -> Result<Arc<SpellingCorrector>, UnitError> {
        if let Some(speller) = self.speller.read().map_err(|_| speller_poisoned())?.as_ref() {
            return Ok(Arc::clone(speller));
        }

        let cache = self.cache.as_deref();
        let cached = match cache {
            Some(cache) => cache.get(keys::DICTIONARY)?.and_then(|raw| Vec::<String>::decode(&raw)),
            None => None,
        };
        let words = match cached {
            Some(words) => words,
            None => {
                let words: Vec<String> = self.survey(false)?.words.into_iter().collect();
                if let Some(cache) = cache {
                    cache.set(keys::DICTIONARY, &words.encode()?)?;
                }
                words
            }
        };
        debug!(words = words.len(), "built spelling dictionary");

        self.install_speller(words)
    }

    fn install_speller(&self, words: Vec<String>) -> Result<Arc<SpellingCorrector>, UnitError> {
        let speller = Arc::new(SpellingCorrector::new(words, self.config.edit_distance()));
        let mut slot = self.speller.write().map_err(|_| speller_poisoned())?;
        *slot = Some(Arc::clone(&speller));
        Ok(speller)
    }

    /// Factor every unit in the graph, splitting the list across
    /// `warm_workers` threads. Skipped units are logged at `warn` level
    /// when `warn_skips` is set and at `debug` level otherwise.
    fn survey(&self, warn_skips: bool) -> Result<Survey, UnitError> {
        let units = self.graph.list_all_units()?;
        let workers = self.config.warm_workers.max(1);
        if workers == 1 || units.len() < 2 {
            return self.survey_chunk(&units, warn_skips);
        }

        let chunk_size = units.len().div_ceil(workers);
        let results: Vec<Result<Survey, UnitError>> = thread::scope(|scope| {
            let handles: Vec<_> = units
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.survey_chunk(chunk, warn_skips)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(UnitError::generic("warm-up worker panicked")))
                })
                .collect()
        });

        let mut survey = Survey::default();
        for result in results {
            survey.merge(result?);
        }
        Ok(survey)
    }

    fn survey_chunk(&self, units: &[String], warn_skips: bool) -> Result<Survey, UnitError> {
        let mut survey = Survey::default();
        for uri in units {
            let unit = match self.build_unit(uri, 0) {
                Ok(unit) => unit,
                Err(err @ (UnitError::Graph(_) | UnitError::Cache(_))) => return Err(err),
                Err(err) => {
                    if warn_skips {
                        warn!(unit = uri.as_str(), error = %err, "skipping malformed unit");
                    } else {
                        debug!(unit = uri.as_str(), error = %err, "skipping malformed unit");
                    }
                    survey.skipped.push(omunits_core::vocab::local_name(uri).to_string());
                    continue;
                }
            };
            match self.si_factor_of(&unit)? {
                Some(_) => {
                    survey.cached += 1;
                    survey.words.extend(unit.labels);
                }
                None => {
                    if warn_skips {
                        warn!(unit = %unit.label, "unit cannot be expressed in SI units");
                    } else {
                        debug!(unit = %unit.label, "unit cannot be expressed in SI units");
                    }
                    survey.skipped.push(unit.label);
                }
            }
        }
        Ok(survey)
    }
}
