//! Matching engine shared by the editor front end and the CLI.
//! No UI or file-format dependencies beyond the netlist snapshot.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::{CacheStats, MatchCache, DEFAULT_CACHE_CAPACITY};
use crate::netlist::{NetlistIndex, NetlistSource};
use crate::pattern::bus::{BusNotationExpander, DEFAULT_MAX_EXPANSION};
use crate::pattern::strategy::{NetStrategy, TemplateStrategy};
use crate::query::{MatchResult, Query};

#[derive(Debug, thiserror::Error)]
pub enum NetmatchError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Malformed bus range {0}")]
    MalformedBusRange(String),
    #[error("Bus pattern '{pattern}' expands to more than {limit} names")]
    ExpansionLimit { pattern: String, limit: usize },
    #[error("Invalid netlist: {0}")]
    InvalidNetlist(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tuning knobs for a [`MatchingEngine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Number of distinct queries memoized; 0 disables the cache.
    pub cache_capacity: usize,
    /// Largest bus expansion accepted before a pattern is matched literally.
    pub max_bus_expansion: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_bus_expansion: DEFAULT_MAX_EXPANSION,
        }
    }
}

/// Resolves template/net queries against one loaded netlist.
///
/// Construct once per loaded netlist and share it (`Arc<MatchingEngine>`)
/// with every caller. A reloaded netlist gets a fresh engine, which also
/// discards the old cache.
///
/// Pattern problems never surface as errors: an uncompilable regex or an
/// unknown template just yields no matches, so a search box can query on
/// every keystroke.
#[derive(Debug)]
pub struct MatchingEngine<S: NetlistSource = NetlistIndex> {
    source: Arc<S>,
    cache: MatchCache,
    expander: BusNotationExpander,
    options: EngineOptions,
}

impl<S: NetlistSource> MatchingEngine<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_options(source, EngineOptions::default())
    }

    pub fn with_options(source: Arc<S>, options: EngineOptions) -> Self {
        tracing::info!(
            "Matching engine ready: {} templates, top cell '{}', cache capacity {}",
            source.templates().len(),
            source.top_cell(),
            options.cache_capacity
        );
        Self {
            cache: MatchCache::new(options.cache_capacity),
            expander: BusNotationExpander::with_limit(options.max_bus_expansion),
            source,
            options,
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn top_cell(&self) -> &str {
        self.source.top_cell()
    }

    pub fn get_all_templates(&self) -> &[String] {
        self.source.templates()
    }

    /// Nets of `template`; empty for an unknown template.
    pub fn get_all_nets(&self, template: &str) -> &[String] {
        self.source.nets(template)
    }

    /// Expand bus notation with this engine's cap; malformed or oversized
    /// patterns come back unchanged as a single name.
    pub fn expand_bus_notation(&self, pattern: &str) -> Vec<String> {
        self.expander.expand(pattern).unwrap_or_else(|e| {
            tracing::debug!("Treating '{}' as a literal name: {}", pattern, e);
            vec![pattern.to_string()]
        })
    }

    /// Four-argument form of [`MatchingEngine::find`], returning
    /// `(net_matches, template_matches)`.
    pub fn find_matches(
        &self,
        template_pattern: Option<&str>,
        net_pattern: &str,
        template_is_regex: bool,
        net_is_regex: bool,
    ) -> (Vec<String>, Vec<String>) {
        let query = Query::new(
            template_pattern.map(str::to_string),
            net_pattern,
            template_is_regex,
            net_is_regex,
        );
        let result = self.find(&query);
        (result.net_matches.clone(), result.template_matches.clone())
    }

    /// Resolve `query`, answering from the cache when possible.
    pub fn find(&self, query: &Query) -> Arc<MatchResult> {
        if query.is_empty() {
            return Arc::new(MatchResult::empty());
        }

        let key = query.normalized(self.source.top_cell());
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!("Match cache hit for {:?}", key);
            return hit;
        }
        tracing::debug!("Match cache miss for {:?}", key);

        let result = Arc::new(self.compute(&key));
        self.cache.insert(key, Arc::clone(&result));
        result
    }

    fn compute(&self, key: &Query) -> MatchResult {
        let template_strategy = match TemplateStrategy::select(
            key.template(),
            key.template_is_regex,
            self.source.top_cell(),
        ) {
            Ok(strategy) => strategy,
            Err(e) => {
                tracing::debug!("Template side matches nothing: {}", e);
                return MatchResult::empty();
            }
        };

        let net_strategy = if key.net_pattern.is_empty() {
            None
        } else {
            match NetStrategy::select(&key.net_pattern, key.net_is_regex, &self.expander) {
                Ok(strategy) => Some(strategy),
                Err(e) => {
                    tracing::debug!("Net side matches nothing: {}", e);
                    return MatchResult::empty();
                }
            }
        };

        let template_matches = template_strategy.resolve(&*self.source);
        if template_matches.is_empty() {
            return MatchResult::empty();
        }

        let mut net_matches = Vec::new();
        if let Some(strategy) = &net_strategy {
            tracing::debug!(
                "Matching nets ({}) across {} template(s) ({})",
                strategy.kind(),
                template_matches.len(),
                template_strategy.kind()
            );
            for template in &template_matches {
                strategy.collect_into(template, self.source.nets(template), &mut net_matches);
            }
        }

        MatchResult {
            net_matches,
            template_matches,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl MatchingEngine<NetlistIndex> {
    /// Convenience constructor taking the index by value.
    pub fn from_index(index: NetlistIndex) -> Self {
        Self::new(Arc::new(index))
    }
}
