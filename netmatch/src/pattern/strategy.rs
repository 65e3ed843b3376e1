//! Per-side matcher selection.
//!
//! Each side of a query picks exactly one strategy up front. Net precedence
//! is regex, then bus notation, then exact equality.

use regex::Regex;
use std::collections::HashSet;

use super::bus::{has_bus_notation, BusNotationExpander};
use crate::core::NetmatchError;
use crate::netlist::NetlistSource;

fn compile(pattern: &str) -> Result<Regex, NetmatchError> {
    Regex::new(pattern).map_err(|source| NetmatchError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Which templates a template regex is tried against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// No explicit template was given; only the top cell is searched.
    TopCellOnly,
    AllTemplates,
}

#[derive(Debug, Clone)]
pub enum TemplateStrategy {
    /// Literal template name; must be present in the index.
    Exact(String),
    /// Unanchored regex search over the templates in `scope`.
    Regex { regex: Regex, scope: SearchScope },
}

impl TemplateStrategy {
    /// Pick the template matcher. `pattern` is already defaulted to the top
    /// cell when the caller gave none.
    pub fn select(pattern: &str, is_regex: bool, top_cell: &str) -> Result<Self, NetmatchError> {
        if !is_regex {
            return Ok(Self::Exact(pattern.to_string()));
        }
        let scope = if pattern == top_cell {
            SearchScope::TopCellOnly
        } else {
            SearchScope::AllTemplates
        };
        Ok(Self::Regex {
            regex: compile(pattern)?,
            scope,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::Regex { .. } => "regex",
        }
    }

    /// Matching templates in index order.
    pub fn resolve<S: NetlistSource + ?Sized>(&self, source: &S) -> Vec<String> {
        match self {
            Self::Exact(name) => {
                if source.contains_template(name) {
                    vec![name.clone()]
                } else {
                    Vec::new()
                }
            }
            Self::Regex { regex, scope } => match scope {
                SearchScope::TopCellOnly => {
                    let top = source.top_cell();
                    if regex.is_match(top) {
                        vec![top.to_string()]
                    } else {
                        Vec::new()
                    }
                }
                SearchScope::AllTemplates => source
                    .templates()
                    .iter()
                    .filter(|t| regex.is_match(t))
                    .cloned()
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum NetStrategy {
    Regex(Regex),
    /// Concrete names produced by expanding bus notation once.
    Bus(HashSet<String>),
    Exact(String),
}

impl NetStrategy {
    /// Pick the net matcher.
    ///
    /// Only an uncompilable regex is an error. Bus patterns that are
    /// malformed or too large fall back to exact matching on the raw text.
    pub fn select(
        pattern: &str,
        is_regex: bool,
        expander: &BusNotationExpander,
    ) -> Result<Self, NetmatchError> {
        if is_regex {
            return Ok(Self::Regex(compile(pattern)?));
        }
        if has_bus_notation(pattern) {
            return match expander.expand(pattern) {
                Ok(names) => Ok(Self::Bus(names.into_iter().collect())),
                Err(e @ NetmatchError::ExpansionLimit { .. }) => {
                    tracing::warn!("{}; matching '{}' literally", e, pattern);
                    Ok(Self::Exact(pattern.to_string()))
                }
                Err(e) => {
                    tracing::debug!("{}; matching '{}' literally", e, pattern);
                    Ok(Self::Exact(pattern.to_string()))
                }
            };
        }
        Ok(Self::Exact(pattern.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Regex(_) => "regex",
            Self::Bus(_) => "bus",
            Self::Exact(_) => "exact",
        }
    }

    pub fn matches(&self, net: &str) -> bool {
        match self {
            Self::Regex(regex) => regex.is_match(net),
            Self::Bus(names) => names.contains(net),
            Self::Exact(name) => name == net,
        }
    }

    /// Append `template:net` for every matching net, keeping net order.
    pub fn collect_into(&self, template: &str, nets: &[String], out: &mut Vec<String>) {
        out.extend(
            nets.iter()
                .filter(|net| self.matches(net))
                .map(|net| format!("{}:{}", template, net)),
        );
    }
}
