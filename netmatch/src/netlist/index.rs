//! Read-only Template/Net Index
//!
//! Holds the view of a loaded netlist the matcher works against: the top
//! cell, the ordered template list, and the ordered nets of every template.
//! The index is built once by whoever loads the circuit and never changes
//! afterwards; a reload produces a fresh index.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::core::NetmatchError;

/// Read access to a netlist, as seen by the matching engine.
///
/// `NetlistIndex` is the production implementation. The trait exists so that
/// callers can hand the engine their own storage (or an instrumented wrapper)
/// without copying it into an index first.
pub trait NetlistSource: Send + Sync {
    /// Name of the root template, used when a query names no template.
    fn top_cell(&self) -> &str;

    /// All template names in load order.
    fn templates(&self) -> &[String];

    /// Nets of `template` in load order; empty when the template is unknown.
    fn nets(&self, template: &str) -> &[String];

    /// Whether `template` is one of [`NetlistSource::templates`].
    fn contains_template(&self, template: &str) -> bool {
        self.templates().iter().any(|t| t == template)
    }
}

/// Immutable template -> nets index of a loaded netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetlistIndex {
    top_cell: String,
    templates: Vec<String>,
    #[serde(rename = "nets")]
    nets_by_template: HashMap<String, Vec<String>>,
}

/// On-disk shape of an index, validated before it becomes a `NetlistIndex`.
#[derive(Debug, Deserialize)]
struct NetlistSnapshot {
    top_cell: String,
    templates: Vec<String>,
    #[serde(default)]
    nets: HashMap<String, Vec<String>>,
}

impl NetlistIndex {
    /// Build an index from loader output.
    ///
    /// Templates listed without a net entry get an empty net list. Fails when
    /// the top cell is empty or not among `templates`, or when a template is
    /// listed twice.
    pub fn new(
        top_cell: impl Into<String>,
        templates: Vec<String>,
        mut nets_by_template: HashMap<String, Vec<String>>,
    ) -> Result<Self, NetmatchError> {
        let top_cell = top_cell.into();
        if top_cell.is_empty() {
            return Err(NetmatchError::InvalidNetlist(
                "top cell name is empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(templates.len());
        for template in &templates {
            if !seen.insert(template.as_str()) {
                return Err(NetmatchError::InvalidNetlist(format!(
                    "template '{}' is listed more than once",
                    template
                )));
            }
        }
        if !seen.contains(top_cell.as_str()) {
            return Err(NetmatchError::InvalidNetlist(format!(
                "top cell '{}' is not among the templates",
                top_cell
            )));
        }

        let orphaned = nets_by_template
            .keys()
            .filter(|name| !seen.contains(name.as_str()))
            .count();
        if orphaned > 0 {
            tracing::debug!("Dropping nets of {} unlisted template(s)", orphaned);
            nets_by_template.retain(|name, _| seen.contains(name.as_str()));
        }
        for template in &templates {
            nets_by_template.entry(template.clone()).or_default();
        }

        Ok(Self {
            top_cell,
            templates,
            nets_by_template,
        })
    }

    /// Start an ordered builder rooted at `top_cell`.
    pub fn builder(top_cell: impl Into<String>) -> NetlistIndexBuilder {
        NetlistIndexBuilder::new(top_cell)
    }

    /// Decode and validate a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, NetmatchError> {
        let snapshot: NetlistSnapshot = serde_json::from_str(json)?;
        Self::new(snapshot.top_cell, snapshot.templates, snapshot.nets)
    }

    /// Read, decode, and validate a JSON snapshot file.
    pub fn from_json_file(path: &Path) -> Result<Self, NetmatchError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, NetmatchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn top_cell(&self) -> &str {
        &self.top_cell
    }

    /// All templates in load order.
    pub fn get_all_templates(&self) -> &[String] {
        &self.templates
    }

    /// Nets of `template`, or an empty slice for an unknown template.
    pub fn get_all_nets(&self, template: &str) -> &[String] {
        self.nets_by_template
            .get(template)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of nets across all templates.
    pub fn net_count(&self) -> usize {
        self.nets_by_template.values().map(Vec::len).sum()
    }
}

impl NetlistSource for NetlistIndex {
    fn top_cell(&self) -> &str {
        &self.top_cell
    }

    fn templates(&self) -> &[String] {
        &self.templates
    }

    fn nets(&self, template: &str) -> &[String] {
        self.get_all_nets(template)
    }

    fn contains_template(&self, template: &str) -> bool {
        self.nets_by_template.contains_key(template)
    }
}

/// Collects templates in insertion order, then validates once in `build`.
#[derive(Debug, Clone)]
pub struct NetlistIndexBuilder {
    top_cell: String,
    templates: Vec<String>,
    nets_by_template: HashMap<String, Vec<String>>,
}

impl NetlistIndexBuilder {
    pub fn new(top_cell: impl Into<String>) -> Self {
        Self {
            top_cell: top_cell.into(),
            templates: Vec::new(),
            nets_by_template: HashMap::new(),
        }
    }

    /// Append a template and its nets.
    pub fn template<I, S>(mut self, name: impl Into<String>, nets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        self.nets_by_template
            .insert(name.clone(), nets.into_iter().map(Into::into).collect());
        self.templates.push(name);
        self
    }

    pub fn build(self) -> Result<NetlistIndex, NetmatchError> {
        NetlistIndex::new(self.top_cell, self.templates, self.nets_by_template)
    }
}
