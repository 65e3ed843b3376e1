//! Query and result value types.

use serde::{Deserialize, Serialize};

/// One template/net lookup. Used as the cache key once normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub template_pattern: Option<String>,
    pub net_pattern: String,
    pub template_is_regex: bool,
    pub net_is_regex: bool,
}

impl Query {
    pub fn new(
        template_pattern: Option<String>,
        net_pattern: impl Into<String>,
        template_is_regex: bool,
        net_is_regex: bool,
    ) -> Self {
        Self {
            template_pattern,
            net_pattern: net_pattern.into(),
            template_is_regex,
            net_is_regex,
        }
    }

    /// Literal net lookup in the top cell.
    pub fn net(net_pattern: impl Into<String>) -> Self {
        Self::new(None, net_pattern, false, false)
    }

    pub fn in_template(mut self, template_pattern: impl Into<String>) -> Self {
        self.template_pattern = Some(template_pattern.into());
        self
    }

    pub fn template_regex(mut self, enabled: bool) -> Self {
        self.template_is_regex = enabled;
        self
    }

    pub fn net_regex(mut self, enabled: bool) -> Self {
        self.net_is_regex = enabled;
        self
    }

    /// Neither a template nor a net was given.
    pub fn is_empty(&self) -> bool {
        self.template_pattern.as_deref().map_or(true, str::is_empty) && self.net_pattern.is_empty()
    }

    /// Fill in the top cell for a missing or empty template.
    pub fn normalized(&self, top_cell: &str) -> Self {
        let template = match self.template_pattern.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => top_cell,
        };
        Self {
            template_pattern: Some(template.to_string()),
            ..self.clone()
        }
    }

    /// The template pattern after normalization; empty if never normalized.
    pub fn template(&self) -> &str {
        self.template_pattern.as_deref().unwrap_or("")
    }
}

/// Matched nets as `template:net`, plus the templates that were searched.
///
/// Both lists follow index order and are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub net_matches: Vec<String>,
    pub template_matches: Vec<String>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn net_matches(&self) -> &[String] {
        &self.net_matches
    }

    pub fn template_matches(&self) -> &[String] {
        &self.template_matches
    }

    pub fn is_empty(&self) -> bool {
        self.net_matches.is_empty() && self.template_matches.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.net_matches, self.template_matches)
    }
}
