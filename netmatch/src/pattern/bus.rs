//! Bus Notation Expansion
//!
//! Expands `name[lo:hi]` shorthand into the concrete indexed names it stands
//! for. Several ranges in one pattern expand to their cross product, with the
//! leftmost range varying slowest:
//!
//! - `net[1:3]` -> `net[1]`, `net[2]`, `net[3]`
//! - `complex[1:2]net[3:4]` -> `complex[1]net[3]`, `complex[1]net[4]`,
//!   `complex[2]net[3]`, `complex[2]net[4]`

use regex::Regex;
use std::sync::LazyLock;

use crate::core::NetmatchError;

/// Default cap on the number of names one pattern may expand to.
pub const DEFAULT_MAX_EXPANSION: usize = 4096;

static BUS_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+):(\d+)\]").expect("bus range regex is valid"));

/// Whether `pattern` looks like it might carry bus notation.
///
/// This is the cheap `[` and `]` test used to pick the bus strategy; the
/// pattern may still contain no valid `[lo:hi]` range.
pub fn has_bus_notation(pattern: &str) -> bool {
    pattern.contains('[') && pattern.contains(']')
}

/// Expand with the default cap, degrading to `[pattern]` on any error.
pub fn expand_bus_notation(pattern: &str) -> Vec<String> {
    BusNotationExpander::default()
        .expand(pattern)
        .unwrap_or_else(|e| {
            tracing::debug!("Treating '{}' as a literal name: {}", pattern, e);
            vec![pattern.to_string()]
        })
}

#[derive(Debug, Clone, Copy)]
struct BusRange {
    lo: u64,
    hi: u64,
}

impl BusRange {
    fn len(&self) -> Option<u64> {
        (self.hi - self.lo).checked_add(1)
    }
}

/// Expands bus ranges, refusing patterns whose expansion exceeds `limit`.
#[derive(Debug, Clone, Copy)]
pub struct BusNotationExpander {
    limit: usize,
}

impl Default for BusNotationExpander {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_EXPANSION)
    }
}

impl BusNotationExpander {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Expand every `[lo:hi]` range in `pattern`.
    ///
    /// A pattern without ranges comes back as the single-element `[pattern]`.
    /// Inverted ranges are swapped. Fails with `MalformedBusRange` when a
    /// bound does not fit in a `u64`, and with `ExpansionLimit` when the
    /// cross product would exceed the cap.
    pub fn expand(&self, pattern: &str) -> Result<Vec<String>, NetmatchError> {
        let total = self.expansion_size(pattern)?;
        let mut out = Vec::with_capacity(total);
        Self::expand_into(pattern, &mut out)?;
        Ok(out)
    }

    /// Number of names `pattern` expands to, checked against the cap before
    /// any string is built.
    pub fn expansion_size(&self, pattern: &str) -> Result<usize, NetmatchError> {
        let mut total: u64 = 1;
        for caps in BUS_RANGE.captures_iter(pattern) {
            let range = parse_range(&caps[1], &caps[2])?;
            total = range
                .len()
                .and_then(|len| total.checked_mul(len))
                .filter(|&n| n <= self.limit as u64)
                .ok_or_else(|| NetmatchError::ExpansionLimit {
                    pattern: pattern.to_string(),
                    limit: self.limit,
                })?;
        }
        Ok(total as usize)
    }

    fn expand_into(pattern: &str, out: &mut Vec<String>) -> Result<(), NetmatchError> {
        let found = BUS_RANGE
            .captures(pattern)
            .and_then(|caps| Some((caps.get(0)?, caps.get(1)?, caps.get(2)?)));
        let Some((whole, lo, hi)) = found else {
            out.push(pattern.to_string());
            return Ok(());
        };
        let range = parse_range(lo.as_str(), hi.as_str())?;
        let prefix = &pattern[..whole.start()];
        let suffix = &pattern[whole.end()..];

        for i in range.lo..=range.hi {
            Self::expand_into(&format!("{}[{}]{}", prefix, i, suffix), out)?;
        }
        Ok(())
    }
}

fn parse_range(lo: &str, hi: &str) -> Result<BusRange, NetmatchError> {
    let parse = |s: &str| {
        s.parse::<u64>()
            .map_err(|e| NetmatchError::MalformedBusRange(format!("[{}:{}]: {}", lo, hi, e)))
    };
    let (mut lo, mut hi) = (parse(lo)?, parse(hi)?);
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    Ok(BusRange { lo, hi })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_simple_range() {
        assert_eq!(
            expand_bus_notation("net[1:3]"),
            vec!["net[1]", "net[2]", "net[3]"]
        );
    }

    #[test]
    fn test_inverted_range_is_ascending() {
        assert_eq!(expand_bus_notation("net[3:1]"), expand_bus_notation("net[1:3]"));
    }

    #[test]
    fn test_cross_product() {
        let expanded = expand_bus_notation("complex[1:2]net[3:4]");
        assert_eq!(
            expanded,
            vec![
                "complex[1]net[3]",
                "complex[1]net[4]",
                "complex[2]net[3]",
                "complex[2]net[4]",
            ]
        );
        let unique: HashSet<_> = expanded.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_identity_for_plain_names() {
        assert_eq!(expand_bus_notation("plain_name"), vec!["plain_name"]);
        assert_eq!(expand_bus_notation("net[3]"), vec!["net[3]"]);
        assert_eq!(expand_bus_notation("net[a:b]"), vec!["net[a:b]"]);
        assert_eq!(expand_bus_notation(""), vec![""]);
    }

    #[test]
    fn test_single_element_range() {
        assert_eq!(expand_bus_notation("bit[7:7]"), vec!["bit[7]"]);
    }

    #[test]
    fn test_limit_is_enforced() {
        let expander = BusNotationExpander::with_limit(10);
        assert_eq!(expander.expansion_size("a[0:4]b[0:1]").unwrap(), 10);
        assert!(matches!(
            expander.expand("a[0:4]b[0:2]"),
            Err(NetmatchError::ExpansionLimit { limit: 10, .. })
        ));
        assert_eq!(expand_bus_notation("n[0:999999]"), vec!["n[0:999999]"]);
    }

    #[test]
    fn test_overflowing_bound_is_malformed() {
        let result = BusNotationExpander::default().expand("n[0:99999999999999999999]");
        assert!(matches!(result, Err(NetmatchError::MalformedBusRange(_))));
    }

    #[test]
    fn test_full_u64_range_hits_limit() {
        let pattern = format!("n[0:{}]", u64::MAX);
        let result = BusNotationExpander::default().expand(&pattern);
        assert!(matches!(result, Err(NetmatchError::ExpansionLimit { .. })));
    }

    #[test]
    fn test_has_bus_notation() {
        assert!(has_bus_notation("c[1:2]"));
        assert!(has_bus_notation("c[1]"));
        assert!(!has_bus_notation("c[1"));
        assert!(!has_bus_notation("plain"));
    }
}
