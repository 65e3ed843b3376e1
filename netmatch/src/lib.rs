//! Netmatch - template and net pattern matching over a loaded netlist
//!
//! Given a template -> nets index built by a netlist loader, this library
//! resolves a query (literal name, regular expression, or bus notation such as
//! `data[0:7]`) into the concrete `template:net` names it matches.
//!
//! # Quick Start
//!
//! ```
//! use netmatch::prelude::*;
//!
//! let index = NetlistIndex::builder("top")
//!     .template("top", ["a", "b", "c[1]", "c[2]"])
//!     .template("sub", ["a", "d"])
//!     .build()
//!     .unwrap();
//! let engine = MatchingEngine::from_index(index);
//!
//! let (nets, templates) = engine.find_matches(None, "c[1:2]", false, false);
//! assert_eq!(nets, vec!["top:c[1]", "top:c[2]"]);
//! assert_eq!(templates, vec!["top"]);
//! ```
//!
//! # Features
//!
//! - **Template side**: exact name, or regex search across all templates
//! - **Net side**: regex search, bus-notation expansion, or exact name
//! - **Caching**: bounded LRU memo keyed on the normalized query
//! - **Soft failure**: bad patterns yield empty results instead of errors

pub mod cache;
pub mod core;
pub mod netlist;
pub mod pattern;
pub mod query;

// Re-export main types
pub use crate::core::{EngineOptions, MatchingEngine, NetmatchError};
pub use cache::{CacheStats, MatchCache};
pub use netlist::{NetlistIndex, NetlistIndexBuilder, NetlistSource};
pub use pattern::{expand_bus_notation, BusNotationExpander};
pub use query::{MatchResult, Query};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        expand_bus_notation, EngineOptions, MatchResult, MatchingEngine, NetlistIndex,
        NetlistSource, NetmatchError, Query,
    };
}
