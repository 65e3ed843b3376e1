pub mod bus;
pub mod strategy;

// Re-export for convenience
pub use bus::{expand_bus_notation, has_bus_notation, BusNotationExpander, DEFAULT_MAX_EXPANSION};
pub use strategy::{NetStrategy, SearchScope, TemplateStrategy};
