pub mod index;

// Re-export for convenience
pub use index::{NetlistIndex, NetlistIndexBuilder, NetlistSource};
