//! Click-driven relevance ranking for a small set of searchable pages.
//!
//! Every simulated click boosts the clicked page, decays the others and
//! recomputes each page's rank from its engagement metrics. Pages sharing a
//! keyword are linked as related pages.

// Re-export modules
pub mod config;
pub mod errors;
pub mod filter;
pub mod pages;
pub mod parsers;
pub mod ranking;
pub mod relations;
pub mod seed;
pub mod store;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use errors::{EngineError, Result};
pub use filter::search;
pub use pages::{Page, PagePatch, PageSet};
pub use ranking::{RankChange, RankSnapshot, apply_click};
pub use relations::{Edge, related_to};
pub use store::{JsonFileStore, MemoryStore, PageStore};
