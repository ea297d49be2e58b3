//! Route tree cache.
//!
//! # Data Flow
//! ```text
//! Build time:
//!     Router (records) → tree built once → format.rs (tree → JSON)
//!     → file.rs writes { version, tree, names } to disk
//!
//! Startup from cache:
//!     file.rs reads JSON → format.rs (JSON → tree, names)
//!     → constraint names resolved through a ConstraintSet
//!     → sealed Router (no further registration)
//! ```
//!
//! # Design Decisions
//! - The tree keeps its nested-object layout: literal keys, `*`, `?`,
//!   `name`, `constraints`, `exec` { `route`, `method`, `constraints` }
//! - Constraints are stored by name and must resolve on load
//! - Empty JSON arrays are accepted wherever an empty map is expected

pub mod file;
pub mod format;

use thiserror::Error;

pub use file::{CacheFile, CACHE_VERSION};
pub use format::{dump_names, dump_tree, load_names, load_tree};

/// Errors that can occur while dumping or loading a cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not have the expected tree layout.
    #[error("malformed cache: {0}")]
    Malformed(String),

    /// A constraint name has no entry in the supplied constraint set.
    #[error("unknown constraint {0} in cache")]
    UnknownConstraint(String),

    #[error("unsupported cache version {0}")]
    UnsupportedVersion(u64),

    /// A literal segment uses one of the keys the layout reserves.
    #[error("literal segment {0} collides with a reserved cache key")]
    ReservedSegment(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
