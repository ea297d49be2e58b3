//! Route table configuration subsystem.
//!
//! # Data Flow
//! ```text
//! routes.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks against the ConstraintSet)
//!     → loader::build_router (groups, names, constraints)
//!     → Router<String>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and builds a new router
//!     → sent over mpsc to the HTTP server
//!     → atomic swap of the served router
//! ```
//!
//! # Design Decisions
//! - A table is immutable once loaded; changes require full reload
//! - Router settings have defaults to allow minimal tables
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{build_router, load_config, load_router, parse_config, ConfigError};
pub use schema::{GroupEntry, RouteEntry, RouteTableConfig, RouterSettings};
pub use validation::{validate_config, ValidationError};
pub use watcher::RouteTableWatcher;
