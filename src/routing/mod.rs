//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (once per route set):
//!     add_route(methods, pattern, action, options)
//!     → router.rs (group prefixes, name registry, records)
//!
//! First match / dump:
//!     records → segment.rs (classify segments)
//!             → tree.rs (fold into prefix tree, merge method maps)
//!             → frozen in OnceLock
//!
//! Incoming request (method, path):
//!     → segment.rs → matcher.rs (literal > `*` > `?`, constraint parsing)
//!     → Return: RouteMatch or NotFound / MethodNotAllowed
//! ```
//!
//! # Design Decisions
//! - Tree built lazily, immutable while in use
//! - Deterministic: same route set and input always give the same match
//! - Literal segments win over placeholders without priority configuration

pub mod error;
pub mod matcher;
pub mod method;
pub mod router;
pub mod segment;
pub mod tree;

pub use error::{RouteError, RouteResult, RoutingError};
pub use matcher::{Params, RouteMatch};
pub use method::{AllowedMethods, Method, MethodList};
pub use router::{RouteOptions, Router};
pub use segment::{segment, Segment, SegmentKind};
pub use tree::{Constraints, Exec, MethodActions, Node, RouteRecord};
