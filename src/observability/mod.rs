//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router operations produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → Log output (stdout, filtered by RUST_LOG or configured level)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing subscribers/recorders is
//!   left to the binary or host application
//! - Metric updates are cheap no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
