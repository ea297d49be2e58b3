//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, TraceLayer)
//!     → resolve_handler (current Router<String> from ArcSwap)
//!     → routing::Router::match_route
//!     → response.rs (MatchResponse JSON, or 404 / 405 + Allow / 500)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::MatchResponse;
pub use server::{shutdown_signal, AppState, HttpServer};
