//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum app with the resolving fallback handler
//! - Wire up middleware (tracing)
//! - Swap in rebuilt routers without dropping requests
//! - Bind server to listener with graceful shutdown

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use crate::http::response::MatchResponse;
use crate::routing::Router as RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<ArcSwap<RouteTable<String>>>,
}

/// HTTP front end answering every request with its resolution.
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a server serving `routes`.
    pub fn new(routes: RouteTable<String>) -> Self {
        Self {
            state: AppState {
                routes: Arc::new(ArcSwap::from_pointee(routes)),
            },
        }
    }

    /// Replace the served route table. In-flight requests finish on the old one.
    pub fn replace(&self, routes: RouteTable<String>) {
        self.state.routes.store(Arc::new(routes));
    }

    /// Shared handle to the served route table.
    pub fn routes(&self) -> Arc<ArcSwap<RouteTable<String>>> {
        self.state.routes.clone()
    }

    /// Build the Axum app.
    pub fn app(&self) -> Router {
        Router::new()
            .fallback(resolve_handler)
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves.
    ///
    /// Routers received on `updates` replace the served table as they arrive.
    pub async fn run<F>(
        self,
        listener: TcpListener,
        updates: Option<mpsc::UnboundedReceiver<RouteTable<String>>>,
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let routes = self.state.routes.load_full().route_count();
        tracing::info!(address = %addr, routes, "HTTP server starting");

        if let Some(mut updates) = updates {
            let routes = self.routes();
            tokio::spawn(async move {
                while let Some(next) = updates.recv().await {
                    routes.store(Arc::new(next));
                    tracing::info!("Route table swapped");
                }
            });
        }

        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request against the current route table.
async fn resolve_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let routes = state.routes.load_full();
    match routes.match_route(method.as_str(), uri.path()) {
        Ok(found) => MatchResponse::from(&found).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
