//! Route table file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_router;
use crate::constraints::ConstraintSet;
use crate::routing::Router;

/// A watcher that rebuilds the router whenever the route table changes.
pub struct RouteTableWatcher {
    path: PathBuf,
    constraints: ConstraintSet,
    update_tx: mpsc::UnboundedSender<Router<String>>,
}

impl RouteTableWatcher {
    /// Create a new RouteTableWatcher.
    ///
    /// Returns the watcher and a receiver for rebuilt routers.
    pub fn new(path: &Path, constraints: ConstraintSet) -> (Self, mpsc::UnboundedReceiver<Router<String>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                constraints,
                update_tx,
            },
            update_rx,
        )
    }

    /// Load the table and push a freshly built router.
    ///
    /// Invalid tables are logged and skipped; the previous router stays in use.
    pub fn reload(&self) -> bool {
        match load_router(&self.path, &self.constraints) {
            Ok(router) => {
                // route_count forces the tree build.
                let routes = router.route_count();
                tracing::info!(path = ?self.path, routes, "Route table reloaded");
                self.update_tx.send(router).is_ok()
            }
            Err(e) => {
                tracing::error!("Failed to reload route table: {}. Keeping current routes.", e);
                false
            }
        }
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route table change detected, reloading...");
                        self.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Route table watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("route_resolver_{}_{}.toml", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_reload_pushes_router() {
        let path = temp_path("watch_ok");
        std::fs::write(&path, "[[routes]]\nmethods = \"GET\"\npattern = \"/ping\"\naction = \"ping\"\n").unwrap();

        let (watcher, mut rx) = RouteTableWatcher::new(&path, ConstraintSet::builtin());
        assert!(watcher.reload());

        let router = rx.recv().await.unwrap();
        assert!(router.is_built());
        assert_eq!(router.match_route("GET", "/ping").unwrap().action, "ping");

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_invalid_table_is_skipped() {
        let path = temp_path("watch_bad");
        std::fs::write(&path, "[[routes]]\nmethods = \"GET\"\npattern = \"/{id}\"\naction = \"show\"\n").unwrap();

        let (watcher, mut rx) = RouteTableWatcher::new(&path, ConstraintSet::builtin());
        assert!(!watcher.reload());
        drop(watcher);
        assert!(rx.recv().await.is_none());

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
