//! Route registration and lookup.
//!
//! # Responsibilities
//! - Collect route registrations (with groups and names)
//! - Build the route tree lazily on first use
//! - Dispatch match, URL generation and cache dump/load
//!
//! # Design Decisions
//! - The tree lives in a `OnceLock`: built once, read concurrently
//! - Registering after a build discards the tree; the next read rebuilds it
//! - A router loaded from a cache is sealed against registration
//! - Explicit per-verb shorthands forward to `add_route`

use std::path::Path;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{self, CacheFile, CacheResult};
use crate::constraints::{ConstraintRef, ConstraintSet};
use crate::observability::metrics;
use crate::routing::error::{RouteError, RouteResult, RoutingError};
use crate::routing::matcher::{self, RouteMatch};
use crate::routing::method::{Method, MethodList};
use crate::routing::tree::{self, Constraints, MethodActions, Node, RouteRecord};
use crate::urls::{self, NamedRoutes, UrlResult};

/// Optional parts of a registration: constraints and a route name.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    constraints: Constraints,
    name: Option<String>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain a placeholder.
    pub fn constraint(mut self, param: &str, constraint: impl Into<ConstraintRef>) -> Self {
        self.constraints.insert(param.to_string(), constraint.into());
        self
    }

    /// Replace the whole constraint map.
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Name the route for URL generation.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// Route table with lazy tree building.
#[derive(Debug)]
pub struct Router<A> {
    records: Vec<RouteRecord<A>>,
    names: NamedRoutes,
    prefixes: Vec<String>,
    tree: OnceLock<Node<A>>,
    sealed: bool,
}

impl<A> Default for Router<A> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            names: NamedRoutes::new(),
            prefixes: Vec::new(),
            tree: OnceLock::new(),
            sealed: false,
        }
    }
}

impl<A: Clone> Router<A> {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sealed router around an already-built tree.
    pub fn from_parts(tree: Node<A>, names: NamedRoutes) -> Self {
        Self {
            records: Vec::new(),
            names,
            prefixes: Vec::new(),
            tree: OnceLock::from(tree),
            sealed: true,
        }
    }

    /// Register `action` for `methods` on `pattern`.
    ///
    /// `methods` may be a single verb, a list of verbs, or `"ANY"`. The
    /// pattern is prefixed by every enclosing [`group`](Self::group).
    pub fn add_route(
        &mut self,
        methods: impl Into<MethodList>,
        pattern: &str,
        action: A,
        options: RouteOptions,
    ) -> RouteResult<()> {
        if self.sealed {
            return Err(RouteError::RegistrationClosed);
        }

        let methods = methods.into().resolve()?;
        let pattern = join_pattern(&self.prefixes, pattern);

        if let Some(name) = &options.name {
            self.names.register(name, &pattern, options.constraints.clone());
        }

        tracing::debug!(
            pattern = %pattern,
            methods = ?methods,
            name = ?options.name,
            "Route registered"
        );

        self.records.push(RouteRecord {
            pattern,
            actions: MethodActions::uniform(&methods, &action),
            constraints: options.constraints,
        });
        // A tree built before this registration no longer reflects the table.
        self.tree.take();
        Ok(())
    }

    pub fn get(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Get, pattern, action, options)
    }

    pub fn head(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Head, pattern, action, options)
    }

    pub fn post(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Post, pattern, action, options)
    }

    pub fn put(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Put, pattern, action, options)
    }

    pub fn patch(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Patch, pattern, action, options)
    }

    pub fn delete(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Delete, pattern, action, options)
    }

    pub fn options(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Options, pattern, action, options)
    }

    /// Register for every canonical verb.
    pub fn any(&mut self, pattern: &str, action: A, options: RouteOptions) -> RouteResult<()> {
        self.add_route(Method::Any, pattern, action, options)
    }

    /// Run `routes` with `prefix` applied to every registration it makes.
    ///
    /// Groups nest; the prefix is removed again when `routes` returns, even
    /// when it returns an error.
    pub fn group<F>(&mut self, prefix: &str, routes: F) -> RouteResult<()>
    where
        F: FnOnce(&mut Self) -> RouteResult<()>,
    {
        self.prefixes.push(prefix.to_string());
        let result = routes(self);
        self.prefixes.pop();
        result
    }

    /// The route tree, built on first access.
    pub fn tree(&self) -> &Node<A> {
        self.tree.get_or_init(|| tree::build(&self.records))
    }

    pub fn is_built(&self) -> bool {
        self.tree.get().is_some()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Discard the built tree so the next read rebuilds it from the records.
    pub fn reload(&mut self) {
        if self.sealed {
            tracing::warn!("Reload ignored: router was loaded from a cache");
            return;
        }
        self.tree.take();
    }

    /// Resolve a request.
    pub fn match_route(&self, method: &str, path: &str) -> Result<RouteMatch<'_, A>, RoutingError> {
        let result = matcher::match_route(self.tree(), method, path);
        metrics::record_match(&result);
        match &result {
            Ok(m) => tracing::debug!(method = %method, path = %path, pattern = %m.pattern, "Route matched"),
            Err(e) => tracing::debug!(method = %method, path = %path, error = %e, "Route not resolved"),
        }
        result
    }

    /// Generate the URL of a named route.
    pub fn generate_url<I, K, V>(&self, name: &str, params: I) -> UrlResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let result = urls::generate(&self.names, name, params);
        metrics::record_generation(&result);
        result
    }

    pub fn names(&self) -> &NamedRoutes {
        &self.names
    }

    /// Registration records in registration order.
    pub fn records(&self) -> &[RouteRecord<A>] {
        &self.records
    }

    /// Number of distinct patterns in the tree.
    pub fn route_count(&self) -> usize {
        self.tree().route_count()
    }
}

impl<A: Clone + Serialize> Router<A> {
    /// Serialize the route tree, building it if needed.
    pub fn dump(&self) -> CacheResult<serde_json::Value> {
        cache::dump_tree(self.tree())
    }

    /// Write tree and named routes to a cache file.
    pub fn save_cache(&self, path: &Path) -> CacheResult<()> {
        CacheFile::new(self.dump()?, cache::dump_names(&self.names)).save(path)
    }
}

impl<A: Clone + DeserializeOwned> Router<A> {
    /// Create a sealed router from a serialized tree.
    pub fn load(tree: &serde_json::Value, constraints: &ConstraintSet) -> CacheResult<Self> {
        Ok(Self::from_parts(cache::load_tree(tree, constraints)?, NamedRoutes::new()))
    }

    /// Create a sealed router from a cache file.
    pub fn load_cache(path: &Path, constraints: &ConstraintSet) -> CacheResult<Self> {
        let file = CacheFile::load(path)?;
        let tree = cache::load_tree(&file.tree, constraints)?;
        let names = cache::load_names(&file.names, constraints)?;
        Ok(Self::from_parts(tree, names))
    }
}

/// Join group prefixes and a pattern into one rooted pattern.
fn join_pattern(prefixes: &[String], pattern: &str) -> String {
    let mut joined = String::new();
    for part in prefixes.iter().map(String::as_str).chain(std::iter::once(pattern)) {
        let part = part.trim_matches('/');
        if !part.is_empty() {
            joined.push('/');
            joined.push_str(part);
        }
    }
    if joined.is_empty() {
        joined.push('/');
    }
    joined
}
