//! Configuration schema definitions.
//!
//! This module defines the route table file structure. All types derive
//! Serde traits for deserialization from TOML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::MethodList;

/// Root of a route table file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Router-wide settings.
    pub router: RouterSettings,

    /// Top-level routes.
    pub routes: Vec<RouteEntry>,

    /// Prefixed route groups.
    pub groups: Vec<GroupEntry>,
}

impl RouteTableConfig {
    /// Number of route entries, groups included.
    pub fn route_entry_count(&self) -> usize {
        self.routes.len() + self.groups.iter().map(GroupEntry::route_entry_count).sum::<usize>()
    }
}

/// Router-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Where `dump` writes and `serve` reads the tree cache.
    pub cache_path: Option<PathBuf>,

    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            cache_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// One route registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    /// A verb, a list of verbs, or "ANY".
    pub methods: MethodList,

    /// Path pattern, relative to enclosing groups.
    pub pattern: String,

    /// Handler identifier returned on match.
    pub action: String,

    /// Optional name for URL generation.
    #[serde(default)]
    pub name: Option<String>,

    /// Placeholder name → constraint name.
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,
}

/// Routes sharing a path prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupEntry {
    pub prefix: String,

    #[serde(default)]
    pub routes: Vec<RouteEntry>,

    /// Nested groups.
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

impl GroupEntry {
    fn route_entry_count(&self) -> usize {
        self.routes.len() + self.groups.iter().map(GroupEntry::route_entry_count).sum::<usize>()
    }
}
