//! Route table loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GroupEntry, RouteEntry, RouteTableConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::constraints::ConstraintSet;
use crate::routing::{Constraints, RouteError, RouteOptions, RouteResult, Router};

/// Error type for route table loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Registration failed: {0}")]
    Registration(#[from] RouteError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate a route table from a TOML file.
pub fn load_config(path: &Path, constraints: &ConstraintSet) -> Result<RouteTableConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, constraints)?;
    tracing::debug!(path = ?path, routes = config.route_entry_count(), "Route table loaded");
    Ok(config)
}

/// Parse and validate a route table from TOML text.
pub fn parse_config(source: &str, constraints: &ConstraintSet) -> Result<RouteTableConfig, ConfigError> {
    let config: RouteTableConfig = toml::from_str(source)?;
    validate_config(&config, constraints).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Register every entry of a validated route table on a new router.
pub fn build_router(config: &RouteTableConfig, constraints: &ConstraintSet) -> Result<Router<String>, ConfigError> {
    let mut router = Router::new();
    for route in &config.routes {
        register(&mut router, route, constraints)?;
    }
    for group in &config.groups {
        register_group(&mut router, group, constraints)?;
    }
    Ok(router)
}

/// Load a route table file and build its router.
pub fn load_router(path: &Path, constraints: &ConstraintSet) -> Result<Router<String>, ConfigError> {
    build_router(&load_config(path, constraints)?, constraints)
}

fn register_group(router: &mut Router<String>, group: &GroupEntry, constraints: &ConstraintSet) -> RouteResult<()> {
    router.group(&group.prefix, |r| {
        for route in &group.routes {
            register(r, route, constraints)?;
        }
        for nested in &group.groups {
            register_group(r, nested, constraints)?;
        }
        Ok(())
    })
}

fn register(router: &mut Router<String>, route: &RouteEntry, constraints: &ConstraintSet) -> RouteResult<()> {
    // Validation has already rejected unknown names.
    let resolved: Constraints = route
        .constraints
        .iter()
        .filter_map(|(param, name)| constraints.get(name).map(|c| (param.clone(), c.clone())))
        .collect();

    let mut options = RouteOptions::new().constraints(resolved);
    if let Some(name) = &route.name {
        options = options.name(name);
    }
    router.add_route(route.methods.clone(), &route.pattern, route.action.clone(), options)
}
