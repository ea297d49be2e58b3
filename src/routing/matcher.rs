//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the route tree against a segmented request path
//! - Validate placeholder values through their constraints
//! - Resolve the action for the requested method
//!
//! # Design Decisions
//! - Literal children beat `*` children, which beat `?` children
//! - No backtracking: the first branch that accepts a segment is final
//! - Trailing optional placeholders may be omitted from the request path
//! - Parameters are named after the matched pattern's placeholders
//! - `ANY` serves every method; `HEAD` falls back to `GET`
//! - A placeholder without a constraint is a definition bug, never a 404

use std::any::Any;
use std::collections::BTreeMap;

use crate::constraints::{Native, TypedValue};
use crate::routing::error::RoutingError;
use crate::routing::method::{AllowedMethods, Method};
use crate::routing::segment::segment;
use crate::routing::tree::{Exec, Node};

/// Typed parameters extracted from a matched path.
#[derive(Debug, Default)]
pub struct Params {
    values: BTreeMap<String, Box<dyn TypedValue>>,
}

impl Params {
    pub(crate) fn insert(&mut self, name: &str, value: Box<dyn TypedValue>) {
        self.values.insert(name.to_string(), value);
    }

    /// Get a parameter as its concrete type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Get a parameter as a type-erased value.
    pub fn value(&self, name: &str) -> Option<&dyn TypedValue> {
        self.values.get(name).map(|v| v.as_ref())
    }

    /// Get the primitive rendering of a parameter.
    pub fn native(&self, name: &str) -> Option<Native> {
        self.values.get(name).map(|v| v.to_native())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Primitive renderings of every parameter.
    pub fn to_native_map(&self) -> BTreeMap<String, Native> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_native()))
            .collect()
    }
}

/// A resolved request.
#[derive(Debug)]
pub struct RouteMatch<'a, A> {
    /// Pattern of the matched route.
    pub pattern: &'a str,
    /// Requested method, uppercased.
    pub method: String,
    /// Action registered for the method (or its fallback).
    pub action: &'a A,
    /// Extracted path parameters.
    pub params: Params,
}

/// Resolve `method` and `path` against a built tree.
pub fn match_route<'a, A>(root: &'a Node<A>, method: &str, path: &str) -> Result<RouteMatch<'a, A>, RoutingError> {
    let mut values = Vec::new();
    let mut node = root;

    for seg in segment(path) {
        if let Some(child) = node.literal(seg.raw) {
            node = child;
            continue;
        }

        if let Some(child) = node.required() {
            if let Some(value) = parse_placeholder(child, seg.raw)? {
                values.push(value);
                node = child;
                continue;
            }
        }

        if let Some(child) = node.optional() {
            if let Some(value) = parse_placeholder(child, seg.raw)? {
                values.push(value);
                node = child;
                continue;
            }
        }

        tracing::debug!(path = %path, segment = %seg.raw, "No branch accepts segment");
        return Err(not_found(path));
    }

    // Trailing optional placeholders left out of the request.
    while node.exec().is_none() {
        match node.optional() {
            Some(child) => node = child,
            None => break,
        }
    }

    let exec = node.exec().ok_or_else(|| not_found(path))?;
    let requested = method.to_ascii_uppercase();
    let action = resolve_action(exec, &requested)?;

    // Shared placeholder nodes keep the last registration's name.
    let mut params = Params::default();
    let names = segment(&exec.pattern).filter(|s| s.is_placeholder()).map(|s| s.name);
    for (name, value) in names.zip(values) {
        params.insert(name, value);
    }

    Ok(RouteMatch {
        pattern: &exec.pattern,
        method: requested,
        action,
        params,
    })
}

fn parse_placeholder<A>(node: &Node<A>, raw: &str) -> Result<Option<Box<dyn TypedValue>>, RoutingError> {
    let param = node.name().unwrap_or_default();
    match node.placeholder_constraint() {
        Some(constraint) => Ok(constraint.try_parse(raw)),
        None => {
            tracing::error!(param = %param, "Placeholder has no registered constraint");
            Err(RoutingError::MisconfiguredConstraint {
                param: param.to_string(),
            })
        }
    }
}

fn resolve_action<'a, A>(exec: &'a Exec<A>, requested: &str) -> Result<&'a A, RoutingError> {
    let method = requested.parse::<Method>().ok();

    if let Some(action) = method.and_then(|m| exec.actions.get(m)) {
        return Ok(action);
    }
    if let Some(action) = exec.actions.get(Method::Any) {
        return Ok(action);
    }
    if method == Some(Method::Head) {
        if let Some(action) = exec.actions.get(Method::Get) {
            return Ok(action);
        }
    }

    Err(RoutingError::MethodNotAllowed {
        allowed: AllowedMethods::new(exec.actions.methods()),
    })
}

fn not_found(path: &str) -> RoutingError {
    RoutingError::NotFound {
        path: path.to_string(),
    }
}
