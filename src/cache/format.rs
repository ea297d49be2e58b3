//! Conversion between route trees and their JSON layout.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::{CacheError, CacheResult};
use crate::constraints::ConstraintSet;
use crate::routing::method::Method;
use crate::routing::tree::{Constraints, Exec, MethodActions, Node};
use crate::urls::NamedRoutes;

const KEY_NAME: &str = "name";
const KEY_CONSTRAINTS: &str = "constraints";
const KEY_EXEC: &str = "exec";
const KEY_REQUIRED: &str = "*";
const KEY_OPTIONAL: &str = "?";
const KEY_ROUTE: &str = "route";
const KEY_METHOD: &str = "method";

const RESERVED: [&str; 5] = [KEY_NAME, KEY_CONSTRAINTS, KEY_EXEC, KEY_REQUIRED, KEY_OPTIONAL];

/// Serialize a built tree.
pub fn dump_tree<A: Serialize>(node: &Node<A>) -> CacheResult<Value> {
    let mut map = Map::new();
    if let Some(name) = &node.name {
        map.insert(KEY_NAME.into(), Value::String(name.clone()));
    }
    if let Some(constraints) = &node.constraints {
        map.insert(KEY_CONSTRAINTS.into(), dump_constraints(constraints));
    }
    if let Some(exec) = &node.exec {
        map.insert(KEY_EXEC.into(), dump_exec(exec)?);
    }
    for (key, child) in &node.literals {
        if RESERVED.contains(&key.as_str()) {
            return Err(CacheError::ReservedSegment(key.clone()));
        }
        map.insert(key.clone(), dump_tree(child)?);
    }
    if let Some(child) = &node.required {
        map.insert(KEY_REQUIRED.into(), dump_tree(child)?);
    }
    if let Some(child) = &node.optional {
        map.insert(KEY_OPTIONAL.into(), dump_tree(child)?);
    }
    Ok(Value::Object(map))
}

/// Rebuild a tree from its JSON layout.
pub fn load_tree<A: DeserializeOwned>(value: &Value, constraints: &ConstraintSet) -> CacheResult<Node<A>> {
    let map = value
        .as_object()
        .ok_or_else(|| malformed("tree node must be an object"))?;

    let mut node = Node::default();
    for (key, entry) in map {
        match key.as_str() {
            KEY_NAME => {
                let name = entry
                    .as_str()
                    .ok_or_else(|| malformed("node name must be a string"))?;
                node.name = Some(name.to_string());
            }
            KEY_CONSTRAINTS => node.constraints = Some(load_constraints(entry, constraints)?),
            KEY_EXEC => node.exec = Some(load_exec(entry, constraints)?),
            KEY_REQUIRED => node.required = Some(Box::new(load_tree(entry, constraints)?)),
            KEY_OPTIONAL => node.optional = Some(Box::new(load_tree(entry, constraints)?)),
            literal => {
                node.literals
                    .insert(literal.to_string(), load_tree(entry, constraints)?);
            }
        }
    }
    Ok(node)
}

/// Serialize the named route registry.
pub fn dump_names(names: &NamedRoutes) -> Value {
    let map = names
        .all()
        .iter()
        .map(|(name, route)| {
            let mut entry = Map::new();
            entry.insert(KEY_ROUTE.into(), Value::String(route.pattern.clone()));
            entry.insert(KEY_CONSTRAINTS.into(), dump_constraints(&route.constraints));
            (name.clone(), Value::Object(entry))
        })
        .collect();
    Value::Object(map)
}

/// Rebuild the named route registry.
pub fn load_names(value: &Value, constraints: &ConstraintSet) -> CacheResult<NamedRoutes> {
    let mut names = NamedRoutes::new();
    for (name, entry) in as_map(value, "named routes")? {
        let pattern = entry
            .get(KEY_ROUTE)
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("named route needs a route pattern"))?;
        let route_constraints = match entry.get(KEY_CONSTRAINTS) {
            Some(v) => load_constraints(v, constraints)?,
            None => Constraints::new(),
        };
        names.register(&name, pattern, route_constraints);
    }
    Ok(names)
}

fn dump_constraints(constraints: &Constraints) -> Value {
    Value::Object(
        constraints
            .iter()
            .map(|(param, c)| (param.clone(), Value::String(c.name().to_string())))
            .collect(),
    )
}

fn load_constraints(value: &Value, set: &ConstraintSet) -> CacheResult<Constraints> {
    let mut constraints = Constraints::new();
    for (param, entry) in as_map(value, "constraints")? {
        let name = entry
            .as_str()
            .ok_or_else(|| malformed("constraint reference must be a string"))?;
        let constraint = set
            .get(name)
            .ok_or_else(|| CacheError::UnknownConstraint(name.to_string()))?;
        constraints.insert(param, constraint.clone());
    }
    Ok(constraints)
}

fn dump_exec<A: Serialize>(exec: &Exec<A>) -> CacheResult<Value> {
    let mut methods = Map::new();
    for (method, action) in exec.actions.iter() {
        methods.insert(method.as_str().to_string(), serde_json::to_value(action)?);
    }

    let mut map = Map::new();
    map.insert(KEY_ROUTE.into(), Value::String(exec.pattern.clone()));
    map.insert(KEY_METHOD.into(), Value::Object(methods));
    map.insert(KEY_CONSTRAINTS.into(), dump_constraints(&exec.constraints));
    Ok(Value::Object(map))
}

fn load_exec<A: DeserializeOwned>(value: &Value, set: &ConstraintSet) -> CacheResult<Exec<A>> {
    let pattern = value
        .get(KEY_ROUTE)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("exec needs a route pattern"))?;

    let mut actions = MethodActions::new();
    if let Some(methods) = value.get(KEY_METHOD) {
        for (verb, action) in as_map(methods, "method map")? {
            let method: Method = verb
                .parse()
                .map_err(|_| malformed("exec method map holds an unknown verb"))?;
            actions.insert(method, serde_json::from_value(action)?);
        }
    }

    let constraints = match value.get(KEY_CONSTRAINTS) {
        Some(v) => load_constraints(v, set)?,
        None => Constraints::new(),
    };

    Ok(Exec {
        pattern: pattern.to_string(),
        actions,
        constraints,
    })
}

/// Entries of a JSON object; an empty array stands for an empty map.
fn as_map(value: &Value, what: &str) -> CacheResult<Vec<(String, Value)>> {
    match value {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        Value::Array(items) if items.is_empty() => Ok(Vec::new()),
        _ => Err(malformed(&format!("{} must be an object", what))),
    }
}

fn malformed(reason: &str) -> CacheError {
    CacheError::Malformed(reason.to_string())
}
