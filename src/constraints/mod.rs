//! Typed parameter constraints.
//!
//! # Data Flow
//! ```text
//! raw path segment ("42")
//!     → Constraint::try_parse
//!     → Box<dyn TypedValue> (validated domain value)
//!     → TypedValue::to_native (canonical primitive, used for URL generation)
//! ```
//!
//! # Design Decisions
//! - The router never inspects a typed value; it only stores it or renders it
//! - Constraints are shared trait objects (`ConstraintRef`), referenced by name
//!   in config files and serialized caches
//! - `ConstraintSet` resolves those names back to handles

pub mod builtin;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use builtin::{Alnum, Alpha, Bool, Float, Int, PositiveInt, Slug, Text, Uint, UuidValue};

/// Primitive rendering of a typed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Native {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::Int(v) => write!(f, "{}", v),
            Native::UInt(v) => write!(f, "{}", v),
            Native::Float(v) => write!(f, "{}", v),
            Native::Bool(v) => write!(f, "{}", v),
            Native::Str(v) => f.write_str(v),
        }
    }
}

/// A validated domain value produced by a [`Constraint`].
pub trait TypedValue: fmt::Debug + Send + Sync + 'static {
    /// Canonical primitive form of the value.
    fn to_native(&self) -> Native;

    /// Access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Parses raw path segments into typed values.
pub trait Constraint: Send + Sync {
    /// Stable identifier used in config files and caches.
    fn name(&self) -> &str;

    /// Parse a raw segment, returning `None` when the value is rejected.
    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>>;
}

/// Shared handle to a constraint implementation.
#[derive(Clone)]
pub struct ConstraintRef(Arc<dyn Constraint>);

impl ConstraintRef {
    pub fn new<C: Constraint + 'static>(constraint: C) -> Self {
        Self(Arc::new(constraint))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        self.0.try_parse(raw)
    }
}

impl<C: Constraint + 'static> From<C> for ConstraintRef {
    fn from(constraint: C) -> Self {
        Self::new(constraint)
    }
}

impl fmt::Debug for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstraintRef").field(&self.name()).finish()
    }
}

// Two handles are interchangeable when they carry the same constraint name.
impl PartialEq for ConstraintRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for ConstraintRef {}

/// Registry resolving constraint names to handles.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    by_name: HashMap<String, ConstraintRef>,
}

impl ConstraintSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding every built-in constraint.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.register(Int);
        set.register(Uint);
        set.register(PositiveInt);
        set.register(Float);
        set.register(Bool);
        set.register(Alpha);
        set.register(Alnum);
        set.register(Slug);
        set.register(Text);
        set.register(UuidValue);
        set
    }

    /// Add a constraint, replacing any previous one with the same name.
    pub fn register<C: Into<ConstraintRef>>(&mut self, constraint: C) -> &mut Self {
        let constraint = constraint.into();
        self.by_name.insert(constraint.name().to_string(), constraint);
        self
    }

    /// Look up a constraint by name.
    pub fn get(&self, name: &str) -> Option<&ConstraintRef> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_set_resolves_names() {
        let set = ConstraintSet::builtin();
        assert_eq!(set.len(), 10);
        for name in ["int", "uint", "positive_int", "float", "bool", "alpha", "alnum", "slug", "string", "uuid"] {
            assert!(set.contains(name), "missing builtin {}", name);
        }
        assert!(set.get("regex").is_none());
    }

    #[test]
    fn test_native_display_is_canonical() {
        assert_eq!(Native::Int(-3).to_string(), "-3");
        assert_eq!(Native::UInt(42).to_string(), "42");
        assert_eq!(Native::Bool(true).to_string(), "true");
        assert_eq!(Native::Str("abc".into()).to_string(), "abc");
    }

    #[test]
    fn test_constraint_refs_compare_by_name() {
        assert_eq!(ConstraintRef::new(Int), ConstraintRef::new(Int));
        assert_ne!(ConstraintRef::new(Int), ConstraintRef::new(Slug));
    }
}
