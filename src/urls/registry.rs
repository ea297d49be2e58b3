//! Named route registry.

use std::collections::BTreeMap;

use crate::routing::tree::Constraints;

/// Pattern and constraints stored under a route name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRoute {
    pub pattern: String,
    pub constraints: Constraints,
}

/// Route name → pattern table, populated during registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedRoutes {
    entries: BTreeMap<String, NamedRoute>,
}

impl NamedRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name. A repeated name replaces the previous entry.
    pub fn register(&mut self, name: &str, pattern: &str, constraints: Constraints) {
        let entry = NamedRoute {
            pattern: pattern.to_string(),
            constraints,
        };
        if let Some(previous) = self.entries.insert(name.to_string(), entry) {
            tracing::warn!(
                route = %name,
                previous = %previous.pattern,
                pattern = %pattern,
                "Route name registered twice; keeping the latest pattern"
            );
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&NamedRoute> {
        self.entries.get(name)
    }

    pub fn all(&self) -> &BTreeMap<String, NamedRoute> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintRef, Int};

    #[test]
    fn test_register_and_lookup() {
        let mut names = NamedRoutes::new();
        assert!(!names.has("users.show"));

        let constraints: Constraints = [("id".to_string(), ConstraintRef::new(Int))].into();
        names.register("users.show", "/users/{id}", constraints);

        assert!(names.has("users.show"));
        let entry = names.get("users.show").unwrap();
        assert_eq!(entry.pattern, "/users/{id}");
        assert_eq!(entry.constraints["id"].name(), "int");
        assert_eq!(names.all().len(), 1);
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut names = NamedRoutes::new();
        names.register("home", "/", Constraints::new());
        names.register("home", "/index", Constraints::new());

        assert_eq!(names.len(), 1);
        assert_eq!(names.get("home").unwrap().pattern, "/index");
    }
}
