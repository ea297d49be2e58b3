//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that methods and constraint names resolve
//! - Check that every placeholder carries a constraint
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: (RouteTableConfig, ConstraintSet) → Result<(), Vec<ValidationError>>
//! - Runs before a route table is turned into a router

use thiserror::Error;

use crate::config::schema::{GroupEntry, RouteEntry, RouteTableConfig};
use crate::constraints::ConstraintSet;
use crate::routing::segment;

/// A semantic problem in a route table. `location` names the entry, e.g.
/// `groups[0].routes[2]`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{location}: {reason}")]
    InvalidMethods { location: String, reason: String },

    #[error("{location}: pattern must not be empty")]
    EmptyPattern { location: String },

    #[error("{location}: action must not be empty")]
    EmptyAction { location: String },

    #[error("{location}: group prefix must not be empty")]
    EmptyGroupPrefix { location: String },

    #[error("{location}: unknown constraint {constraint} for placeholder {param}")]
    UnknownConstraint {
        location: String,
        param: String,
        constraint: String,
    },

    #[error("{location}: placeholder {param} has no constraint")]
    UnconstrainedPlaceholder { location: String, param: String },
}

/// Validate a route table against the constraints available to it.
pub fn validate_config(
    config: &RouteTableConfig,
    constraints: &ConstraintSet,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, route) in config.routes.iter().enumerate() {
        validate_route(route, "", &format!("routes[{}]", i), constraints, &mut errors);
    }
    for (i, group) in config.groups.iter().enumerate() {
        validate_group(group, "", &format!("groups[{}]", i), constraints, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_group(
    group: &GroupEntry,
    prefix: &str,
    location: &str,
    constraints: &ConstraintSet,
    errors: &mut Vec<ValidationError>,
) {
    if group.prefix.trim_matches('/').is_empty() {
        errors.push(ValidationError::EmptyGroupPrefix {
            location: location.to_string(),
        });
    }

    let prefix = format!("{}/{}", prefix, group.prefix);
    for (i, route) in group.routes.iter().enumerate() {
        let location = format!("{}.routes[{}]", location, i);
        validate_route(route, &prefix, &location, constraints, errors);
    }
    for (i, nested) in group.groups.iter().enumerate() {
        let location = format!("{}.groups[{}]", location, i);
        validate_group(nested, &prefix, &location, constraints, errors);
    }
}

fn validate_route(
    route: &RouteEntry,
    prefix: &str,
    location: &str,
    constraints: &ConstraintSet,
    errors: &mut Vec<ValidationError>,
) {
    match route.methods.resolve() {
        Ok(methods) if methods.is_empty() => errors.push(ValidationError::InvalidMethods {
            location: location.to_string(),
            reason: "at least one method is required".to_string(),
        }),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidMethods {
            location: location.to_string(),
            reason: e.to_string(),
        }),
    }

    if route.pattern.trim().is_empty() {
        errors.push(ValidationError::EmptyPattern {
            location: location.to_string(),
        });
    }
    if route.action.trim().is_empty() {
        errors.push(ValidationError::EmptyAction {
            location: location.to_string(),
        });
    }

    for (param, name) in &route.constraints {
        if !constraints.contains(name) {
            errors.push(ValidationError::UnknownConstraint {
                location: location.to_string(),
                param: param.clone(),
                constraint: name.clone(),
            });
        }
    }

    let full = format!("{}/{}", prefix, route.pattern);
    for seg in segment(&full).filter(|s| s.is_placeholder()) {
        if !route.constraints.contains_key(seg.name) {
            errors.push(ValidationError::UnconstrainedPlaceholder {
                location: location.to_string(),
                param: seg.name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> RouteTableConfig {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_valid_table() {
        let config = parse(
            r#"
            [[routes]]
            methods = "GET"
            pattern = "/users/{id}"
            action = "users.show"
            constraints = { id = "positive_int" }
            "#,
        );
        assert!(validate_config(&config, &ConstraintSet::builtin()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let config = parse(
            r#"
            [[routes]]
            methods = "FETCH"
            pattern = ""
            action = ""

            [[routes]]
            methods = ["GET"]
            pattern = "/items/{id}/{slug?}"
            action = "items.show"
            constraints = { id = "number" }

            [[groups]]
            prefix = "/"
            "#,
        );

        let errors = validate_config(&config, &ConstraintSet::builtin()).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::InvalidMethods {
            location: "routes[0]".into(),
            reason: "unknown HTTP method: FETCH".into(),
        }));
        assert!(errors.contains(&ValidationError::EmptyPattern { location: "routes[0]".into() }));
        assert!(errors.contains(&ValidationError::EmptyAction { location: "routes[0]".into() }));
        assert!(errors.contains(&ValidationError::UnknownConstraint {
            location: "routes[1]".into(),
            param: "id".into(),
            constraint: "number".into(),
        }));
        assert!(errors.contains(&ValidationError::UnconstrainedPlaceholder {
            location: "routes[1]".into(),
            param: "slug".into(),
        }));
        assert!(errors.contains(&ValidationError::EmptyGroupPrefix { location: "groups[0]".into() }));
    }

    #[test]
    fn test_group_prefix_placeholders_need_constraints() {
        let config = parse(
            r#"
            [[groups]]
            prefix = "/{lang}"

            [[groups.groups]]
            prefix = "/docs"

            [[groups.groups.routes]]
            methods = "GET"
            pattern = "/{page}"
            action = "docs.page"
            constraints = { page = "slug" }
            "#,
        );

        let errors = validate_config(&config, &ConstraintSet::builtin()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnconstrainedPlaceholder {
                location: "groups[0].groups[0].routes[0]".into(),
                param: "lang".into(),
            }]
        );
    }

    #[test]
    fn test_empty_method_list() {
        let config = parse(
            r#"
            [[routes]]
            methods = []
            pattern = "/"
            action = "home"
            "#,
        );
        let errors = validate_config(&config, &ConstraintSet::builtin()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidMethods {
                location: "routes[0]".into(),
                reason: "at least one method is required".into(),
            }]
        );
    }
}
