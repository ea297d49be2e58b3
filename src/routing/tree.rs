//! Route tree construction.
//!
//! # Responsibilities
//! - Fold registration records into a prefix tree keyed by segment kind
//! - Merge method maps of records sharing a pattern
//!
//! # Design Decisions
//! - Owned recursive nodes; children are created through `child_or_insert`
//! - One child per literal text, at most one `*` and one `?` child per node
//! - Placeholder nodes take the name and constraints of the last record that
//!   passes through them (earlier ones are shadowed, with a warning)
//! - For a repeated (pattern, verb) pair the last registration wins but keeps
//!   the verb's original position in the method map

use std::collections::BTreeMap;

use crate::constraints::ConstraintRef;
use crate::observability::metrics;
use crate::routing::method::Method;
use crate::routing::segment::{segment, Segment, SegmentKind};

/// Constraint map of a route: placeholder name → constraint handle.
pub type Constraints = BTreeMap<String, ConstraintRef>;

/// Ordered verb → action map.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodActions<A> {
    entries: Vec<(Method, A)>,
}

impl<A> Default for MethodActions<A> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<A: Clone> MethodActions<A> {
    /// Map every method to the same action.
    pub fn uniform(methods: &[Method], action: &A) -> Self {
        let mut actions = Self::new();
        for method in methods {
            actions.insert(*method, action.clone());
        }
        actions
    }

    /// Merge another map into this one; entries of `other` win.
    pub fn merge(&mut self, other: &MethodActions<A>) {
        for (method, action) in &other.entries {
            self.insert(*method, action.clone());
        }
    }
}

impl<A> MethodActions<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the action for a method.
    pub fn insert(&mut self, method: Method, action: A) {
        match self.entries.iter_mut().find(|(m, _)| *m == method) {
            Some(entry) => entry.1 = action,
            None => self.entries.push((method, action)),
        }
    }

    pub fn get(&self, method: Method) -> Option<&A> {
        self.entries
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, a)| a)
    }

    pub fn contains(&self, method: Method) -> bool {
        self.get(method).is_some()
    }

    /// Registered methods in registration order.
    pub fn methods(&self) -> Vec<Method> {
        self.entries.iter().map(|(m, _)| *m).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Method, &A)> {
        self.entries.iter().map(|(m, a)| (*m, a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A registered route before tree building.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord<A> {
    pub pattern: String,
    pub actions: MethodActions<A>,
    pub constraints: Constraints,
}

/// Terminal payload of a node: the route registered for this exact path.
#[derive(Debug, Clone, PartialEq)]
pub struct Exec<A> {
    pub pattern: String,
    pub actions: MethodActions<A>,
    pub constraints: Constraints,
}

/// A node of the route tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<A> {
    pub(crate) name: Option<String>,
    pub(crate) constraints: Option<Constraints>,
    pub(crate) exec: Option<Exec<A>>,
    pub(crate) literals: BTreeMap<String, Node<A>>,
    pub(crate) required: Option<Box<Node<A>>>,
    pub(crate) optional: Option<Box<Node<A>>>,
}

impl<A> Default for Node<A> {
    fn default() -> Self {
        Self {
            name: None,
            constraints: None,
            exec: None,
            literals: BTreeMap::new(),
            required: None,
            optional: None,
        }
    }
}

impl<A> Node<A> {
    fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn exec(&self) -> Option<&Exec<A>> {
        self.exec.as_ref()
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    pub fn literal(&self, key: &str) -> Option<&Node<A>> {
        self.literals.get(key)
    }

    pub fn required(&self) -> Option<&Node<A>> {
        self.required.as_deref()
    }

    pub fn optional(&self) -> Option<&Node<A>> {
        self.optional.as_deref()
    }

    /// Constraint registered for this placeholder node's name.
    pub fn placeholder_constraint(&self) -> Option<&ConstraintRef> {
        let name = self.name.as_deref()?;
        self.constraints.as_ref()?.get(name)
    }

    /// Number of terminal nodes below and including this one.
    pub fn route_count(&self) -> usize {
        let own = usize::from(self.exec.is_some());
        own + self.literals.values().map(Node::route_count).sum::<usize>()
            + self.required.as_ref().map_or(0, |n| n.route_count())
            + self.optional.as_ref().map_or(0, |n| n.route_count())
    }
}

impl<A: Clone> Node<A> {
    /// Walk to the child for `seg`, creating it when absent.
    fn child_or_insert(&mut self, seg: Segment<'_>, constraints: &Constraints, pattern: &str) -> &mut Node<A> {
        let slot = match seg.kind {
            SegmentKind::Literal => {
                return self
                    .literals
                    .entry(seg.raw.to_string())
                    .or_insert_with(|| Node::named(seg.raw));
            }
            SegmentKind::Required => &mut self.required,
            SegmentKind::Optional => &mut self.optional,
        };

        let child = slot.get_or_insert_with(|| Box::new(Node::default()));
        if let (Some(prev_name), Some(prev_constraints)) = (&child.name, &child.constraints) {
            let prev = prev_constraints.get(prev_name);
            let next = constraints.get(seg.name);
            if prev_name != seg.name || prev != next {
                tracing::warn!(
                    pattern = %pattern,
                    previous = %prev_name,
                    placeholder = %seg.name,
                    "Placeholder position shared with different name or constraint; earlier route is shadowed"
                );
            }
        }
        child.name = Some(seg.name.to_string());
        child.constraints = Some(constraints.clone());
        &mut **child
    }

    /// Add one record to the tree.
    pub fn insert(&mut self, record: &RouteRecord<A>) {
        let mut node = self;
        for seg in segment(&record.pattern) {
            node = node.child_or_insert(seg, &record.constraints, &record.pattern);
        }

        match node.exec.as_mut() {
            Some(exec) => exec.actions.merge(&record.actions),
            None => {
                node.exec = Some(Exec {
                    pattern: record.pattern.clone(),
                    actions: record.actions.clone(),
                    constraints: record.constraints.clone(),
                });
            }
        }
    }
}

/// Build a tree from registration records, in registration order.
pub fn build<'r, A, I>(records: I) -> Node<A>
where
    A: Clone + 'r,
    I: IntoIterator<Item = &'r RouteRecord<A>>,
{
    let mut root = Node::default();
    let mut count = 0usize;
    for record in records {
        root.insert(record);
        count += 1;
    }
    metrics::record_tree_build();
    tracing::debug!(records = count, routes = root.route_count(), "Route tree built");
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintRef, Int, Slug};

    fn record(methods: &[Method], pattern: &str, action: &str, constraints: &[(&str, ConstraintRef)]) -> RouteRecord<String> {
        RouteRecord {
            pattern: pattern.to_string(),
            actions: MethodActions::uniform(methods, &action.to_string()),
            constraints: constraints
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_literal_chain() {
        let records = vec![record(&[Method::Get], "/users/new", "new", &[])];
        let tree = build(&records);

        let root = tree.literal("/").unwrap();
        assert_eq!(root.name(), Some("/"));
        let users = root.literal("users").unwrap();
        let new = users.literal("new").unwrap();
        let exec = new.exec().unwrap();
        assert_eq!(exec.pattern, "/users/new");
        assert_eq!(exec.actions.get(Method::Get).map(String::as_str), Some("new"));
        assert!(users.exec().is_none());
    }

    #[test]
    fn test_placeholders_use_star_and_question_children() {
        let records = vec![record(
            &[Method::Get],
            "/post/{id}/{page?}",
            "show",
            &[("id", Int.into()), ("page", Int.into())],
        )];
        let tree = build(&records);

        let post = tree.literal("/").unwrap().literal("post").unwrap();
        let id = post.required().unwrap();
        assert_eq!(id.name(), Some("id"));
        assert_eq!(id.placeholder_constraint().map(|c| c.name()), Some("int"));
        let page = id.optional().unwrap();
        assert_eq!(page.name(), Some("page"));
        assert!(page.exec().is_some());
        assert!(post.optional().is_none());
    }

    #[test]
    fn test_same_pattern_merges_methods() {
        let records = vec![
            record(&[Method::Get], "/x", "a", &[]),
            record(&[Method::Post], "/x", "b", &[]),
            record(&[Method::Get], "/x", "c", &[]),
        ];
        let tree = build(&records);
        let exec = tree.literal("/").unwrap().literal("x").unwrap().exec().unwrap();

        assert_eq!(exec.actions.methods(), vec![Method::Get, Method::Post]);
        assert_eq!(exec.actions.get(Method::Get).map(String::as_str), Some("c"));
        assert_eq!(tree.route_count(), 1);
    }

    #[test]
    fn test_last_placeholder_constraint_wins() {
        let records = vec![
            record(&[Method::Get], "/items/{id}", "by_id", &[("id", Int.into())]),
            record(&[Method::Get], "/items/{id}/edit", "edit", &[("id", Slug.into())]),
        ];
        let tree = build(&records);
        let node = tree.literal("/").unwrap().literal("items").unwrap().required().unwrap();
        assert_eq!(node.placeholder_constraint().map(|c| c.name()), Some("slug"));
        // The terminal keeps the constraints of the record that created it.
        assert_eq!(node.exec().unwrap().constraints["id"].name(), "int");
    }

    #[test]
    fn test_empty_record_set_builds_empty_tree() {
        let tree: Node<String> = build(std::iter::empty());
        assert_eq!(tree, Node::default());
        assert_eq!(tree.route_count(), 0);
    }
}
