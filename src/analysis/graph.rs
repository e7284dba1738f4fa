// Inheritance graph edges
//
// Edges always run from the parent name as written to the child, so a
// parent that is not a known class still shows up as a dangling endpoint.

use crate::analysis::project::ProjectModel;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A parent -> child edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub parent: String,
    pub child: String,
}

impl Edge {
    pub fn new(parent: &str, child: &str) -> Self {
        Self {
            parent: parent.to_string(),
            child: child.to_string(),
        }
    }
}

/// A deduplicated, ordered set of edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, returning false if it was already present
    pub fn insert(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    pub fn contains(&self, parent: &str, child: &str) -> bool {
        self.edges.contains(&Edge::new(parent, child))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Distinct endpoint names, sorted
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flat_map(|e| [e.parent.as_str(), e.child.as_str()])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::collections::btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Builds edge sets from a project model
pub struct GraphBuilder<'a> {
    project: &'a ProjectModel,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(project: &'a ProjectModel) -> Self {
        Self { project }
    }

    /// One edge per known class
    pub fn full_graph(&self) -> EdgeSet {
        self.project
            .classes()
            .map(|class| Edge::new(&class.parent_name, &class.name))
            .collect()
    }

    /// Edges for the requested classes and their direct subclasses
    ///
    /// A class is included when its own name or its parent name is in
    /// `names`. This is one level of neighbors, not a transitive closure.
    pub fn subset_graph<S: AsRef<str>>(&self, names: &[S]) -> EdgeSet {
        let requested: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();

        self.project
            .classes()
            .filter(|class| {
                requested.contains(class.name.as_str())
                    || requested.contains(class.parent_name.as_str())
            })
            .map(|class| Edge::new(&class.parent_name, &class.name))
            .collect()
    }
}
