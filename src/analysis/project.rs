// Project model
//
// Merges the class records from every scanned file into one name-keyed
// collection, then links each record to its parent in a second pass. Records
// live in an arena and refer to each other by `ClassId`, so a parent may be
// declared after its children or in another file.

use crate::parser::{ClassId, ClassRecord};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// All classes found in a project, linked into an inheritance forest
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProjectModel {
    /// Records in first-seen order of each name
    classes: Vec<ClassRecord>,
    /// Records whose parent did not resolve, in scan order
    root_classes: Vec<ClassId>,
    /// Groups of classes that name each other as parents
    cycles: Vec<Vec<String>>,
    #[serde(skip)]
    by_name: HashMap<String, ClassId>,
}

impl ProjectModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a model from records in scan order
    ///
    /// A later record with an already-seen name replaces the earlier one
    /// entirely; member sets are not merged.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ClassRecord>,
    {
        let mut model = Self::new();
        for record in records {
            model.insert(record);
        }
        model.link();

        info!(
            classes = model.classes.len(),
            roots = model.root_classes.len(),
            cycles = model.cycles.len(),
            "assembled project model"
        );
        model
    }

    fn insert(&mut self, mut record: ClassRecord) {
        record.parent = None;
        record.is_root = false;

        match self.by_name.get(&record.name) {
            Some(&id) => {
                debug!(class = %record.name, "later declaration replaces earlier one");
                self.classes[id.0] = record;
            }
            None => {
                let id = ClassId(self.classes.len());
                self.by_name.insert(record.name.clone(), id);
                self.classes.push(record);
            }
        }
    }

    fn link(&mut self) {
        self.root_classes.clear();

        for index in 0..self.classes.len() {
            let parent = self.by_name.get(&self.classes[index].parent_name).copied();
            let record = &mut self.classes[index];
            record.parent = parent;
            record.is_root = parent.is_none();
            if record.is_root {
                self.root_classes.push(ClassId(index));
            }
        }

        self.cycles = self.find_cycles();
        for cycle in &self.cycles {
            warn!(classes = %cycle.join(", "), "inheritance cycle detected");
        }
    }

    /// Strongly connected groups of the child -> parent link graph
    fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(self.classes.len(), self.classes.len());
        for _ in &self.classes {
            graph.add_node(());
        }
        for (index, record) in self.classes.iter().enumerate() {
            if let Some(parent) = record.parent {
                graph.add_edge(NodeIndex::new(index), NodeIndex::new(parent.0), ());
            }
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut names: Vec<String> =
                    scc.into_iter().map(|n| self.classes[n.index()].name.clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Look up a class by name
    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.by_name.get(name).map(|&id| &self.classes[id.0])
    }

    /// Look up a class by ID
    pub fn get_by_id(&self, id: ClassId) -> Option<&ClassRecord> {
        self.classes.get(id.0)
    }

    /// Check whether a class is known
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The resolved parent record of a class
    pub fn parent_of(&self, name: &str) -> Option<&ClassRecord> {
        self.get(name)
            .and_then(|record| record.parent)
            .and_then(|id| self.get_by_id(id))
    }

    /// Iterate over all classes in first-seen order
    pub fn classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.classes.iter()
    }

    /// Classes whose parent is not a known class, in scan order
    pub fn root_classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.root_classes.iter().map(|id| &self.classes[id.0])
    }

    /// Direct subclasses of `name`, matched on the parent name as written
    pub fn children_of(&self, name: &str) -> Vec<&ClassRecord> {
        self.classes
            .iter()
            .filter(|record| record.parent_name == name)
            .collect()
    }

    /// Parent chain of a class, nearest first
    ///
    /// Stops at a root, or before revisiting a class when the chain loops.
    pub fn ancestors(&self, name: &str) -> Vec<&ClassRecord> {
        let mut chain = Vec::new();
        let Some(&start) = self.by_name.get(name) else {
            return chain;
        };

        let mut seen = HashSet::from([start]);
        let mut next = self.classes[start.0].parent;
        while let Some(id) = next {
            if !seen.insert(id) {
                break;
            }
            let record = &self.classes[id.0];
            chain.push(record);
            next = record.parent;
        }
        chain
    }

    /// Inheritance cycles, each as a sorted list of class names
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Summary counts
    pub fn stats(&self) -> ProjectStats {
        ProjectStats {
            classes: self.classes.len(),
            roots: self.root_classes.len(),
            instance_variables: self.classes.iter().map(|c| c.instance_variables.len()).sum(),
            methods: self.classes.iter().map(|c| c.methods.len()).sum(),
            cycles: self.cycles.len(),
        }
    }
}

/// Summary counts for a project model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub classes: usize,
    pub roots: usize,
    pub instance_variables: usize,
    pub methods: usize,
    pub cycles: usize,
}
