// Class records extracted from source lines
//
// A record is created when a class declaration line is matched and then
// collects the members found on the lines that follow it in the same file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Index of a record inside a `ProjectModel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub usize);

/// One detected class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Class name
    pub name: String,
    /// Parent name as written, with any module qualifier removed
    pub parent_name: String,
    /// Names assigned through `self.<name> = ...`
    pub instance_variables: BTreeSet<String>,
    /// Method tokens (name plus parameter list, as written)
    pub methods: BTreeSet<String>,
    /// Resolved parent, set during project assembly
    pub parent: Option<ClassId>,
    /// True when the parent name does not resolve to a known class
    pub is_root: bool,
}

impl ClassRecord {
    pub fn new(name: &str, parent_name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent_name: parent_name.to_string(),
            instance_variables: BTreeSet::new(),
            methods: BTreeSet::new(),
            parent: None,
            is_root: false,
        }
    }

    /// Record an instance variable; duplicates collapse
    pub fn add_instance_variable(&mut self, name: &str) -> bool {
        self.instance_variables.insert(name.to_string())
    }

    /// Record a method token; duplicates collapse
    pub fn add_method(&mut self, token: &str) -> bool {
        self.methods.insert(token.to_string())
    }
}

impl fmt::Display for ClassRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "\tInherits from {}", self.parent_name)?;
        writeln!(f, "\tInstance variables:")?;
        for var in &self.instance_variables {
            writeln!(f, "\t\t{}", var)?;
        }
        writeln!(f, "\tMethods:")?;
        for method in &self.methods {
            writeln!(f, "\t\t{}", method)?;
        }
        Ok(())
    }
}
