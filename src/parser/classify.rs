// Line classification
//
// Each line is checked independently against three patterns. The checks run
// in a fixed order and the first one that succeeds decides the line's kind.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CLASS_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*class\s+.*\(.*\):").expect("valid class pattern"));
static INSTANCE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"self\..* = ").expect("valid assignment pattern"));
static METHOD_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*def\s+.*\(.*\):").expect("valid method pattern"));

/// What a single source line looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// `class Name(Parent):`
    ClassDeclaration,
    /// `self.name = value` anywhere in the line
    InstanceVariableAssignment,
    /// `def name(params):`
    MethodDeclaration,
    /// Anything else
    Other,
}

/// A classified line together with the text the winning pattern matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub kind: LineKind,
    /// Matched text; the whole line for declarations, empty for `Other`
    pub fragment: &'a str,
}

/// Classify a line
pub fn classify(line: &str) -> LineKind {
    classify_line(line).kind
}

/// Classify a line and keep the matched fragment for the member parsers
pub fn classify_line(line: &str) -> Classified<'_> {
    if CLASS_DECLARATION.is_match(line) {
        return Classified {
            kind: LineKind::ClassDeclaration,
            fragment: line,
        };
    }

    if let Some(m) = INSTANCE_VARIABLE.find(line) {
        return Classified {
            kind: LineKind::InstanceVariableAssignment,
            fragment: m.as_str(),
        };
    }

    if let Some(m) = METHOD_DECLARATION.find(line) {
        return Classified {
            kind: LineKind::MethodDeclaration,
            fragment: m.as_str(),
        };
    }

    Classified {
        kind: LineKind::Other,
        fragment: "",
    }
}
