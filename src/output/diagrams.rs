// Graph descriptions for Heritage
//
// Turns an edge set into Graphviz DOT or Mermaid text. Layout is left to
// whatever program consumes the description.

use crate::analysis::EdgeSet;
use crate::config::GraphDirection;

/// Diagram generator for inheritance graphs
pub struct DiagramGenerator {
    /// Layout direction (TB, LR, BT, RL)
    direction: GraphDirection,
    /// Graph name used in DOT output
    name: String,
}

impl DiagramGenerator {
    /// Create a new diagram generator
    pub fn new() -> Self {
        Self {
            direction: GraphDirection::default(),
            name: "class_hierarchy".to_string(),
        }
    }

    /// Set layout direction
    pub fn with_direction(mut self, direction: GraphDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the DOT graph name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Graphviz DOT description with parent -> child edges
    pub fn to_dot(&self, edges: &EdgeSet) -> String {
        let mut lines = Vec::new();
        lines.push(format!("digraph {} {{", quote(&self.name)));
        lines.push(format!("    rankdir={};", self.direction.as_str()));
        lines.push("    node [shape=box];".to_string());

        for node in edges.nodes() {
            lines.push(format!("    {};", quote(node)));
        }
        for edge in edges {
            lines.push(format!("    {} -> {};", quote(&edge.parent), quote(&edge.child)));
        }

        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }

    /// Mermaid flowchart description with parent --> child edges
    pub fn to_mermaid(&self, edges: &EdgeSet) -> String {
        let mut lines = Vec::new();
        lines.push(format!("graph {}", self.direction.as_str()));

        for node in edges.nodes() {
            lines.push(format!("    {}[\"{}\"]", sanitize_id(node), node.replace('"', "#quot;")));
        }
        for edge in edges {
            lines.push(format!(
                "    {} --> {}",
                sanitize_id(&edge.parent),
                sanitize_id(&edge.child)
            ));
        }

        lines.join("\n") + "\n"
    }
}

impl Default for DiagramGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a string as a DOT identifier
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Sanitize a string for use as a Mermaid node ID
fn sanitize_id(s: &str) -> String {
    let id: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    // Mermaid reserves `end` as a keyword
    format!("n_{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Edge;

    fn edges() -> EdgeSet {
        [Edge::new("B", "A"), Edge::new("B", "C")].into_iter().collect()
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("Foo"), "\"Foo\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("MyClass"), "n_MyClass");
        assert_eq!(sanitize_id("my.module"), "n_my_module");
        assert_eq!(sanitize_id("end"), "n_end");
    }

    #[test]
    fn test_to_dot() {
        let dot = DiagramGenerator::new().to_dot(&edges());
        assert!(dot.starts_with("digraph \"class_hierarchy\" {"));
        assert!(dot.contains("rankdir=TB;"));
        assert!(dot.contains("    \"B\" -> \"A\";"));
        assert!(dot.contains("    \"B\" -> \"C\";"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_to_dot_empty() {
        let dot = DiagramGenerator::new().to_dot(&EdgeSet::new());
        assert!(!dot.contains("->"));
    }

    #[test]
    fn test_to_mermaid() {
        let mermaid = DiagramGenerator::new()
            .with_direction(GraphDirection::LeftToRight)
            .to_mermaid(&edges());
        assert!(mermaid.starts_with("graph LR"));
        assert!(mermaid.contains("    n_B[\"B\"]"));
        assert!(mermaid.contains("    n_B --> n_A"));
        assert!(mermaid.contains("    n_B --> n_C"));
    }

    #[test]
    fn test_with_name() {
        let dot = DiagramGenerator::new().with_name("animals").to_dot(&edges());
        assert!(dot.starts_with("digraph \"animals\" {"));
    }
}
