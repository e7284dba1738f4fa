//! Heritage - Map class inheritance hierarchies in Python codebases
//!
//! Scans a directory of source files, extracts class declarations with
//! line-local heuristics, links them into an inheritance forest, and
//! renders the result as a graph.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{AnalysisResult, Analyzer, Edge, EdgeSet, GraphBuilder, ProjectModel, ProjectStats};
pub use config::Config;
pub use error::{Error, Result};
pub use output::{renderer_for, DiagramGenerator, GraphRenderer, GraphvizRenderer, TextRenderer};
pub use parser::{classify, extract_classes, extract_from_source, ClassExtractor, ClassId, ClassRecord, LineKind};
