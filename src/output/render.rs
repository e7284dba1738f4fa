// Graph rendering
//
// Image formats are produced by piping a DOT description into a Graphviz
// program. Text formats are written directly.

use crate::analysis::EdgeSet;
use crate::config::{GraphDirection, OutputConfig, OutputFormat};
use crate::error::{Error, Result};
use crate::output::diagrams::DiagramGenerator;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Writes an edge set to disk
pub trait GraphRenderer {
    /// Render `edges` next to `output_base`, returning the written file
    ///
    /// The format's extension is appended to `output_base`.
    fn render(&self, edges: &EdgeSet, output_base: &Path) -> Result<PathBuf>;
}

/// Renders images through an external Graphviz program
pub struct GraphvizRenderer {
    program: String,
    format: OutputFormat,
    direction: GraphDirection,
}

impl GraphvizRenderer {
    pub fn new(program: &str, format: OutputFormat, direction: GraphDirection) -> Self {
        Self {
            program: program.to_string(),
            format,
            direction,
        }
    }

    /// Resolve the renderer program on PATH
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| Error::RendererNotFound {
            program: self.program.clone(),
        })
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, edges: &EdgeSet, output_base: &Path) -> Result<PathBuf> {
        let program = self.locate()?;
        let path = output_path(output_base, self.format.extension());
        ensure_parent(&path)?;

        let dot = diagrams_for(self.direction, output_base).to_dot(edges);
        debug!(program = %program.display(), output = %path.display(), "running renderer");

        let mut child = Command::new(&program)
            .arg(format!("-T{}", self.format.extension()))
            .arg("-o")
            .arg(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // The child may exit before reading all input; reap it before reporting
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::render(&self.program, message));
        }
        if let Err(e) = written {
            return Err(Error::render(&self.program, format!("could not write input: {}", e)));
        }
        if !path.exists() {
            return Err(Error::render(
                &self.program,
                format!("no output written to {}", path.display()),
            ));
        }

        info!(output = %path.display(), edges = edges.len(), "rendered graph");
        Ok(path)
    }
}

/// Writes DOT or Mermaid text files
pub struct TextRenderer {
    mermaid: bool,
    direction: GraphDirection,
}

impl TextRenderer {
    pub fn dot(direction: GraphDirection) -> Self {
        Self {
            mermaid: false,
            direction,
        }
    }

    pub fn mermaid(direction: GraphDirection) -> Self {
        Self {
            mermaid: true,
            direction,
        }
    }
}

impl GraphRenderer for TextRenderer {
    fn render(&self, edges: &EdgeSet, output_base: &Path) -> Result<PathBuf> {
        let diagrams = diagrams_for(self.direction, output_base);
        let (extension, contents) = if self.mermaid {
            (OutputFormat::Mermaid.extension(), diagrams.to_mermaid(edges))
        } else {
            (OutputFormat::Dot.extension(), diagrams.to_dot(edges))
        };

        let path = output_path(output_base, extension);
        ensure_parent(&path)?;
        std::fs::write(&path, contents)?;

        info!(output = %path.display(), edges = edges.len(), "wrote graph");
        Ok(path)
    }
}

/// Pick the renderer for the configured format
pub fn renderer_for(config: &OutputConfig) -> Box<dyn GraphRenderer> {
    if config.format.is_image() {
        Box::new(GraphvizRenderer::new(&config.renderer, config.format, config.direction))
    } else if config.format == OutputFormat::Mermaid {
        Box::new(TextRenderer::mermaid(config.direction))
    } else {
        Box::new(TextRenderer::dot(config.direction))
    }
}

/// DOT graphs are named after the output file
fn diagrams_for(direction: GraphDirection, output_base: &Path) -> DiagramGenerator {
    let generator = DiagramGenerator::new().with_direction(direction);
    match output_base.file_name().and_then(|n| n.to_str()) {
        Some(name) => generator.with_name(name),
        None => generator,
    }
}

/// Append an extension without replacing any dot already in the base name
fn output_path(base: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Edge;
    use tempfile::TempDir;

    fn edges() -> EdgeSet {
        [Edge::new("Animal", "Dog"), Edge::new("Animal", "Cat")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_output_path_appends_extension() {
        assert_eq!(output_path(Path::new("out/graph"), "png"), PathBuf::from("out/graph.png"));
        assert_eq!(output_path(Path::new("graph.v1"), "dot"), PathBuf::from("graph.v1.dot"));
    }

    #[test]
    fn test_dot_renderer_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = TextRenderer::dot(GraphDirection::default())
            .render(&edges(), &dir.path().join("animals"))
            .unwrap();

        assert_eq!(path, dir.path().join("animals.dot"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("digraph \"animals\" {"));
        assert!(contents.contains("\"Animal\" -> \"Dog\";"));
    }

    #[test]
    fn test_mermaid_renderer_creates_directories() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("nested").join("graphs").join("animals");
        let path = TextRenderer::mermaid(GraphDirection::default())
            .render(&edges(), &base)
            .unwrap();

        assert!(path.ends_with("nested/graphs/animals.mmd"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("n_Animal --> n_Cat"));
    }

    #[test]
    fn test_missing_graphviz_program() {
        let dir = TempDir::new().unwrap();
        let renderer = GraphvizRenderer::new(
            "heritage-no-such-renderer",
            OutputFormat::Png,
            GraphDirection::default(),
        );
        let result = renderer.render(&edges(), &dir.path().join("animals"));
        assert!(matches!(result, Err(Error::RendererNotFound { .. })));
        assert!(!dir.path().join("animals.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_that_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let renderer = GraphvizRenderer::new("true", OutputFormat::Png, GraphDirection::default());
        let result = renderer.render(&edges(), &dir.path().join("g"));

        assert!(matches!(result, Err(Error::Render { .. })));
        assert!(!dir.path().join("g.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_exiting_early_on_large_graph() {
        let dir = TempDir::new().unwrap();
        let large: EdgeSet = (0..20_000)
            .map(|i| Edge::new("Base", &format!("Child{}", i)))
            .collect();
        let renderer = GraphvizRenderer::new("true", OutputFormat::Png, GraphDirection::default());

        let result = renderer.render(&large, &dir.path().join("g"));
        assert!(matches!(result, Err(Error::Render { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_failure_status() {
        let dir = TempDir::new().unwrap();
        let renderer = GraphvizRenderer::new("false", OutputFormat::Svg, GraphDirection::default());
        match renderer.render(&edges(), &dir.path().join("g")) {
            Err(Error::Render { program, message }) => {
                assert_eq!(program, "false");
                assert!(message.contains("exited with"));
            }
            other => panic!("expected render error, got {:?}", other),
        }
    }

    #[test]
    fn test_renderer_for_image_formats() {
        let config = OutputConfig {
            format: OutputFormat::Svg,
            renderer: "heritage-no-such-renderer".to_string(),
            ..OutputConfig::default()
        };
        let dir = TempDir::new().unwrap();
        let result = renderer_for(&config).render(&edges(), &dir.path().join("g"));
        assert!(matches!(result, Err(Error::RendererNotFound { .. })));
    }

    #[test]
    fn test_renderer_for_text_formats() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            format: OutputFormat::Mermaid,
            ..OutputConfig::default()
        };
        let path = renderer_for(&config).render(&edges(), &dir.path().join("g")).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mmd"));
    }
}
