//! Interactive query shell over a scanned project

use crate::analysis::{GraphBuilder, ProjectModel};
use crate::error::Result;
use crate::output::GraphRenderer;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

const PROMPT: &str = ">> ";

const HELP: &str = "\
Commands:
  class <name>                 show a class
  graph <name...> <output>     render the named classes and their subclasses
  roots                        list classes whose parent is unknown
  list                         list all classes
  children <name>              list direct subclasses
  ancestors <name>             show the parent chain
  help                         show this message
  quit                         leave the shell";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Class(String),
    /// The last token is the output base name, not a class
    Graph { names: Vec<String>, output_base: String },
    Roots,
    List,
    Children(String),
    Ancestors(String),
    Help,
    Quit,
    Invalid,
}

impl ShellCommand {
    /// Parse one input line; extra arguments to single-argument commands are ignored
    pub fn parse(line: &str) -> Self {
        let args: Vec<&str> = line.split_whitespace().collect();

        match args.as_slice() {
            ["class", name, ..] => ShellCommand::Class(name.to_string()),
            ["graph", names @ .., output_base] if !names.is_empty() => ShellCommand::Graph {
                names: names.iter().map(|n| n.to_string()).collect(),
                output_base: output_base.to_string(),
            },
            ["roots", ..] => ShellCommand::Roots,
            ["list", ..] => ShellCommand::List,
            ["children", name, ..] => ShellCommand::Children(name.to_string()),
            ["ancestors", name, ..] => ShellCommand::Ancestors(name.to_string()),
            ["help", ..] => ShellCommand::Help,
            ["quit", ..] => ShellCommand::Quit,
            _ => ShellCommand::Invalid,
        }
    }
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

/// Read-only query loop over a project model
pub struct QueryShell<'a> {
    project: &'a ProjectModel,
    renderer: &'a dyn GraphRenderer,
    output_dir: PathBuf,
}

impl<'a> QueryShell<'a> {
    pub fn new(project: &'a ProjectModel, renderer: &'a dyn GraphRenderer, output_dir: PathBuf) -> Self {
        Self {
            project,
            renderer,
            output_dir,
        }
    }

    /// Prompt, read and execute commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                return Ok(());
            }

            // Undecodable bytes fall through to `Invalid command`
            let line = String::from_utf8_lossy(&buf);
            let command = ShellCommand::parse(&line);
            debug!(?command, "shell command");
            if self.execute(&command, out)? == ShellFlow::Quit {
                return Ok(());
            }
        }
    }

    /// Execute a single command, writing its output
    pub fn execute<W: Write>(&self, command: &ShellCommand, out: &mut W) -> Result<ShellFlow> {
        match command {
            ShellCommand::Class(name) => match self.project.get(name) {
                Some(record) => write!(out, "\n{}", record)?,
                None => writeln!(out, "Not found: {}", name)?,
            },
            ShellCommand::Graph { names, output_base } => {
                let edges = GraphBuilder::new(self.project).subset_graph(names.as_slice());
                match self.renderer.render(&edges, &self.output_dir.join(output_base)) {
                    Ok(path) => writeln!(out, "Graph written to {}", path.display())?,
                    Err(e) => {
                        warn!(error = %e, "graph rendering failed");
                        writeln!(out, "Error: {}", e)?;
                    }
                }
            }
            ShellCommand::Roots => {
                for record in self.project.root_classes() {
                    writeln!(out, "{} ({})", record.name, record.parent_name)?;
                }
            }
            ShellCommand::List => {
                for record in self.project.classes() {
                    writeln!(out, "{}", record.name)?;
                }
            }
            ShellCommand::Children(name) => {
                if !self.project.contains(name) {
                    writeln!(out, "Not found: {}", name)?;
                } else {
                    for child in self.project.children_of(name) {
                        writeln!(out, "{}", child.name)?;
                    }
                }
            }
            ShellCommand::Ancestors(name) => match self.project.get(name) {
                None => writeln!(out, "Not found: {}", name)?,
                Some(record) => {
                    let mut chain = vec![record.name.as_str()];
                    chain.extend(self.project.ancestors(name).iter().map(|r| r.name.as_str()));
                    let last = chain.last().and_then(|n| self.project.get(n));
                    if let Some(unresolved) = last.filter(|r| r.is_root) {
                        chain.push(&unresolved.parent_name);
                    }
                    writeln!(out, "{}", chain.join(" -> "))?;
                }
            },
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(ShellFlow::Quit),
            ShellCommand::Invalid => writeln!(out, "Invalid command")?,
        }
        Ok(ShellFlow::Continue)
    }
}
