//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Map class inheritance hierarchies in Python codebases
#[derive(Parser, Debug)]
#[command(name = "heritage")]
#[command(about = "Map class inheritance hierarchies in Python codebases")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Options shared by every command that scans a directory
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScanOptions {
    /// Config file path (defaults to ./heritage.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory rendered graphs are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Graph format (png, svg, dot, mermaid)
    #[arg(long)]
    pub format: Option<String>,

    /// Glob patterns to exclude (can be repeated)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// File extensions to scan (can be repeated)
    #[arg(long = "extension")]
    pub extensions: Vec<String>,

    /// Scan subdirectories too
    #[arg(short, long)]
    pub recursive: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a directory, draw the hierarchy, and start the query shell
    Scan {
        /// Directory to scan
        path: PathBuf,

        #[command(flatten)]
        options: ScanOptions,

        /// Skip drawing the whole-project graph
        #[arg(long)]
        no_graph: bool,

        /// Exit after scanning instead of starting the shell
        #[arg(long)]
        no_interactive: bool,

        /// Print the project model as JSON (implies --no-interactive)
        #[arg(long)]
        json: bool,
    },

    /// Show a single class
    Show {
        /// Directory to scan
        path: PathBuf,

        /// Class name
        class: String,

        #[command(flatten)]
        options: ScanOptions,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults() {
        let args = Args::try_parse_from(["heritage", "scan", "./src"]).unwrap();
        match args.command {
            Command::Scan {
                path,
                options,
                no_graph,
                no_interactive,
                json,
            } => {
                assert_eq!(path, PathBuf::from("./src"));
                assert!(options.config.is_none());
                assert!(options.output.is_none());
                assert!(options.format.is_none());
                assert!(options.extensions.is_empty());
                assert!(!options.recursive);
                assert!(!no_graph);
                assert!(!no_interactive);
                assert!(!json);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_with_options() {
        let args = Args::try_parse_from([
            "heritage", "scan", "./project",
            "--output", "/tmp/graphs",
            "--exclude", "tests/**",
            "--extension", "py",
            "--extension", "pyi",
            "--config", "custom.toml",
            "--format", "dot",
            "--recursive",
            "--no-graph",
            "--no-interactive",
            "--verbose",
        ])
        .unwrap();

        match args.command {
            Command::Scan {
                path,
                options,
                no_graph,
                no_interactive,
                json,
            } => {
                assert_eq!(path, PathBuf::from("./project"));
                assert_eq!(options.output, Some(PathBuf::from("/tmp/graphs")));
                assert_eq!(options.exclude, vec!["tests/**".to_string()]);
                assert_eq!(options.extensions, vec!["py".to_string(), "pyi".to_string()]);
                assert_eq!(options.config, Some(PathBuf::from("custom.toml")));
                assert_eq!(options.format.as_deref(), Some("dot"));
                assert!(options.recursive);
                assert!(options.verbose);
                assert!(no_graph);
                assert!(no_interactive);
                assert!(!json);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_show() {
        let args = Args::try_parse_from(["heritage", "show", "./src", "Dog", "-r"]).unwrap();
        match args.command {
            Command::Show { path, class, options } => {
                assert_eq!(path, PathBuf::from("./src"));
                assert_eq!(class, "Dog");
                assert!(options.recursive);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_show_requires_class() {
        assert!(Args::try_parse_from(["heritage", "show", "./src"]).is_err());
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["heritage", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
    }
}
