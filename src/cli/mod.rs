//! CLI module for Heritage

mod args;
mod shell;

pub use args::{Args, Command, ScanOptions};
pub use shell::{QueryShell, ShellCommand, ShellFlow};

use crate::analysis::{AnalysisResult, Analyzer, GraphBuilder};
use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::renderer_for;
use std::fmt::Write;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.command.verbose());

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

impl Command {
    fn verbose(&self) -> bool {
        match self {
            Command::Scan { options, .. } | Command::Show { options, .. } => options.verbose,
            Command::Version => false,
        }
    }
}

/// Initialize tracing subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Scan {
            path,
            options,
            no_graph,
            no_interactive,
            json,
        } => {
            let cfg = load_config(&options)?;
            let analysis = scan(&path, &cfg, options.verbose)?;
            let project = &analysis.project;

            if json {
                println!("{}", serde_json::to_string_pretty(project)?);
                return Ok(());
            }

            print_summary(&analysis);

            let renderer = renderer_for(&cfg.output);
            if !no_graph {
                let edges = GraphBuilder::new(project).full_graph();
                let base = cfg.output.directory.join(&cfg.output.overview_name);
                match renderer.render(&edges, &base) {
                    Ok(written) => println!("Hierarchy written to: {}", written.display()),
                    Err(e) => eprintln!("Warning: could not draw hierarchy: {}", e),
                }
            }

            if no_interactive {
                return Ok(());
            }

            println!("Type 'help' for commands.");
            let shell = QueryShell::new(project, renderer.as_ref(), cfg.output.directory.clone());
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell.run(stdin.lock(), &mut stdout)
        }

        Command::Show {
            path,
            class,
            options,
        } => {
            let cfg = load_config(&options)?;
            let analysis = scan(&path, &cfg, options.verbose)?;

            match analysis.project.get(&class) {
                Some(record) => {
                    print!("{}", record);
                    Ok(())
                }
                None => Err(Error::other(format!("Not found: {}", class))),
            }
        }

        Command::Version => {
            println!("heritage {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the config file and merge CLI arguments (CLI takes precedence)
fn load_config(options: &ScanOptions) -> Result<Config> {
    let mut cfg = match &options.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    let format = options
        .format
        .as_deref()
        .map(str::parse::<OutputFormat>)
        .transpose()?;

    cfg.merge_cli(
        options.output.clone(),
        format,
        options.exclude.clone(),
        options.extensions.clone(),
        options.recursive,
    );
    cfg.validate()?;

    debug!(
        extensions = ?cfg.scan.extensions,
        recursive = cfg.scan.recursive,
        exclude = ?cfg.scan.exclude,
        output = %cfg.output.directory.display(),
        format = ?cfg.output.format,
        "configuration"
    );

    Ok(cfg)
}

fn scan(path: &Path, cfg: &Config, verbose: bool) -> Result<AnalysisResult> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }

    let analyzer = Analyzer::new(cfg.scan.clone())?.with_verbose(verbose);
    analyzer.analyze(path)
}

fn print_summary(analysis: &AnalysisResult) {
    print!("{}", summary(analysis));
}

/// Scan summary; unreadable files are listed in path order
fn summary(analysis: &AnalysisResult) -> String {
    let stats = analysis.project.stats();
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Scanned {} files: {} classes, {} root classes",
        analysis.files_scanned.len(),
        stats.classes,
        stats.roots
    );

    if !analysis.read_errors.is_empty() {
        let _ = writeln!(text, "\nUnreadable files ({}):", analysis.read_errors.len());
        for (path, err) in analysis.read_errors.iter().take(5) {
            let _ = writeln!(text, "  {}: {}", path.display(), err);
        }
        if analysis.read_errors.len() > 5 {
            let _ = writeln!(text, "  ... and {} more", analysis.read_errors.len() - 5);
        }
    }

    for cycle in analysis.project.cycles() {
        let _ = writeln!(text, "Warning: inheritance cycle between {}", cycle.join(", "));
    }
    text
}
