// Analysis module: scanning a directory and building the project model

pub mod graph;
pub mod project;

pub use graph::*;
pub use project::*;

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::parser::{extract_from_source, ClassRecord};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Result of scanning a directory
#[derive(Debug)]
pub struct AnalysisResult {
    /// Linked model of every class found
    pub project: ProjectModel,
    /// Files that were read and scanned
    pub files_scanned: Vec<PathBuf>,
    /// Files that could not be read (path -> error message)
    pub read_errors: BTreeMap<PathBuf, String>,
}

/// Drives file discovery and extraction
pub struct Analyzer {
    config: ScanConfig,
    exclude: Vec<Pattern>,
    verbose: bool,
}

impl Analyzer {
    /// Create a new analyzer, compiling the exclude patterns
    pub fn new(config: ScanConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            exclude,
            verbose: false,
        })
    }

    /// Show a progress bar while scanning
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Scan a directory and assemble the project model
    pub fn analyze(&self, root: &Path) -> Result<AnalysisResult> {
        let files = self.discover_files(root)?;
        info!(root = %root.display(), files = files.len(), "scanning");

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut records: Vec<ClassRecord> = Vec::new();
        let mut files_scanned = Vec::new();
        let mut read_errors = BTreeMap::new();

        for path in files {
            if let Some(ref pb) = progress {
                let msg = path.file_name().unwrap_or_default().to_string_lossy().to_string();
                pb.set_message(msg);
                pb.inc(1);
            }

            match self.extract_file(&path) {
                Ok(classes) => {
                    debug!(file = %path.display(), classes = classes.len(), "extracted");
                    records.extend(classes);
                    files_scanned.push(path);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable file");
                    read_errors.insert(path, e.to_string());
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Scan complete");
        }

        Ok(AnalysisResult {
            project: ProjectModel::from_records(records),
            files_scanned,
            read_errors,
        })
    }

    /// Read one file and extract its classes
    pub fn extract_file(&self, path: &Path) -> Result<Vec<ClassRecord>> {
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes);
        Ok(extract_from_source(&source))
    }

    /// Source files under `root`, sorted by path
    pub fn discover_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(self.config.follow_links)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "skipping directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.has_source_extension(path) || self.should_exclude(path, root) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.extensions.iter().any(|wanted| wanted == ext))
    }

    /// Match exclude patterns against the relative path and the file name
    fn should_exclude(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let file_name = path.file_name().map(Path::new);

        self.exclude.iter().any(|pattern| {
            pattern.matches_path(relative) || file_name.is_some_and(|name| pattern.matches_path(name))
        })
    }
}
