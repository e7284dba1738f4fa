use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "heritage.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// File discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan, without the leading dot
    pub extensions: Vec<String>,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Glob patterns, relative to the scanned directory, to skip
    pub exclude: Vec<String>,
}

/// Graph output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: OutputFormat,
    /// Base name of the whole-project graph
    pub overview_name: String,
    /// Graphviz program used for image formats
    pub renderer: String,
    pub direction: GraphDirection,
}

/// Output format for rendered graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Dot,
    Mermaid,
}

impl OutputFormat {
    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
            OutputFormat::Mermaid => "mmd",
        }
    }

    /// Whether an external layout program is needed
    pub fn is_image(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Svg)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            other => Err(Error::config_validation(format!("unknown output format: {}", other))),
        }
    }
}

/// Layout direction of rendered graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GraphDirection {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl GraphDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            GraphDirection::TopToBottom => "TB",
            GraphDirection::LeftToRight => "LR",
            GraphDirection::BottomToTop => "BT",
            GraphDirection::RightToLeft => "RL",
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["py".to_string()],
            recursive: false,
            follow_links: false,
            exclude: vec![],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: OutputFormat::default(),
            overview_name: "class_hierarchy".to_string(),
            renderer: "dot".to_string(),
            direction: GraphDirection::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is absent
    ///
    /// A file that exists but is invalid is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        format: Option<OutputFormat>,
        exclude: Vec<String>,
        extensions: Vec<String>,
        recursive: bool,
    ) {
        if let Some(out) = output {
            self.output.directory = out;
        }

        if let Some(fmt) = format {
            self.output.format = fmt;
        }

        if !exclude.is_empty() {
            self.scan.exclude.extend(exclude);
        }

        if !extensions.is_empty() {
            self.scan.extensions = extensions;
        }

        if recursive {
            self.scan.recursive = true;
        }

        self.normalize();
    }

    /// Strip leading dots from extensions
    fn normalize(&mut self) {
        for ext in &mut self.scan.extensions {
            *ext = ext.trim_start_matches('.').to_string();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(Error::config_validation("at least one extension required"));
        }

        if self.scan.extensions.iter().any(|e| e.is_empty()) {
            return Err(Error::config_validation("extensions cannot be empty"));
        }

        if self.output.renderer.trim().is_empty() {
            return Err(Error::config_validation("renderer program cannot be empty"));
        }

        if self.output.overview_name.trim().is_empty() {
            return Err(Error::config_validation("overview_name cannot be empty"));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}
