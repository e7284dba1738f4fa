use std::path::PathBuf;
use thiserror::Error;

/// Heritage error types
///
/// Extraction itself never fails; these cover file access, configuration
/// and graph rendering.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Graph renderer not found: {program}")]
    RendererNotFound { program: String },

    #[error("Rendering with {program} failed: {message}")]
    Render { program: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Heritage operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a render error
    pub fn render(program: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Render {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_path_not_found_display() {
        let err = Error::PathNotFound(PathBuf::from("/some/path"));
        assert_eq!(err.to_string(), "Path not found: /some/path");
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("at least one extension required");
        assert_eq!(
            err.to_string(),
            "Config validation error: at least one extension required"
        );
    }

    #[test]
    fn test_renderer_errors() {
        let err = Error::RendererNotFound {
            program: "dot".to_string(),
        };
        assert_eq!(err.to_string(), "Graph renderer not found: dot");

        let err = Error::render("dot", "syntax error in line 1");
        assert_eq!(err.to_string(), "Rendering with dot failed: syntax error in line 1");
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
