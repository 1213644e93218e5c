/// Top-level vidrank error type.
///
/// All fallible operations in `vidrank-core` return [`Result<T, VidrankError>`](Result).
/// Each variant wraps a domain-specific error enum, allowing callers to
/// match on the error source without losing type information.
#[derive(thiserror::Error, Debug)]
pub enum VidrankError {
    /// A counter handed to the scoring engine was out of domain.
    #[error("Scoring error")]
    Score(#[from] ScoreError),

    /// Error reading or decoding a batch.
    #[error("Ingest error")]
    Ingest(#[from] IngestError),

    /// Error during output rendering (text, Markdown, JSON, CSV).
    #[error("Render error")]
    Render(#[from] RenderError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error")]
    Config(#[from] ConfigError),
}

/// Errors from the scoring engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// A counter was negative, fractional, non-finite, or not a number at all.
    #[error("Invalid input for {field}: {value}")]
    InvalidInput {
        /// Name of the offending counter (`view_count`, `like_count`, ...).
        field: String,
        /// Rendering of the rejected value.
        value: String,
    },
}

impl ScoreError {
    pub fn invalid(field: &str, value: impl std::fmt::Display) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Errors while loading a batch from disk.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    /// Filesystem I/O error reading the batch file.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Batch file is not valid JSON or does not match any known shape.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Batch decoded but contained no usable items.
    #[error("No items in batch: {0}")]
    NoItems(String),
}

/// Errors during the rendering phase.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Report could not be serialized.
    #[error("Serialization error")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem I/O error writing rendered output.
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

/// Errors in vidrank configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias for `Result<T, VidrankError>`.
pub type Result<T> = std::result::Result<T, VidrankError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn wrapper_message_does_not_repeat_source() {
        let err = VidrankError::from(ScoreError::invalid("view_count", -3));
        assert_eq!(err.to_string(), "Scoring error");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("Invalid input for view_count: -3")
        );
    }

    #[test]
    fn io_source_is_kept_out_of_the_message() {
        let err = IngestError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(err.to_string(), "IO error");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("no such file")
        );
    }
}
