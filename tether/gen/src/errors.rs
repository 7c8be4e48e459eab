//! Error types for the tether generator.

use tether_define::MarkerKind;
use thiserror::Error;

/// Errors that can occur while scanning, planning, or emitting helpers.
///
/// Binding errors always name the action's full type path and, where one is
/// at fault, the field and its marker.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Structural mistake in the action description
    #[error("Invalid binding in '{action}'{}: {reason}", field_context(.field, .marker))]
    InvalidBinding {
        /// Full path of the action type.
        action: String,
        /// Offending field, if the problem is field-specific.
        field: Option<String>,
        /// Marker of the offending field.
        marker: Option<MarkerKind>,
        /// What is wrong.
        reason: String,
    },

    /// The marker is valid but the field's type has no lowering for it
    #[error(
        "Unsupported field type in '{action}' field '{field}' ({marker}): '{ty}' {reason}"
    )]
    UnsupportedFieldType {
        action: String,
        field: String,
        marker: MarkerKind,
        /// Declared Rust type of the field.
        ty: String,
        reason: String,
    },

    /// The file sink rejected a rendered helper
    #[error("Failed to emit helper '{helper}' for '{action}': {source}")]
    EmissionFailure {
        action: String,
        helper: String,
        #[source]
        source: std::io::Error,
    },

    /// Generated tokens are not valid Rust
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// A scanned source file could not be parsed
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    /// A source file or directory could not be read
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid helper suffix configuration.
    ///
    /// The suffix must be alphanumeric so helper names stay valid Rust
    /// identifiers.
    #[error("Invalid helper suffix '{suffix}': {reason}")]
    InvalidHelperSuffix { suffix: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Several actions failed in a keep-going pass
    #[error("{} action(s) failed to generate", .0.len())]
    Failed(Vec<GeneratorError>),
}

impl GeneratorError {
    /// Full path of the action the error is about, if any.
    pub fn action(&self) -> Option<&str> {
        match self {
            GeneratorError::InvalidBinding { action, .. }
            | GeneratorError::UnsupportedFieldType { action, .. }
            | GeneratorError::EmissionFailure { action, .. } => Some(action),
            _ => None,
        }
    }
}

fn field_context(field: &Option<String>, marker: &Option<MarkerKind>) -> String {
    match (field, marker) {
        (Some(field), Some(marker)) => format!(" field '{field}' ({marker})"),
        (Some(field), None) => format!(" field '{field}'"),
        (None, _) => String::new(),
    }
}
