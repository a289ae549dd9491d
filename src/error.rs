//! Error types surfaced while packing an asset catalog.

use std::path::PathBuf;

/// Errors that can abort catalog or accessor generation.
#[derive(Debug)]
pub enum PackError {
    /// A filesystem operation failed, or a destination is already occupied
    /// and overwriting was not requested.
    Io {
        /// Description of the failed operation.
        message: String,
        /// Underlying I/O error, absent for precondition failures such as an
        /// existing destination.
        source: Option<std::io::Error>,
    },
    /// The configuration document could not be parsed.
    InvalidConfiguration {
        /// Path of the configuration file.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
    /// Two sibling image sets derived the same Swift property name.
    DuplicateIdentifier {
        /// The derived property name.
        name: String,
        /// Name of the second group that produced the colliding property.
        source_name: String,
    },
}

impl PackError {
    /// Wrap an I/O error with a description of the failed operation.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// An I/O precondition failure with no underlying OS error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }
}

impl std::fmt::Display for PackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                message,
                source: Some(source),
            } => write!(f, "{message}: {source}"),
            Self::Io {
                message,
                source: None,
            } => write!(f, "{message}"),
            Self::InvalidConfiguration { path, source } => {
                write!(f, "failed to parse configuration {}: {}", path.display(), source)
            }
            Self::DuplicateIdentifier { name, source_name } => {
                write!(
                    f,
                    "duplicate Swift property `{name}` derived from `{source_name}`"
                )
            }
        }
    }
}

impl std::error::Error for PackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io {
                source: Some(source),
                ..
            } => Some(source),
            Self::Io { source: None, .. } => None,
            Self::InvalidConfiguration { source, .. } => Some(source),
            Self::DuplicateIdentifier { .. } => None,
        }
    }
}
