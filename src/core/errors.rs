//! Shared error types for the migration

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while turning a legacy time literal into minutes and seconds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The literal is not a number at all (`1.2.3`, `.`)
    #[error("malformed numeral '{literal}'{}", fmt_line(.line))]
    MalformedNumeral {
        literal: String,
        line: Option<usize>,
    },

    /// NaN and infinities have no decimal rendering
    #[error("value {0} cannot be rendered as a decimal numeral")]
    NonFinite(f64),

    /// Durations are never negative
    #[error("negative time value {0}")]
    Negative(f64),

    /// Minute or second digits do not fit the record fields
    #[error("time value '{rendered}' is out of range")]
    OutOfRange { rendered: String },
}

fn fmt_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl ConversionError {
    pub fn malformed(literal: impl Into<String>) -> Self {
        Self::MalformedNumeral {
            literal: literal.into(),
            line: None,
        }
    }

    /// Attach a 1-based source line to a malformed-numeral error
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::MalformedNumeral { literal, .. } => Self::MalformedNumeral {
                literal,
                line: Some(line),
            },
            other => other,
        }
    }
}

/// File-level errors for a migration run.
///
/// Every variant except [`MigrateError::Config`] is scoped to a single target
/// file; the driver records it against that file and moves on to the next.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", .path.display())]
    Encoding { path: PathBuf },

    #[error("Conversion failed in {}: {source}", .path.display())]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConversionError,
    },

    #[error("Configuration error: {message}{}", fmt_config_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },
}

fn fmt_config_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" (file: {})", p.display()))
        .unwrap_or_default()
}

impl MigrateError {
    /// Classify an I/O failure on `path`, splitting out the cases reported
    /// under their own variant.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::InvalidData => Self::Encoding { path },
            _ => Self::Io { path, source: err },
        }
    }

    pub fn conversion(path: impl Into<PathBuf>, source: ConversionError) -> Self {
        Self::Conversion {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Short category name used in structured output.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "not_found",
            Self::Io { .. } => "io",
            Self::Encoding { .. } => "encoding",
            Self::Conversion { .. } => "conversion",
            Self::Config { .. } => "config",
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileNotFound { path }
            | Self::Io { path, .. }
            | Self::Encoding { path }
            | Self::Conversion { path, .. } => Some(path),
            Self::Config { path, .. } => path.as_deref(),
        }
    }

    /// Get the suggested exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 3, // Configuration error
            Self::FileNotFound { .. }
            | Self::Io { .. }
            | Self::Encoding { .. }
            | Self::Conversion { .. } => 1,
        }
    }
}

impl Serialize for MigrateError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("MigrateError", 3)?;
        state.serialize_field("category", self.category())?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("path", &self.path())?;
        state.end()
    }
}

/// Result type alias for file-level operations
pub type Result<T> = std::result::Result<T, MigrateError>;
