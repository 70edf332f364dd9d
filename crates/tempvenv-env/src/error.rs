//! Error taxonomy for the session lifecycle.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while opening, using or closing a [`crate::TempVenv`].
#[derive(Debug, Error)]
pub enum VenvError {
    /// Invalid caller configuration (explicit interpreter, backend name, unreadable requirements file).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No usable base interpreter was found.
    #[error("no usable Python interpreter found (tried: {})", tried.join(", "))]
    EnvironmentResolution { tried: Vec<String> },

    /// Environment creation failed; the root directory has been removed.
    #[error("Error during virtual environment setup: environment creation failed in {}: {diagnostics}", root.display())]
    Provisioning { root: PathBuf, diagnostics: String },

    /// Package installation failed; the root directory has been removed.
    #[error("Error during virtual environment setup: failed to install {}: {diagnostics}", packages.join(" "))]
    Installation {
        packages: Vec<String>,
        diagnostics: String,
    },

    /// The single-use session contract was violated.
    #[error("usage error: {0}")]
    Usage(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Discriminant of [`VenvError`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvErrorKind {
    Configuration,
    EnvironmentResolution,
    Provisioning,
    Installation,
    Usage,
    Io,
}

impl VenvError {
    pub fn kind(&self) -> VenvErrorKind {
        match self {
            Self::Configuration(_) => VenvErrorKind::Configuration,
            Self::EnvironmentResolution { .. } => VenvErrorKind::EnvironmentResolution,
            Self::Provisioning { .. } => VenvErrorKind::Provisioning,
            Self::Installation { .. } => VenvErrorKind::Installation,
            Self::Usage(_) => VenvErrorKind::Usage,
            Self::Io { .. } => VenvErrorKind::Io,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VenvError>;
