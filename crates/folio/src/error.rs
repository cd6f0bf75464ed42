//! CLI error types.

use std::path::PathBuf;

use folio_config::ConfigError;
use folio_content::ContentError;
use folio_nav::{LoadError, ValidationError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{}: {source}", path.display())]
    Sidebars {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Usage(String),
}
