use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum AppError {
    #[error("TOML config file error: {0}")]
    TomlConfig(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {path:?}: {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid search term: {0:?}")]
    InvalidSearchTerm(String),

    #[error("Validation percentage must be within 0..=100, got {0}")]
    InvalidPercentage(u8),

    #[error("Search term {term:?} has no directory at {path:?}")]
    MissingTermDirectory { term: String, path: PathBuf },

    #[error("Refusing to overwrite existing path: {0:?}")]
    DestinationExists(PathBuf),

    #[error("Image acquisition failed: {0}")]
    Acquisition(String),

    #[error("Partitioning stopped, {root:?} may hold a mix of moved and unmoved files")]
    PartitionIncomplete {
        root: PathBuf,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Build a closure that attaches `path` to an `io::Error`, for use with `map_err`.
    pub(crate) fn at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| AppError::PathIo { path, source }
    }
}

/// Result type with default AppError
pub type Result<T, E = AppError> = std::result::Result<T, E>;
