use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Keil project file not found: {}", path.display())]
    ProjectFileNotFound { path: PathBuf },

    #[error("Empty target name")]
    EmptyTargetName,

    #[error("Expected exactly one <TargetName>, found {count}")]
    AmbiguousTargetName { count: usize },

    #[error("{}: {source}", path.display())]
    FilesystemAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML Error: {0}")]
    MalformedXml(#[from] roxmltree::Error),
}

impl ConvertError {
    /// Wrap an I/O failure together with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemAccess { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
